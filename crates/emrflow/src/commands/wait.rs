use colored::Colorize;
use emrflow::{CancellationToken, ClusterId, TerminalOutcome, WaitOptions};
use std::time::Duration;

pub async fn handle(
    cluster_id: &str,
    aws_conn: &str,
    interval: u64,
    timeout: Option<u64>,
) -> anyhow::Result<()> {
    let cluster_id = ClusterId::new(cluster_id);
    let mut options = WaitOptions::new(Duration::from_secs(interval));
    if let Some(secs) = timeout {
        options = options.with_timeout(Duration::from_secs(secs));
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, stopping wait");
                cancel.cancel();
            }
        });
    }

    eprintln!(
        "{}",
        format!("Waiting for cluster {}...", cluster_id).yellow()
    );

    let session = super::open_session(aws_conn)?;
    let outcome = session
        .wait_for_cluster(&cluster_id, &options, &cancel)
        .await?;

    match &outcome {
        TerminalOutcome::Success { state } => {
            eprintln!(
                "{}",
                format!("✓ Cluster {} finished ({})", cluster_id, state)
                    .green()
                    .bold()
            );
            Ok(())
        }
        TerminalOutcome::Failure { state, reason } => {
            eprintln!(
                "{}",
                format!("✗ Cluster {} failed ({})", cluster_id, state)
                    .red()
                    .bold()
            );
            if !reason.is_empty() {
                eprintln!("  {}", reason);
            }
            anyhow::bail!("cluster {} {}", cluster_id, outcome)
        }
    }
}
