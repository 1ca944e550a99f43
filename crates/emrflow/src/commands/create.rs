use colored::Colorize;
use emrflow::{CloudError, ConfigMap};
use std::path::Path;

pub async fn handle(
    aws_conn: &str,
    emr_conn: &str,
    overrides: Option<&str>,
    overrides_file: Option<&Path>,
) -> anyhow::Result<()> {
    let overrides = load_overrides(overrides, overrides_file)?;

    eprintln!(
        "{}",
        format!("Creating cluster from '{}'...", emr_conn).yellow()
    );

    let session = super::open_session(aws_conn)?;
    match emrflow::create_cluster(session, emr_conn, &overrides).await {
        Ok(cluster_id) => {
            eprintln!("{}", "✓ Cluster created".green().bold());
            println!("{}", cluster_id);
            Ok(())
        }
        Err(CloudError::CreationFailed(response)) => {
            eprintln!("{}", "✗ Cluster creation failed".red().bold());
            eprintln!("  {}", response);
            Err(CloudError::CreationFailed(response).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn load_overrides(inline: Option<&str>, file: Option<&Path>) -> anyhow::Result<ConfigMap> {
    let text = match (inline, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to read overrides '{}': {}", path.display(), e)
        })?,
        (None, None) => return Ok(ConfigMap::new()),
    };

    let value: serde_json::Value = serde_json::from_str(&text)?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("overrides must be a JSON object, got {}", other),
    }
}
