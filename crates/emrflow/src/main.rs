mod commands;

use clap::{Parser, Subcommand};
use emrflow_config::{DEFAULT_AWS_CONNECTION, DEFAULT_EMR_CONNECTION};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "emrflow")]
#[command(about = "Create EMR clusters from stored configuration and wait for them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a cluster and print its id
    Create {
        /// Connection holding AWS credentials
        #[arg(long = "aws-conn", default_value = DEFAULT_AWS_CONNECTION)]
        aws_conn: String,
        /// Connection holding the base cluster configuration
        #[arg(long = "emr-conn", default_value = DEFAULT_EMR_CONNECTION)]
        emr_conn: String,
        /// Overrides as a JSON object
        #[arg(long, conflicts_with = "overrides_file")]
        overrides: Option<String>,
        /// Overrides read from a JSON file
        #[arg(long = "overrides-file")]
        overrides_file: Option<PathBuf>,
    },
    /// Wait for a cluster to finish
    Wait {
        /// Cluster id (j-XXXXXXXX)
        cluster_id: String,
        /// Connection holding AWS credentials
        #[arg(long = "aws-conn", default_value = DEFAULT_AWS_CONNECTION)]
        aws_conn: String,
        /// Seconds between status checks
        #[arg(short, long, default_value = "60")]
        interval: u64,
        /// Give up after this many seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries cluster ids
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Version => {
            println!("emrflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Create {
            aws_conn,
            emr_conn,
            overrides,
            overrides_file,
        } => {
            commands::create::handle(
                &aws_conn,
                &emr_conn,
                overrides.as_deref(),
                overrides_file.as_deref(),
            )
            .await
        }
        Commands::Wait {
            cluster_id,
            aws_conn,
            interval,
            timeout,
        } => commands::wait::handle(&cluster_id, &aws_conn, interval, timeout).await,
    }
}
