pub mod connection;
pub mod error;
mod resolver;

pub use connection::{Connection, ConnectionStore};
pub use error::*;

use std::path::PathBuf;

/// Environment variable pointing directly at a connections file
pub const CONNECTIONS_PATH_ENV: &str = "EMRFLOW_CONNECTIONS_PATH";

/// Prefix for per-connection environment overrides (`EMRFLOW_CONN_AWS_DEFAULT`)
pub const CONNECTION_ENV_PREFIX: &str = "EMRFLOW_CONN_";

/// Default identity for cloud credentials
pub const DEFAULT_AWS_CONNECTION: &str = "aws_default";

/// Default identity for cluster creation settings
pub const DEFAULT_EMR_CONNECTION: &str = "emr_default";

const CANDIDATES: [&str; 3] = [
    "connections.local.yaml",
    "connections.yaml",
    "connections.json",
];

/// Locate the connections file
///
/// Search order:
/// 1. `EMRFLOW_CONNECTIONS_PATH`
/// 2. current directory: connections.local.yaml, connections.yaml, connections.json
/// 3. `./.emrflow/` with the same names
/// 4. `~/.config/emrflow/connections.yaml`
pub fn find_connections_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONNECTIONS_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!(path = %path.display(), "{} points at a missing file", CONNECTIONS_PATH_ENV);
    }

    let current_dir = std::env::current_dir()?;

    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    let local_dir = current_dir.join(".emrflow");
    if local_dir.is_dir() {
        for filename in &CANDIDATES {
            let path = local_dir.join(filename);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join("emrflow").join("connections.yaml");
        if global.exists() {
            return Ok(global);
        }
    }

    Err(ConfigError::ConnectionsFileNotFound)
}

/// Environment variable consulted for connection `id`
pub fn connection_env_var(id: &str) -> String {
    format!(
        "{}{}",
        CONNECTION_ENV_PREFIX,
        id.to_uppercase().replace('-', "_")
    )
}
