use emrflow_cloud::CloudError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Connections file not found. Looked in:\n\
        - current directory: connections.local.yaml, connections.yaml, connections.json\n\
        - ./.emrflow/ directory\n\
        - ~/.config/emrflow/connections.yaml\n\
        Set EMRFLOW_CONNECTIONS_PATH to point at a file directly"
    )]
    ConnectionsFileNotFound,

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Invalid connection '{id}': {message}")]
    InvalidConnection { id: String, message: String },

    #[error("Failed to parse {path}\nReason: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CloudError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ConnectionNotFound(id) => CloudError::ConnectionNotFound(id),
            ConfigError::Io(e) => CloudError::Io(e),
            other => CloudError::InvalidConfig(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
