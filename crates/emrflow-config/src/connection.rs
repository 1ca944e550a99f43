//! Named connections
//!
//! A connections file maps an identity to login, password and a free-form
//! `extra` mapping:
//!
//! ```yaml
//! aws_default:
//!   login: AKIA...
//!   password: ...
//!   extra:
//!     region_name: us-east-1
//! emr_default:
//!   extra:
//!     Name: default_job_flow_name
//!     ReleaseLabel: emr-4.6.0
//! ```
//!
//! `EMRFLOW_CONN_<ID>` holding a JSON connection document overrides the
//! file entry of the same id.

use crate::error::{ConfigError, Result};
use crate::{connection_env_var, find_connections_file};
use emrflow_cloud::ConfigMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// One stored connection
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default)]
    pub login: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub extra: ConfigMap,
}

impl Connection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Typed access to an `extra` value
    pub fn extra_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.extra
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Connections indexed by id
#[derive(Debug, Default)]
pub struct ConnectionStore {
    connections: HashMap<String, Connection>,
    source: Option<PathBuf>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the discovered connections file
    ///
    /// A missing file is not an error: the store starts empty and relies on
    /// `EMRFLOW_CONN_*` overrides.
    pub fn load() -> Result<Self> {
        match find_connections_file() {
            Ok(path) => Self::from_path(path),
            Err(ConfigError::ConnectionsFileNotFound) => {
                tracing::debug!("No connections file found, using environment only");
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Load a specific file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let connections: HashMap<String, Connection> = if is_json {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else if content.trim().is_empty() {
            HashMap::new()
        } else {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        tracing::debug!(
            path = %path.display(),
            count = connections.len(),
            "Loaded connections"
        );

        Ok(Self {
            connections,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn insert(&mut self, id: impl Into<String>, connection: Connection) {
        self.connections.insert(id.into(), connection);
    }

    pub fn with(mut self, id: impl Into<String>, connection: Connection) -> Self {
        self.insert(id, connection);
        self
    }

    /// File the store was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Look up a connection, preferring its environment override
    pub fn get(&self, id: &str) -> Result<Connection> {
        let var = connection_env_var(id);
        if let Ok(document) = std::env::var(&var) {
            tracing::debug!(connection = %id, env = %var, "Using connection from environment");
            return serde_json::from_str(&document).map_err(|e| ConfigError::InvalidConnection {
                id: id.to_string(),
                message: format!("{}: {}", var, e),
            });
        }

        self.connections
            .get(id)
            .cloned()
            .ok_or_else(|| ConfigError::ConnectionNotFound(id.to_string()))
    }
}
