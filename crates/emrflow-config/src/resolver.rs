//! Connection store as credential and configuration source

use crate::connection::{Connection, ConnectionStore};
use crate::error::ConfigError;
use async_trait::async_trait;
use emrflow_cloud::{ConfigMap, ConfigStore, CredentialResolver, Credentials};

const REGION_KEY: &str = "region_name";

impl Connection {
    /// Credentials carried by this connection
    ///
    /// `login`/`password` are the access key pair and `extra.region_name` the
    /// region. Other `extra` keys are passed along untouched. A connection
    /// with neither login nor password leaves authentication to the default
    /// credential chain; one with only half of the pair is rejected.
    pub fn credentials(&self, id: &str) -> emrflow_cloud::Result<Credentials> {
        let (access_key_id, secret_access_key) = match (&self.login, &self.password) {
            (Some(login), Some(password)) => (Some(login.clone()), Some(password.clone())),
            (None, None) => (None, None),
            _ => {
                return Err(emrflow_cloud::CloudError::AuthenticationFailed(format!(
                    "connection '{}' has only one of login/password",
                    id
                )));
            }
        };

        let mut extra = self.extra.clone();
        let region = match extra.remove(REGION_KEY) {
            Some(serde_json::Value::String(region)) => Some(region),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => {
                return Err(ConfigError::InvalidConnection {
                    id: id.to_string(),
                    message: format!("{} must be a string, found {}", REGION_KEY, other),
                }
                .into());
            }
        };

        Ok(Credentials {
            region,
            access_key_id,
            secret_access_key,
            extra,
        })
    }
}

#[async_trait]
impl CredentialResolver for ConnectionStore {
    async fn resolve(&self, identity: &str) -> emrflow_cloud::Result<Credentials> {
        let connection = self.get(identity)?;
        let credentials = connection.credentials(identity)?;
        tracing::debug!(connection = %identity, region = ?credentials.region, "Resolved credentials");
        Ok(credentials)
    }
}

#[async_trait]
impl ConfigStore for ConnectionStore {
    async fn base_config(&self, identity: &str) -> emrflow_cloud::Result<ConfigMap> {
        Ok(self.get(identity)?.extra)
    }
}
