//! Credential and configuration lookup
//!
//! Identities are opaque names. What they resolve to is up to the injected
//! [`CredentialResolver`] and [`ConfigStore`].

use crate::error::Result;
use crate::request::ConfigMap;
use async_trait::async_trait;
use std::fmt;

/// Resolves an identity to cloud credentials
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn resolve(&self, identity: &str) -> Result<Credentials>;
}

/// Supplies the stored base configuration for cluster creation
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn base_config(&self, identity: &str) -> Result<ConfigMap>;
}

/// Cloud access credentials
///
/// Without an access key pair the connector falls back to the platform's
/// default credential chain (environment, profile, instance role).
#[derive(Clone, Default)]
pub struct Credentials {
    /// Region to talk to; `None` leaves it to the connector's defaults
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,

    /// Remaining connection attributes
    pub extra: ConfigMap,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            region: None,
            access_key_id: Some(access_key_id.into()),
            secret_access_key: Some(secret_access_key.into()),
            extra: ConfigMap::new(),
        }
    }

    /// The static key pair, when both halves are set
    pub fn key_pair(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

// Secrets stay out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "***"),
            )
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("AKIAEXAMPLE", "super-secret").with_region("us-east-1");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("AKIAEXAMPLE"));
        assert!(debug.contains("us-east-1"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_key_pair_needs_both_halves() {
        assert_eq!(
            Credentials::new("AKIAEXAMPLE", "secret").key_pair(),
            Some(("AKIAEXAMPLE", "secret"))
        );
        assert_eq!(Credentials::default().key_pair(), None);

        let half = Credentials {
            access_key_id: Some("AKIAEXAMPLE".into()),
            ..Credentials::default()
        };
        assert_eq!(half.key_pair(), None);
    }
}
