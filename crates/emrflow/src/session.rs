//! Identity-bound access to the control plane

use emrflow_cloud::{
    CloudError, ClusterConnector, ClusterControlClient, ConfigMap, ConfigStore,
    CredentialResolver, Result,
};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Holds the identities for one unit of work and connects lazily
///
/// Nothing is resolved at construction. The first call that needs the
/// control plane resolves credentials and connects; the client is then
/// reused for every later call on the same session.
pub struct ClusterSession {
    aws_identity: String,
    config_identity: Option<String>,
    resolver: Arc<dyn CredentialResolver>,
    config_store: Arc<dyn ConfigStore>,
    connector: Arc<dyn ClusterConnector>,
    client: OnceCell<Arc<dyn ClusterControlClient>>,
}

impl ClusterSession {
    pub fn new(
        aws_identity: impl Into<String>,
        resolver: Arc<dyn CredentialResolver>,
        config_store: Arc<dyn ConfigStore>,
        connector: Arc<dyn ClusterConnector>,
    ) -> Self {
        Self {
            aws_identity: aws_identity.into(),
            config_identity: None,
            resolver,
            config_store,
            connector,
            client: OnceCell::new(),
        }
    }

    /// Identity of the stored cluster configuration; required for creation
    pub fn with_config_identity(mut self, identity: impl Into<String>) -> Self {
        self.config_identity = Some(identity.into());
        self
    }

    /// Use an already connected client instead of resolving credentials
    pub fn with_client(mut self, client: Arc<dyn ClusterControlClient>) -> Self {
        self.client = OnceCell::new_with(Some(client));
        self
    }

    pub fn aws_identity(&self) -> &str {
        &self.aws_identity
    }

    /// The configuration identity, if one was given and is non-empty
    pub fn config_identity(&self) -> Option<&str> {
        self.config_identity.as_deref().filter(|id| !id.is_empty())
    }

    /// The control client, connecting on first use
    pub async fn client(&self) -> Result<Arc<dyn ClusterControlClient>> {
        self.client
            .get_or_try_init(|| async {
                let credentials = self.resolver.resolve(&self.aws_identity).await?;
                let client = self.connector.connect(&credentials).await?;
                tracing::debug!(
                    identity = %self.aws_identity,
                    client = client.name(),
                    "Connected to control plane"
                );
                Ok::<_, CloudError>(client)
            })
            .await
            .cloned()
    }

    /// Fetch the stored base configuration
    pub async fn base_config(&self) -> Result<ConfigMap> {
        let identity = self
            .config_identity()
            .ok_or(CloudError::MissingConfigurationIdentity)?;
        self.config_store.base_config(identity).await
    }
}
