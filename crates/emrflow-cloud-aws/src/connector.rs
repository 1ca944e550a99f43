//! Credentials → EMR client

use crate::client::EmrClient;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_emr::config::{Credentials as AwsCredentials, Region};
use emrflow_cloud::{ClusterConnector, ClusterControlClient, Credentials};
use std::sync::Arc;

/// `extra` key for a temporary session token
pub const SESSION_TOKEN_KEY: &str = "aws_session_token";

/// `extra` key for a custom endpoint (e.g. a local emulator)
pub const ENDPOINT_URL_KEY: &str = "endpoint_url";

const PROVIDER_NAME: &str = "emrflow";

/// Builds [`EmrClient`]s from resolved credentials
#[derive(Debug, Clone, Default)]
pub struct EmrConnector;

impl EmrConnector {
    pub fn new() -> Self {
        Self
    }

    /// Shared SDK configuration for `credentials`
    ///
    /// Static keys are installed only when the full pair is present;
    /// otherwise the SDK's default credential chain applies.
    pub async fn sdk_config(&self, credentials: &Credentials) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some((access_key_id, secret_access_key)) = credentials.key_pair() {
            let session_token = credentials
                .extra
                .get(SESSION_TOKEN_KEY)
                .and_then(|v| v.as_str())
                .map(str::to_string);

            loader = loader.credentials_provider(AwsCredentials::new(
                access_key_id,
                secret_access_key,
                session_token,
                None,
                PROVIDER_NAME,
            ));
        } else {
            tracing::debug!("No access key pair, using the default credential chain");
        }

        if let Some(region) = &credentials.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(endpoint) = credentials
            .extra
            .get(ENDPOINT_URL_KEY)
            .and_then(|v| v.as_str())
        {
            tracing::debug!(endpoint = %endpoint, "Using custom EMR endpoint");
            loader = loader.endpoint_url(endpoint);
        }

        loader.load().await
    }
}

#[async_trait]
impl ClusterConnector for EmrConnector {
    async fn connect(
        &self,
        credentials: &Credentials,
    ) -> emrflow_cloud::Result<Arc<dyn ClusterControlClient>> {
        let config = self.sdk_config(credentials).await;
        tracing::debug!(region = ?config.region(), "Connected EMR client");
        Ok(Arc::new(EmrClient::from_conf(&config)))
    }
}
