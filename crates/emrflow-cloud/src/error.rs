//! Cluster lifecycle error types

use crate::client::{ClusterId, CreateResponse};
use thiserror::Error;

/// Errors raised while creating or observing a cluster
#[derive(Error, Debug)]
pub enum CloudError {
    /// A required request field is absent after merging configuration
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("A configuration identity must be present to create a cluster")]
    MissingConfigurationIdentity,

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The control plane answered the create call with a non-200 status
    #[error("Cluster creation failed: {0}")]
    CreationFailed(Box<CreateResponse>),

    /// A status query itself failed; says nothing about the cluster's health
    #[error("Status query for {cluster_id} failed: {source}")]
    PollingTransport {
        cluster_id: ClusterId,
        #[source]
        source: Box<CloudError>,
    },

    #[error("Cluster not found: {0}")]
    ClusterNotFound(ClusterId),

    #[error("Cluster {cluster_id} reported unexpected state: {state}")]
    UnexpectedState { cluster_id: ClusterId, state: String },

    #[error("Wait for cluster {0} was cancelled")]
    Cancelled(ClusterId),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Wrap a failed status query for `cluster_id`
    pub fn polling(cluster_id: &ClusterId, source: CloudError) -> Self {
        CloudError::PollingTransport {
            cluster_id: cluster_id.clone(),
            source: Box::new(source),
        }
    }

    /// Whether retrying the whole operation could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CloudError::PollingTransport { .. } | CloudError::ApiError(_) | CloudError::Timeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
