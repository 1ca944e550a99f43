//! Cluster control capability
//!
//! The lifecycle code never talks to a cloud SDK directly. It depends on
//! [`ClusterControlClient`], and obtains one through a [`ClusterConnector`]
//! once credentials have been resolved.

use crate::credentials::Credentials;
use crate::error::Result;
use crate::request::CreationRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// HTTP status the control plane reports for a successful call
pub const HTTP_OK: u16 = 200;

/// Control plane operations needed to create and observe a cluster
#[async_trait]
pub trait ClusterControlClient: Send + Sync {
    /// Returns the client name (e.g., "aws-emr")
    fn name(&self) -> &str;

    /// Submit a cluster creation request
    async fn create(&self, request: &CreationRequest) -> Result<CreateResponse>;

    /// Query the current status of a cluster
    async fn describe(&self, cluster_id: &ClusterId) -> Result<DescribeResponse>;
}

/// Builds a control client from resolved credentials
#[async_trait]
pub trait ClusterConnector: Send + Sync {
    async fn connect(&self, credentials: &Credentials) -> Result<Arc<dyn ClusterControlClient>>;
}

/// Identifier assigned to a cluster by the control plane
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(String);

impl ClusterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClusterId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClusterId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClusterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Response to a create call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    /// HTTP status reported by the control plane
    pub http_status: u16,

    /// Identifier of the new cluster, present on success
    pub cluster_id: Option<ClusterId>,

    /// Full response payload, kept for diagnostics
    pub raw: serde_json::Value,
}

impl CreateResponse {
    pub fn ok(cluster_id: impl Into<ClusterId>, raw: serde_json::Value) -> Self {
        Self {
            http_status: HTTP_OK,
            cluster_id: Some(cluster_id.into()),
            raw,
        }
    }

    pub fn failed(http_status: u16, raw: serde_json::Value) -> Self {
        Self {
            http_status,
            cluster_id: None,
            raw,
        }
    }

    pub fn is_success(&self) -> bool {
        self.http_status == HTTP_OK
    }
}

impl fmt::Display for CreateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} {}", self.http_status, self.raw)
    }
}

/// Response to a describe call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeResponse {
    pub http_status: u16,

    /// Status records, one per matching cluster
    pub records: Vec<StatusRecord>,
}

impl DescribeResponse {
    pub fn ok(records: Vec<StatusRecord>) -> Self {
        Self {
            http_status: HTTP_OK,
            records,
        }
    }

    /// Convenience for the common single-record response
    pub fn single(state: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ok(vec![StatusRecord::new(state, reason)])
    }

    pub fn is_success(&self) -> bool {
        self.http_status == HTTP_OK
    }
}

/// Raw status of one cluster as reported by the control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub state: String,
    pub reason: String,
}

impl StatusRecord {
    pub fn new(state: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            reason: reason.into(),
        }
    }
}
