//! AWS EMR client for emrflow
//!
//! Implements [`emrflow_cloud::ClusterControlClient`] on top of `aws-sdk-emr`.
//!
//! # Example
//!
//! ```ignore
//! use emrflow_cloud::{ClusterConnector, Credentials};
//! use emrflow_cloud_aws::EmrConnector;
//!
//! let credentials = Credentials::new("AKIA...", "...").with_region("us-east-1");
//! let client = EmrConnector::new().connect(&credentials).await?;
//! let status = client.describe(&"j-8989898989".into()).await?;
//! ```

pub mod client;
pub mod connector;
pub mod error;
pub mod input;

pub use client::EmrClient;
pub use connector::EmrConnector;
pub use error::{AwsError, Result};
pub use input::JobFlowSections;
