//! emrflow cluster control primitives
//!
//! This crate holds everything the cluster lifecycle depends on, expressed as
//! capabilities rather than concrete SDK calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 emrflow (host)                   │
//! │          create_cluster / ClusterWaiter          │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                 emrflow-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │         Capability Abstraction           │   │
//! │  │  trait ClusterControlClient { ... }      │   │
//! │  │  trait CredentialResolver / ConfigStore  │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │   Request    │  │    State     │            │
//! │  │   Builder    │  │  Vocabulary  │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │ emrflow-cloud │ │emrflow-config │
//! │     -aws      │ │ (connections) │
//! └───────────────┘ └───────────────┘
//! ```

pub mod client;
pub mod credentials;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod request;
pub mod state;

// Re-exports
pub use client::{
    ClusterConnector, ClusterControlClient, ClusterId, CreateResponse, DescribeResponse,
    HTTP_OK, StatusRecord,
};
pub use credentials::{ConfigStore, CredentialResolver, Credentials};
pub use error::{CloudError, Result};
pub use request::{ConfigMap, CreationRequest, REQUIRED_FIELDS, merge};
pub use state::{ClusterState, StateCategory};
