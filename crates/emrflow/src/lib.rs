//! emrflow - launch an EMR cluster from stored configuration and follow it
//!
//! A unit of work runs in two phases:
//!
//! 1. **Creation**: merge the stored base configuration with caller
//!    overrides, validate the result, and issue a single create call.
//! 2. **Waiting**: poll the cluster until it reaches a terminal state,
//!    reporting success or failure.
//!
//! Both phases go through a [`ClusterSession`], which resolves credentials
//! and connects lazily on first use.
//!
//! ```ignore
//! use emrflow::{ClusterSession, WaitOptions, CancellationToken};
//!
//! let session = ClusterSession::new("aws_default", store.clone(), store, connector)
//!     .with_config_identity("emr_default");
//! let cluster_id = session.create_cluster(&overrides).await?;
//! let outcome = session
//!     .wait_for_cluster(&cluster_id, &WaitOptions::default(), &CancellationToken::new())
//!     .await?;
//! ```

pub mod create;
pub mod session;
pub mod waiter;

pub use create::create_cluster;
pub use session::ClusterSession;
pub use waiter::{ClusterWaiter, DEFAULT_POLL_INTERVAL, PollStatus, TerminalOutcome, WaitOptions};

pub use emrflow_cloud::{
    CloudError, ClusterId, ClusterState, ConfigMap, CreationRequest, Result,
};
pub use tokio_util::sync::CancellationToken;
