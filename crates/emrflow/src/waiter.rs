//! Waiting for a cluster to reach a terminal state
//!
//! Each iteration issues one status query, classifies the first record, and
//! either returns or sleeps for the poll interval. The sleep and the query
//! both race against the cancellation token, and the whole wait can be
//! bounded by a timeout.

use crate::session::ClusterSession;
use emrflow_cloud::{
    CloudError, ClusterControlClient, ClusterId, ClusterState, Result, StateCategory,
    StatusRecord,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// How to wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Pause between status queries
    pub poll_interval: Duration,

    /// Upper bound for the whole wait; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

impl WaitOptions {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(CloudError::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Final state of a cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalOutcome {
    Success { state: ClusterState },
    /// The cluster itself failed; `reason` is the control plane's text verbatim
    Failure { state: ClusterState, reason: String },
}

impl TerminalOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TerminalOutcome::Success { .. })
    }

    pub fn state(&self) -> &ClusterState {
        match self {
            TerminalOutcome::Success { state } | TerminalOutcome::Failure { state, .. } => state,
        }
    }
}

impl fmt::Display for TerminalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalOutcome::Success { state } => write!(f, "succeeded ({})", state),
            TerminalOutcome::Failure { state, reason } if reason.is_empty() => {
                write!(f, "failed ({})", state)
            }
            TerminalOutcome::Failure { state, reason } => {
                write!(f, "failed ({}): {}", state, reason)
            }
        }
    }
}

/// Result of a single status query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    InProgress(ClusterState),
    Terminal(TerminalOutcome),
}

/// Polls a cluster until it stops
pub struct ClusterWaiter {
    client: Arc<dyn ClusterControlClient>,
}

impl ClusterWaiter {
    pub fn new(client: Arc<dyn ClusterControlClient>) -> Self {
        Self { client }
    }

    /// Issue one status query and classify it
    ///
    /// A failed query, or a describe answered with a non-200 status, is a
    /// [`CloudError::PollingTransport`]. It never becomes a cluster failure.
    pub async fn poke(&self, cluster_id: &ClusterId) -> Result<PollStatus> {
        let response = self
            .client
            .describe(cluster_id)
            .await
            .map_err(|e| CloudError::polling(cluster_id, e))?;

        if !response.is_success() {
            return Err(CloudError::polling(
                cluster_id,
                CloudError::ApiError(format!("describe returned HTTP {}", response.http_status)),
            ));
        }

        let record = response
            .records
            .into_iter()
            .next()
            .ok_or_else(|| CloudError::ClusterNotFound(cluster_id.clone()))?;

        classify(cluster_id, record)
    }

    /// Poll until the cluster reaches a terminal state
    ///
    /// Always queries at least once. Returns [`CloudError::Cancelled`] when
    /// `cancel` fires and [`CloudError::Timeout`] when `options.timeout`
    /// elapses; an in-flight query is dropped in both cases.
    pub async fn wait(
        &self,
        cluster_id: &ClusterId,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<TerminalOutcome> {
        options.validate()?;

        let polling = self.poll_until_terminal(cluster_id, options.poll_interval, cancel);
        match options.timeout {
            Some(limit) => tokio::time::timeout(limit, polling).await.map_err(|_| {
                CloudError::Timeout(format!(
                    "cluster {} not terminal after {:?}",
                    cluster_id, limit
                ))
            })?,
            None => polling.await,
        }
    }

    async fn poll_until_terminal(
        &self,
        cluster_id: &ClusterId,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> Result<TerminalOutcome> {
        let mut polls: u64 = 0;

        loop {
            let status = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CloudError::Cancelled(cluster_id.clone())),
                status = self.poke(cluster_id) => status?,
            };
            polls = polls.saturating_add(1);

            match status {
                PollStatus::Terminal(outcome) => {
                    info!(
                        cluster_id = %cluster_id,
                        state = %outcome.state(),
                        polls,
                        "Cluster {}",
                        outcome
                    );
                    return Ok(outcome);
                }
                PollStatus::InProgress(state) => {
                    debug!(cluster_id = %cluster_id, state = %state, polls, "Cluster still in progress");
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CloudError::Cancelled(cluster_id.clone())),
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }
}

fn classify(cluster_id: &ClusterId, record: StatusRecord) -> Result<PollStatus> {
    let state = ClusterState::parse(&record.state);

    match state.category() {
        StateCategory::InProgress => Ok(PollStatus::InProgress(state)),
        StateCategory::Succeeded => Ok(PollStatus::Terminal(TerminalOutcome::Success { state })),
        StateCategory::Failed => Ok(PollStatus::Terminal(TerminalOutcome::Failure {
            state,
            reason: record.reason,
        })),
        StateCategory::Unknown => Err(CloudError::UnexpectedState {
            cluster_id: cluster_id.clone(),
            state: record.state,
        }),
    }
}

impl ClusterSession {
    /// Wait for `cluster_id` using this session's client
    pub async fn wait_for_cluster(
        &self,
        cluster_id: &ClusterId,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<TerminalOutcome> {
        let client = self.client().await?;
        ClusterWaiter::new(client)
            .wait(cluster_id, options, cancel)
            .await
    }
}
