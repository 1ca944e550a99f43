//! Cluster state vocabulary

use crate::client::StatusRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State reported by the control plane for a cluster
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClusterState {
    Starting,
    Bootstrapping,
    Running,
    Waiting,
    Completed,
    ShuttingDown,
    Failed,
    Terminated,
    /// Anything outside the known vocabulary, kept verbatim
    Unknown(String),
}

/// How the lifecycle treats a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateCategory {
    InProgress,
    Succeeded,
    Failed,
    Unknown,
}

impl ClusterState {
    /// Parse a remote state name; matching is exact
    pub fn parse(raw: &str) -> Self {
        match raw {
            "STARTING" => ClusterState::Starting,
            "BOOTSTRAPPING" => ClusterState::Bootstrapping,
            "RUNNING" => ClusterState::Running,
            "WAITING" => ClusterState::Waiting,
            "COMPLETED" => ClusterState::Completed,
            "SHUTTING_DOWN" => ClusterState::ShuttingDown,
            "FAILED" => ClusterState::Failed,
            "TERMINATED" => ClusterState::Terminated,
            other => ClusterState::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ClusterState::Starting => "STARTING",
            ClusterState::Bootstrapping => "BOOTSTRAPPING",
            ClusterState::Running => "RUNNING",
            ClusterState::Waiting => "WAITING",
            ClusterState::Completed => "COMPLETED",
            ClusterState::ShuttingDown => "SHUTTING_DOWN",
            ClusterState::Failed => "FAILED",
            ClusterState::Terminated => "TERMINATED",
            ClusterState::Unknown(raw) => raw,
        }
    }

    /// SHUTTING_DOWN counts as success regardless of the reason text;
    /// TERMINATED always counts as failure.
    pub fn category(&self) -> StateCategory {
        match self {
            ClusterState::Starting
            | ClusterState::Bootstrapping
            | ClusterState::Running
            | ClusterState::Waiting => StateCategory::InProgress,
            ClusterState::Completed | ClusterState::ShuttingDown => StateCategory::Succeeded,
            ClusterState::Failed | ClusterState::Terminated => StateCategory::Failed,
            ClusterState::Unknown(_) => StateCategory::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.category(), StateCategory::InProgress)
    }
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&StatusRecord> for ClusterState {
    fn from(record: &StatusRecord) -> Self {
        ClusterState::parse(&record.state)
    }
}
