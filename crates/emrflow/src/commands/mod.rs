pub mod create;
pub mod wait;

use emrflow::ClusterSession;
use emrflow_cloud_aws::EmrConnector;
use emrflow_config::ConnectionStore;
use std::sync::Arc;

/// Session backed by the connections file and the AWS EMR client
pub fn open_session(aws_conn: &str) -> anyhow::Result<ClusterSession> {
    let store = Arc::new(ConnectionStore::load()?);
    if let Some(path) = store.source() {
        tracing::debug!(path = %path.display(), "Loaded connections");
    }

    Ok(ClusterSession::new(
        aws_conn,
        store.clone(),
        store,
        Arc::new(EmrConnector::new()),
    ))
}
