use emrflow::ClusterSession;
use emrflow_cloud::mock::{MockClusterClient, MockConnector};
use emrflow_config::ConnectionStore;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CONNECTIONS_YAML: &str = r#"
aws_default:
  login: AKIAEXAMPLE
  password: secret
  extra:
    region_name: us-east-1
emr_default:
  extra:
    Name: default_job_flow_name
    LogUri: s3://my-emr-log-bucket/default_job_flow_location
    ReleaseLabel: emr-4.6.0
    Instances:
      InstanceCount: 1
      KeepJobFlowAliveWhenNoSteps: false
      MasterInstanceType: r3.2xlarge
      SlaveInstanceType: r3.2xlarge
      TerminationProtected: false
    Applications:
      - Name: Spark
    VisibleToAllUsers: true
    JobFlowRole: EMR_EC2_DefaultRole
    ServiceRole: EMR_DefaultRole
    Tags:
      - Key: app
        Value: analytics
"#;

pub struct TestConnections {
    pub root: TempDir,
}

impl TestConnections {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    #[allow(dead_code)]
    pub fn store(&self, content: &str) -> Arc<ConnectionStore> {
        let path = self.write("connections.yaml", content);
        Arc::new(ConnectionStore::from_path(path).unwrap())
    }
}

#[allow(dead_code)]
/// Session over a file-backed store with a scripted control plane
pub fn session_with(
    store: Arc<ConnectionStore>,
    client: Arc<MockClusterClient>,
) -> (ClusterSession, Arc<MockConnector>) {
    let connector = Arc::new(MockConnector::new(client));
    let session = ClusterSession::new("aws_default", store.clone(), store, connector.clone());
    (session, connector)
}
