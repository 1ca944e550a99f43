mod common;

use common::{CONNECTIONS_YAML, TestConnections, session_with};
use emrflow::{
    CancellationToken, CloudError, ClusterId, ClusterState, ConfigMap, TerminalOutcome,
    WaitOptions,
};
use emrflow_cloud::CreateResponse;
use emrflow_cloud::mock::MockClusterClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn overrides(value: serde_json::Value) -> ConfigMap {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

/// Create from the file-backed configuration, then wait for completion
#[tokio::test(start_paused = true)]
async fn test_create_then_wait_until_completed() {
    let connections = TestConnections::new();
    let client = Arc::new(
        MockClusterClient::new()
            .with_create(CreateResponse::ok("j-8989898989", json!({"JobFlowId": "j-8989898989"})))
            .with_states(&["STARTING", "BOOTSTRAPPING", "RUNNING", "COMPLETED"]),
    );
    let (session, connector) = session_with(connections.store(CONNECTIONS_YAML), client.clone());
    let session = session.with_config_identity("emr_default");

    let cluster_id = session
        .create_cluster(&overrides(json!({"Name": "nightly-etl"})))
        .await
        .unwrap();
    assert_eq!(cluster_id, ClusterId::new("j-8989898989"));

    let request = &client.created_requests()[0];
    assert_eq!(request.name, "nightly-etl");
    assert_eq!(request.log_uri, "s3://my-emr-log-bucket/default_job_flow_location");
    assert_eq!(request.tags, vec![json!({"Key": "app", "Value": "analytics"})]);

    let outcome = session
        .wait_for_cluster(
            &cluster_id,
            &WaitOptions::new(Duration::from_secs(10)),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        TerminalOutcome::Success {
            state: ClusterState::Completed
        }
    );
    assert_eq!(client.describe_calls(), 4);

    // Credentials resolved once for both phases
    assert_eq!(connector.connect_calls(), 1);
    let credentials = connector.last_credentials().unwrap();
    assert_eq!(credentials.region.as_deref(), Some("us-east-1"));
    assert_eq!(credentials.key_pair(), Some(("AKIAEXAMPLE", "secret")));
}

/// A rejected create never reaches the waiting phase
#[tokio::test]
async fn test_rejected_create_reports_payload() {
    let connections = TestConnections::new();
    let payload = json!({"Error": {"Code": "ValidationException", "Message": "Invalid InstanceCount"}});
    let client = Arc::new(
        MockClusterClient::new().with_create(CreateResponse::failed(400, payload.clone())),
    );
    let (session, _) = session_with(connections.store(CONNECTIONS_YAML), client.clone());

    let err = emrflow::create_cluster(session, "emr_default", &ConfigMap::new())
        .await
        .unwrap_err();

    match err {
        CloudError::CreationFailed(response) => {
            assert_eq!(response.http_status, 400);
            assert_eq!(response.raw, payload);
            assert!(response.to_string().contains("ValidationException"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(client.describe_calls(), 0);
}

/// Stored configuration lacking a required field fails before any call
#[tokio::test]
async fn test_incomplete_stored_configuration() {
    let connections = TestConnections::new();
    let yaml = r#"
aws_default:
  login: AKIAEXAMPLE
  password: secret
emr_default:
  extra:
    Name: partial
    ReleaseLabel: emr-6.15.0
"#;
    let client = Arc::new(MockClusterClient::new());
    let (session, _) = session_with(connections.store(yaml), client.clone());

    let err = emrflow::create_cluster(session, "emr_default", &ConfigMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CloudError::MissingField(_)));
    assert_eq!(client.create_calls(), 0);
}

/// Connection without an access key pair defers to the default credential chain
#[tokio::test(start_paused = true)]
async fn test_connection_without_keys_uses_default_chain() {
    let connections = TestConnections::new();
    let yaml = r#"
aws_default:
  extra:
    region_name: us-east-1
"#;
    let client = Arc::new(MockClusterClient::new().with_states(&["COMPLETED"]));
    let (session, connector) = session_with(connections.store(yaml), client);

    let outcome = session
        .wait_for_cluster(
            &ClusterId::new("j-1"),
            &WaitOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(connector.connect_calls(), 1);
    let credentials = connector.last_credentials().unwrap();
    assert_eq!(credentials.key_pair(), None);
    assert_eq!(credentials.region.as_deref(), Some("us-east-1"));
}

/// Half of a key pair is a misconfiguration
#[tokio::test]
async fn test_connection_with_half_key_pair() {
    let connections = TestConnections::new();
    let yaml = r#"
aws_default:
  login: AKIAEXAMPLE
"#;
    let client = Arc::new(MockClusterClient::new());
    let (session, connector) = session_with(connections.store(yaml), client);

    let err = session
        .wait_for_cluster(
            &ClusterId::new("j-1"),
            &WaitOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CloudError::AuthenticationFailed(_)));
    assert_eq!(connector.connect_calls(), 0);
}

/// Cluster-API state names are outside the job-flow vocabulary
#[tokio::test(start_paused = true)]
async fn test_wait_rejects_cluster_api_state() {
    let connections = TestConnections::new();
    let client = Arc::new(MockClusterClient::new().with_states(&["STARTING"]).with_describe(
        emrflow_cloud::DescribeResponse::single(
            "TERMINATED_WITH_ERRORS",
            "bootstrap action 1 failed",
        ),
    ));
    let (session, _) = session_with(connections.store(CONNECTIONS_YAML), client.clone());

    let err = session
        .wait_for_cluster(
            &ClusterId::new("j-2"),
            &WaitOptions::new(Duration::from_secs(5)),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CloudError::UnexpectedState { .. }));
    assert_eq!(client.describe_calls(), 2);
}
