//! Cluster creation

use crate::session::ClusterSession;
use emrflow_cloud::{CloudError, ClusterId, ConfigMap, CreationRequest, Result};
use tracing::info;

impl ClusterSession {
    /// Create a cluster from the stored configuration plus `overrides`
    ///
    /// Issues exactly one create call and never retries. Any status other
    /// than 200, or a 200 without an identifier, is
    /// [`CloudError::CreationFailed`] carrying the full response.
    pub async fn create_cluster(&self, overrides: &ConfigMap) -> Result<ClusterId> {
        // Checked before anything touches the network
        if self.config_identity().is_none() {
            return Err(CloudError::MissingConfigurationIdentity);
        }

        let client = self.client().await?;
        let base = self.base_config().await?;
        let request = CreationRequest::build(&base, overrides)?;

        info!(
            name = %request.name,
            release = %request.release_label,
            client = client.name(),
            "Creating cluster"
        );
        let response = client.create(&request).await?;

        match response.cluster_id.clone() {
            Some(cluster_id) if response.is_success() => {
                info!(cluster_id = %cluster_id, "Cluster created");
                Ok(cluster_id)
            }
            _ => Err(CloudError::CreationFailed(Box::new(response))),
        }
    }
}

/// Create a cluster for the given identities
///
/// Convenience over [`ClusterSession::create_cluster`] for one-shot callers.
pub async fn create_cluster(
    session: ClusterSession,
    config_identity: &str,
    overrides: &ConfigMap,
) -> Result<ClusterId> {
    session
        .with_config_identity(config_identity)
        .create_cluster(overrides)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use emrflow_cloud::mock::{
        InMemoryConfigStore, MockClusterClient, MockConnector, StaticCredentialResolver,
    };
    use emrflow_cloud::{CreateResponse, Credentials};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn map(value: Value) -> ConfigMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    fn emr_default() -> ConfigMap {
        map(json!({
            "Name": "default_job_flow_name",
            "LogUri": "s3://my-emr-log-bucket/default_job_flow_location",
            "ReleaseLabel": "emr-4.6.0",
            "Instances": {"InstanceCount": 1, "MasterInstanceType": "r3.2xlarge"},
            "Applications": [{"Name": "Spark"}],
            "VisibleToAllUsers": true,
            "JobFlowRole": "EMR_EC2_DefaultRole",
            "ServiceRole": "EMR_DefaultRole",
            "Tags": []
        }))
    }

    struct Fixture {
        client: Arc<MockClusterClient>,
        resolver: Arc<StaticCredentialResolver>,
        store: Arc<InMemoryConfigStore>,
        connector: Arc<MockConnector>,
    }

    impl Fixture {
        fn new(client: MockClusterClient) -> Self {
            let client = Arc::new(client);
            Self {
                connector: Arc::new(MockConnector::new(client.clone())),
                client,
                resolver: Arc::new(
                    StaticCredentialResolver::new()
                        .with("aws_default", Credentials::new("key", "secret")),
                ),
                store: Arc::new(InMemoryConfigStore::new().with("emr_default", emr_default())),
            }
        }

        fn session(&self) -> ClusterSession {
            ClusterSession::new(
                "aws_default",
                self.resolver.clone(),
                self.store.clone(),
                self.connector.clone(),
            )
        }
    }

    #[tokio::test]
    async fn test_create_returns_cluster_id() {
        let fixture = Fixture::new(
            MockClusterClient::new().with_create(CreateResponse::ok("j-X", json!({}))),
        );

        let overrides = map(json!({"Name": "nightly"}));
        let id = create_cluster(fixture.session(), "emr_default", &overrides)
            .await
            .unwrap();

        assert_eq!(id, ClusterId::new("j-X"));
        assert_eq!(fixture.client.create_calls(), 1);
        let sent = &fixture.client.created_requests()[0];
        assert_eq!(sent.name, "nightly");
        assert_eq!(sent.release_label, "emr-4.6.0");
        assert!(sent.steps.is_empty());
    }

    #[tokio::test]
    async fn test_non_200_is_creation_failed_with_payload() {
        let payload = json!({"Error": {"Code": "ValidationException", "Message": "bad subnet"}});
        let fixture = Fixture::new(
            MockClusterClient::new().with_create(CreateResponse::failed(400, payload.clone())),
        );

        let err = create_cluster(fixture.session(), "emr_default", &ConfigMap::new())
            .await
            .unwrap_err();

        match err {
            CloudError::CreationFailed(response) => {
                assert_eq!(response.http_status, 400);
                assert_eq!(response.raw, payload);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(fixture.client.create_calls(), 1);
        assert_eq!(fixture.client.describe_calls(), 0);
    }

    #[tokio::test]
    async fn test_200_without_id_is_creation_failed() {
        let fixture = Fixture::new(MockClusterClient::new().with_create(CreateResponse {
            http_status: 200,
            cluster_id: None,
            raw: json!({"JobFlowId": null}),
        }));

        let err = create_cluster(fixture.session(), "emr_default", &ConfigMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CloudError::CreationFailed(_)));
    }

    #[tokio::test]
    async fn test_missing_config_identity_touches_nothing() {
        let fixture = Fixture::new(MockClusterClient::new());

        let err = fixture
            .session()
            .create_cluster(&ConfigMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CloudError::MissingConfigurationIdentity));
        assert_eq!(fixture.resolver.calls(), 0);
        assert_eq!(fixture.connector.connect_calls(), 0);
        assert_eq!(fixture.store.calls(), 0);
        assert_eq!(fixture.client.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_field_sends_nothing() {
        let fixture = Fixture::new(MockClusterClient::new());

        let overrides = map(json!({"LogUri": null}));
        let err = create_cluster(fixture.session(), "emr_default", &overrides)
            .await
            .unwrap_err();

        assert!(matches!(err, CloudError::MissingField(f) if f == "LogUri"));
        assert_eq!(fixture.client.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let fixture = Fixture::new(
            MockClusterClient::new().with_create_error(CloudError::ApiError("timed out".into())),
        );

        let err = create_cluster(fixture.session(), "emr_default", &ConfigMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CloudError::ApiError(_)));
        assert_eq!(fixture.client.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_config_identity() {
        let fixture = Fixture::new(MockClusterClient::new());

        let err = create_cluster(fixture.session(), "emr_missing", &ConfigMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CloudError::ConnectionNotFound(id) if id == "emr_missing"));
        assert_eq!(fixture.client.create_calls(), 0);
    }
}
