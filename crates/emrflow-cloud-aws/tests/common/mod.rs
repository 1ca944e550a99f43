use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use axum::routing::post;
use emrflow_cloud::{ClusterConnector, ClusterControlClient, Credentials};
use emrflow_cloud_aws::EmrConnector;
use emrflow_cloud_aws::connector::ENDPOINT_URL_KEY;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const REQUEST_ID: &str = "a1b2c3d4-0000-4000-8000-000000000001";

/// Local stand-in for the EMR JSON endpoint
///
/// Replies are keyed by operation name taken from `X-Amz-Target`
/// (`ElasticMapReduce.RunJobFlow` → `RunJobFlow`).
#[derive(Clone, Default)]
pub struct EmrStub {
    replies: Arc<Mutex<HashMap<String, (u16, Value)>>>,
    received: Arc<Mutex<Vec<(String, Value)>>>,
}

impl EmrStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, operation: &str, status: u16, body: Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(operation.to_string(), (status, body));
        self
    }

    /// Operation names and JSON bodies received so far
    pub fn received(&self) -> Vec<(String, Value)> {
        self.received.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port and connect an EMR client to it
    pub async fn client(&self) -> Arc<dyn ClusterControlClient> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/", post(handle)).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let credentials = Credentials::new("AKIAEXAMPLE", "secret")
            .with_region("us-east-1")
            .with_extra(ENDPOINT_URL_KEY, json!(format!("http://{}", addr)));
        EmrConnector::new().connect(&credentials).await.unwrap()
    }
}

async fn handle(
    State(stub): State<EmrStub>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(&'static str, &'static str); 2], String) {
    let operation = headers
        .get("x-amz-target")
        .and_then(|v| v.to_str().ok())
        .and_then(|target| target.rsplit('.').next())
        .unwrap_or_default()
        .to_string();
    let request = serde_json::from_slice(&body).unwrap_or(Value::Null);
    stub.received
        .lock()
        .unwrap()
        .push((operation.clone(), request));

    let (status, reply) = stub
        .replies
        .lock()
        .unwrap()
        .get(&operation)
        .cloned()
        .unwrap_or((
            400,
            json!({"__type": "UnknownOperationException", "message": operation}),
        ));

    (
        StatusCode::from_u16(status).unwrap(),
        [
            ("content-type", "application/x-amz-json-1.1"),
            ("x-amzn-requestid", REQUEST_ID),
        ],
        reply.to_string(),
    )
}
