//! Test doubles for the lifecycle capabilities
//!
//! Enabled for this crate's tests and, through the `test-utils` feature,
//! for downstream crates.

use crate::client::{
    ClusterConnector, ClusterControlClient, ClusterId, CreateResponse, DescribeResponse,
};
use crate::credentials::{ConfigStore, CredentialResolver, Credentials};
use crate::error::{CloudError, Result};
use crate::request::{ConfigMap, CreationRequest};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Control client that replays scripted responses and records every call
#[derive(Default)]
pub struct MockClusterClient {
    create_script: Mutex<VecDeque<Result<CreateResponse>>>,
    describe_script: Mutex<VecDeque<Result<DescribeResponse>>>,
    created: Mutex<Vec<CreationRequest>>,
    described: Mutex<Vec<ClusterId>>,
}

impl MockClusterClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create(self, response: CreateResponse) -> Self {
        self.create_script.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_create_error(self, error: CloudError) -> Self {
        self.create_script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_describe(self, response: DescribeResponse) -> Self {
        self.describe_script.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Script one single-record describe response per state
    pub fn with_states(self, states: &[&str]) -> Self {
        for state in states {
            self.describe_script
                .lock()
                .unwrap()
                .push_back(Ok(DescribeResponse::single(*state, "")));
        }
        self
    }

    pub fn with_describe_error(self, error: CloudError) -> Self {
        self.describe_script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn created_requests(&self) -> Vec<CreationRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn describe_calls(&self) -> usize {
        self.described.lock().unwrap().len()
    }

    pub fn described_ids(&self) -> Vec<ClusterId> {
        self.described.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClusterControlClient for MockClusterClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn create(&self, request: &CreationRequest) -> Result<CreateResponse> {
        self.created.lock().unwrap().push(request.clone());
        self.create_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CloudError::ApiError("no scripted create response".into())))
    }

    async fn describe(&self, cluster_id: &ClusterId) -> Result<DescribeResponse> {
        self.described.lock().unwrap().push(cluster_id.clone());
        self.describe_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CloudError::ApiError("no scripted describe response".into())))
    }
}

/// Connector handing out a shared [`MockClusterClient`]
pub struct MockConnector {
    client: Arc<MockClusterClient>,
    connected_with: Mutex<Vec<Credentials>>,
}

impl MockConnector {
    pub fn new(client: Arc<MockClusterClient>) -> Self {
        Self {
            client,
            connected_with: Mutex::new(Vec::new()),
        }
    }

    pub fn connect_calls(&self) -> usize {
        self.connected_with.lock().unwrap().len()
    }

    pub fn last_credentials(&self) -> Option<Credentials> {
        self.connected_with.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ClusterConnector for MockConnector {
    async fn connect(&self, credentials: &Credentials) -> Result<Arc<dyn ClusterControlClient>> {
        self.connected_with.lock().unwrap().push(credentials.clone());
        Ok(self.client.clone())
    }
}

/// Fixed identity → credentials table
#[derive(Default)]
pub struct StaticCredentialResolver {
    entries: HashMap<String, Credentials>,
    calls: AtomicUsize,
}

impl StaticCredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, identity: impl Into<String>, credentials: Credentials) -> Self {
        self.entries.insert(identity.into(), credentials);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialResolver for StaticCredentialResolver {
    async fn resolve(&self, identity: &str) -> Result<Credentials> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .get(identity)
            .cloned()
            .ok_or_else(|| CloudError::ConnectionNotFound(identity.to_string()))
    }
}

/// Fixed identity → base configuration table
#[derive(Default)]
pub struct InMemoryConfigStore {
    entries: HashMap<String, ConfigMap>,
    calls: AtomicUsize,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, identity: impl Into<String>, config: ConfigMap) -> Self {
        self.entries.insert(identity.into(), config);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn base_config(&self, identity: &str) -> Result<ConfigMap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .get(identity)
            .cloned()
            .ok_or_else(|| CloudError::ConnectionNotFound(identity.to_string()))
    }
}
