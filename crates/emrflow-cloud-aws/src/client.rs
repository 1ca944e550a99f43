//! EMR control client

// DescribeJobFlows is deprecated upstream but is the call that reports the
// job-flow execution states the lifecycle understands
#![allow(deprecated)]

use crate::error::AwsError;
use crate::input::JobFlowSections;
use async_trait::async_trait;
use aws_sdk_emr::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_emr::operation::RequestId;
use emrflow_cloud::{
    ClusterControlClient, ClusterId, CreateResponse, CreationRequest, DescribeResponse, HTTP_OK,
    StatusRecord,
};
use serde_json::json;

/// [`ClusterControlClient`] backed by the AWS EMR API
#[derive(Clone, Debug)]
pub struct EmrClient {
    client: aws_sdk_emr::Client,
}

impl EmrClient {
    pub fn new(client: aws_sdk_emr::Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_emr::Client::new(config))
    }
}

#[async_trait]
impl ClusterControlClient for EmrClient {
    fn name(&self) -> &str {
        "aws-emr"
    }

    async fn create(&self, request: &CreationRequest) -> emrflow_cloud::Result<CreateResponse> {
        let sections = JobFlowSections::from_request(request)?;

        tracing::debug!(name = %request.name, release = %request.release_label, "RunJobFlow");

        let result = self
            .client
            .run_job_flow()
            .name(&request.name)
            .log_uri(&request.log_uri)
            .release_label(&request.release_label)
            .instances(sections.instances)
            .set_steps(Some(sections.steps))
            .set_applications(Some(sections.applications))
            .visible_to_all_users(request.visible_to_all_users)
            .job_flow_role(&request.job_flow_role)
            .service_role(&request.service_role)
            .set_tags(Some(sections.tags))
            .send()
            .await;

        match result {
            Ok(output) => {
                let raw = json!({
                    "JobFlowId": output.job_flow_id(),
                    "ClusterArn": output.cluster_arn(),
                    "ResponseMetadata": {
                        "HTTPStatusCode": HTTP_OK,
                        "RequestId": output.request_id(),
                    },
                });
                Ok(CreateResponse {
                    http_status: HTTP_OK,
                    cluster_id: output.job_flow_id().map(ClusterId::from),
                    raw,
                })
            }
            // The service answered: hand the status and payload back so the
            // caller can report it in full
            Err(SdkError::ServiceError(service)) => {
                let status = service.raw().status().as_u16();
                let err = service.err();
                let raw = json!({
                    "Error": {
                        "Code": err.code(),
                        "Message": err.message(),
                    },
                    "ResponseMetadata": {
                        "HTTPStatusCode": status,
                        "RequestId": err.request_id(),
                    },
                });
                Ok(CreateResponse::failed(status, raw))
            }
            Err(e) => Err(AwsError::from(e).into()),
        }
    }

    async fn describe(&self, cluster_id: &ClusterId) -> emrflow_cloud::Result<DescribeResponse> {
        let output = self
            .client
            .describe_job_flows()
            .job_flow_ids(cluster_id.as_str())
            .send()
            .await
            .map_err(AwsError::from)?;

        // A job flow without a reported state keeps an empty state name,
        // which the waiter treats as unexpected rather than as not found
        let records = output
            .job_flows()
            .iter()
            .map(|flow| {
                let detail = flow.execution_status_detail();
                StatusRecord::new(
                    detail
                        .and_then(|d| d.state())
                        .map(|state| state.as_str())
                        .unwrap_or_default(),
                    detail
                        .and_then(|d| d.last_state_change_reason())
                        .unwrap_or_default(),
                )
            })
            .collect();

        Ok(DescribeResponse::ok(records))
    }
}
