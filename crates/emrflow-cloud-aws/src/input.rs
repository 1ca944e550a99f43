//! JSON-shaped request sections → `RunJobFlow` input types
//!
//! Stored configuration uses the RunJobFlow API field names (`Instances`,
//! `InstanceGroups`, `HadoopJarStep`, ...). Each section is deserialized into
//! a mirror struct first so that a malformed section names the offending
//! field instead of failing inside the service. Mirrors reject keys they do
//! not know: a field that cannot be forwarded fails the request rather than
//! being dropped.

use crate::error::{AwsError, Result};
use aws_sdk_emr::types::{
    ActionOnFailure, Application, Configuration, HadoopJarStepConfig, InstanceGroupConfig,
    InstanceRoleType, JobFlowInstancesConfig, KeyValue, MarketType, PlacementType, StepConfig,
    Tag,
};
use emrflow_cloud::CreationRequest;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// SDK-typed sections of a creation request
#[derive(Debug, Clone)]
pub struct JobFlowSections {
    pub instances: JobFlowInstancesConfig,
    pub steps: Vec<StepConfig>,
    pub applications: Vec<Application>,
    pub tags: Vec<Tag>,
}

impl JobFlowSections {
    pub fn from_request(request: &CreationRequest) -> Result<Self> {
        let instances: InstancesSpec = parse("Instances", &request.instances)?;
        let steps: Vec<StepSpec> = parse_each("Steps", &request.steps)?;
        let applications: Vec<ApplicationSpec> = parse_each("Applications", &request.applications)?;
        let tags: Vec<TagSpec> = parse_each("Tags", &request.tags)?;

        Ok(Self {
            instances: instances.into_sdk()?,
            steps: steps
                .into_iter()
                .enumerate()
                .map(|(i, step)| step.into_sdk(&format!("Steps[{}]", i)))
                .collect::<Result<_>>()?,
            applications: applications
                .into_iter()
                .map(ApplicationSpec::into_sdk)
                .collect(),
            tags: tags.into_iter().map(TagSpec::into_sdk).collect(),
        })
    }
}

fn parse<T: DeserializeOwned>(field: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|e| invalid(field, e))
}

fn parse_each<T: DeserializeOwned>(field: &str, values: &[Value]) -> Result<Vec<T>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| parse(&format!("{}[{}]", field, i), v))
        .collect()
}

fn invalid(field: &str, message: impl std::fmt::Display) -> AwsError {
    AwsError::InvalidRequest {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Enum-valued fields must name a value the API knows
fn known<'a>(field: &str, value: &'a str, values: &[&str]) -> Result<&'a str> {
    if values.contains(&value) {
        Ok(value)
    } else {
        Err(invalid(
            field,
            format!("unknown value `{}`, expected one of {}", value, values.join(", ")),
        ))
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct InstancesSpec {
    master_instance_type: Option<String>,
    slave_instance_type: Option<String>,
    instance_count: Option<i32>,
    #[serde(default)]
    instance_groups: Vec<InstanceGroupSpec>,
    ec2_key_name: Option<String>,
    placement: Option<PlacementSpec>,
    keep_job_flow_alive_when_no_steps: Option<bool>,
    termination_protected: Option<bool>,
    hadoop_version: Option<String>,
    ec2_subnet_id: Option<String>,
    #[serde(default)]
    ec2_subnet_ids: Vec<String>,
    emr_managed_master_security_group: Option<String>,
    emr_managed_slave_security_group: Option<String>,
    service_access_security_group: Option<String>,
    #[serde(default)]
    additional_master_security_groups: Vec<String>,
    #[serde(default)]
    additional_slave_security_groups: Vec<String>,
}

impl InstancesSpec {
    fn into_sdk(self) -> Result<JobFlowInstancesConfig> {
        let groups = self
            .instance_groups
            .into_iter()
            .enumerate()
            .map(|(i, group)| group.into_sdk(&format!("Instances.InstanceGroups[{}]", i)))
            .collect::<Result<Vec<_>>>()?;

        Ok(JobFlowInstancesConfig::builder()
            .set_master_instance_type(self.master_instance_type)
            .set_slave_instance_type(self.slave_instance_type)
            .set_instance_count(self.instance_count)
            .set_instance_groups(non_empty(groups))
            .set_ec2_key_name(self.ec2_key_name)
            .set_placement(self.placement.map(PlacementSpec::into_sdk))
            .set_keep_job_flow_alive_when_no_steps(self.keep_job_flow_alive_when_no_steps)
            .set_termination_protected(self.termination_protected)
            .set_hadoop_version(self.hadoop_version)
            .set_ec2_subnet_id(self.ec2_subnet_id)
            .set_ec2_subnet_ids(non_empty(self.ec2_subnet_ids))
            .set_emr_managed_master_security_group(self.emr_managed_master_security_group)
            .set_emr_managed_slave_security_group(self.emr_managed_slave_security_group)
            .set_service_access_security_group(self.service_access_security_group)
            .set_additional_master_security_groups(non_empty(
                self.additional_master_security_groups,
            ))
            .set_additional_slave_security_groups(non_empty(self.additional_slave_security_groups))
            .build())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct InstanceGroupSpec {
    name: Option<String>,
    market: Option<String>,
    instance_role: String,
    bid_price: Option<String>,
    instance_type: String,
    instance_count: i32,
    #[serde(default)]
    configurations: Vec<ConfigurationSpec>,
    custom_ami_id: Option<String>,
}

impl InstanceGroupSpec {
    fn into_sdk(self, field: &str) -> Result<InstanceGroupConfig> {
        let role = known(
            &format!("{}.InstanceRole", field),
            &self.instance_role,
            InstanceRoleType::values(),
        )?;
        let market = match self.market.as_deref() {
            Some(market) => Some(MarketType::from(known(
                &format!("{}.Market", field),
                market,
                MarketType::values(),
            )?)),
            None => None,
        };

        Ok(InstanceGroupConfig::builder()
            .set_name(self.name)
            .set_market(market)
            .instance_role(InstanceRoleType::from(role))
            .set_bid_price(self.bid_price)
            .instance_type(self.instance_type)
            .instance_count(self.instance_count)
            .set_configurations(non_empty(
                self.configurations
                    .into_iter()
                    .map(ConfigurationSpec::into_sdk)
                    .collect(),
            ))
            .set_custom_ami_id(self.custom_ami_id)
            .build())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct ConfigurationSpec {
    classification: Option<String>,
    #[serde(default)]
    configurations: Vec<ConfigurationSpec>,
    properties: Option<HashMap<String, String>>,
}

impl ConfigurationSpec {
    fn into_sdk(self) -> Configuration {
        Configuration::builder()
            .set_classification(self.classification)
            .set_configurations(non_empty(
                self.configurations
                    .into_iter()
                    .map(ConfigurationSpec::into_sdk)
                    .collect(),
            ))
            .set_properties(self.properties)
            .build()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct PlacementSpec {
    availability_zone: Option<String>,
    #[serde(default)]
    availability_zones: Vec<String>,
}

impl PlacementSpec {
    fn into_sdk(self) -> PlacementType {
        PlacementType::builder()
            .set_availability_zone(self.availability_zone)
            .set_availability_zones(non_empty(self.availability_zones))
            .build()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct StepSpec {
    name: String,
    action_on_failure: Option<String>,
    hadoop_jar_step: HadoopJarStepSpec,
}

impl StepSpec {
    fn into_sdk(self, field: &str) -> Result<StepConfig> {
        let action = match self.action_on_failure.as_deref() {
            Some(action) => Some(ActionOnFailure::from(known(
                &format!("{}.ActionOnFailure", field),
                action,
                ActionOnFailure::values(),
            )?)),
            None => None,
        };

        Ok(StepConfig::builder()
            .name(self.name)
            .set_action_on_failure(action)
            .hadoop_jar_step(self.hadoop_jar_step.into_sdk())
            .build())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct HadoopJarStepSpec {
    #[serde(default)]
    properties: Vec<KeyValueSpec>,
    jar: String,
    main_class: Option<String>,
    #[serde(default)]
    args: Vec<String>,
}

impl HadoopJarStepSpec {
    fn into_sdk(self) -> HadoopJarStepConfig {
        let properties: Vec<KeyValue> = self
            .properties
            .into_iter()
            .map(|p| KeyValue::builder().set_key(p.key).set_value(p.value).build())
            .collect();

        HadoopJarStepConfig::builder()
            .set_properties(non_empty(properties))
            .jar(self.jar)
            .set_main_class(self.main_class)
            .set_args(non_empty(self.args))
            .build()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct KeyValueSpec {
    key: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct ApplicationSpec {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    args: Vec<String>,
    additional_info: Option<HashMap<String, String>>,
}

impl ApplicationSpec {
    fn into_sdk(self) -> Application {
        Application::builder()
            .set_name(self.name)
            .set_version(self.version)
            .set_args(non_empty(self.args))
            .set_additional_info(self.additional_info)
            .build()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct TagSpec {
    key: Option<String>,
    value: Option<String>,
}

impl TagSpec {
    fn into_sdk(self) -> Tag {
        Tag::builder().set_key(self.key).set_value(self.value).build()
    }
}
