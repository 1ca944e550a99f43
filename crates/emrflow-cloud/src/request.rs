//! Creation request assembly
//!
//! A request is the stored base configuration with caller overrides laid on
//! top. Overrides replace whole top-level values; nested maps are not merged.

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-like mapping from field name to value
pub type ConfigMap = serde_json::Map<String, Value>;

pub const NAME: &str = "Name";
pub const LOG_URI: &str = "LogUri";
pub const RELEASE_LABEL: &str = "ReleaseLabel";
pub const INSTANCES: &str = "Instances";
pub const STEPS: &str = "Steps";
pub const APPLICATIONS: &str = "Applications";
pub const VISIBLE_TO_ALL_USERS: &str = "VisibleToAllUsers";
pub const JOB_FLOW_ROLE: &str = "JobFlowRole";
pub const SERVICE_ROLE: &str = "ServiceRole";
pub const TAGS: &str = "Tags";

/// Fields that must be present after merging
pub const REQUIRED_FIELDS: [&str; 9] = [
    NAME,
    LOG_URI,
    RELEASE_LABEL,
    INSTANCES,
    APPLICATIONS,
    VISIBLE_TO_ALL_USERS,
    JOB_FLOW_ROLE,
    SERVICE_ROLE,
    TAGS,
];

/// Merged, validated cluster creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreationRequest {
    pub name: String,
    pub log_uri: String,
    pub release_label: String,

    /// Instance topology, passed through to the client untouched
    pub instances: Value,

    #[serde(default)]
    pub steps: Vec<Value>,

    pub applications: Vec<Value>,
    pub visible_to_all_users: bool,
    pub job_flow_role: String,
    pub service_role: String,
    pub tags: Vec<Value>,
}

/// Lay `overrides` over a copy of `base`, key by key
pub fn merge(base: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

impl CreationRequest {
    /// Merge `overrides` into `base` and validate the result
    pub fn build(base: &ConfigMap, overrides: &ConfigMap) -> Result<Self> {
        Self::from_config(&merge(base, overrides))
    }

    /// Validate an already merged configuration
    ///
    /// Presence of every required field is checked before any type check,
    /// so a missing field is always reported as [`CloudError::MissingField`].
    /// A `null` value counts as missing.
    pub fn from_config(config: &ConfigMap) -> Result<Self> {
        if let Some(missing) = REQUIRED_FIELDS
            .iter()
            .find(|field| is_absent(config, field))
        {
            return Err(CloudError::MissingField(missing.to_string()));
        }

        let ignored: Vec<&String> = config
            .keys()
            .filter(|k| k.as_str() != STEPS && !REQUIRED_FIELDS.contains(&k.as_str()))
            .collect();
        if !ignored.is_empty() {
            tracing::debug!(?ignored, "Ignoring fields not used for cluster creation");
        }

        let steps = if is_absent(config, STEPS) {
            Vec::new()
        } else {
            array(config, STEPS)?
        };

        Ok(Self {
            name: string(config, NAME)?,
            log_uri: string(config, LOG_URI)?,
            release_label: string(config, RELEASE_LABEL)?,
            instances: object(config, INSTANCES)?,
            steps,
            applications: array(config, APPLICATIONS)?,
            visible_to_all_users: boolean(config, VISIBLE_TO_ALL_USERS)?,
            job_flow_role: string(config, JOB_FLOW_ROLE)?,
            service_role: string(config, SERVICE_ROLE)?,
            tags: array(config, TAGS)?,
        })
    }

    /// The request as the JSON document sent to the control plane
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn is_absent(config: &ConfigMap, field: &str) -> bool {
    config.get(field).is_none_or(Value::is_null)
}

fn invalid(field: &str, expected: &str, found: &Value) -> CloudError {
    CloudError::InvalidField {
        field: field.to_string(),
        reason: format!("expected {}, found {}", expected, type_name(found)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

// Callers have already checked presence
fn field<'a>(config: &'a ConfigMap, field: &str) -> Result<&'a Value> {
    config
        .get(field)
        .ok_or_else(|| CloudError::MissingField(field.to_string()))
}

fn string(config: &ConfigMap, name: &str) -> Result<String> {
    let value = field(config, name)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(name, "string", value))
}

fn boolean(config: &ConfigMap, name: &str) -> Result<bool> {
    let value = field(config, name)?;
    value.as_bool().ok_or_else(|| invalid(name, "boolean", value))
}

fn object(config: &ConfigMap, name: &str) -> Result<Value> {
    let value = field(config, name)?;
    if value.is_object() {
        Ok(value.clone())
    } else {
        Err(invalid(name, "map", value))
    }
}

fn array(config: &ConfigMap, name: &str) -> Result<Vec<Value>> {
    let value = field(config, name)?;
    value
        .as_array()
        .cloned()
        .ok_or_else(|| invalid(name, "list", value))
}
