//! Typed views of the `UpdatePolicy` and `CreationPolicy` resource attributes.
//!
//! The attributes are stored raw on every resource; these structs are decoded
//! on demand through [`ResourceAttributes::update_policy`] and
//! [`ResourceAttributes::creation_policy`].
//!
//! [`ResourceAttributes::update_policy`]: crate::ResourceAttributes::update_policy
//! [`ResourceAttributes::creation_policy`]: crate::ResourceAttributes::creation_policy

use forma_value::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdatePolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling_replacing_update: Option<AutoScalingReplacingUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling_rolling_update: Option<AutoScalingRollingUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling_scheduled_action: Option<AutoScalingScheduledAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_deploy_lambda_alias_update: Option<CodeDeployLambdaAliasUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_version_upgrade: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_online_resharding: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScalingReplacingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub will_replace: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScalingRollingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_batch_size: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_active_instances_percent: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_instances_in_service: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_successful_instances_percent: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspend_processes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_on_resource_signals: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScalingScheduledAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_unmodified_group_size_properties: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeDeployLambdaAliasUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_allow_traffic_hook: Option<Value>,
    pub application_name: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_allow_traffic_hook: Option<Value>,
    pub deployment_group_name: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreationPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling_creation_policy: Option<AutoScalingCreationPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_signal: Option<ResourceSignal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScalingCreationPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_successful_instances_percent: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceSignal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Value>,
}
