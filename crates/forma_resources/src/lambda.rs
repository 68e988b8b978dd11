//! `AWS::Lambda::*` resources.

use std::collections::BTreeMap;

use forma_template::ResourceProperties;
use forma_value::{Prop, PropList, Value};
use serde::{Deserialize, Serialize};

use crate::tag::Tag;

/// `AWS::Lambda::Function`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Function {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architectures: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Prop<Code>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_signing_config_arn: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_letter_config: Option<Prop<DeadLetterConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Prop<Environment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_concurrent_executions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<PropList<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing_config: Option<Prop<TracingConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_config: Option<Prop<VpcConfig>>,
}

impl ResourceProperties for Function {
    const RESOURCE_TYPE: &'static str = "AWS::Lambda::Function";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Code {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_bucket: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_object_version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_file: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct DeadLetterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_arn: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Environment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Prop<BTreeMap<String, Value>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TracingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct VpcConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Value>,
}

/// `AWS::Lambda::Alias`
///
/// Usually deployed with a `CodeDeployLambdaAliasUpdate` update policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Alias {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    pub function_name: Value,
    pub function_version: Value,
    pub name: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioned_concurrency_config: Option<Prop<ProvisionedConcurrencyConfiguration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_config: Option<Prop<AliasRoutingConfiguration>>,
}

impl ResourceProperties for Alias {
    const RESOURCE_TYPE: &'static str = "AWS::Lambda::Alias";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ProvisionedConcurrencyConfiguration {
    pub provisioned_concurrent_executions: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AliasRoutingConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_version_weights: Option<PropList<VersionWeight>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct VersionWeight {
    pub function_version: Value,
    pub function_weight: Value,
}
