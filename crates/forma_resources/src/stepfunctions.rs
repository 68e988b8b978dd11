//! `AWS::StepFunctions::*` resources.

use std::collections::BTreeMap;

use forma_template::ResourceProperties;
use forma_value::{Prop, PropList, Value};
use serde::{Deserialize, Serialize};

use crate::tag::Tag;

/// `AWS::StepFunctions::StateMachine`
///
/// `Definition` is free-form state machine JSON and stays a raw [`Value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct StateMachine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Value>,
    #[serde(rename = "DefinitionS3Location", default, skip_serializing_if = "Option::is_none")]
    pub definition_s3_location: Option<Prop<S3Location>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_string: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_substitutions: Option<Prop<BTreeMap<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_configuration: Option<Value>,
    pub role_arn: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_machine_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_machine_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<PropList<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing_configuration: Option<Prop<TracingConfiguration>>,
}

impl ResourceProperties for StateMachine {
    const RESOURCE_TYPE: &'static str = "AWS::StepFunctions::StateMachine";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct S3Location {
    pub bucket: Value,
    pub key: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TracingConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<Value>,
}
