//! `AWS::DynamoDB::*` resources.

use forma_template::ResourceProperties;
use forma_value::{Prop, PropList, Value};
use serde::{Deserialize, Serialize};

use crate::tag::Tag;

/// `AWS::DynamoDB::Table`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_definitions: Option<PropList<AttributeDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_secondary_indexes: Option<Value>,
    pub key_schema: PropList<KeySchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_in_time_recovery_specification: Option<Prop<PointInTimeRecoverySpecification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<Prop<ProvisionedThroughput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_specification: Option<Prop<StreamSpecification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_class: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<PropList<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_live_specification: Option<Prop<TimeToLiveSpecification>>,
}

impl ResourceProperties for Table {
    const RESOURCE_TYPE: &'static str = "AWS::DynamoDB::Table";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AttributeDefinition {
    pub attribute_name: Value,
    pub attribute_type: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct KeySchema {
    pub attribute_name: Value,
    pub key_type: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PointInTimeRecoverySpecification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_in_time_recovery_enabled: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ProvisionedThroughput {
    pub read_capacity_units: Value,
    pub write_capacity_units: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct StreamSpecification {
    pub stream_view_type: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TimeToLiveSpecification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<Value>,
    pub enabled: Value,
}
