//! `AWS::CloudWatch::*` resources.

use forma_template::ResourceProperties;
use forma_value::Value;
use serde::{Deserialize, Serialize};

/// `AWS::CloudWatch::CompositeAlarm`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct CompositeAlarm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions_enabled: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_actions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_description: Option<Value>,
    pub alarm_name: Value,
    pub alarm_rule: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insufficient_data_actions: Option<Value>,
    #[serde(rename = "OKActions", default, skip_serializing_if = "Option::is_none")]
    pub ok_actions: Option<Value>,
}

impl ResourceProperties for CompositeAlarm {
    const RESOURCE_TYPE: &'static str = "AWS::CloudWatch::CompositeAlarm";
}
