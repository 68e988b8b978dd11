//! `AWS::S3::*` resources.

use forma_template::ResourceProperties;
use forma_value::{Prop, PropList, Value};
use serde::{Deserialize, Serialize};

use crate::tag::Tag;

/// `AWS::S3::Bucket`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Bucket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_lock_enabled: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<PropList<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioning_configuration: Option<Prop<VersioningConfiguration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_configuration: Option<Value>,
}

impl ResourceProperties for Bucket {
    const RESOURCE_TYPE: &'static str = "AWS::S3::Bucket";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct VersioningConfiguration {
    pub status: Value,
}
