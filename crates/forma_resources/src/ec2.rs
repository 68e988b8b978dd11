//! `AWS::EC2::*` resources.

use forma_template::ResourceProperties;
use forma_value::{PropList, Value};
use serde::{Deserialize, Serialize};

use crate::tag::Tag;

/// `AWS::EC2::TransitGateway`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TransitGateway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazon_side_asn: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association_default_route_table_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_accept_shared_attachments: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_route_table_association: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_route_table_propagation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_support: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multicast_support: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagation_default_route_table_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<PropList<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_gateway_cidr_blocks: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpn_ecmp_support: Option<Value>,
}

impl ResourceProperties for TransitGateway {
    const RESOURCE_TYPE: &'static str = "AWS::EC2::TransitGateway";
}
