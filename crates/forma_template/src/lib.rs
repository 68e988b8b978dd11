//! # forma_template
//!
//! Template documents, generic resources and typed resource resolution.
//!
//! A template is decoded in two phases. Reading a document produces a
//! logical-ID-keyed map of generic resource bodies without choosing any
//! concrete schema. Typed views are produced on demand by naming a schema
//! that implements [`ResourceProperties`].
//!
//! ## Features
//!
//! - **Open type set**: unknown resource types decode and re-encode unchanged
//! - **Typed resolution**: [`Template::resolve_all`] and [`Template::resolve_one`]
//! - **Registry**: [`ResourceRegistry`] maps discriminators to decoders at runtime
//! - **JSON and YAML**: short-form YAML tags are expanded on read
//! - **Pass-through sections**: `Parameters`, `Outputs`, `Globals`, ... survive a round trip
//!
//! ## Example
//!
//! ```rust
//! use forma_template::{ResourceProperties, Template};
//! use forma_value::Value;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Bucket {
//!     #[serde(default, skip_serializing_if = "Option::is_none")]
//!     bucket_name: Option<Value>,
//! }
//!
//! impl ResourceProperties for Bucket {
//!     const RESOURCE_TYPE: &'static str = "AWS::S3::Bucket";
//! }
//!
//! let template = Template::from_json(r#"{
//!     "Resources": {
//!         "Logs": {"Type": "AWS::S3::Bucket", "Properties": {"BucketName": {"Ref": "Name"}}},
//!         "Alerts": {"Type": "AWS::SNS::Topic"}
//!     }
//! }"#).unwrap();
//!
//! let buckets = template.resolve_all::<Bucket>();
//! assert_eq!(buckets.len(), 1);
//! assert_eq!(buckets["Logs"].properties.bucket_name, Some(Value::reference("Name")));
//! assert!(template.resolve_one::<Bucket>("Alerts").is_err());
//! ```

pub mod attributes;
pub mod config;
pub mod error;
pub mod policies;
pub mod reader;
pub mod registry;
pub mod resource;
pub mod template;
pub mod writer;
pub mod yaml;

pub use attributes::{DeletionPolicy, DependsOn, ResourceAttributes};
pub use config::{DocumentFormat, ReadOptions, WriteOptions};
pub use error::{TemplateError, TemplateResult};
pub use policies::*;
pub use reader::TemplateReader;
pub use registry::{DecodeFn, ResourceRegistry};
pub use resource::{AnyResource, GenericResource, Resource, ResourceProperties, TypedResource};
pub use template::{Template, DEFAULT_FORMAT_VERSION};
pub use writer::TemplateWriter;
