//! # forma_resources
//!
//! Concrete resource schemas for forma templates.
//!
//! Each schema is a `Properties` struct implementing
//! [`ResourceProperties`](forma_template::ResourceProperties). Scalar
//! properties are a [`Value`](forma_value::Value); nested blocks and lists are
//! a [`Prop`](forma_value::Prop), so literals and intrinsic calls are accepted
//! at every level. Unknown property names are rejected when resolving.
//!
//! ## Example
//!
//! ```rust
//! use forma_resources::{builtin_registry, s3::Bucket};
//! use forma_template::Template;
//!
//! let template = Template::from_yaml(
//!     "Resources:\n  Logs:\n    Type: AWS::S3::Bucket\n    Properties:\n      BucketName: !Sub '${AWS::StackName}-logs'\n",
//! ).unwrap();
//!
//! let logs = template.resolve_one::<Bucket>("Logs").unwrap();
//! assert!(logs.properties.bucket_name.unwrap().is_intrinsic());
//! assert!(builtin_registry().unknown_types(&template).is_empty());
//! ```

pub mod cloudwatch;
pub mod dynamodb;
pub mod ec2;
pub mod lambda;
pub mod s3;
pub mod stepfunctions;
pub mod tag;

use forma_template::ResourceRegistry;
use once_cell::sync::Lazy;

pub use tag::Tag;

static BUILTIN: Lazy<ResourceRegistry> = Lazy::new(|| {
    ResourceRegistry::new()
        .with::<cloudwatch::CompositeAlarm>()
        .with::<dynamodb::Table>()
        .with::<ec2::TransitGateway>()
        .with::<lambda::Alias>()
        .with::<lambda::Function>()
        .with::<s3::Bucket>()
        .with::<stepfunctions::StateMachine>()
});

/// Registry of every schema in this crate, built on first use.
pub fn builtin_registry() -> &'static ResourceRegistry {
    &BUILTIN
}
