//! Resources command - List the resources of a template.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use forma_template::Template;

use super::{load_template, parse_format};

#[derive(Args)]
pub struct ResourcesArgs {
    /// Template file to read
    path: PathBuf,

    /// Only list resources of this type, e.g. AWS::S3::Bucket
    #[arg(short = 't', long = "type")]
    resource_type: Option<String>,

    /// Input format (json or yaml); detected when omitted
    #[arg(short, long, env = "FORMA_FORMAT")]
    format: Option<String>,
}

/// `(logical ID, type)` pairs, optionally restricted to one type.
pub fn list(template: &Template, resource_type: Option<&str>) -> Vec<(String, String)> {
    match resource_type {
        Some(resource_type) => template
            .resources_of_type(resource_type)
            .map(|(logical_id, _)| (logical_id.to_string(), resource_type.to_string()))
            .collect(),
        None => template
            .resources
            .iter()
            .map(|(logical_id, resource)| (logical_id.clone(), resource.resource_type().to_string()))
            .collect(),
    }
}

pub fn execute(args: ResourcesArgs) -> Result<()> {
    let template = load_template(&args.path, parse_format(args.format.as_deref())?)?;
    let entries = list(&template, args.resource_type.as_deref());

    if entries.is_empty() {
        if let Some(resource_type) = &args.resource_type {
            println!("No {} resources", resource_type);
        } else {
            println!("No resources");
        }
        return Ok(());
    }

    let width = entries.iter().map(|(id, _)| id.len()).max().unwrap_or(0);
    for (logical_id, resource_type) in entries {
        println!("{:width$}  {}", logical_id, resource_type, width = width);
    }
    Ok(())
}
