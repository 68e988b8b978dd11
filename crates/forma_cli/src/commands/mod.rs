//! CLI command definitions.
//!
//! This module defines the command structure for the forma CLI.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forma_template::{DocumentFormat, ReadOptions, Template, TemplateReader};
use tracing::debug;

pub mod convert;
pub mod inspect;
pub mod resources;

/// forma - infrastructure template toolkit
#[derive(Parser)]
#[command(name = "forma")]
#[command(version, about = "forma - read, inspect and convert infrastructure templates")]
#[command(long_about = r#"
forma reads CloudFormation-style templates in JSON or YAML, resolves their
resources against known schemas and writes them back out.

COMMANDS:
  inspect    → Summarize a template and check resources against known schemas
  convert    → Convert a template between JSON and YAML
  resources  → List resources, optionally filtered by type

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Schema validation failure
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a template and check resources against known schemas
    Inspect(inspect::InspectArgs),

    /// Convert a template between JSON and YAML
    Convert(convert::ConvertArgs),

    /// List resources, optionally filtered by type
    Resources(resources::ResourcesArgs),
}

/// Resolve a user-supplied format name.
pub fn parse_format(name: Option<&str>) -> Result<Option<DocumentFormat>> {
    name.map(|name| DocumentFormat::parse(name).context("Invalid --format argument"))
        .transpose()
}

/// Load a template from `path`.
///
/// The format comes from `format`, then the file extension, then the content.
pub fn load_template(path: &Path, format: Option<DocumentFormat>) -> Result<Template> {
    let format = format.or_else(|| DocumentFormat::from_path(path));
    debug!("Loading {:?} (format: {:?})", path, format);

    let file = File::open(path).with_context(|| format!("Template not found: {}", path.display()))?;
    let options = ReadOptions { format };
    TemplateReader::from_reader(file, &options)
        .with_context(|| format!("Failed to load template {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format(None).unwrap(), None);
        assert_eq!(parse_format(Some("yml")).unwrap(), Some(DocumentFormat::Yaml));
        assert!(parse_format(Some("toml")).is_err());
    }

    #[test]
    fn test_load_template_by_extension_and_content() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("stack.yaml");
        std::fs::write(&yaml, "Resources:\n  Topic:\n    Type: AWS::SNS::Topic\n").unwrap();
        assert_eq!(load_template(&yaml, None).unwrap().len(), 1);

        let unnamed = dir.path().join("stack.template");
        std::fs::write(&unnamed, r#"{"Resources": {"Topic": {"Type": "AWS::SNS::Topic"}}}"#).unwrap();
        assert_eq!(load_template(&unnamed, None).unwrap().len(), 1);
    }

    #[test]
    fn test_load_template_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_template(&dir.path().join("missing.json"), None).unwrap_err();
        assert!(error.to_string().contains("Template not found"));
    }
}
