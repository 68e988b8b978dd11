//! Inspect command - Summarize a template and check its resources.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use forma_resources::builtin_registry;
use forma_template::{DocumentFormat, Resource, Template};
use forma_value::Value;
use serde_json::json;
use tracing::{info, warn};
use walkdir::WalkDir;

use super::{load_template, parse_format};

#[derive(Args)]
pub struct InspectArgs {
    /// Template file, or a directory to search for templates
    path: PathBuf,

    /// Input format (json or yaml); detected when omitted
    #[arg(short, long, env = "FORMA_FORMAT")]
    format: Option<String>,

    /// Fail when a resource does not match its schema
    #[arg(long)]
    strict: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// Schema check outcome for one resource.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaStatus {
    Valid,
    Unknown,
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct ResourceReport {
    pub logical_id: String,
    pub resource_type: String,
    pub status: SchemaStatus,
    pub references: Vec<String>,
}

/// Check every resource of `template` against the builtin schemas.
pub fn inspect(template: &Template) -> Vec<ResourceReport> {
    let registry = builtin_registry();
    template
        .resources
        .iter()
        .map(|(logical_id, resource)| {
            let status = match registry.resolve(logical_id, resource) {
                None => SchemaStatus::Unknown,
                Some(Ok(_)) => SchemaStatus::Valid,
                Some(Err(e)) => SchemaStatus::Invalid(e.to_string()),
            };
            ResourceReport {
                logical_id: logical_id.clone(),
                resource_type: resource.resource_type().to_string(),
                status,
                references: references(resource),
            }
        })
        .collect()
}

/// Logical IDs this resource points at, through `DependsOn`, `Ref`,
/// `Fn::GetAtt` or `Fn::Sub` placeholders.
fn references(resource: &Resource) -> Vec<String> {
    let mut found: Vec<String> = resource
        .attributes()
        .depends_on_ids()
        .into_iter()
        .map(str::to_string)
        .collect();
    if let Ok(body) = resource.to_json() {
        let body = Value::decode(body);
        found.extend(body.references().into_iter().map(str::to_string));
        found.extend(body.sub_references().into_iter().map(str::to_string));
    }
    found.sort();
    found.dedup();
    found
}

/// Template files under `path`, in name order.
///
/// A file path is returned as is. Directories are walked for `.json`,
/// `.yaml`, `.yml` and `.template` files, skipping hidden entries.
pub fn template_files(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|file| {
            DocumentFormat::from_path(file).is_some()
                || file.extension().is_some_and(|ext| ext == "template")
        })
        .collect()
}

pub fn execute(args: InspectArgs) -> Result<()> {
    info!("Inspecting: {}", args.path.display());

    let format = parse_format(args.format.as_deref())?;
    let walking = args.path.is_dir();
    let files = template_files(&args.path);
    if walking && files.is_empty() {
        anyhow::bail!("No templates found in {}", args.path.display());
    }

    let mut invalid = 0;
    let mut reports = Vec::new();
    for file in &files {
        let template = match load_template(file, format) {
            Ok(template) => template,
            Err(e) if walking => {
                warn!("Skipping {}: {:#}", file.display(), e);
                continue;
            }
            Err(e) => return Err(e),
        };
        let report = inspect(&template);
        invalid += report
            .iter()
            .filter(|entry| matches!(entry.status, SchemaStatus::Invalid(_)))
            .count();

        if args.json {
            reports.push(to_json(file, &template, &report));
        } else {
            print_report(file, &template, &report);
        }
    }

    if args.json {
        let output = match reports.len() {
            1 if !walking => reports.remove(0),
            _ => serde_json::Value::Array(reports),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    if args.strict && invalid > 0 {
        anyhow::bail!("{} resource(s) failed schema validation", invalid);
    }
    Ok(())
}

fn print_report(path: &Path, template: &Template, report: &[ResourceReport]) {
    println!("📄 {}", path.display());
    if let Some(description) = &template.description {
        println!("   {}", description);
    }
    println!("   Resources: {}", template.len());
    for (resource_type, count) in template.resource_types() {
        println!("     {} × {}", resource_type, count);
    }
    println!();

    for entry in report {
        let refs = if entry.references.is_empty() {
            String::new()
        } else {
            format!(" → {}", entry.references.join(", "))
        };
        match &entry.status {
            SchemaStatus::Valid => {
                println!("   ✅ {} ({}){}", entry.logical_id, entry.resource_type, refs)
            }
            SchemaStatus::Unknown => println!(
                "   ⚠️  {} ({}): no schema{}",
                entry.logical_id, entry.resource_type, refs
            ),
            SchemaStatus::Invalid(error) => {
                println!("   ❌ {} ({}): {}", entry.logical_id, entry.resource_type, error)
            }
        }
    }
}

fn to_json(path: &Path, template: &Template, report: &[ResourceReport]) -> serde_json::Value {
    let resources: Vec<serde_json::Value> = report
        .iter()
        .map(|entry| {
            let (status, error) = match &entry.status {
                SchemaStatus::Valid => ("valid", None),
                SchemaStatus::Unknown => ("unknown", None),
                SchemaStatus::Invalid(error) => ("invalid", Some(error.clone())),
            };
            json!({
                "logical_id": entry.logical_id,
                "type": entry.resource_type,
                "status": status,
                "error": error,
                "references": entry.references,
            })
        })
        .collect();

    json!({
        "path": path.display().to_string(),
        "description": template.description,
        "resource_count": template.len(),
        "types": template.resource_types(),
        "unknown_types": builtin_registry().unknown_types(template),
        "resources": resources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STACK: &str = r#"{
        "Description": "inspect test",
        "Resources": {
            "Logs": {
                "Type": "AWS::S3::Bucket",
                "DependsOn": "Role",
                "Properties": {"BucketName": {"Fn::Join": ["-", [{"Ref": "AWS::StackName"}, {"Ref": "Env"}]]}}
            },
            "Broken": {"Type": "AWS::S3::Bucket", "Properties": {"Colour": "red"}},
            "Role": {"Type": "AWS::IAM::Role", "Properties": {"Path": {"Fn::GetAtt": ["Logs", "Arn"]}}}
        }
    }"#;

    #[test]
    fn test_inspect_statuses_and_references() {
        let template = Template::from_json(STACK).unwrap();
        let report = inspect(&template);

        let ids: Vec<&str> = report.iter().map(|entry| entry.logical_id.as_str()).collect();
        assert_eq!(ids, vec!["Broken", "Logs", "Role"]);

        assert!(matches!(report[0].status, SchemaStatus::Invalid(_)));
        assert_eq!(report[1].status, SchemaStatus::Valid);
        assert_eq!(report[1].references, vec!["Env", "Role"]);
        assert_eq!(report[2].status, SchemaStatus::Unknown);
        assert_eq!(report[2].references, vec!["Logs"]);
    }

    #[test]
    fn test_json_report() {
        let template = Template::from_json(STACK).unwrap();
        let value = to_json(Path::new("stack.json"), &template, &inspect(&template));
        assert_eq!(value["path"], "stack.json");
        assert_eq!(value["resource_count"], 3);
        assert_eq!(value["types"]["AWS::S3::Bucket"], 2);
        assert_eq!(value["unknown_types"], json!(["AWS::IAM::Role"]));
        assert_eq!(value["resources"][0]["status"], "invalid");
        assert_eq!(value["resources"][1]["error"], serde_json::Value::Null);
    }

    #[test]
    fn test_execute_strict_fails_on_schema_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stack.json");
        std::fs::write(&path, STACK).unwrap();

        let lenient = InspectArgs {
            path: path.clone(),
            format: None,
            strict: false,
            json: true,
        };
        assert!(execute(lenient).is_ok());

        let strict = InspectArgs {
            path,
            format: None,
            strict: true,
            json: false,
        };
        let error = execute(strict).unwrap_err();
        assert!(error.to_string().contains("failed schema validation"));
    }

    #[test]
    fn test_sub_placeholders_are_references() {
        let template = Template::from_yaml(
            "Resources:\n  Site:\n    Type: AWS::S3::Bucket\n    Properties:\n      BucketName: !Sub '${AWS::StackName}-${Domain}-${Cdn.DomainName}'\n",
        )
        .unwrap();
        let report = inspect(&template);
        assert_eq!(report[0].references, vec!["Cdn", "Domain"]);
    }

    #[test]
    fn test_template_files_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("stacks");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::create_dir_all(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join("b.yaml"), "Resources: {}\n").unwrap();
        std::fs::write(nested.join("a.json"), "{}").unwrap();
        std::fs::write(nested.join("c.template"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        std::fs::write(dir.path().join(".cache").join("d.json"), "{}").unwrap();

        let names: Vec<String> = template_files(dir.path())
            .iter()
            .map(|file| file.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["b.yaml", "stacks/a.json", "stacks/c.template"]);

        let single = dir.path().join("b.yaml");
        assert_eq!(template_files(&single), vec![single.clone()]);
    }

    #[test]
    fn test_execute_directory_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stack.json"), STACK).unwrap();
        std::fs::write(dir.path().join("broken.yaml"), "Resources: [unclosed").unwrap();

        let args = InspectArgs {
            path: dir.path().to_path_buf(),
            format: None,
            strict: false,
            json: true,
        };
        assert!(execute(args).is_ok());

        let empty = tempfile::tempdir().unwrap();
        let args = InspectArgs {
            path: empty.path().to_path_buf(),
            format: None,
            strict: false,
            json: false,
        };
        assert!(execute(args).unwrap_err().to_string().contains("No templates found"));
    }
}
