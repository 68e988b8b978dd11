//! Convert command - Re-encode a template as JSON or YAML.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use forma_template::{DocumentFormat, TemplateWriter, WriteOptions};
use tracing::info;

use super::{load_template, parse_format};

#[derive(Args)]
pub struct ConvertArgs {
    /// Template file to convert
    input: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input format (json or yaml); detected when omitted
    #[arg(long, env = "FORMA_FORMAT")]
    from: Option<String>,

    /// Output format (json or yaml); taken from the output extension, then the opposite of the input
    #[arg(long, env = "FORMA_OUTPUT_FORMAT")]
    to: Option<String>,

    /// Write JSON on a single line
    #[arg(long)]
    compact: bool,
}

/// Pick the output format: explicit flag, output extension, then the opposite of the input.
fn output_format(args: &ConvertArgs) -> Result<DocumentFormat> {
    if let Some(format) = parse_format(args.to.as_deref())? {
        return Ok(format);
    }
    if let Some(format) = args.output.as_deref().and_then(DocumentFormat::from_path) {
        return Ok(format);
    }
    Ok(match DocumentFormat::from_path(&args.input) {
        Some(DocumentFormat::Yaml) => DocumentFormat::Json,
        _ => DocumentFormat::Yaml,
    })
}

pub fn execute(args: ConvertArgs) -> Result<()> {
    let template = load_template(&args.input, parse_format(args.from.as_deref())?)?;

    let mut options = WriteOptions::default().with_format(output_format(&args)?);
    if args.compact {
        options = options.compact();
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            TemplateWriter::to_writer(&template, &mut writer, &options)?;
            writer.flush()?;
            info!(
                "Converted {} → {} ({})",
                args.input.display(),
                path.display(),
                options.format
            );
        }
        None => TemplateWriter::to_writer(&template, io::stdout().lock(), &options)?,
    }
    Ok(())
}
