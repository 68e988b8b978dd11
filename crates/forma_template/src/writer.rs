//! Template encoding.

use std::io::Write;

use tracing::debug;

use crate::config::{DocumentFormat, WriteOptions};
use crate::error::TemplateResult;
use crate::template::Template;

/// Writer for template documents.
///
/// Typed and generic resources encode to the same shape. YAML output always
/// uses the long form of function calls.
pub struct TemplateWriter;

impl TemplateWriter {
    pub fn to_json_value(template: &Template) -> TemplateResult<serde_json::Value> {
        Ok(serde_json::to_value(template)?)
    }

    pub fn to_json_string(template: &Template, pretty: bool) -> TemplateResult<String> {
        let content = if pretty {
            serde_json::to_string_pretty(template)?
        } else {
            serde_json::to_string(template)?
        };
        Ok(content)
    }

    pub fn to_yaml_string(template: &Template) -> TemplateResult<String> {
        Ok(serde_yaml::to_string(template)?)
    }

    /// Encode using `options`.
    pub fn to_string(template: &Template, options: &WriteOptions) -> TemplateResult<String> {
        debug!(
            "Writing template with {} resources as {}",
            template.len(),
            options.format
        );
        match options.format {
            DocumentFormat::Json => Self::to_json_string(template, options.pretty),
            DocumentFormat::Yaml => Self::to_yaml_string(template),
        }
    }

    /// Encode using `options` into `writer`, with a trailing newline.
    pub fn to_writer<W: Write>(template: &Template, mut writer: W, options: &WriteOptions) -> TemplateResult<()> {
        let content = Self::to_string(template, options)?;
        writer.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}
