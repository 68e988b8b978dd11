//! Template decoding.

use std::io::Read;

use tracing::debug;

use crate::config::{DocumentFormat, ReadOptions};
use crate::error::TemplateResult;
use crate::template::Template;
use crate::yaml;

/// Reader for template documents.
///
/// Decoding never picks a concrete schema: every resource comes back as a
/// generic body. A syntax error fails the whole read.
pub struct TemplateReader;

impl TemplateReader {
    /// Decode a JSON document.
    pub fn from_json_str(content: &str) -> TemplateResult<Template> {
        let template: Template = serde_json::from_str(content)?;
        debug!("Decoded JSON template with {} resources", template.len());
        Ok(template)
    }

    pub fn from_json_slice(content: &[u8]) -> TemplateResult<Template> {
        let template: Template = serde_json::from_slice(content)?;
        debug!("Decoded JSON template with {} resources", template.len());
        Ok(template)
    }

    /// Decode a YAML document, expanding short-form function tags.
    pub fn from_yaml_str(content: &str) -> TemplateResult<Template> {
        let node = yaml::parse(content)?;
        let template: Template = serde_json::from_value(node)?;
        debug!("Decoded YAML template with {} resources", template.len());
        Ok(template)
    }

    /// Decode a document in the given format.
    pub fn from_str(content: &str, format: DocumentFormat) -> TemplateResult<Template> {
        match format {
            DocumentFormat::Json => Self::from_json_str(content),
            DocumentFormat::Yaml => Self::from_yaml_str(content),
        }
    }

    /// Read a whole document from `reader`.
    pub fn from_reader<R: Read>(mut reader: R, options: &ReadOptions) -> TemplateResult<Template> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let format = options.format_for(&content);
        debug!("Reading template as {}", format);
        Self::from_str(&content, format)
    }
}
