//! Document format and read/write options.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TemplateError, TemplateResult};

/// Wire format of a template document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    /// Parse a format name, failing with [`TemplateError::UnsupportedFormat`].
    pub fn parse(s: &str) -> TemplateResult<Self> {
        Self::from_str(s).ok_or_else(|| TemplateError::UnsupportedFormat(s.to_string()))
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_str)
    }

    /// Guess the format from document text: JSON documents start with `{`.
    pub fn detect(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            DocumentFormat::Json
        } else {
            DocumentFormat::Yaml
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for reading a template.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Input format. Detected from the content when unset.
    pub format: Option<DocumentFormat>,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The format to use for `content`.
    pub fn format_for(&self, content: &str) -> DocumentFormat {
        self.format.unwrap_or_else(|| DocumentFormat::detect(content))
    }
}

/// Options for writing a template.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub format: DocumentFormat,
    /// Indent JSON output. YAML output is always block style.
    pub pretty: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            format: DocumentFormat::Json,
            pretty: true,
        }
    }
}

impl WriteOptions {
    pub fn json() -> Self {
        Self::default()
    }

    pub fn yaml() -> Self {
        Self::default().with_format(DocumentFormat::Yaml)
    }

    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}
