use crate::document::DocumentValue;
use crate::error::GraphError;
use anyhow::Context;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Json,
    Yaml,
    /// Recognized so we can say so explicitly, but not processed.
    Terraform,
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateFormat::Json => write!(f, "json"),
            TemplateFormat::Yaml => write!(f, "yaml"),
            TemplateFormat::Terraform => write!(f, "terraform"),
        }
    }
}

pub struct TemplateLoader;

impl TemplateLoader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a template file and parses it into a document tree. Terraform
    /// files are detected and rejected rather than misparsed.
    pub fn load(&self, path: &Path) -> crate::Result<DocumentValue> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read template {}", path.display()))?;

        match self.detect_format(path, &content) {
            TemplateFormat::Json => {
                let value: serde_json::Value = serde_json::from_str(&content)
                    .with_context(|| format!("invalid JSON in {}", path.display()))?;
                Ok(DocumentValue::from(value))
            }
            TemplateFormat::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_str(&content)
                    .with_context(|| format!("invalid YAML in {}", path.display()))?;
                Ok(DocumentValue::from(value))
            }
            TemplateFormat::Terraform => {
                Err(GraphError::UnsupportedFormat("terraform".to_string()).into())
            }
        }
    }

    /// Extension decides when it is recognized; otherwise the content is
    /// sniffed. Terraform block syntax is checked before the JSON/YAML
    /// fallback so .tf content renamed to another suffix is still caught.
    pub fn detect_format(&self, path: &Path, content: &str) -> TemplateFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => return TemplateFormat::Json,
            Some("yaml") | Some("yml") => return TemplateFormat::Yaml,
            Some("tf") => return TemplateFormat::Terraform,
            _ => {}
        }

        if looks_like_terraform(content) {
            TemplateFormat::Terraform
        } else if content.trim_start().starts_with('{') {
            TemplateFormat::Json
        } else {
            TemplateFormat::Yaml
        }
    }
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn looks_like_terraform(content: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim_start();
        line.starts_with("resource \"") || line.starts_with("provider \"")
    })
}
