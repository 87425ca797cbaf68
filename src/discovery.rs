use crate::config::Config;
use crate::loader::{TemplateFormat, TemplateLoader};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub path: PathBuf,
    pub size: u64,
    pub format: String,
    pub supported: bool,
}

/// Walks a directory tree and lists candidate template files by extension.
pub struct TemplateDiscovery {
    config: Config,
    loader: TemplateLoader,
}

impl TemplateDiscovery {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            loader: TemplateLoader::new(),
        }
    }

    pub fn discover_templates(&self, root: &Path) -> crate::Result<Vec<TemplateInfo>> {
        let mut templates = Vec::new();

        let walker = WalkBuilder::new(root)
            .standard_filters(true)
            .hidden(false)
            .git_ignore(true)
            .build();

        for result in walker {
            let entry = result?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if let Some(info) = self.process_file(path)? {
                templates.push(info);
            }
        }

        Ok(templates)
    }

    fn process_file(&self, path: &Path) -> crate::Result<Option<TemplateInfo>> {
        let extension = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => return Ok(None),
        };
        if !self.config.discovery.file_extensions.contains(&extension) {
            return Ok(None);
        }

        let metadata = fs::metadata(path)?;
        if metadata.len() > self.config.discovery.max_file_size as u64 {
            return Ok(None);
        }

        let format = self.loader.detect_format(path, "");
        Ok(Some(TemplateInfo {
            path: path.to_path_buf(),
            size: metadata.len(),
            format: format.to_string(),
            supported: format != TemplateFormat::Terraform,
        }))
    }

    pub fn get_stats(&self, templates: &[TemplateInfo]) -> DiscoveryStats {
        let mut stats = DiscoveryStats::default();

        for template in templates {
            stats.total_files += 1;
            stats.total_size += template.size;
            *stats.formats.entry(template.format.clone()).or_insert(0) += 1;
            if !template.supported {
                stats.unsupported += 1;
            }
        }

        stats
    }
}

#[derive(Debug, Default)]
pub struct DiscoveryStats {
    pub total_files: usize,
    pub total_size: u64,
    pub unsupported: usize,
    pub formats: HashMap<String, usize>,
}

impl DiscoveryStats {
    pub fn print_summary(&self) {
        println!("Template Discovery Summary:");
        println!("  Total templates: {}", self.total_files);
        println!(
            "  Total size: {:.2} KB",
            self.total_size as f64 / 1024.0
        );
        if self.unsupported > 0 {
            println!("  Unsupported (terraform): {}", self.unsupported);
        }
        println!("  Formats:");

        let mut formats: Vec<_> = self.formats.iter().collect();
        formats.sort_by(|a, b| b.1.cmp(a.1));

        for (format, count) in formats {
            println!("    {}: {} files", format, count);
        }
    }
}
