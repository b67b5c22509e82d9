//! File reading and front matter extraction
//!
//! [`FrontMatterReader`] loads a file, checks it against the configured size
//! limit and splits it into body and properties.

use crate::core::{CollectionFactory, ExtractOptions, FrontMatter, YamlErrorMode};
use crate::error::{PropertiesError, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Configuration for the front matter reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<usize>,
    /// Infer value types from their text instead of trusting the YAML types
    pub smart_parse: bool,
    pub yaml_errors: YamlErrorMode,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
            smart_parse: false,
            yaml_errors: YamlErrorMode::Strict,
        }
    }
}

/// Front matter reader
#[derive(Debug, Clone, Default)]
pub struct FrontMatterReader {
    config: ReaderConfig,
    factory: CollectionFactory,
}

impl FrontMatterReader {
    /// Create a new reader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self {
            config,
            factory: CollectionFactory::default(),
        }
    }

    /// Use `factory` to build the collections
    pub fn with_factory(mut self, factory: CollectionFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Read a document from a file path
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<FrontMatter<'static>> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(PropertiesError::file_not_found(path));
        }

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(path)?;

            if metadata.len() as usize > max_size {
                return Err(PropertiesError::validation(format!(
                    "File too large: {} bytes (limit: {} bytes)",
                    metadata.len(),
                    max_size
                )));
            }
        }

        debug!("reading {}", path.display());
        let content = fs::read(path)?;
        Ok(self.parse_content(&content)?.into_owned())
    }

    /// Split in-memory content into body and properties
    pub fn parse_content<'a>(&self, content: &'a [u8]) -> Result<FrontMatter<'a>> {
        let options = ExtractOptions {
            smart_parse: self.config.smart_parse,
            yaml_errors: self.config.yaml_errors,
            ..Default::default()
        };
        self.factory.mutable_from_front_matter(content, &options)
    }

    /// Get reader configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Properties;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_file_with_front_matter() {
        let content = "---\ntitle: Test Document\ntags: [rust, cli]\n---\n# Hello World\n\nThis is the body content.\n";
        let file = create_test_file(content);

        let doc = FrontMatterReader::new().read_file(file.path()).unwrap();
        assert_eq!(doc.body_text(), "# Hello World\n\nThis is the body content.");
        assert_eq!(doc.count, 2);

        let props = doc.properties.unwrap();
        assert_eq!(props.named("title").unwrap().as_text(), Some("Test Document"));
        assert_eq!(props.named("tags").unwrap().as_text_list().unwrap().len(), 2);
    }

    #[test]
    fn test_read_file_without_front_matter() {
        let content = "# Hello World\n\nThis is just markdown content.";
        let file = create_test_file(content);

        let doc = FrontMatterReader::new().read_file(file.path()).unwrap();
        assert!(!doc.has_front_matter());
        assert_eq!(doc.body_text(), content);
    }

    #[test]
    fn test_read_missing_file() {
        let err = FrontMatterReader::new()
            .read_file("/nonexistent/file.md")
            .unwrap_err();
        assert!(matches!(err, PropertiesError::FileNotFound { .. }));
    }

    #[test]
    fn test_file_size_limit() {
        let file = create_test_file("---\na: 1\n---\nbody that is too long\n");
        let reader = FrontMatterReader::with_config(ReaderConfig {
            max_file_size: Some(8),
            ..Default::default()
        });
        let err = reader.read_file(file.path()).unwrap_err();
        assert!(matches!(err, PropertiesError::Validation { .. }));
    }

    #[test]
    fn test_smart_parse_config() {
        let file = create_test_file("---\npublished: 2020-02-02\n---\n");
        let reader = FrontMatterReader::with_config(ReaderConfig {
            smart_parse: true,
            ..Default::default()
        });
        let doc = reader.read_file(file.path()).unwrap();
        let props = doc.properties.unwrap();
        assert!(props.named("published").unwrap().as_date_time().is_some());
        assert!(reader.config().smart_parse);
    }
}
