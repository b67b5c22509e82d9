//! Resource URL properties backed by downloaded files
//!
//! Fetching is delegated to a [`ResourceFetcher`]; this crate ships no
//! fetcher of its own. [`DownloadHook`] plugs one into a property factory as
//! its after-create hook.

use crate::core::factory::{AfterCreateHook, Outcome};
use crate::core::property::{LocalFile, Property, Resource};
use crate::error::Result;
use log::debug;
use url::Url;

/// Makes the content behind a URL available as a local file
pub trait ResourceFetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<LocalFile>;
}

/// After-create hook turning text properties that hold http(s) URLs into
/// downloaded resource properties
#[derive(Debug, Clone)]
pub struct DownloadHook<F> {
    fetcher: F,
}

impl<F: ResourceFetcher> DownloadHook<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

fn downloadable_url(text: &str) -> Option<Url> {
    let url = Url::parse(text.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

impl<F: ResourceFetcher> AfterCreateHook for DownloadHook<F> {
    fn after_create(&self, property: Property) -> Result<Outcome> {
        let url = match property.as_resource() {
            Some(resource) if resource.local_file().is_none() => resource.url().clone(),
            Some(_) => return Ok(Outcome::Accepted(property)),
            None => match property.as_text().and_then(downloadable_url) {
                Some(url) => url,
                None => return Ok(Outcome::Accepted(property)),
            },
        };

        let local = self.fetcher.fetch(&url)?;
        debug!("downloaded {} to {}", url, local.path.display());
        Ok(Outcome::Accepted(Property::resource(
            property.name().clone(),
            Resource::downloaded(url, local),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factory::{CreateOptions, DefaultPropertyFactory, FactoryConfig, PropertyFactory};
    use crate::core::property::PropertyKind;
    use crate::core::value::Value;
    use crate::error::PropertiesError;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct FakeFetcher;

    impl ResourceFetcher for FakeFetcher {
        fn fetch(&self, url: &Url) -> Result<LocalFile> {
            if url.path().ends_with(".missing") {
                return Err(PropertiesError::custom(format!("404 for {}", url)));
            }
            let file = url.path_segments().and_then(|s| s.last()).unwrap_or("index");
            Ok(LocalFile::new(
                format!("/assets/{}", file),
                PathBuf::from("/tmp/assets").join(file),
            ))
        }
    }

    fn factory() -> DefaultPropertyFactory {
        DefaultPropertyFactory::with_config(FactoryConfig {
            after_create: Some(Arc::new(DownloadHook::new(FakeFetcher))),
            ..Default::default()
        })
    }

    #[test]
    fn test_url_text_becomes_downloaded_resource() {
        let outcome = factory()
            .from_text("image", "https://example.com/img/cat.png", &CreateOptions::default())
            .unwrap();
        let property = outcome.into_property().unwrap();
        assert_eq!(property.kind(), PropertyKind::Resource);

        let resource = property.as_resource().unwrap();
        assert_eq!(resource.url().as_str(), "https://example.com/img/cat.png");
        assert_eq!(resource.local_href(), Some("/assets/cat.png"));
    }

    #[test]
    fn test_url_value_is_downloaded() {
        let url = Url::parse("http://example.com/doc.pdf").unwrap();
        let outcome = factory()
            .from_any("doc", Value::Url(url), &CreateOptions::default())
            .unwrap();
        let property = outcome.into_property().unwrap();
        assert!(property.as_resource().unwrap().local_file().is_some());
    }

    #[test]
    fn test_other_text_is_untouched() {
        for text in ["plain words", "mailto:someone@example.com", "ftp://example.com/x"] {
            let outcome = factory()
                .from_any("t", Value::from(text), &CreateOptions::default())
                .unwrap();
            assert_eq!(outcome.property().unwrap().as_text(), Some(text));
        }
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let err = factory()
            .from_text("x", "https://example.com/gone.missing", &CreateOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "404 for https://example.com/gone.missing");
    }
}
