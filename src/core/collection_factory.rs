//! One place to build collections with consistent wiring
//!
//! A [`CollectionFactory`] owns the property factory and the collection
//! configuration every collection it makes will share. Construct one and pass
//! it where collections are needed; there is no process-wide instance.

use crate::core::collection::{
    CollectionConfig, ImmutableProperties, MutableProperties, PropertyCollection,
};
use crate::core::factory::{CreateOptions, DefaultPropertyFactory, PropertyFactory};
use crate::core::front_matter::{extract_front_matter, ExtractOptions, FrontMatter};
use crate::core::value::Value;
use crate::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Creates property collections
#[derive(Clone)]
pub struct CollectionFactory {
    property_factory: Arc<dyn PropertyFactory>,
    config: CollectionConfig,
}

impl CollectionFactory {
    pub fn new(property_factory: Arc<dyn PropertyFactory>) -> Self {
        Self::with_config(property_factory, CollectionConfig::default())
    }

    pub fn with_config(property_factory: Arc<dyn PropertyFactory>, config: CollectionConfig) -> Self {
        Self {
            property_factory,
            config,
        }
    }

    /// The factory used to produce property instances
    pub fn property_factory(&self) -> &Arc<dyn PropertyFactory> {
        &self.property_factory
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// An empty collection using this factory's wiring
    pub fn empty_mutable(&self) -> PropertyCollection {
        PropertyCollection::with_config(Arc::clone(&self.property_factory), self.config.clone())
    }

    /// A collection filled from `items`, with the number of accepted entries
    pub fn mutable_from_map(
        &self,
        items: HashMap<String, Value>,
        options: &CreateOptions<'_>,
    ) -> Result<(PropertyCollection, usize)> {
        let properties = self.empty_mutable();
        let count = properties.add_map(items, options)?;
        Ok((properties, count))
    }

    /// Like [`mutable_from_map`](Self::mutable_from_map), returning a read-only view
    pub fn immutable_from_map(
        &self,
        items: HashMap<String, Value>,
        options: &CreateOptions<'_>,
    ) -> Result<(ImmutableProperties, usize)> {
        let (properties, count) = self.mutable_from_map(items, options)?;
        Ok((ImmutableProperties::new(properties), count))
    }

    /// Split a document into its body and a collection built from its front matter
    pub fn mutable_from_front_matter<'a>(
        &self,
        content: &'a [u8],
        options: &ExtractOptions<'_>,
    ) -> Result<FrontMatter<'a>> {
        extract_front_matter(self, content, options)
    }
}

impl Default for CollectionFactory {
    fn default() -> Self {
        Self::new(Arc::new(DefaultPropertyFactory::new()))
    }
}

impl fmt::Debug for CollectionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionFactory")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
