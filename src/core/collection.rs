//! Collections of uniquely named properties
//!
//! [`PropertyCollection`] is safe to share between threads. Each insert or
//! delete takes the write lock once, so the stored entries and the reported
//! size can never disagree. Bulk inserts are a sequence of single inserts:
//! readers may observe them half done, and a failing entry stops the rest
//! without undoing what was already stored.

use crate::core::factory::{CreateOptions, Outcome, PropertyFactory};
use crate::core::property::{Property, PropertyName};
use crate::core::value::Value;
use crate::error::{PropertiesError, Result};
use log::trace;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Gate consulted right before a property is stored
///
/// Return `Accepted` with the property to store (the given one or a
/// substitute), or `Rejected` to leave the collection untouched.
pub trait AddPolicy: Send + Sync {
    fn allow_add(&self, property: Property) -> Result<Outcome>;
}

impl<F> AddPolicy for F
where
    F: Fn(Property) -> Result<Outcome> + Send + Sync,
{
    fn allow_add(&self, property: Property) -> Result<Outcome> {
        self(property)
    }
}

/// Notified after a property has been stored
pub trait AddEvent: Send + Sync {
    fn property_added(&self, property: &Property);
}

impl<F> AddEvent for F
where
    F: Fn(&Property) + Send + Sync,
{
    fn property_added(&self, property: &Property) {
        self(property)
    }
}

/// Per-collection extension points, fixed at construction
#[derive(Clone, Default)]
pub struct CollectionConfig {
    pub add_policy: Option<Arc<dyn AddPolicy>>,
    pub add_event: Option<Arc<dyn AddEvent>>,
}

impl fmt::Debug for CollectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionConfig")
            .field("add_policy", &self.add_policy.is_some())
            .field("add_event", &self.add_event.is_some())
            .finish()
    }
}

/// Read access to a group of strongly typed properties
pub trait Properties {
    /// All properties, in no particular order
    fn list(&self) -> Vec<Property>;

    /// Look up a property by name
    fn named(&self, name: &str) -> Option<Property>;

    /// The properties for which `predicate` holds
    fn filter(&self, predicate: &dyn Fn(&Property) -> bool) -> Vec<Property>;

    /// Visit every property until `visitor` returns false
    fn range(&self, visitor: &mut dyn FnMut(&Property) -> bool);

    /// Number of stored properties
    fn size(&self) -> usize;

    /// Export the values chosen by `select` under their property names
    fn map(&self, select: &dyn Fn(&Property) -> Option<Value>) -> HashMap<String, Value> {
        let mut result = HashMap::new();
        self.range(&mut |property| {
            if let Some(value) = select(property) {
                result.insert(property.name().to_string(), value);
            }
            true
        });
        result
    }

    /// Export every property as name → untyped value
    fn to_map(&self) -> HashMap<String, Value> {
        self.map(&|property| Some(property.any_value()))
    }

    /// Visit every name/value pair
    fn range_name_value(&self, visitor: &mut dyn FnMut(&str, Value)) {
        self.range(&mut |property| {
            visitor(property.name().as_str(), property.any_value());
            true
        });
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Mutation on top of [`Properties`]
pub trait MutableProperties: Properties {
    /// Build a property from an untyped value and store it
    fn add(&self, name: &str, value: Value, options: &CreateOptions<'_>) -> Result<Outcome>;

    /// Build a property by smart-parsing `text` and store it
    fn add_parsed(&self, name: &str, text: &str, options: &CreateOptions<'_>) -> Result<Outcome>;

    /// Store an already built property, still subject to the add policy
    fn add_property(&self, property: Property) -> Result<Outcome>;

    /// Add every entry of `items`, returning how many were accepted
    ///
    /// Stops at the first error, which comes back as
    /// [`PropertiesError::Incomplete`] carrying the count so far.
    fn add_map(&self, items: HashMap<String, Value>, options: &CreateOptions<'_>)
        -> Result<usize>;

    /// Like [`add_map`](Self::add_map) but every value is smart-parsed text
    fn add_text_map(
        &self,
        items: HashMap<String, String>,
        options: &CreateOptions<'_>,
    ) -> Result<usize>;

    /// Remove the named property, returning whether it existed
    fn delete(&self, name: &str) -> bool;

    fn delete_property(&self, property: &Property) -> bool {
        self.delete(property.name().as_str())
    }
}

/// The default, thread-safe property collection
pub struct PropertyCollection {
    factory: Arc<dyn PropertyFactory>,
    entries: RwLock<HashMap<PropertyName, Property>>,
    config: CollectionConfig,
}

impl PropertyCollection {
    pub fn new(factory: Arc<dyn PropertyFactory>) -> Self {
        Self::with_config(factory, CollectionConfig::default())
    }

    pub fn with_config(factory: Arc<dyn PropertyFactory>, config: CollectionConfig) -> Self {
        Self {
            factory,
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// The factory used by `add` and `add_parsed`
    pub fn factory(&self) -> &Arc<dyn PropertyFactory> {
        &self.factory
    }

    // A panic while holding the lock cannot leave a half-written entry behind,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<PropertyName, Property>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PropertyName, Property>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn store_created(&self, created: Outcome) -> Result<Outcome> {
        match created {
            Outcome::Accepted(property) => self.add_property(property),
            rejected => Ok(rejected),
        }
    }
}

impl fmt::Debug for PropertyCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyCollection")
            .field("entries", &*self.read())
            .field("config", &self.config)
            .finish()
    }
}

impl Properties for PropertyCollection {
    fn list(&self) -> Vec<Property> {
        self.read().values().cloned().collect()
    }

    fn named(&self, name: &str) -> Option<Property> {
        self.read().get(name).cloned()
    }

    fn filter(&self, predicate: &dyn Fn(&Property) -> bool) -> Vec<Property> {
        self.list().into_iter().filter(|p| predicate(p)).collect()
    }

    fn range(&self, visitor: &mut dyn FnMut(&Property) -> bool) {
        // Visit a snapshot so visitors are free to touch the collection.
        for property in self.list() {
            if !visitor(&property) {
                break;
            }
        }
    }

    fn size(&self) -> usize {
        self.read().len()
    }
}

impl MutableProperties for PropertyCollection {
    fn add(&self, name: &str, value: Value, options: &CreateOptions<'_>) -> Result<Outcome> {
        let created = self.factory.from_any(name, value, options)?;
        self.store_created(created)
    }

    fn add_parsed(&self, name: &str, text: &str, options: &CreateOptions<'_>) -> Result<Outcome> {
        let created = self.factory.from_text(name, text, options)?;
        self.store_created(created)
    }

    fn add_property(&self, property: Property) -> Result<Outcome> {
        let property = match &self.config.add_policy {
            Some(policy) => match policy.allow_add(property)? {
                Outcome::Accepted(allowed) => allowed,
                rejected => {
                    trace!(
                        "add policy rejected property {:?}",
                        rejected.property().map(|p| p.name().as_str())
                    );
                    return Ok(rejected);
                }
            },
            None => property,
        };

        self.write()
            .insert(property.name().clone(), property.clone());

        if let Some(event) = &self.config.add_event {
            event.property_added(&property);
        }

        Ok(Outcome::Accepted(property))
    }

    fn add_map(
        &self,
        items: HashMap<String, Value>,
        options: &CreateOptions<'_>,
    ) -> Result<usize> {
        let mut accepted = 0;
        for (name, value) in items {
            match self.add(&name, value, options) {
                Ok(outcome) if outcome.is_accepted() => accepted += 1,
                Ok(_) => {}
                Err(e) => return Err(PropertiesError::incomplete(accepted, e)),
            }
        }
        Ok(accepted)
    }

    fn add_text_map(
        &self,
        items: HashMap<String, String>,
        options: &CreateOptions<'_>,
    ) -> Result<usize> {
        let mut accepted = 0;
        for (name, text) in items {
            match self.add_parsed(&name, &text, options) {
                Ok(outcome) if outcome.is_accepted() => accepted += 1,
                Ok(_) => {}
                Err(e) => return Err(PropertiesError::incomplete(accepted, e)),
            }
        }
        Ok(accepted)
    }

    fn delete(&self, name: &str) -> bool {
        self.write().remove(name).is_some()
    }
}

/// A read-only view over a collection
#[derive(Debug)]
pub struct ImmutableProperties {
    inner: PropertyCollection,
}

impl ImmutableProperties {
    pub fn new(inner: PropertyCollection) -> Self {
        Self { inner }
    }
}

impl From<PropertyCollection> for ImmutableProperties {
    fn from(inner: PropertyCollection) -> Self {
        Self::new(inner)
    }
}

impl Properties for ImmutableProperties {
    fn list(&self) -> Vec<Property> {
        self.inner.list()
    }

    fn named(&self, name: &str) -> Option<Property> {
        self.inner.named(name)
    }

    fn filter(&self, predicate: &dyn Fn(&Property) -> bool) -> Vec<Property> {
        self.inner.filter(predicate)
    }

    fn range(&self, visitor: &mut dyn FnMut(&Property) -> bool) {
        self.inner.range(visitor)
    }

    fn size(&self) -> usize {
        self.inner.size()
    }
}
