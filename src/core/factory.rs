//! Turning untyped values and raw text into typed properties
//!
//! [`DefaultPropertyFactory`] dispatches on the arm of a [`Value`]. Values it
//! cannot classify go to a [`CustomCreator`]: first one passed for the single
//! call through [`CreateOptions`], then the one configured on the factory.
//! Every property the factory builds passes through the optional
//! [`AfterCreateHook`] before it is returned.

use crate::core::datetime::parse_date_time;
use crate::core::property::{Property, PropertyName, Resource};
use crate::core::value::Value;
use crate::error::{PropertiesError, Result};
use std::fmt;
use std::sync::Arc;

/// Result of an attempt to build or store a property
///
/// A rejection is not an error: hooks and policies veto by returning
/// [`Outcome::Rejected`], and report failures through `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The property was built (or stored)
    Accepted(Property),
    /// A hook or policy declined it, possibly handing back a substitute
    Rejected(Option<Property>),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn property(&self) -> Option<&Property> {
        match self {
            Self::Accepted(p) => Some(p),
            Self::Rejected(p) => p.as_ref(),
        }
    }

    pub fn into_property(self) -> Option<Property> {
        match self {
            Self::Accepted(p) => Some(p),
            Self::Rejected(p) => p,
        }
    }
}

/// Builds properties for values the factory does not know about
pub trait CustomCreator: Send + Sync {
    fn create(&self, name: &PropertyName, value: Value) -> Result<Outcome>;
}

impl<F> CustomCreator for F
where
    F: Fn(&PropertyName, Value) -> Result<Outcome> + Send + Sync,
{
    fn create(&self, name: &PropertyName, value: Value) -> Result<Outcome> {
        self(name, value)
    }
}

/// Wraps, replaces or vetoes each freshly built property
pub trait AfterCreateHook: Send + Sync {
    fn after_create(&self, property: Property) -> Result<Outcome>;
}

impl<F> AfterCreateHook for F
where
    F: Fn(Property) -> Result<Outcome> + Send + Sync,
{
    fn after_create(&self, property: Property) -> Result<Outcome> {
        self(property)
    }
}

/// Creates property instances
pub trait PropertyFactory: Send + Sync {
    /// Build a property from an untyped value, dispatching on its arm
    fn from_any(&self, name: &str, value: Value, options: &CreateOptions<'_>) -> Result<Outcome>;

    /// Build a property by inferring the type of `text`
    fn from_text(&self, name: &str, text: &str, options: &CreateOptions<'_>) -> Result<Outcome>;
}

/// Per-call options for property creation
#[derive(Clone, Copy, Default)]
pub struct CreateOptions<'a> {
    /// Consulted for unknown value types before the factory's own creator
    pub custom_creator: Option<&'a dyn CustomCreator>,
}

impl<'a> CreateOptions<'a> {
    pub fn with_custom_creator(creator: &'a dyn CustomCreator) -> Self {
        Self {
            custom_creator: Some(creator),
        }
    }
}

impl fmt::Debug for CreateOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateOptions")
            .field("custom_creator", &self.custom_creator.is_some())
            .finish()
    }
}

/// Factory-level collaborators, fixed at construction
#[derive(Clone, Default)]
pub struct FactoryConfig {
    pub custom_creator: Option<Arc<dyn CustomCreator>>,
    pub after_create: Option<Arc<dyn AfterCreateHook>>,
}

impl fmt::Debug for FactoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryConfig")
            .field("custom_creator", &self.custom_creator.is_some())
            .field("after_create", &self.after_create.is_some())
            .finish()
    }
}

/// The standard property factory
#[derive(Debug, Clone, Default)]
pub struct DefaultPropertyFactory {
    config: FactoryConfig,
}

impl DefaultPropertyFactory {
    /// Create a factory with no custom creator and no after-create hook
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    fn after_successful_create(&self, property: Property) -> Result<Outcome> {
        match &self.config.after_create {
            Some(hook) => hook.after_create(property),
            None => Ok(Outcome::Accepted(property)),
        }
    }

    fn handle_unknown_type(
        &self,
        name: PropertyName,
        value: Value,
        options: &CreateOptions<'_>,
    ) -> Result<Outcome> {
        let creator = options
            .custom_creator
            .or(self.config.custom_creator.as_deref());

        let Some(creator) = creator else {
            return Err(PropertiesError::unsupported_type(
                name.into_string(),
                value.type_name(),
                value.to_string_representation(),
            ));
        };

        match creator.create(&name, value)? {
            Outcome::Accepted(property) => self.after_successful_create(property),
            rejected => Ok(rejected),
        }
    }
}

impl PropertyFactory for DefaultPropertyFactory {
    fn from_any(&self, name: &str, value: Value, options: &CreateOptions<'_>) -> Result<Outcome> {
        let name = PropertyName::new(name)?;
        let property = match value {
            Value::Text(s) => Property::text(name, s),
            Value::TextList(items) => Property::text_list(name, items),
            Value::DateTime(t) => Property::date_time(name, t),
            Value::Flag(b) => Property::flag(name, b),
            Value::Cardinal(n) => Property::cardinal(name, n),
            Value::Url(url) => Property::resource(name, Resource::new(url)),
            other @ Value::Other(_) => return self.handle_unknown_type(name, other, options),
        };
        self.after_successful_create(property)
    }

    fn from_text(&self, name: &str, text: &str, options: &CreateOptions<'_>) -> Result<Outcome> {
        if let Some(flag) = parse_flag(text) {
            return self.from_any(name, Value::Flag(flag), options);
        }

        if let Some(time) = parse_date_time(text) {
            return self.from_any(name, Value::DateTime(time), options);
        }

        if let Ok(number) = text.parse::<i64>() {
            return self.from_any(name, Value::Cardinal(number), options);
        }

        self.from_any(name, Value::Text(text.to_string()), options)
    }
}

/// The usual boolean literal family: `1 t T TRUE true True` and their negatives
pub fn parse_flag(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
