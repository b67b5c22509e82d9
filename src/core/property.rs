//! Typed, immutable, named properties
//!
//! A [`Property`] couples a validated [`PropertyName`] with one of six value
//! kinds. The kind is fixed at construction; there are no setters.

use crate::core::value::Value;
use crate::error::{PropertiesError, Result};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of a property, unique within a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PropertyName(String);

impl PropertyName {
    /// Create a name, rejecting empty strings
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PropertiesError::invalid_name(name, "name must not be empty"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PropertyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PropertyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PropertyName {
    type Error = PropertiesError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for PropertyName {
    type Error = PropertiesError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

/// A file that was downloaded for a resource URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalFile {
    /// Reference to the file as it should appear in rendered output
    pub href: String,
    /// Location of the file on disk
    pub path: PathBuf,
}

impl LocalFile {
    pub fn new(href: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            href: href.into(),
            path: path.into(),
        }
    }
}

/// A parsed URL and, once fetched, the local copy of what it points to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    url: Url,
    local: Option<LocalFile>,
}

impl Resource {
    pub fn new(url: Url) -> Self {
        Self { url, local: None }
    }

    pub fn downloaded(url: Url, local: LocalFile) -> Self {
        Self {
            url,
            local: Some(local),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn local_file(&self) -> Option<&LocalFile> {
        self.local.as_ref()
    }

    pub fn local_href(&self) -> Option<&str> {
        self.local.as_ref().map(|l| l.href.as_str())
    }

    pub fn local_path(&self) -> Option<&Path> {
        self.local.as_ref().map(|l| l.path.as_path())
    }
}

/// Discriminant of a [`PropertyValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Text,
    TextList,
    Flag,
    Cardinal,
    DateTime,
    Resource,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::TextList => write!(f, "text list"),
            Self::Flag => write!(f, "flag"),
            Self::Cardinal => write!(f, "cardinal"),
            Self::DateTime => write!(f, "date-time"),
            Self::Resource => write!(f, "resource"),
        }
    }
}

/// The native value of a property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    TextList(Vec<String>),
    Flag(bool),
    Cardinal(i64),
    DateTime(DateTime<FixedOffset>),
    Resource(Resource),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Text(_) => PropertyKind::Text,
            Self::TextList(_) => PropertyKind::TextList,
            Self::Flag(_) => PropertyKind::Flag,
            Self::Cardinal(_) => PropertyKind::Cardinal,
            Self::DateTime(_) => PropertyKind::DateTime,
            Self::Resource(_) => PropertyKind::Resource,
        }
    }
}

/// A single named, strongly typed front matter variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    name: PropertyName,
    value: PropertyValue,
}

impl Property {
    pub fn new(name: PropertyName, value: PropertyValue) -> Self {
        Self { name, value }
    }

    pub fn text(name: PropertyName, text: impl Into<String>) -> Self {
        Self::new(name, PropertyValue::Text(text.into()))
    }

    pub fn text_list(name: PropertyName, items: Vec<String>) -> Self {
        Self::new(name, PropertyValue::TextList(items))
    }

    pub fn flag(name: PropertyName, flag: bool) -> Self {
        Self::new(name, PropertyValue::Flag(flag))
    }

    pub fn cardinal(name: PropertyName, number: i64) -> Self {
        Self::new(name, PropertyValue::Cardinal(number))
    }

    pub fn date_time(name: PropertyName, time: DateTime<FixedOffset>) -> Self {
        Self::new(name, PropertyValue::DateTime(time))
    }

    pub fn resource(name: PropertyName, resource: Resource) -> Self {
        Self::new(name, PropertyValue::Resource(resource))
    }

    pub fn name(&self) -> &PropertyName {
        &self.name
    }

    pub fn kind(&self) -> PropertyKind {
        self.value.kind()
    }

    /// The value in its native type
    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    /// The value as an untyped [`Value`], for consumers that don't care about the type
    pub fn any_value(&self) -> Value {
        match &self.value {
            PropertyValue::Text(s) => Value::Text(s.clone()),
            PropertyValue::TextList(items) => Value::TextList(items.clone()),
            PropertyValue::Flag(b) => Value::Flag(*b),
            PropertyValue::Cardinal(n) => Value::Cardinal(*n),
            PropertyValue::DateTime(t) => Value::DateTime(*t),
            PropertyValue::Resource(r) => Value::Url(r.url.clone()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text_list(&self) -> Option<&[String]> {
        match &self.value {
            PropertyValue::TextList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self.value {
            PropertyValue::Flag(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_cardinal(&self) -> Option<i64> {
        match self.value {
            PropertyValue::Cardinal(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTime<FixedOffset>> {
        match &self.value {
            PropertyValue::DateTime(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match &self.value {
            PropertyValue::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Copy the name/value pair into `map`
    pub fn copy_into(&self, map: &mut std::collections::HashMap<String, Value>) {
        map.insert(self.name.to_string(), self.any_value());
    }
}
