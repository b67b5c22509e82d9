//! Error types for the matterprops library
//!
//! Every fallible operation in the crate returns [`PropertiesError`]. Errors are
//! handed back to the caller untouched; nothing is retried or logged here.

use crate::core::front_matter::FrontMatter;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum PropertiesError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The front matter block is not valid YAML
    #[error("failed to decode front matter YAML: {0}")]
    YamlDecode(#[from] serde_yaml::Error),

    /// The front matter block is valid YAML but cannot be turned into properties
    #[error("invalid front matter: {reason}")]
    InvalidFrontMatter { reason: String },

    /// An opening `---` delimiter was found without a closing one
    #[error(
        "unexplained front matter parser error; opened: {opened}, start index: {start}, end index: {end}"
    )]
    MalformedFrontMatter {
        opened: bool,
        start: usize,
        end: usize,
    },

    /// No property variant (and no custom creator) accepted the value
    #[error("unable to add {name:?} property, type {type_name} is not known: {value}")]
    UnsupportedType {
        name: String,
        type_name: String,
        value: String,
    },

    /// Property names must be non-empty
    #[error("invalid property name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A bulk insertion stopped at its first failing entry
    #[error("bulk insert stopped after {accepted} accepted properties: {source}")]
    Incomplete {
        accepted: usize,
        #[source]
        source: Box<PropertiesError>,
    },

    /// Front matter was decoded but not every entry could be stored
    ///
    /// `partial` holds the body and the properties stored before the failure.
    #[error("front matter partially extracted with {count} properties: {source}", count = .partial.count)]
    PartialFrontMatter {
        partial: Box<FrontMatter<'static>>,
        #[source]
        source: Box<PropertiesError>,
    },

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Errors raised by caller supplied hooks, creators and policies
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PropertiesError>;

impl PropertiesError {
    /// Create a new unsupported type error
    pub fn unsupported_type(
        name: impl Into<String>,
        type_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::UnsupportedType {
            name: name.into(),
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// Create a new invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid front matter error
    pub fn invalid_front_matter(reason: impl Into<String>) -> Self {
        Self::InvalidFrontMatter {
            reason: reason.into(),
        }
    }

    /// Create a new malformed front matter error for an unclosed block
    pub fn unclosed_front_matter(start: usize) -> Self {
        Self::MalformedFrontMatter {
            opened: true,
            start,
            end: 0,
        }
    }

    /// Wrap the first error of a bulk insertion together with the partial count
    pub fn incomplete(accepted: usize, source: PropertiesError) -> Self {
        Self::Incomplete {
            accepted,
            source: Box::new(source),
        }
    }

    /// Keep what was extracted before `source` stopped the insertion
    pub fn partial_front_matter(partial: FrontMatter<'static>, source: PropertiesError) -> Self {
        Self::PartialFrontMatter {
            partial: Box::new(partial),
            source: Box::new(source),
        }
    }

    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Wrap an arbitrary error raised by a hook or policy
    pub fn custom(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Custom(error.into())
    }

    /// True for failures decoding the YAML block of a front matter region
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::YamlDecode(_) | Self::InvalidFrontMatter { .. })
    }

    /// Number of properties accepted before a bulk insertion failed
    pub fn accepted(&self) -> usize {
        match self {
            Self::Incomplete { accepted, .. } => *accepted,
            Self::PartialFrontMatter { partial, .. } => partial.count,
            _ => 0,
        }
    }

    /// The error that actually stopped the operation, looking through `Incomplete`
    pub fn root_cause(&self) -> &PropertiesError {
        match self {
            Self::Incomplete { source, .. } | Self::PartialFrontMatter { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// The partially extracted document, if this error carries one
    pub fn partial(&self) -> Option<&FrontMatter<'static>> {
        match self {
            Self::PartialFrontMatter { partial, .. } => Some(partial.as_ref()),
            _ => None,
        }
    }

    pub fn into_partial(self) -> Option<FrontMatter<'static>> {
        match self {
            Self::PartialFrontMatter { partial, .. } => Some(*partial),
            _ => None,
        }
    }
}
