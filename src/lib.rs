//! matterprops: strongly typed properties from maps, text and YAML front matter
//!
//! This library turns loosely typed input (decoded maps, raw text, or the YAML
//! block at the top of a markdown document) into named, typed properties and
//! back into plain maps for display or serialization.
//!
//! # Features
//!
//! - **Six property kinds**: text, text list, flag, cardinal, date-time and resource URL
//! - **Smart parsing** of text values: flag, then date-time, then integer, then text
//! - **Extension points** for unknown types, post-creation wrapping, add policies and add events
//! - **Thread-safe collections** that can be shared and mutated without external locking
//! - **Front matter extraction** with a strict (default) or lenient YAML error mode
//!
//! # Quick Start
//!
//! ## Extracting Front Matter
//!
//! ```rust
//! use matterprops::{CollectionFactory, ExtractOptions, Properties, Result};
//!
//! fn main() -> Result<()> {
//!     let factory = CollectionFactory::default();
//!     let content = b"---\ntitle: Hello\ncount: 3\n---\n# Body\n";
//!
//!     let front_matter = factory.mutable_from_front_matter(content, &ExtractOptions::default())?;
//!     assert_eq!(front_matter.body_text(), "# Body");
//!
//!     let properties = front_matter.properties.expect("document has front matter");
//!     assert_eq!(properties.named("count").and_then(|p| p.as_cardinal()), Some(3));
//!     Ok(())
//! }
//! ```
//!
//! ## Building Collections by Hand
//!
//! ```rust
//! use matterprops::{CollectionFactory, CreateOptions, MutableProperties, Properties, Result, Value};
//!
//! fn main() -> Result<()> {
//!     let properties = CollectionFactory::default().empty_mutable();
//!     let options = CreateOptions::default();
//!
//!     properties.add("tags", Value::from(vec!["rust", "yaml"]), &options)?;
//!     properties.add_parsed("published", "2021-03-04", &options)?;
//!     properties.add_parsed("draft", "false", &options)?;
//!
//!     assert_eq!(properties.size(), 3);
//!     assert!(properties.named("published").unwrap().as_date_time().is_some());
//!     Ok(())
//! }
//! ```
//!
//! ## Reading Files
//!
//! ```rust,no_run
//! use matterprops::{FrontMatterReader, Properties, Result};
//!
//! fn main() -> Result<()> {
//!     let document = FrontMatterReader::new().read_file("example.md")?;
//!     if let Some(properties) = &document.properties {
//!         for (name, value) in properties.to_map() {
//!             println!("{name}: {value}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: properties, values, the property factory, collections and front matter extraction
//! - [`io`]: file resolution and file-backed reading
//! - [`error`]: the crate error type

// Public API exports
pub use error::{PropertiesError, Result};

// Core types
pub use core::{
    AddEvent, AddPolicy, AfterCreateHook, CollectionConfig, CollectionFactory, CreateOptions,
    CustomCreator, DefaultPropertyFactory, DownloadHook, ExtractOptions, FactoryConfig,
    FrontMatter, ImmutableProperties, LocalFile, MutableProperties, Outcome, Properties, Property,
    PropertyCollection, PropertyFactory, PropertyKind, PropertyName, PropertyValue, Resource,
    ResourceFetcher, Value, YamlErrorMode,
};

// IO types
pub use io::{FrontMatterReader, ReaderConfig};

// Internal modules
pub mod core;
pub mod error;
pub mod io;

// CLI components are available only in the binary, not as part of the library API
