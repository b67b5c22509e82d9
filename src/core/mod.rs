//! Core types and domain logic

pub mod collection;
pub mod collection_factory;
pub mod datetime;
pub mod factory;
pub mod front_matter;
pub mod property;
pub mod resource;
pub mod value;

pub use collection::{
    AddEvent, AddPolicy, CollectionConfig, ImmutableProperties, MutableProperties, Properties,
    PropertyCollection,
};
pub use collection_factory::CollectionFactory;
pub use datetime::parse_date_time;
pub use factory::{
    parse_flag, AfterCreateHook, CreateOptions, CustomCreator, DefaultPropertyFactory,
    FactoryConfig, Outcome, PropertyFactory,
};
pub use front_matter::{
    extract_front_matter, scan, ExtractOptions, FrontMatter, FrontMatterRegion, YamlErrorMode,
};
pub use property::{LocalFile, Property, PropertyKind, PropertyName, PropertyValue, Resource};
pub use resource::{DownloadHook, ResourceFetcher};
pub use value::Value;
