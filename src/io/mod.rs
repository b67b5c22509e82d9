pub mod fs;
pub mod reader;

pub use fs::{is_markdown, resolve_files};
pub use reader::{FrontMatterReader, ReaderConfig};
