pub mod config;
pub mod emitters;
pub mod entry_point;
pub mod error;

pub use config::{EntryPointConfig, load_config};
pub use emitters::application::{ApplicationOptions, emit_application};
pub use entry_point::{
    EntryPoint, EntryPointResolver, generate_entry_point, has_application_config,
    resolve_entry_point,
};
pub use error::{ConfigError, EntryPointError};

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}
