//! Configuration loading and validation.
//!
//! - [`schema`] - The [`LoaderConfig`] type and its YAML form
//! - [`loader`] - File discovery and environment/flag layering

pub mod loader;
pub mod schema;

pub use loader::{
    apply_env, apply_overrides, find_config_file, load_config, load_config_file,
    ConfigOverrides, CONFIG_FILE_NAME,
};
pub use schema::LoaderConfig;
