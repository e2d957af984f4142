//! Configuration for the incubator
//!
//! Provides types and parsing for `incubator.toml`.

pub mod loader;
pub mod schema;

pub use loader::{find_config, find_config_from, load_config, parse_config, ConfigError};
pub use schema::*;
