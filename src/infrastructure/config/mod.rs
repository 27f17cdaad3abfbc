//! Configuration loading (figment, hierarchical).

mod loader;

pub use loader::{ConfigError, ConfigLoader};
