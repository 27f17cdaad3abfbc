//! Infrastructure adapters behind the domain ports.

pub mod config;
pub mod database;
pub mod logging;
pub mod oracle;
pub mod storage;
