//! Domain layer: models, ports, and the turn error taxonomy.

pub mod errors;
pub mod models;
pub mod ports;
