//! Port traits: the seams between the orchestrator and its external
//! collaborators (record store, language oracle, asset storage).

mod asset_store;
mod memory_repository;
mod oracle;
mod photo_repository;
mod progress_repository;

pub use asset_store::AssetStore;
pub use memory_repository::MemoryRepository;
pub use oracle::{ChatTurn, Oracle, OracleRequest};
pub use photo_repository::PhotoRepository;
pub use progress_repository::ProgressRepository;
