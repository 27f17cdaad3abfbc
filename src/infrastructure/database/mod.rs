//! SQLite adapters for the repository ports.

mod connection;
mod memory_repo;
mod photo_repo;
mod progress_repo;
mod utils;

pub use connection::DatabaseConnection;
pub use memory_repo::SqliteMemoryRepository;
pub use photo_repo::SqlitePhotoRepository;
pub use progress_repo::SqliteProgressRepository;
