//! Domain models: pure data with no I/O.

pub mod config;
pub mod memory;
pub mod photo;
pub mod progress;
pub mod protocol;
pub mod survey;
pub mod turn;

pub use config::{Config, DatabaseConfig, LoggingConfig, OracleConfig, PhotoConfig};
pub use memory::{MemoryLayer, MemoryTurn, NewMemoryTurn, Speaker};
pub use photo::{ModerationStatus, PhotoAsset, PhotoRole};
pub use progress::ProgressRecord;
pub use protocol::{PhotoFlowState, StimulusState};
pub use survey::{SurveyDefinition, SurveyItem, SurveyKind};
pub use turn::{TurnReply, TurnRequest};
