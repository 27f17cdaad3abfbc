//! Rapport - Conversational Assessment Orchestrator
//!
//! Rapport drives a multi-phase personality, empathy, attachment, and values
//! interview through a conversational language model: it poses catalog items
//! as natural conversation, derives numeric scores from the model's replies,
//! persists each answer exactly once, and coordinates with an asynchronous
//! photo moderation pipeline that can block and resume the conversation.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **Domain** (`domain`): pure models, port traits, and the error taxonomy
//! - **Services** (`services`): survey catalog, trigger detection, reply
//!   sanitizing, score derivation, and the turn orchestrator
//! - **Infrastructure** (`infrastructure`): SQLite repositories, the HTTP
//!   oracle client, filesystem asset storage, config, and logging
//! - **CLI** (`cli`): clap-driven entry points

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{TurnError, TurnResult};
pub use domain::models::{
    Config, MemoryLayer, MemoryTurn, ModerationStatus, PhotoAsset, PhotoRole, Speaker,
    SurveyDefinition, SurveyItem, SurveyKind, TurnReply, TurnRequest,
};
pub use services::{SurveyCatalog, TurnOrchestrator};
