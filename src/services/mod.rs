//! Services: the orchestration logic between the domain models and the
//! infrastructure adapters.

pub mod catalog;
pub mod orchestrator;
pub mod photo_gate;
pub mod prompts;
pub mod sanitize;
pub mod scoring;
pub mod stimulus;
pub mod triggers;

pub use catalog::SurveyCatalog;
pub use orchestrator::TurnOrchestrator;
pub use photo_gate::PhotoGate;
pub use sanitize::ReplySanitizer;
pub use scoring::ScoreExtractor;
pub use stimulus::StimulusTracker;
pub use triggers::TriggerDetector;
