//! Triage Consultant
//!
//! A conversational triage engine that:
//! - Classifies free-text patient descriptions as emergency or non-emergency
//! - Escalates emergencies with a deterministic, rule-based response that no
//!   generative backend can override
//! - Runs a multi-turn self-care consultation for everything else
//! - Optionally delegates non-emergency turns to an LLM backend, falling
//!   back to deterministic templates on any failure
//!
//! TURN FLOW:
//! INPUT → EMERGENCY CHECK → escalate | GENERATE → fallback? → TRACK → COMPOSE

pub mod classifier;
pub mod composer;
pub mod consultant;
pub mod error;
pub mod instructions;
pub mod memory;
pub mod openai;
pub mod patterns;
pub mod recommendations;
pub mod state;

pub use error::Result;

// Re-export common types
pub use classifier::{TriageClassifier, TempUnit, TemperatureReading};
pub use composer::Reply;
pub use consultant::Consultant;
pub use state::{ConversationState, MissingFact, Stage};
