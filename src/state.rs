//! Conversation state tracking
//!
//! One `ConversationState` per conversation, owned by its engine instance.
//! The stage only moves forward under normal flow (greeting → assessment →
//! completed); emergency detection can force `EmergencyHandled` from any
//! stage at any time.

use crate::classifier::TriageClassifier;
use crate::patterns::{ASSESSMENT_SEVERITY, CONCERN_WORDS, TIMELINE_WORDS, WORSENING_WORDS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Conversation stage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    Assessment,
    Completed,
    EmergencyHandled,
}

/// The single highest-priority fact still missing before guidance can be
/// issued. Timeline outranks concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFact {
    Timeline,
    Concerns,
    None,
}

/// Structured facts accumulated across turns of one conversation
#[derive(Debug, Clone, Serialize)]
pub struct ConversationState {
    pub stage: Stage,
    /// Raw input that established the presenting complaint; set once at the
    /// first non-empty turn and reused for combined-text emergency re-checks.
    pub symptom_description: String,
    /// Recognized symptom keywords, in extraction order.
    pub symptoms: Vec<&'static str>,
    pub timeline: Option<String>,
    pub severity: Option<String>,
    pub concerns: Option<String>,
    /// Audit trail of which input produced each fact; not used for branching.
    pub information_gathered: HashMap<String, String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            stage: Stage::Greeting,
            symptom_description: String::new(),
            symptoms: Vec::new(),
            timeline: None,
            severity: None,
            concerns: None,
            information_gathered: HashMap::new(),
        }
    }

    /// Update state from one turn of patient input, branching on stage.
    pub fn update(&mut self, input: &str) {
        match self.stage {
            Stage::Greeting => self.record_presenting_complaint(input),
            Stage::Assessment => self.record_assessment_turn(input),
            Stage::Completed | Stage::EmergencyHandled => {}
        }
    }

    /// First non-empty turn: record the presenting complaint and move to
    /// assessment.
    pub fn record_presenting_complaint(&mut self, input: &str) {
        self.stage = Stage::Assessment;
        self.symptom_description = input.to_string();
        self.symptoms = TriageClassifier::extract_symptoms(input);
        self.information_gathered
            .insert("initial_symptoms".to_string(), input.to_string());
    }

    /// Assessment turn: the severity, timeline, progression and concern
    /// checks all run unconditionally; any subset may fire.
    pub fn record_assessment_turn(&mut self, input: &str) {
        let text_lower = input.to_lowercase();

        if ASSESSMENT_SEVERITY.iter().any(|s| text_lower.contains(s)) {
            self.severity = Some("severe".to_string());
            self.information_gathered
                .insert("severity".to_string(), input.to_string());
        }

        if TIMELINE_WORDS.iter().any(|w| text_lower.contains(w)) {
            self.timeline = Some(input.to_string());
            self.information_gathered
                .insert("timeline".to_string(), input.to_string());
        }

        if WORSENING_WORDS.iter().any(|w| text_lower.contains(w)) {
            self.information_gathered
                .insert("progression".to_string(), "worsening".to_string());
        }

        if CONCERN_WORDS.iter().any(|w| text_lower.contains(w)) {
            self.concerns = Some(input.to_string());
            self.information_gathered
                .insert("concerns".to_string(), input.to_string());
        }
    }

    /// Readiness predicate: enough is known to issue guidance.
    pub fn is_ready(&self) -> bool {
        self.timeline.is_some() && !self.symptoms.is_empty()
    }

    /// Which fact the composer should ask for next.
    pub fn missing_fact(&self) -> MissingFact {
        if self.timeline.is_none() {
            MissingFact::Timeline
        } else if self.concerns.is_none() {
            MissingFact::Concerns
        } else {
            MissingFact::None
        }
    }

    /// Force the terminal emergency stage, reachable from any stage.
    pub fn mark_emergency(&mut self) {
        self.stage = Stage::EmergencyHandled;
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_turn_records_complaint() {
        let mut state = ConversationState::new();
        state.update("I have a mild headache");

        assert_eq!(state.stage, Stage::Assessment);
        assert_eq!(state.symptom_description, "I have a mild headache");
        assert!(state.symptoms.contains(&"headache"));
        assert_eq!(
            state.information_gathered.get("initial_symptoms").map(String::as_str),
            Some("I have a mild headache")
        );
    }

    #[test]
    fn test_assessment_checks_fire_independently() {
        let mut state = ConversationState::new();
        state.update("I have a mild headache");
        state.update("it started two days ago, feels terrible and keeps worsening, I'm worried");

        assert_eq!(state.severity.as_deref(), Some("severe"));
        assert!(state.timeline.is_some());
        assert_eq!(
            state.information_gathered.get("progression").map(String::as_str),
            Some("worsening")
        );
        assert!(state.concerns.is_some());
    }

    #[test]
    fn test_readiness_requires_timeline_and_symptoms() {
        let mut state = ConversationState::new();
        assert!(!state.is_ready());

        state.update("I have a mild headache");
        assert!(!state.is_ready());
        assert_eq!(state.missing_fact(), MissingFact::Timeline);

        state.update("it started yesterday");
        assert!(state.is_ready());
        assert_eq!(state.missing_fact(), MissingFact::Concerns);
    }

    #[test]
    fn test_no_symptoms_blocks_readiness() {
        let mut state = ConversationState::new();
        state.update("I just feel off");
        state.update("it started yesterday");

        // Timeline known but no recognized symptom token
        assert!(!state.is_ready());
        assert_eq!(state.missing_fact(), MissingFact::Concerns);
    }

    #[test]
    fn test_emergency_reachable_from_any_stage() {
        let mut state = ConversationState::new();
        state.mark_emergency();
        assert_eq!(state.stage, Stage::EmergencyHandled);

        let mut state = ConversationState::new();
        state.update("I have a cough");
        state.update("started last week");
        state.mark_emergency();
        assert_eq!(state.stage, Stage::EmergencyHandled);
    }

    #[test]
    fn test_completed_stage_stops_mutation() {
        let mut state = ConversationState::new();
        state.update("I have a cough");
        state.update("started last week");
        state.stage = Stage::Completed;

        state.update("I'm worried about it");
        assert!(state.concerns.is_none());
    }
}
