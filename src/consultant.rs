//! Consultation engine
//!
//! Owns one conversation: the tracked state, the bounded history and an
//! optional generative backend. The emergency check always runs first and
//! cannot be bypassed; when it fires, the turn takes the rule-based
//! escalation path regardless of backend availability. Backend failures
//! fall back to the deterministic composer, never drop the turn.

use std::env;
use tracing::{info, warn};

use crate::classifier::TriageClassifier;
use crate::composer::{self, Reply};
use crate::instructions;
use crate::memory::{ConversationHistory, MessageRole};
use crate::openai::{GenerativeBackend, OpenAiBackend};
use crate::patterns::EMERGENCY_SEVERITY;
use crate::state::{ConversationState, MissingFact, Stage};

/// Number of recent history messages forwarded to the backend per call.
const HISTORY_CONTEXT_MESSAGES: usize = 6;

/// One consultation conversation. Create one instance per session and
/// discard it when the session ends; there is no implicit singleton.
pub struct Consultant {
    state: ConversationState,
    history: ConversationHistory,
    backend: Option<Box<dyn GenerativeBackend>>,
    instructions: String,
}

impl Consultant {
    /// Build from the environment: backend enabled when a well-formed
    /// `OPENAI_API_KEY` is present, otherwise rule-based only.
    pub fn from_env() -> Self {
        let backend: Option<Box<dyn GenerativeBackend>> = match env::var("OPENAI_API_KEY") {
            Ok(key) if key.starts_with("sk-") => {
                info!("Generative backend enabled (API key detected)");
                Some(Box::new(OpenAiBackend::new(key)))
            }
            Ok(_) => {
                warn!("API key format looks incorrect (should start with 'sk-'). Using rule-based mode.");
                None
            }
            Err(_) => {
                info!("No OPENAI_API_KEY found. Using rule-based mode.");
                None
            }
        };

        Self {
            state: ConversationState::new(),
            history: ConversationHistory::new(),
            backend,
            instructions: instructions::load_default(),
        }
    }

    /// Rule-based engine with no generative backend.
    pub fn rule_based() -> Self {
        Self {
            state: ConversationState::new(),
            history: ConversationHistory::new(),
            backend: None,
            instructions: instructions::DEFAULT_INSTRUCTIONS.to_string(),
        }
    }

    /// Engine with an injected backend, the seam used by tests and by
    /// callers that manage their own credentials.
    pub fn with_backend(backend: Box<dyn GenerativeBackend>) -> Self {
        Self {
            state: ConversationState::new(),
            history: ConversationHistory::new(),
            backend: Some(backend),
            instructions: instructions::load_default(),
        }
    }

    pub fn backend_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Read access to the tracked conversation state.
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Fixed greeting, issued once per new conversation.
    pub fn initial_greeting(&self) -> &'static str {
        composer::greeting()
    }

    /// Process one turn of patient input and return the reply text.
    pub async fn process_turn(&mut self, input: &str) -> crate::Result<String> {
        Ok(self.respond(input).await?.into_text())
    }

    /// Process one turn, exposing whether the reply was deterministic or
    /// generated.
    pub async fn respond(&mut self, input: &str) -> crate::Result<Reply> {
        let input = input.trim();

        // Empty input: fixed prompt, no state change, no classifier run.
        if input.is_empty() {
            return Ok(Reply::Deterministic(composer::prompt_for_input().to_string()));
        }

        // Safety-critical: the emergency check runs before any delegation
        // or stage mutation, on every turn.
        let mut effective_input = input.to_string();
        let mut is_emergency = TriageClassifier::detect_emergency(input, true);

        // Re-check against the presenting complaint plus the latest input.
        // This can double-count keywords across turns (an accepted source
        // of false positives; escalating too often beats the alternative).
        if !is_emergency && !self.state.symptom_description.is_empty() {
            let combined = format!("{} {}", self.state.symptom_description, input);
            if TriageClassifier::detect_emergency(&combined, true) {
                is_emergency = true;
                effective_input = combined;
            }
        }

        if is_emergency {
            let response = composer::emergency_response(&effective_input);
            self.state.mark_emergency();
            return Ok(Reply::Deterministic(response));
        }

        // Non-emergency: try the generative backend, fall back on failure.
        if let Some(backend) = &self.backend {
            let context = self.history.recent(HISTORY_CONTEXT_MESSAGES);
            match backend
                .generate(&self.instructions, &context, input, false)
                .await
            {
                Ok(answer) => {
                    self.history.add(MessageRole::User, input);
                    self.history.add(MessageRole::Assistant, &answer);
                    self.state.update(input);
                    return Ok(Reply::Generated(answer));
                }
                Err(error) => {
                    warn!("Generative backend failed, using rule-based response: {}", error);
                }
            }
        }

        Ok(Reply::Deterministic(self.rule_based_reply(input)))
    }

    /// Deterministic reply generation, branching on the conversation stage.
    fn rule_based_reply(&mut self, input: &str) -> String {
        match self.state.stage {
            Stage::Greeting => {
                self.state.record_presenting_complaint(input);

                let input_lower = input.to_lowercase();
                let clearly_mild = TriageClassifier::detect_mild_symptoms(input)
                    && !EMERGENCY_SEVERITY.iter().any(|s| input_lower.contains(s));

                if clearly_mild {
                    composer::initial_mild_response(&self.state)
                } else {
                    composer::initial_generic_response().to_string()
                }
            }
            Stage::Assessment => {
                self.state.record_assessment_turn(input);

                if self.state.is_ready() {
                    let response = composer::guidance_response(&self.state);
                    self.state.stage = Stage::Completed;
                    return response;
                }

                match self.state.missing_fact() {
                    MissingFact::Timeline => composer::timeline_prompt().to_string(),
                    MissingFact::Concerns => composer::concerns_prompt().to_string(),
                    MissingFact::None => composer::default_response().to_string(),
                }
            }
            Stage::Completed | Stage::EmergencyHandled => composer::default_response().to_string(),
        }
    }
}
