//! Response Composer
//!
//! Builds the deterministic templated outputs from classifier and tracker
//! state. Every template honors the fixed style contract: acknowledgments
//! start with "I understand", reassurance is phrased as "let's work through
//! this together" (never "don't worry"), substantive responses close with
//! "How does this sound to you?", and emergency/completed responses carry
//! the in-person examination disclaimer.

use crate::classifier::{TempUnit, TriageClassifier};
use crate::recommendations::get_recommendations;
use crate::state::ConversationState;

/// How a turn's reply text was produced. The deterministic path is fully
/// unit-testable without any external service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Deterministic(String),
    Generated(String),
}

impl Reply {
    pub fn into_text(self) -> String {
        match self {
            Reply::Deterministic(text) | Reply::Generated(text) => text,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Reply::Deterministic(text) | Reply::Generated(text) => text,
        }
    }
}

/// Initial greeting, issued once per new conversation.
pub fn greeting() -> &'static str {
    "Hello, I'm here to help you with your health concerns today. I understand you're looking for some guidance about how you're feeling.\n\nWhat's bringing you in today? Please describe what you're experiencing."
}

/// Fixed prompt returned for empty/whitespace-only input.
pub fn prompt_for_input() -> &'static str {
    "I understand you might be hesitant. Please feel free to share what's on your mind - I'm here to help."
}

/// Emergency escalation response.
///
/// The short symptom description is derived by priority: fever (with a
/// unit-aware restatement of the parsed temperature) > breathing > chest or
/// cardiac > generic pain > first two extracted symptoms > "your symptoms".
pub fn emergency_response(text: &str) -> String {
    let text_lower = text.to_lowercase();

    let symptom_desc = if TriageClassifier::mentions_fever(&text_lower) {
        match TriageClassifier::parse_temperature(&text_lower) {
            Some(reading) => match reading.unit {
                TempUnit::Celsius => {
                    if reading.value >= 40.5 {
                        format!("a fever of {}°C", reading.raw)
                    } else {
                        format!("a high fever of {}°C", reading.raw)
                    }
                }
                TempUnit::Fahrenheit => {
                    if reading.value >= 105.0 {
                        format!("a fever of {}°F", reading.raw)
                    } else {
                        format!("a high fever of {}°F", reading.raw)
                    }
                }
            },
            None => "a high fever".to_string(),
        }
    } else if text_lower.contains("breathing") || text_lower.contains("breathe") {
        "difficulty breathing".to_string()
    } else if text_lower.contains("chest")
        || text_lower.contains("cardiac")
        || text_lower.contains("heart")
    {
        "chest pain or cardiac symptoms".to_string()
    } else if text_lower.contains("pain") {
        "severe pain".to_string()
    } else {
        let symptoms = TriageClassifier::extract_symptoms(text);
        if symptoms.is_empty() {
            "your symptoms".to_string()
        } else {
            symptoms[..symptoms.len().min(2)].join(", ")
        }
    };

    format!(
        "Based on what you've told me, {} suggest this may need immediate medical attention. This is beyond what I can safely assess remotely.\n\nHere's what I recommend: Please seek immediate medical care. If you're experiencing severe symptoms right now, call 911 or go to your nearest emergency room immediately. If symptoms are less severe but still concerning, consider urgent care or contact your primary care provider right away.\n\nI can provide guidance, but I cannot replace an in-person examination, especially for symptoms like these. Your safety is the priority.\n\nHow does this sound to you? Do you have any questions about where to seek care?",
        symptom_desc
    )
}

/// First response when the presenting complaint is clearly mild.
pub fn initial_mild_response(state: &ConversationState) -> String {
    let symptom = state.symptoms.first().copied().unwrap_or("these symptoms");
    format!(
        "I understand you're experiencing {}. That sounds really uncomfortable. Let's work through this together.\n\nWhen did this first start, and has it been getting better, worse, or staying the same?",
        symptom
    )
}

/// First response when the presenting complaint is unclear or severe-sounding.
pub fn initial_generic_response() -> &'static str {
    "I understand you're experiencing some concerns. That sounds really uncomfortable.\n\nCould you help me understand more about what you're feeling? When did this first start, and has it been getting better, worse, or staying the same?"
}

/// Self-care guidance, only reachable once the readiness predicate holds.
pub fn guidance_response(state: &ConversationState) -> String {
    let recommendations = get_recommendations(&state.symptoms);
    let symptom_desc = state.symptoms.first().copied().unwrap_or("these symptoms");

    let mut response = format!(
        "I understand you're experiencing {}. That sounds really uncomfortable. Let's work through this together.\n",
        symptom_desc
    );

    if let Some(concerns) = &state.concerns {
        response.push_str(&format!(
            "\nIt's completely understandable that you're concerned about {}.\n",
            concern_topic(concerns)
        ));
    }

    response.push_str(&format!(
        "\nBased on what you've told me, here are some things that might help:\n\n1. {}\n2. {}\n3. {}\n\nWhat concerns you most about this?\n\nIf this isn't improving in 3-5 days, please contact your primary care provider or seek medical attention. I can provide guidance, but I cannot replace an in-person examination.\n\nHow does this sound to you?",
        recommendations[0], recommendations[1], recommendations[2]
    ));

    response
}

/// Ask for the timeline, the highest-priority missing fact.
pub fn timeline_prompt() -> &'static str {
    "I understand. When did this first start, and has it been getting better, worse, or staying the same?"
}

/// Ask what worries the patient most.
pub fn concerns_prompt() -> &'static str {
    "I understand. What concerns you most about this?"
}

/// Fallback when no stage-specific response applies.
pub fn default_response() -> &'static str {
    "I understand. Let's work through this together. Could you tell me more about when this started and how it's been progressing? What concerns you most about this?"
}

/// Farewell issued when the patient ends the conversation.
pub fn farewell() -> &'static str {
    "I understand you're ending our conversation. Take care, and remember - if your symptoms worsen or you have concerns, please don't hesitate to seek medical attention. How does this sound to you?"
}

/// Response to the help command.
pub fn help_response() -> &'static str {
    "I understand you'd like some help. You can type 'exit', 'quit', 'q', or 'bye' at any time to end our conversation. Otherwise, just describe your symptoms or concerns, and I'll help you work through them. How does this sound to you?"
}

/// Generic apology, surfaced by the boundary layer when turn processing
/// fails unexpectedly.
pub fn apology() -> &'static str {
    "I apologize, I encountered an issue. Please try rephrasing your concern. How does this sound to you?"
}

/// First extracted symptom token from the concern text, or "your symptoms".
fn concern_topic(concern_text: &str) -> &'static str {
    TriageClassifier::extract_symptoms(concern_text)
        .first()
        .copied()
        .unwrap_or("your symptoms")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stage;

    const DISCLAIMER: &str = "I can provide guidance, but I cannot replace an in-person examination";

    #[test]
    fn test_emergency_fever_formatting() {
        let response = emergency_response("temperature is 106 f");
        assert!(response.contains("a fever of 106°F"));
        assert!(response.contains(DISCLAIMER));

        let response = emergency_response("fever of 41.5 c");
        assert!(response.contains("a fever of 41.5°C"));

        // Number parsed but below the threshold restatement boundary
        let response = emergency_response("high fever, around 103 f");
        assert!(response.contains("a high fever of 103°F"));

        let response = emergency_response("a dangerous fever");
        assert!(response.contains("a high fever suggest"));
    }

    #[test]
    fn test_emergency_symptom_priority() {
        // Breathing outranks chest when both are present and no fever mention
        let response = emergency_response("I have chest pain and can't breathe");
        assert!(response.contains("difficulty breathing"));

        let response = emergency_response("crushing chest pressure");
        assert!(response.contains("chest pain or cardiac symptoms"));

        let response = emergency_response("unbearable pain in my leg");
        assert!(response.contains("severe pain"));

        let response = emergency_response("facial droop and slurred speech");
        assert!(response.contains("facial droop, slurred speech"));

        let response = emergency_response("something is very wrong");
        assert!(response.contains("your symptoms"));
    }

    #[test]
    fn test_guidance_structure() {
        let mut state = ConversationState::new();
        state.update("I have a mild headache");
        state.update("it started yesterday");
        state.stage = Stage::Completed;

        let response = guidance_response(&state);
        assert!(response.starts_with("I understand you're experiencing headache."));
        assert!(response.contains("That sounds really uncomfortable."));
        assert!(response.contains("Let's work through this together"));
        assert!(response.contains("1. Rest in a quiet, dark room"));
        assert!(response.contains("What concerns you most about this?"));
        assert!(response.contains("3-5 days"));
        assert!(response.contains(DISCLAIMER));
        assert!(response.ends_with("How does this sound to you?"));
        assert!(!response.contains("don't worry"));
    }

    #[test]
    fn test_guidance_concern_framing() {
        let mut state = ConversationState::new();
        state.update("I have a cough");
        state.update("started three days ago, I'm worried it might be a cold");

        let response = guidance_response(&state);
        assert!(response.contains("It's completely understandable that you're concerned about cold."));
    }

    #[test]
    fn test_concern_topic_fallback() {
        assert_eq!(concern_topic("worried about my cough"), "cough");
        assert_eq!(concern_topic("just generally worried"), "your symptoms");
    }

    #[test]
    fn test_style_contract_fixtures() {
        assert!(greeting().contains("I understand"));
        assert!(farewell().ends_with("How does this sound to you?"));
        assert!(help_response().ends_with("How does this sound to you?"));
        assert!(apology().ends_with("How does this sound to you?"));
    }
}
