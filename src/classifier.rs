//! Triage Classifier
//!
//! Classifies patient inputs as either:
//! - Emergency: immediate escalation, always rule-based (never delegated to an LLM)
//! - Non-emergency: handled by the conversation flow, with mild-symptom detection
//!
//! The classifier intentionally over-triggers: a false positive costs one extra
//! escalation prompt, a false negative could route an emergency to self-care.
//! There is no negation handling ("no chest pain" still matches "chest pain").

use crate::patterns::{
    BREATHING_WORDS, EMERGENCY_KEYWORDS, EMERGENCY_SEVERITY, FEVER_MENTION_WORDS, FEVER_PATTERNS,
    HIGH_FEVER_PHRASES, MILD_KEYWORDS, PAIN_WORDS, TEMPERATURE_READING, WORSENING_WORDS,
};

/// Temperature unit of a parsed fever reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempUnit {
    Fahrenheit,
    Celsius,
}

/// A numeric temperature reading extracted from patient text
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    /// The number exactly as the patient typed it ("106", "40.5")
    pub raw: String,
    pub value: f64,
    pub unit: TempUnit,
}

impl TemperatureReading {
    /// Whether the reading is in the emergency range (105°F / 40.5°C inclusive)
    pub fn is_emergency_range(&self) -> bool {
        match self.unit {
            TempUnit::Fahrenheit => self.value >= 105.0,
            TempUnit::Celsius => self.value >= 40.5,
        }
    }
}

/// Stateless text classifier over the static keyword tables
pub struct TriageClassifier;

impl TriageClassifier {
    /// Detect whether patient input suggests emergency symptoms.
    ///
    /// Disjunctive checks, any match escalates:
    /// 1. emergency keyword substring
    /// 2. fever mention with an emergency-range numeric pattern or an explicit
    ///    high-fever phrase
    /// 3. severity intensifier combined with breathing/pain language or a
    ///    worsening trend (only when `check_severity` is set)
    pub fn detect_emergency(text: &str, check_severity: bool) -> bool {
        let text_lower = text.to_lowercase();

        if EMERGENCY_KEYWORDS.iter().any(|kw| text_lower.contains(kw)) {
            return true;
        }

        if Self::mentions_fever(&text_lower) {
            if FEVER_PATTERNS.iter().any(|p| p.is_match(&text_lower)) {
                return true;
            }
            if HIGH_FEVER_PHRASES.iter().any(|p| text_lower.contains(p)) {
                return true;
            }
        }

        if check_severity {
            let has_severity = EMERGENCY_SEVERITY.iter().any(|s| text_lower.contains(s));
            let has_breathing = BREATHING_WORDS.iter().any(|b| text_lower.contains(b));
            let has_pain = PAIN_WORDS.iter().any(|p| text_lower.contains(p));

            if has_severity && (has_breathing || has_pain) {
                return true;
            }

            if has_severity && WORSENING_WORDS.iter().any(|w| text_lower.contains(w)) {
                return true;
            }
        }

        false
    }

    /// Detect whether patient input suggests mild symptoms.
    pub fn detect_mild_symptoms(text: &str) -> bool {
        let text_lower = text.to_lowercase();
        MILD_KEYWORDS.iter().any(|kw| text_lower.contains(kw))
    }

    /// Extract recognized symptom keywords from patient input.
    ///
    /// Returns keywords in table-definition order (emergency list first, then
    /// mild), one entry per keyword regardless of repeated mentions.
    pub fn extract_symptoms(text: &str) -> Vec<&'static str> {
        let text_lower = text.to_lowercase();
        EMERGENCY_KEYWORDS
            .iter()
            .chain(MILD_KEYWORDS.iter())
            .filter(|kw| text_lower.contains(*kw))
            .copied()
            .collect()
    }

    /// Whether the text talks about fever/temperature at all.
    pub fn mentions_fever(text: &str) -> bool {
        let text_lower = text.to_lowercase();
        FEVER_MENTION_WORDS.iter().any(|w| text_lower.contains(w))
    }

    /// Parse a numeric temperature reading with its unit, if present.
    pub fn parse_temperature(text: &str) -> Option<TemperatureReading> {
        let text_lower = text.to_lowercase();
        let caps = TEMPERATURE_READING.captures(&text_lower)?;
        let raw = caps[1].to_string();
        let value: f64 = raw.parse().ok()?;
        let unit = match &caps[2] {
            "c" => TempUnit::Celsius,
            _ => TempUnit::Fahrenheit,
        };
        Some(TemperatureReading { raw, value, unit })
    }
}
