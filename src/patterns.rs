//! Static keyword and regex tables for triage classification
//!
//! These tables are configuration data, not control flow: reviewing or
//! localizing the triage vocabulary means editing this file only.

use lazy_static::lazy_static;
use regex::Regex;

/// Emergency phrase keywords — any substring match escalates.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    // Cardiac
    "chest pain", "chest pressure", "heart attack", "cardiac",
    // Breathing distress
    "difficulty breathing", "trouble breathing", "shortness of breath", "can't breathe",
    "cannot breathe", "choking", "breathing problem", "hard to breathe",
    // Severe pain phrases
    "severe pain", "excruciating", "unbearable pain",
    // Stroke signs
    "stroke", "facial droop", "slurred speech", "weakness", "numbness",
    // Anaphylaxis
    "severe allergic reaction", "anaphylaxis", "throat closing",
    // Severe headache
    "severe headache", "worst headache", "sudden severe",
    // Severe abdominal
    "severe abdominal pain", "severe stomach pain",
    // Mental health crisis
    "mental health crisis", "suicidal", "self harm",
];

/// Severity intensifiers used for the emergency combination check.
pub const EMERGENCY_SEVERITY: &[&str] = &[
    "severe", "terrible", "awful", "worst", "extreme", "critical", "emergency",
];

/// Mild symptom keywords.
pub const MILD_KEYWORDS: &[&str] = &[
    "fatigue", "tired", "headache", "mild", "minor",
    "cold", "cough", "sneezing", "runny nose",
    "mild pain", "ache", "sore",
    "digestive", "upset stomach", "mild nausea",
    "skin irritation", "rash", "itchy",
];

/// Severity intensifiers recognized during assessment turns.
pub const ASSESSMENT_SEVERITY: &[&str] = &["severe", "terrible", "awful", "worst", "extreme"];

/// Elapsed-time markers that establish a timeline.
pub const TIMELINE_WORDS: &[&str] = &["started", "began", "start", "days", "hours", "weeks", "ago"];

/// Worsening-trend language.
pub const WORSENING_WORDS: &[&str] = &["worse", "worsening", "getting worse", "deteriorating"];

/// Worry/concern language.
pub const CONCERN_WORDS: &[&str] = &["concern", "worry", "worried"];

/// Breathing-related words for the severity combination check.
pub const BREATHING_WORDS: &[&str] = &["breathing", "breathe", "breath"];

/// Pain-related words for the severity combination check.
pub const PAIN_WORDS: &[&str] = &["pain", "hurting", "hurt"];

/// Words that gate the fever pattern scan.
pub const FEVER_MENTION_WORDS: &[&str] = &["fever", "temperature", "temp"];

/// Explicit high-fever phrases that escalate without a numeric reading.
pub const HIGH_FEVER_PHRASES: &[&str] = &["high fever", "very high fever", "dangerous fever"];

lazy_static! {
    /// Numeric patterns for emergency-range temperatures.
    /// Threshold is 105°F / 40.5°C inclusive.
    pub static ref FEVER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"10[5-9]\s*f").unwrap(),      // 105-109°F
        Regex::new(r"1[1-9]\d\s*f").unwrap(),     // 110+°F
        Regex::new(r"40\.[5-9]\d*\s*c").unwrap(), // 40.5-40.9°C
        Regex::new(r"4[1-2]\.?\d*\s*c").unwrap(), // 41.0-42.9°C
        Regex::new(r"4[3-9]\.?\d*\s*c").unwrap(), // 43+°C
        Regex::new(r"10[5-9]\s*degrees").unwrap(),
        Regex::new(r"1[1-9]\d\s*degrees").unwrap(),
    ];

    /// Extracts a numeric temperature reading and its unit letter.
    pub static ref TEMPERATURE_READING: Regex =
        Regex::new(r"(\d+\.?\d*)\s*°?\s*([fc])").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fever_patterns_cover_thresholds() {
        let matches = |text: &str| FEVER_PATTERNS.iter().any(|p| p.is_match(text));

        assert!(matches("105 f"));
        assert!(matches("110 f"));
        assert!(matches("40.5 c"));
        assert!(matches("40.7 c"));
        assert!(matches("41 c"));
        assert!(matches("43.2 c"));
        assert!(matches("106 degrees"));

        // Just below the emergency range
        assert!(!matches("104 f"));
        assert!(!matches("40.4 c"));
        assert!(!matches("99 degrees"));
    }

    #[test]
    fn test_temperature_reading_captures_unit() {
        let caps = TEMPERATURE_READING.captures("temperature is 106 f").unwrap();
        assert_eq!(&caps[1], "106");
        assert_eq!(&caps[2], "f");

        let caps = TEMPERATURE_READING.captures("it reads 40.5°c").unwrap();
        assert_eq!(&caps[1], "40.5");
        assert_eq!(&caps[2], "c");
    }
}
