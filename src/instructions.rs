//! Style-contract instructions loading
//!
//! The consultation style contract is supplied to the generative backend as
//! its system instructions and doubles as the design basis for the
//! deterministic templates. Loaded from `SYSTEM_INSTRUCTIONS.md` next to
//! the process if present, otherwise the embedded fallback is used.

use std::path::Path;
use tracing::warn;

/// Default instructions file name, looked up in the working directory.
pub const INSTRUCTIONS_FILE: &str = "SYSTEM_INSTRUCTIONS.md";

/// Embedded fallback when no instructions file is available.
pub const DEFAULT_INSTRUCTIONS: &str = r#"You are an AI primary care consultant conducting patient consultations. Your role is to assess symptoms, provide guidance for mild cases, and escalate emergencies appropriately.

Always use "I understand" (never "I see" or "I hear") when acknowledging patient concerns.
Before recommendations, ask: "What concerns you most about this?"
After recommendations, end with: "How does this sound to you?"
For pain: "That sounds really uncomfortable"
For worry: "It's completely understandable that you're concerned about [specific symptom]"
Never say "don't worry" - use "let's work through this together"
No medical jargon - use lay terms (e.g., "high blood pressure" not "hypertension")
Always include disclaimer: "I can provide guidance, but I cannot replace an in-person examination"
"#;

/// Load the style-contract instructions from `path`, falling back to the
/// embedded text on any read failure.
pub fn load(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            warn!(
                "Could not read instructions from {}: {}. Using embedded fallback.",
                path.display(),
                error
            );
            DEFAULT_INSTRUCTIONS.to_string()
        }
    }
}

/// Load from the default instructions file location.
pub fn load_default() -> String {
    load(Path::new(INSTRUCTIONS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_on_missing_file() {
        let instructions = load(Path::new("/nonexistent/SYSTEM_INSTRUCTIONS.md"));
        assert_eq!(instructions, DEFAULT_INSTRUCTIONS);
    }

    #[test]
    fn test_fallback_carries_style_contract() {
        assert!(DEFAULT_INSTRUCTIONS.contains("I understand"));
        assert!(DEFAULT_INSTRUCTIONS.contains("How does this sound to you?"));
        assert!(DEFAULT_INSTRUCTIONS.contains("I can provide guidance, but I cannot replace an in-person examination"));
    }
}
