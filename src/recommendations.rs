//! Self-care recommendation bundles
//!
//! Maps a recognized symptom category to a fixed bundle of three advice
//! strings. Pure function of the extracted symptom list: first matching
//! category wins, no combination logic.

const PAIN_BUNDLE: [&str; 3] = [
    "Rest in a quiet, dark room and try to stay hydrated with water",
    "Consider over-the-counter pain relief like acetaminophen or ibuprofen, following package instructions",
    "Apply a cool compress to your forehead or the area of discomfort for 15-20 minutes",
];

const FATIGUE_BUNDLE: [&str; 3] = [
    "Ensure you're getting 7-9 hours of sleep per night and maintain a regular sleep schedule",
    "Stay hydrated throughout the day and eat balanced meals with plenty of fruits and vegetables",
    "Take short breaks during the day and avoid overexertion - listen to your body's signals",
];

const COLD_BUNDLE: [&str; 3] = [
    "Get plenty of rest and stay well-hydrated with water, herbal tea, or warm broth",
    "Use a humidifier or take steamy showers to help with congestion, and consider saline nasal spray",
    "Wash your hands frequently and cover your mouth when coughing to prevent spreading to others",
];

const DIGESTIVE_BUNDLE: [&str; 3] = [
    "Stick to bland, easy-to-digest foods like toast, rice, bananas, and avoid spicy or fatty foods",
    "Stay hydrated with small sips of water or electrolyte drinks, and avoid large meals",
    "Rest and avoid strenuous activity - if symptoms persist, consider over-the-counter remedies following package instructions",
];

const GENERIC_BUNDLE: [&str; 3] = [
    "Get adequate rest and maintain a regular sleep schedule",
    "Stay well-hydrated with water throughout the day",
    "Monitor your symptoms and note any changes or worsening",
];

/// Select the self-care bundle for the extracted symptom list.
///
/// Category priority: pain > fatigue > cold > digestive > generic.
pub fn get_recommendations(symptoms: &[&str]) -> [&'static str; 3] {
    let symptom_str = symptoms.join(" ").to_lowercase();

    if ["headache", "pain", "ache"].iter().any(|s| symptom_str.contains(s)) {
        PAIN_BUNDLE
    } else if ["fatigue", "tired"].iter().any(|s| symptom_str.contains(s)) {
        FATIGUE_BUNDLE
    } else if ["cold", "cough", "sneezing", "runny nose"].iter().any(|s| symptom_str.contains(s)) {
        COLD_BUNDLE
    } else if ["digestive", "stomach", "nausea"].iter().any(|s| symptom_str.contains(s)) {
        DIGESTIVE_BUNDLE
    } else {
        GENERIC_BUNDLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_priority() {
        // Pain wins over fatigue and cold when both are present
        let bundle = get_recommendations(&["headache", "fatigue", "cough"]);
        assert_eq!(bundle, PAIN_BUNDLE);

        let bundle = get_recommendations(&["tired", "cough"]);
        assert_eq!(bundle, FATIGUE_BUNDLE);

        let bundle = get_recommendations(&["runny nose"]);
        assert_eq!(bundle, COLD_BUNDLE);

        let bundle = get_recommendations(&["upset stomach"]);
        assert_eq!(bundle, DIGESTIVE_BUNDLE);
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(get_recommendations(&[]), GENERIC_BUNDLE);
        assert_eq!(get_recommendations(&["rash"]), GENERIC_BUNDLE);
    }

    #[test]
    fn test_pure_function() {
        let symptoms = ["headache", "cough"];
        assert_eq!(get_recommendations(&symptoms), get_recommendations(&symptoms));
    }
}
