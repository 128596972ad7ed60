//! Text normalizer for drug names, ingredients and side effects.
//!
//! Keeps ASCII letters, digits, spaces and `+` (the composition separator),
//! lower-cases, and trims. Everything else is dropped.

/// Normalize free text. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '+')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    kept.trim().to_string()
}

/// Normalize an optional cell; absent input yields an empty string.
pub fn normalize_field(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_lowercases() {
        assert_eq!(normalize("Augmentin 625 Duo Tablet"), "augmentin 625 duo tablet");
        assert_eq!(normalize("Amoxycillin  (500mg) "), "amoxycillin  500mg");
        assert_eq!(normalize("Clavulanic Acid (125mg)"), "clavulanic acid 125mg");
        assert_eq!(normalize("Dolo-650"), "dolo650");
    }

    #[test]
    fn test_keeps_plus_separator() {
        assert_eq!(
            normalize("Paracetamol (500mg) + Caffeine (30mg)"),
            "paracetamol 500mg + caffeine 30mg"
        );
    }

    #[test]
    fn test_non_ascii_and_control_characters() {
        assert_eq!(normalize("Ibuprofène\t400mg"), "ibuprofne400mg");
        assert_eq!(normalize("  \n "), "");
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(normalize_field(None), "");
        assert_eq!(normalize_field(Some("")), "");
        assert_eq!(normalize_field(Some("ASPIRIN")), "aspirin");
    }
}
