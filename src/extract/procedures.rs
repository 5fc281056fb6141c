//! Procedure keyword extraction
//!
//! A cheap client-side guess at which priced procedures a message is about.
//! The backend does the real classification; this only seeds comparison
//! requests typed directly at the prompt.

/// Procedures recognized by name, in the order results are reported
pub const KNOWN_PROCEDURES: &[&str] = &[
    "ECG",
    "X-ray",
    "MRI",
    "CT scan",
    "Blood tests",
    "Ultrasound",
    "Physical examination",
    "Stress test",
];

/// Keyword fallbacks tried in order when no procedure is named
const FALLBACK_RULES: &[(&[&str], &[&str])] = &[
    (&["chest", "heart"], &["ECG", "Chest X-ray"]),
    (&["blood"], &["Blood tests"]),
];

const DEFAULT_PROCEDURE: &str = "Physical examination";

/// Extract procedure names from free text.
///
/// Every known procedure whose name appears (case-insensitively) is returned
/// in vocabulary order. With no direct hit, the first matching fallback rule
/// decides, and a physical examination is the last resort. Never empty.
pub fn extract_procedures(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    let found: Vec<String> = KNOWN_PROCEDURES
        .iter()
        .filter(|proc| lower.contains(&proc.to_lowercase()))
        .map(|proc| proc.to_string())
        .collect();

    if !found.is_empty() {
        return found;
    }

    FALLBACK_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, procs)| procs.iter().map(|p| p.to_string()).collect())
        .unwrap_or_else(|| vec![DEFAULT_PROCEDURE.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword_any_case() {
        assert_eq!(extract_procedures("how much is an mri?"), vec!["MRI"]);
        assert_eq!(extract_procedures("Price of ULTRASOUND"), vec!["Ultrasound"]);
    }

    #[test]
    fn test_multiple_in_vocabulary_order() {
        let procs = extract_procedures("I need a stress test, an ECG and blood tests");
        assert_eq!(procs, vec!["ECG", "Blood tests", "Stress test"]);
    }

    #[test]
    fn test_chest_fallback() {
        assert_eq!(extract_procedures("chest pain"), vec!["ECG", "Chest X-ray"]);
        assert_eq!(extract_procedures("my heart races"), vec!["ECG", "Chest X-ray"]);
    }

    #[test]
    fn test_blood_fallback() {
        assert_eq!(extract_procedures("my blood hurts"), vec!["Blood tests"]);
    }

    #[test]
    fn test_default_fallback() {
        assert_eq!(extract_procedures("unrelated text"), vec!["Physical examination"]);
        assert_eq!(extract_procedures(""), vec!["Physical examination"]);
    }

    #[test]
    fn test_chest_rule_wins_over_blood() {
        // First satisfied rule wins
        assert_eq!(
            extract_procedures("chest and blood"),
            vec!["ECG", "Chest X-ray"]
        );
    }

    #[test]
    fn test_direct_match_skips_fallbacks() {
        // "x-ray" is named, so the chest rule never fires
        assert_eq!(extract_procedures("chest x-ray please"), vec!["X-ray"]);
    }
}
