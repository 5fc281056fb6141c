//! Fixed assistant wording
//!
//! Messages the client produces on its own, without asking the backend.

use crate::api::SymptomAnalysis;
use crate::log::Entry;

pub const GREETING: &str = "I'm here to help you save money on healthcare! What would you like to know?";
pub const CHAT_FAILED: &str = "Sorry, I encountered an error. Please try again.";
pub const SYMPTOMS_FAILED: &str =
    "Sorry, I couldn't analyze your symptoms right now. Please try again.";
pub const SYMPTOMS_INCONCLUSIVE: &str = "I'm analyzing your symptoms. Please consult with a healthcare professional for proper diagnosis.";
pub const COMPARE_FAILED: &str =
    "Sorry, I couldn't compare hospital prices right now. Please try again.";
pub const COMPARE_EMPTY: &str = "I couldn't find hospital pricing data for those procedures. Please try specifying common procedures like ECG, X-ray, MRI, or Blood tests.";

/// Plans the assistant can reason about
pub const INSURANCE_PLANS: &[&str] = &[
    "Aetna",
    "Blue Cross Blue Shield",
    "Cigna",
    "UnitedHealth",
    "Medicare",
    "Medicaid",
];

/// Echo of the intake form before it is submitted
pub fn intake_summary(location: &str, procedure: &str, insurance: Option<&str>) -> Vec<Entry> {
    vec![
        Entry::assistant("Thank you! You provided the following details:"),
        Entry::assistant(format!("Location: {}", location)),
        Entry::assistant(format!("Procedure: {}", procedure)),
        Entry::assistant(format!(
            "Insurance: {}",
            insurance.filter(|i| !i.is_empty()).unwrap_or("Not provided")
        )),
    ]
}

/// Ask where the user wants `procedure` priced
pub fn procedure_location_prompt(procedure: &str) -> Vec<Entry> {
    let message = format!(
        "I can help you find the best {} prices! To give you accurate pricing in your area, please tell me:\n\n\
📍 **Your City and State**\n\n\
For example:\n\
• \"Dallas, Texas\"\n\
• \"Chicago, Illinois\"\n\
• \"Los Angeles, California\"\n\
• \"Lubbock, Texas\"\n\n\
Which city are you in?",
        procedure
    );
    vec![
        Entry::user(format!("I need {} pricing information", procedure)),
        Entry::assistant(message),
    ]
}

/// Ask for the details an insurance comparison needs
pub fn insurance_form_prompt() -> Vec<Entry> {
    let message = "🏥 **Insurance Comparison - Please Provide Details**\n\n\
To give you the most accurate insurance comparison, I need:\n\n\
📋 **Insurance Plan:** (e.g., UnitedHealthcare, Aetna, Blue Cross Blue Shield)\n\
📍 **State:** (e.g., Texas, California, New York)\n\
🏙️ **City:** (e.g., Dallas, Los Angeles, Chicago)\n\
📮 **ZIP Code:** (optional, for precise local rates)\n\n\
**Available Insurance Plans:**\n\
• UnitedHealthcare - Nationwide\n\
• Anthem Blue Cross Blue Shield - 14 states + DC\n\
• Aetna - Nationwide\n\
• Cigna - Nationwide\n\
• Humana - Nationwide\n\
• Kaiser Permanente - 8 states + DC\n\
• Medicare - Nationwide\n\
• Medicaid - All states\n\n\
💡 **Example:** 'I have UnitedHealthcare in Dallas, Texas 75201'\n\
or 'Compare Aetna insurance in Chicago IL'";
    vec![
        Entry::user("I need insurance comparison help"),
        Entry::assistant(message),
    ]
}

/// List of plans the assistant can analyze
pub fn insurance_plans() -> Entry {
    let mut message = String::from("I can analyze insurance coverage for the following plans:\n\n");
    for plan in INSURANCE_PLANS {
        message.push_str(&format!("• {}\n", plan));
    }
    message.push_str(
        "\nPlease specify your insurance plan and the procedures you need, and I'll calculate your costs.",
    );
    Entry::assistant(message)
}

/// Turn a symptom analysis into the assistant's reply
pub fn symptom_reply(analysis: &SymptomAnalysis) -> Entry {
    match (&analysis.condition, &analysis.procedures) {
        (Some(condition), Some(procedures)) => {
            let mut message = format!(
                "Based on your symptoms, you might be experiencing **{}**.\n\n",
                condition
            );
            message.push_str("Recommended procedures:\n");
            for proc in procedures {
                message.push_str(&format!("• {}\n", proc));
            }
            message.push_str(
                "\nWould you like me to compare prices for these procedures at nearby hospitals?",
            );
            Entry::assistant(message)
        }
        _ => Entry::assistant(SYMPTOMS_INCONCLUSIVE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Content;

    fn text(entry: &Entry) -> &str {
        match &entry.content {
            Content::Text(t) => t,
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_intake_summary_without_insurance() {
        let entries = intake_summary("Lubbock", "MRI", None);
        assert_eq!(entries.len(), 4);
        assert_eq!(text(&entries[1]), "Location: Lubbock");
        assert_eq!(text(&entries[3]), "Insurance: Not provided");

        let entries = intake_summary("Lubbock", "MRI", Some(""));
        assert_eq!(text(&entries[3]), "Insurance: Not provided");
    }

    #[test]
    fn test_intake_summary_with_insurance() {
        let entries = intake_summary("Dallas", "ECG", Some("Aetna"));
        assert_eq!(text(&entries[3]), "Insurance: Aetna");
    }

    #[test]
    fn test_procedure_location_prompt() {
        let entries = procedure_location_prompt("MRI");
        assert_eq!(entries[0], Entry::user("I need MRI pricing information"));
        assert!(text(&entries[1]).starts_with("I can help you find the best MRI prices!"));
        assert!(text(&entries[1]).ends_with("Which city are you in?"));
    }

    #[test]
    fn test_insurance_form_prompt() {
        let entries = insurance_form_prompt();
        assert_eq!(entries[0], Entry::user("I need insurance comparison help"));
        assert!(text(&entries[1]).contains("Kaiser Permanente - 8 states + DC"));
    }

    #[test]
    fn test_insurance_plans_lists_all() {
        let entry = insurance_plans();
        for plan in INSURANCE_PLANS {
            assert!(text(&entry).contains(&format!("• {}", plan)));
        }
    }

    #[test]
    fn test_symptom_reply() {
        let analysis = SymptomAnalysis {
            condition: Some("Migraine".into()),
            procedures: Some(vec!["MRI".into(), "CT scan".into()]),
        };
        let reply = symptom_reply(&analysis);
        let t = text(&reply);
        assert!(t.starts_with("Based on your symptoms, you might be experiencing **Migraine**."));
        assert!(t.contains("• MRI\n• CT scan\n"));

        let partial = SymptomAnalysis {
            condition: Some("Migraine".into()),
            procedures: None,
        };
        assert_eq!(text(&symptom_reply(&partial)), SYMPTOMS_INCONCLUSIVE);
    }
}
