//! Typed chat replies
//!
//! The backend tags each reply with a `type` string. [`ChatResponse`] turns
//! that tag into a variant carrying only the fields the variant uses, so the
//! router can match exhaustively instead of switching on strings.

use crate::api::{Hospital, HospitalQuote, WireResponse};

/// Flavor of a professional price analysis; they all render the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    DirectPrice,
    PriceComparison,
    Complete,
}

/// Replies whose only content is their message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    HospitalList,
    InsuranceDetails,
    ProcedureInfo,
    ProcedureLocationRequest,
    InsuranceFormRequest,
    InsuranceLocationRequest,
    EmergencyInfo,
}

impl NoticeKind {
    pub fn tag(self) -> &'static str {
        match self {
            NoticeKind::HospitalList => "hospital_list",
            NoticeKind::InsuranceDetails => "insurance_details",
            NoticeKind::ProcedureInfo => "procedure_info",
            NoticeKind::ProcedureLocationRequest => "procedure_location_request",
            NoticeKind::InsuranceFormRequest => "insurance_form_request",
            NoticeKind::InsuranceLocationRequest => "insurance_location_request",
            NoticeKind::EmergencyInfo => "emergency_info",
        }
    }
}

/// A backend reply, one variant per known `type` tag
#[derive(Debug, Clone, PartialEq)]
pub enum ChatResponse {
    /// `direct_price_analysis`, `price_comparison`, `complete_analysis`
    Analysis {
        kind: AnalysisKind,
        message: String,
        as_table: bool,
        hospitals: Vec<HospitalQuote>,
        procedures: Vec<String>,
    },
    /// `symptom_analysis`; may ask for a follow-up hospital comparison
    SymptomAnalysis {
        message: String,
        compare_in: Option<String>,
        procedures: Vec<String>,
    },
    /// `detailed_comparison`
    DetailedComparison {
        message: String,
        hospitals: Vec<HospitalQuote>,
        procedures: Vec<String>,
    },
    /// Message-only tags
    Notice { kind: NoticeKind, message: String },
    /// `procedure_location_analysis`
    ProcedureLocationAnalysis {
        message: String,
        hospitals: Vec<HospitalQuote>,
        procedures: Vec<String>,
    },
    /// `insurance_location_analysis`
    InsuranceLocationAnalysis {
        message: String,
        location: String,
        network_hospitals: Vec<Hospital>,
    },
    /// `general_assistance`
    GeneralAssistance {
        message: String,
        suggestions: Vec<String>,
    },
    /// Any tag this client does not know
    Other {
        tag: String,
        message: String,
        suggestions: Vec<String>,
    },
}

impl ChatResponse {
    /// Message text every variant carries
    pub fn message(&self) -> &str {
        match self {
            ChatResponse::Analysis { message, .. }
            | ChatResponse::SymptomAnalysis { message, .. }
            | ChatResponse::DetailedComparison { message, .. }
            | ChatResponse::Notice { message, .. }
            | ChatResponse::ProcedureLocationAnalysis { message, .. }
            | ChatResponse::InsuranceLocationAnalysis { message, .. }
            | ChatResponse::GeneralAssistance { message, .. }
            | ChatResponse::Other { message, .. } => message,
        }
    }

    /// The wire tag this reply came from
    pub fn tag(&self) -> &str {
        match self {
            ChatResponse::Analysis { kind, .. } => match kind {
                AnalysisKind::DirectPrice => "direct_price_analysis",
                AnalysisKind::PriceComparison => "price_comparison",
                AnalysisKind::Complete => "complete_analysis",
            },
            ChatResponse::SymptomAnalysis { .. } => "symptom_analysis",
            ChatResponse::DetailedComparison { .. } => "detailed_comparison",
            ChatResponse::Notice { kind, .. } => kind.tag(),
            ChatResponse::ProcedureLocationAnalysis { .. } => "procedure_location_analysis",
            ChatResponse::InsuranceLocationAnalysis { .. } => "insurance_location_analysis",
            ChatResponse::GeneralAssistance { .. } => "general_assistance",
            ChatResponse::Other { tag, .. } => tag,
        }
    }
}

impl From<WireResponse> for ChatResponse {
    fn from(wire: WireResponse) -> Self {
        let WireResponse {
            kind,
            message,
            hospitals,
            network_hospitals,
            procedures,
            suggestions,
            location,
            next_action,
            display_format,
        } = wire;

        let analysis = |kind| ChatResponse::Analysis {
            kind,
            message: message.clone(),
            as_table: display_format.as_deref() == Some("table"),
            hospitals: hospitals.clone(),
            procedures: procedures.clone(),
        };
        let notice = |kind| ChatResponse::Notice {
            kind,
            message: message.clone(),
        };

        match kind.as_str() {
            "direct_price_analysis" => analysis(AnalysisKind::DirectPrice),
            "price_comparison" => analysis(AnalysisKind::PriceComparison),
            "complete_analysis" => analysis(AnalysisKind::Complete),
            "symptom_analysis" => ChatResponse::SymptomAnalysis {
                compare_in: location.filter(|_| next_action.as_deref() == Some("hospital_comparison")),
                message,
                procedures,
            },
            "detailed_comparison" => ChatResponse::DetailedComparison {
                message,
                hospitals,
                procedures,
            },
            "hospital_list" => notice(NoticeKind::HospitalList),
            "insurance_details" => notice(NoticeKind::InsuranceDetails),
            "procedure_info" => notice(NoticeKind::ProcedureInfo),
            "procedure_location_request" => notice(NoticeKind::ProcedureLocationRequest),
            "insurance_form_request" => notice(NoticeKind::InsuranceFormRequest),
            "insurance_location_request" => notice(NoticeKind::InsuranceLocationRequest),
            "emergency_info" => notice(NoticeKind::EmergencyInfo),
            "procedure_location_analysis" => ChatResponse::ProcedureLocationAnalysis {
                message,
                hospitals,
                procedures,
            },
            "insurance_location_analysis" => ChatResponse::InsuranceLocationAnalysis {
                message,
                location: location.unwrap_or_default(),
                network_hospitals,
            },
            "general_assistance" => ChatResponse::GeneralAssistance {
                message,
                suggestions,
            },
            _ => ChatResponse::Other {
                tag: kind,
                message,
                suggestions,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> ChatResponse {
        serde_json::from_value::<WireResponse>(value).unwrap().into()
    }

    #[test]
    fn test_known_notice_tag() {
        let resp = decode(json!({"type": "hospital_list", "message": "M"}));
        assert_eq!(
            resp,
            ChatResponse::Notice {
                kind: NoticeKind::HospitalList,
                message: "M".into()
            }
        );
        assert_eq!(resp.tag(), "hospital_list");
    }

    #[test]
    fn test_unknown_tag_keeps_suggestions() {
        let resp = decode(json!({"type": "foo", "message": "M", "suggestions": ["a", "b"]}));
        match resp {
            ChatResponse::Other { tag, message, suggestions } => {
                assert_eq!(tag, "foo");
                assert_eq!(message, "M");
                assert_eq!(suggestions, vec!["a", "b"]);
            }
            other => panic!("expected Other, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tag_is_other() {
        let resp = decode(json!({"message": "hello"}));
        assert_eq!(resp.tag(), "");
        assert_eq!(resp.message(), "hello");
    }

    #[test]
    fn test_null_tag_is_other() {
        let resp = decode(json!({"type": null, "message": "M", "suggestions": ["a"]}));
        match resp {
            ChatResponse::Other { tag, message, suggestions } => {
                assert!(tag.is_empty());
                assert_eq!(message, "M");
                assert_eq!(suggestions, vec!["a"]);
            }
            other => panic!("expected Other, got {:?}", other),
        }
    }

    #[test]
    fn test_analysis_table_flag() {
        let resp = decode(json!({
            "type": "complete_analysis",
            "message": "report",
            "display_format": "table"
        }));
        assert!(matches!(
            resp,
            ChatResponse::Analysis { kind: AnalysisKind::Complete, as_table: true, .. }
        ));

        let resp = decode(json!({"type": "price_comparison", "message": "report"}));
        assert!(matches!(resp, ChatResponse::Analysis { as_table: false, .. }));
    }

    #[test]
    fn test_symptom_follow_up_needs_action_and_location() {
        let resp = decode(json!({
            "type": "symptom_analysis",
            "message": "m",
            "next_action": "hospital_comparison",
            "location": "Dallas",
            "procedures": ["ECG"]
        }));
        assert!(matches!(
            resp,
            ChatResponse::SymptomAnalysis { compare_in: Some(ref city), .. } if city == "Dallas"
        ));

        let resp = decode(json!({
            "type": "symptom_analysis",
            "message": "m",
            "location": "Dallas"
        }));
        assert!(matches!(resp, ChatResponse::SymptomAnalysis { compare_in: None, .. }));
    }
}
