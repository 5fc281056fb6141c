//! Response routing
//!
//! Maps each [`ChatResponse`] variant to the entries it shows now and, for
//! a few variants, a follow-up shown after a short pause. Pure: nothing here
//! touches the log or the network.

use std::time::Duration;

use crate::extract::extract_procedures;
use crate::log::Entry;
use crate::report::Report;
use crate::response::ChatResponse;
use crate::table::{comparison_table, network_table};

/// Pause before a symptom analysis turns into a price search
pub const SYMPTOM_FOLLOW_UP_DELAY: Duration = Duration::from_millis(2000);
/// Pause before location analyses show their hospital table
pub const TABLE_FOLLOW_UP_DELAY: Duration = Duration::from_millis(1500);

pub const SEARCHING_NOTICE: &str =
    "🔍 Searching through 4,000+ hospitals nationwide for the best prices...";

/// Work deferred to a second "typing" turn
#[derive(Debug, Clone, PartialEq)]
pub enum FollowUpAction {
    /// Append these entries
    Show(Vec<Entry>),
    /// Append the notice, then price `procedures` in `location`
    CompareHospitals {
        notice: Entry,
        procedures: Vec<String>,
        location: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowUp {
    pub delay: Duration,
    pub action: FollowUpAction,
}

/// What a response turns into
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dispatch {
    pub entries: Vec<Entry>,
    pub follow_up: Option<FollowUp>,
}

impl Dispatch {
    fn now(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            follow_up: None,
        }
    }

    fn message(message: &str) -> Self {
        Self::now(vec![Entry::assistant(message)])
    }

    fn with_suggestions(message: &str, suggestions: &[String]) -> Self {
        let mut entries = vec![Entry::assistant(message)];
        if !suggestions.is_empty() {
            entries.push(Entry::suggestions(suggestions.to_vec()));
        }
        Self::now(entries)
    }

    fn then(mut self, delay: Duration, action: FollowUpAction) -> Self {
        self.follow_up = Some(FollowUp { delay, action });
        self
    }
}

/// Decide what to show for a response
pub fn route(response: &ChatResponse) -> Dispatch {
    match response {
        ChatResponse::Analysis {
            message,
            as_table,
            hospitals,
            ..
        } => {
            if *as_table && !hospitals.is_empty() {
                Dispatch::now(vec![Entry::report(Report::build(message, hospitals))])
            } else {
                Dispatch::message(message)
            }
        }

        ChatResponse::SymptomAnalysis {
            message,
            compare_in,
            procedures,
        } => {
            let dispatch = Dispatch::message(message);
            match compare_in {
                Some(location) => {
                    let procedures = if procedures.is_empty() {
                        extract_procedures(message)
                    } else {
                        procedures.clone()
                    };
                    dispatch.then(
                        SYMPTOM_FOLLOW_UP_DELAY,
                        FollowUpAction::CompareHospitals {
                            notice: Entry::assistant(SEARCHING_NOTICE),
                            procedures,
                            location: location.clone(),
                        },
                    )
                }
                None => dispatch,
            }
        }

        ChatResponse::DetailedComparison {
            message,
            hospitals,
            procedures,
        } => {
            if hospitals.is_empty() {
                Dispatch::message(message)
            } else {
                Dispatch::now(vec![Entry::table(comparison_table(hospitals, procedures))])
            }
        }

        ChatResponse::Notice { message, .. } => Dispatch::message(message),

        ChatResponse::ProcedureLocationAnalysis {
            message,
            hospitals,
            procedures,
        } => {
            let dispatch = Dispatch::message(message);
            if hospitals.is_empty() {
                dispatch
            } else {
                dispatch.then(
                    TABLE_FOLLOW_UP_DELAY,
                    FollowUpAction::Show(vec![Entry::table(comparison_table(
                        hospitals, procedures,
                    ))]),
                )
            }
        }

        ChatResponse::InsuranceLocationAnalysis {
            message,
            location,
            network_hospitals,
        } => {
            let dispatch = Dispatch::message(message);
            if network_hospitals.is_empty() {
                dispatch
            } else {
                dispatch.then(
                    TABLE_FOLLOW_UP_DELAY,
                    FollowUpAction::Show(vec![Entry::table(network_table(
                        network_hospitals,
                        location,
                    ))]),
                )
            }
        }

        ChatResponse::GeneralAssistance {
            message,
            suggestions,
        }
        | ChatResponse::Other {
            message,
            suggestions,
            ..
        } => Dispatch::with_suggestions(message, suggestions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Content;
    use crate::response::{AnalysisKind, NoticeKind};
    use crate::table::fixtures::{hospital, quote};

    #[test]
    fn test_notice_renders_message_only() {
        let resp = ChatResponse::Notice {
            kind: NoticeKind::HospitalList,
            message: "M".into(),
        };
        assert_eq!(route(&resp), Dispatch::now(vec![Entry::assistant("M")]));
    }

    #[test]
    fn test_unknown_renders_message_then_suggestions() {
        let resp = ChatResponse::Other {
            tag: "foo".into(),
            message: "M".into(),
            suggestions: vec!["a".into(), "b".into()],
        };
        let dispatch = route(&resp);
        assert_eq!(
            dispatch.entries,
            vec![
                Entry::assistant("M"),
                Entry::suggestions(vec!["a".into(), "b".into()])
            ]
        );
        assert!(dispatch.follow_up.is_none());
    }

    #[test]
    fn test_general_assistance_without_suggestions() {
        let resp = ChatResponse::GeneralAssistance {
            message: "Hi".into(),
            suggestions: vec![],
        };
        assert_eq!(route(&resp).entries, vec![Entry::assistant("Hi")]);
    }

    #[test]
    fn test_analysis_table_becomes_report() {
        let resp = ChatResponse::Analysis {
            kind: AnalysisKind::DirectPrice,
            message: "📊 **EXECUTIVE SUMMARY**\nok".into(),
            as_table: true,
            hospitals: vec![quote("Mercy", 900.0)],
            procedures: vec!["MRI".into()],
        };
        let dispatch = route(&resp);
        assert_eq!(dispatch.entries.len(), 1);
        assert!(matches!(dispatch.entries[0].content, Content::Report(_)));
    }

    #[test]
    fn test_analysis_without_hospitals_is_plain() {
        let resp = ChatResponse::Analysis {
            kind: AnalysisKind::Complete,
            message: "nothing found".into(),
            as_table: true,
            hospitals: vec![],
            procedures: vec![],
        };
        assert_eq!(route(&resp).entries, vec![Entry::assistant("nothing found")]);
    }

    #[test]
    fn test_symptom_analysis_schedules_comparison() {
        let resp = ChatResponse::SymptomAnalysis {
            message: "Possible angina".into(),
            compare_in: Some("Dallas".into()),
            procedures: vec!["ECG".into(), "Stress test".into()],
        };
        let dispatch = route(&resp);
        assert_eq!(dispatch.entries, vec![Entry::assistant("Possible angina")]);

        let follow_up = dispatch.follow_up.unwrap();
        assert_eq!(follow_up.delay, SYMPTOM_FOLLOW_UP_DELAY);
        assert_eq!(
            follow_up.action,
            FollowUpAction::CompareHospitals {
                notice: Entry::assistant(SEARCHING_NOTICE),
                procedures: vec!["ECG".into(), "Stress test".into()],
                location: "Dallas".into(),
            }
        );
    }

    #[test]
    fn test_symptom_analysis_without_location_has_no_follow_up() {
        let resp = ChatResponse::SymptomAnalysis {
            message: "m".into(),
            compare_in: None,
            procedures: vec!["ECG".into()],
        };
        assert!(route(&resp).follow_up.is_none());
    }

    #[test]
    fn test_symptom_analysis_guesses_missing_procedures() {
        let resp = ChatResponse::SymptomAnalysis {
            message: "Your chest symptoms".into(),
            compare_in: Some("Austin".into()),
            procedures: vec![],
        };
        match route(&resp).follow_up.unwrap().action {
            FollowUpAction::CompareHospitals { procedures, .. } => {
                assert_eq!(procedures, vec!["ECG", "Chest X-ray"]);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_detailed_comparison_table() {
        let resp = ChatResponse::DetailedComparison {
            message: "fallback".into(),
            hospitals: vec![quote("Mercy", 900.0)],
            procedures: vec!["MRI".into()],
        };
        let dispatch = route(&resp);
        assert!(matches!(dispatch.entries[0].content, Content::Table(_)));
        assert!(dispatch.follow_up.is_none());
    }

    #[test]
    fn test_procedure_location_analysis_delays_table() {
        let resp = ChatResponse::ProcedureLocationAnalysis {
            message: "Here is MRI pricing in Lubbock".into(),
            hospitals: vec![quote("UMC", 800.0)],
            procedures: vec!["MRI".into()],
        };
        let dispatch = route(&resp);
        assert_eq!(dispatch.entries.len(), 1);
        let follow_up = dispatch.follow_up.unwrap();
        assert_eq!(follow_up.delay, TABLE_FOLLOW_UP_DELAY);
        assert!(matches!(follow_up.action, FollowUpAction::Show(ref e) if e.len() == 1));
    }

    #[test]
    fn test_insurance_location_analysis_network_table() {
        let resp = ChatResponse::InsuranceLocationAnalysis {
            message: "Aetna in Dallas".into(),
            location: "Dallas".into(),
            network_hospitals: vec![hospital("Baylor", 4.6, true)],
        };
        let follow_up = route(&resp).follow_up.unwrap();
        match follow_up.action {
            FollowUpAction::Show(entries) => match &entries[0].content {
                Content::Table(t) => {
                    assert_eq!(t.title.as_deref(), Some("🏥 **In-Network Hospitals in Dallas:**"))
                }
                other => panic!("unexpected content {:?}", other),
            },
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_route_is_deterministic() {
        let resp = ChatResponse::Other {
            tag: "x".into(),
            message: "same".into(),
            suggestions: vec![],
        };
        assert_eq!(route(&resp), route(&resp));
    }
}
