//! Chat session
//!
//! Owns the backend client and the message log. Every user action appends
//! to the log; every backend failure becomes an apology entry rather than an
//! error. Only misuse (empty input or overlapping sends) is reported to the
//! caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::api::{
    ChatEnvelope, ChatRequest, CompareRequest, Health, IntakeRequest, PricingApi, SymptomRequest,
};
use crate::canned;
use crate::error::{ApiResult, SessionError};
use crate::extract;
use crate::log::{Entry, LogEntry, MessageLog};
use crate::response::ChatResponse;
use crate::router::{FollowUp, FollowUpAction, route};
use crate::table::comparison_table;

/// Result of one user action
#[derive(Debug)]
pub struct Turn {
    /// Sequence number of the first entry this turn appended
    pub first_seq: u64,
    /// Deferred second turn, to run after its delay
    pub follow_up: Option<FollowUp>,
}

/// Clears the in-flight flag when the request finishes, however it ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ChatSession {
    api: Arc<dyn PricingApi>,
    log: Mutex<MessageLog>,
    in_flight: AtomicBool,
}

impl ChatSession {
    pub fn new(api: Arc<dyn PricingApi>) -> Self {
        Self {
            api,
            log: Mutex::new(MessageLog::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    fn log(&self) -> MutexGuard<'_, MessageLog> {
        // Appends never panic midway, so a poisoned log is still consistent
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self) -> Result<InFlight<'_>, SessionError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SessionError::Busy);
        }
        Ok(InFlight(&self.in_flight))
    }

    fn append(&self, entries: impl IntoIterator<Item = Entry>) {
        self.log().extend(entries);
    }

    fn next_seq(&self) -> u64 {
        self.log().len() as u64
    }

    /// Whether a request is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log().is_empty()
    }

    /// Copies of the entries appended at or after `seq`
    pub fn entries_since(&self, seq: u64) -> Vec<LogEntry> {
        self.log().since(seq).to_vec()
    }

    /// Suggestions most recently offered, if any
    pub fn latest_suggestions(&self) -> Option<Vec<String>> {
        self.log().latest_suggestions().map(<[String]>::to_vec)
    }

    /// Append whatever `response` routes to
    pub fn render_response(&self, response: &ChatResponse) -> Turn {
        let first_seq = self.next_seq();
        let dispatch = route(response);
        debug!(tag = response.tag(), entries = dispatch.entries.len(), "routed response");
        self.append(dispatch.entries);
        Turn {
            first_seq,
            follow_up: dispatch.follow_up,
        }
    }

    fn render_envelope(&self, result: ApiResult<ChatEnvelope>) -> Turn {
        match result {
            Ok(ChatEnvelope {
                response: Some(wire),
            }) => self.render_response(&ChatResponse::from(wire)),
            Ok(ChatEnvelope { response: None }) => {
                let first_seq = self.next_seq();
                self.append([Entry::assistant(canned::GREETING)]);
                Turn {
                    first_seq,
                    follow_up: None,
                }
            }
            Err(e) => {
                warn!("chat request failed: {}", e);
                let first_seq = self.next_seq();
                self.append([Entry::assistant(canned::CHAT_FAILED)]);
                Turn {
                    first_seq,
                    follow_up: None,
                }
            }
        }
    }

    /// Send a chat message to the assistant
    pub async fn send(&self, text: &str) -> Result<Turn, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let _guard = self.begin()?;

        let first_seq = self.next_seq();
        self.append([Entry::user(text)]);

        let result = self.api.chat(&ChatRequest::new(text)).await;
        let turn = self.render_envelope(result);
        Ok(Turn {
            first_seq,
            follow_up: turn.follow_up,
        })
    }

    /// The suggestion a bare number (1-based) picks, if one is on offer
    pub fn suggestion_for(&self, input: &str) -> Option<String> {
        let number: usize = input.trim().parse().ok()?;
        let suggestions = self.latest_suggestions()?;
        number.checked_sub(1).and_then(|i| suggestions.get(i).cloned())
    }

    /// Send the suggestion `input` numbers, or `input` itself when it picks none
    pub async fn send_input(&self, input: &str) -> Result<Turn, SessionError> {
        match self.suggestion_for(input) {
            Some(picked) => self.send(&picked).await,
            None => self.send(input).await,
        }
    }

    /// Ask the backend what the symptoms might indicate
    pub async fn analyze_symptoms(&self, symptoms: &str) -> Result<Turn, SessionError> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let _guard = self.begin()?;

        let first_seq = self.next_seq();
        self.append([Entry::user(symptoms)]);

        let request = SymptomRequest {
            symptoms: symptoms.to_string(),
        };
        let reply = match self.api.analyze_symptoms(&request).await {
            Ok(analysis) => canned::symptom_reply(&analysis),
            Err(e) => {
                warn!("symptom analysis failed: {}", e);
                Entry::assistant(canned::SYMPTOMS_FAILED)
            }
        };
        self.append([reply]);

        Ok(Turn {
            first_seq,
            follow_up: None,
        })
    }

    /// Guess procedures and city from free text, then compare prices
    pub async fn compare_from_text(&self, query: &str) -> Result<Turn, SessionError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let _guard = self.begin()?;

        let first_seq = self.next_seq();
        self.append([Entry::user(query)]);

        let guess = extract::extract(query);
        debug!(procedures = ?guess.procedures, location = guess.location, "extracted from query");
        self.compare(guess.procedures, guess.location.to_string()).await;

        Ok(Turn {
            first_seq,
            follow_up: None,
        })
    }

    async fn compare(&self, procedures: Vec<String>, location: String) {
        let request = CompareRequest {
            procedures,
            location,
        };
        let entry = match self.api.compare_hospitals(&request).await {
            Ok(reply) if !reply.hospitals.is_empty() => {
                Entry::table(comparison_table(&reply.hospitals, &request.procedures))
            }
            Ok(_) => Entry::assistant(canned::COMPARE_EMPTY),
            Err(e) => {
                warn!("hospital comparison failed: {}", e);
                Entry::assistant(canned::COMPARE_FAILED)
            }
        };
        self.append([entry]);
    }

    /// Run a deferred follow-up. The caller owns the delay.
    pub async fn run_follow_up(&self, follow_up: FollowUp) -> Result<Turn, SessionError> {
        let first_seq = self.next_seq();
        match follow_up.action {
            FollowUpAction::Show(entries) => self.append(entries),
            FollowUpAction::CompareHospitals {
                notice,
                procedures,
                location,
            } => {
                let _guard = self.begin()?;
                self.append([notice]);
                self.compare(procedures, location).await;
            }
        }
        Ok(Turn {
            first_seq,
            follow_up: None,
        })
    }

    /// Echo the intake form and submit it
    pub async fn submit_intake(
        &self,
        location: &str,
        procedure: &str,
        insurance: Option<&str>,
    ) -> Result<Turn, SessionError> {
        let _guard = self.begin()?;

        let first_seq = self.next_seq();
        self.append(canned::intake_summary(location, procedure, insurance));

        let request = IntakeRequest {
            location: location.to_string(),
            procedure: procedure.to_string(),
            insurance: insurance.unwrap_or_default().to_string(),
        };
        let result = self.api.submit_intake(&request).await;
        let turn = self.render_envelope(result);
        Ok(Turn {
            first_seq,
            follow_up: turn.follow_up,
        })
    }

    /// Opening assistant message
    pub fn greet(&self) -> Turn {
        self.local_turn([Entry::assistant(canned::GREETING)])
    }

    /// Ask the user where to price `procedure`
    pub fn request_procedure_location(&self, procedure: &str) -> Turn {
        self.local_turn(canned::procedure_location_prompt(procedure))
    }

    /// Ask the user for insurance comparison details
    pub fn request_insurance_comparison(&self) -> Turn {
        self.local_turn(canned::insurance_form_prompt())
    }

    /// List supported insurance plans
    pub fn list_insurance_plans(&self) -> Turn {
        self.local_turn([canned::insurance_plans()])
    }

    fn local_turn(&self, entries: impl IntoIterator<Item = Entry>) -> Turn {
        let first_seq = self.next_seq();
        self.append(entries);
        Turn {
            first_seq,
            follow_up: None,
        }
    }

    /// Backend liveness, straight from the API
    pub async fn health(&self) -> ApiResult<Health> {
        self.api.health().await
    }
}
