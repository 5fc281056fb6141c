//! Wire types for the pricing backend
//!
//! Request bodies serialize exactly as the backend expects. Response types
//! are permissive: every field the backend may omit has a default so that a
//! sparse or partially malformed reply still decodes.

use serde::{Deserialize, Deserializer, Serialize};

/// `POST /api/chat` body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: serde_json::Value,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: serde_json::json!({}),
        }
    }
}

/// `POST /api/chat` reply envelope
#[derive(Debug, Default, Deserialize)]
pub struct ChatEnvelope {
    #[serde(default)]
    pub response: Option<WireResponse>,
}

/// A chat reply as it arrives, before routing.
///
/// `kind` is the backend's `type` discriminator; everything else is optional
/// and only meaningful for some tags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireResponse {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hospitals: Vec<HospitalQuote>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub network_hospitals: Vec<Hospital>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub procedures: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub next_action: Option<String>,
    #[serde(default)]
    pub display_format: Option<String>,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `POST /api/analyze-symptoms` body
#[derive(Debug, Clone, Serialize)]
pub struct SymptomRequest {
    pub symptoms: String,
}

/// `POST /api/analyze-symptoms` reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymptomAnalysis {
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub procedures: Option<Vec<String>>,
}

/// `POST /api/compare-hospitals` body
#[derive(Debug, Clone, Serialize)]
pub struct CompareRequest {
    pub procedures: Vec<String>,
    pub location: String,
}

/// `POST /api/compare-hospitals` reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub hospitals: Vec<HospitalQuote>,
}

/// `POST /api/initial-form` body
#[derive(Debug, Clone, Serialize)]
pub struct IntakeRequest {
    pub location: String,
    pub procedure: String,
    pub insurance: String,
}

/// `GET /api/health` reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A hospital as listed by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hospital {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub emergency: bool,
    /// Minutes
    #[serde(default = "default_wait_minutes")]
    pub average_wait_time: u32,
}

fn default_wait_minutes() -> u32 {
    45
}

/// Priced quote for a set of procedures at one hospital
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HospitalQuote {
    pub hospital: Hospital,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_cash_cost: f64,
    #[serde(default)]
    pub total_savings_cash: f64,
    #[serde(default)]
    pub procedures: Vec<ProcedureQuote>,
    #[serde(default)]
    pub estimated_wait_time: Option<String>,
}

impl HospitalQuote {
    /// Wait time as the backend phrased it, or derived from the average
    pub fn wait_time_label(&self) -> String {
        self.estimated_wait_time
            .clone()
            .unwrap_or_else(|| format!("{} minutes", self.hospital.average_wait_time))
    }
}

/// One procedure line within a quote
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcedureQuote {
    pub procedure: String,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub cash_price: f64,
    #[serde(default)]
    pub savings_cash: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_serialization() {
        let json = serde_json::to_value(ChatRequest::new("MRI in Dallas")).unwrap();
        assert_eq!(json, json!({"message": "MRI in Dallas", "context": {}}));
    }

    #[test]
    fn test_wire_response_sparse() {
        let resp: WireResponse = serde_json::from_value(json!({"type": "hospital_list"})).unwrap();
        assert_eq!(resp.kind, "hospital_list");
        assert!(resp.message.is_empty());
        assert!(resp.hospitals.is_empty());
        assert!(resp.location.is_none());
    }

    #[test]
    fn test_wire_response_nulls() {
        let resp: WireResponse = serde_json::from_value(json!({
            "type": "general_assistance",
            "message": null,
            "suggestions": null
        }))
        .unwrap();
        assert!(resp.message.is_empty());
        assert!(resp.suggestions.is_empty());
    }

    #[test]
    fn test_quote_deserialize() {
        let quote: HospitalQuote = serde_json::from_value(json!({
            "hospital": {
                "name": "UMC Health System",
                "address": "602 Indiana Ave, Lubbock, TX",
                "phone": "(806) 775-8200",
                "rating": 4.3,
                "emergency": true
            },
            "total_cost": 1200.0,
            "total_cash_cost": 1020.0,
            "total_savings_cash": 180.0,
            "procedures": [
                {"procedure": "MRI", "base_price": 1200.0, "cash_price": 1020.0, "savings_cash": 180.0}
            ]
        }))
        .unwrap();

        assert_eq!(quote.hospital.average_wait_time, 45);
        assert_eq!(quote.procedures.len(), 1);
        assert_eq!(quote.wait_time_label(), "45 minutes");
    }

    #[test]
    fn test_envelope_without_response() {
        let env: ChatEnvelope = serde_json::from_value(json!({"timestamp": "now"})).unwrap();
        assert!(env.response.is_none());
    }

    #[test]
    fn test_health() {
        let health: Health =
            serde_json::from_value(json!({"status": "healthy", "version": "1.0.0"})).unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.version.as_deref(), Some("1.0.0"));
    }
}
