//! Heuristic text extractors
//!
//! Fixed-vocabulary guesses run on the client before the backend is asked.

mod location;
mod procedures;

pub use location::{extract_location, extract_location_or_default, CITY_ALIASES, DEFAULT_CITY};
pub use procedures::{extract_procedures, KNOWN_PROCEDURES};

/// Procedures and city guessed from a single message
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub procedures: Vec<String>,
    pub location: &'static str,
}

/// Run both extractors, defaulting the location
pub fn extract(text: &str) -> Extraction {
    Extraction {
        procedures: extract_procedures(text),
        location: extract_location_or_default(text),
    }
}
