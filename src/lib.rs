// src/lib.rs

pub mod api;
pub mod canned;
pub mod config;
pub mod error;
pub mod extract;
pub mod log;
pub mod markup;
pub mod paint;
pub mod repl;
pub mod report;
pub mod response;
pub mod router;
pub mod session;
pub mod table;
pub mod typing;

pub use api::{ApiClient, PricingApi};
pub use config::{Config, Overrides, Settings};
pub use error::{ApiError, ConfigError, SessionError};
pub use extract::{extract_location, extract_procedures};
pub use response::ChatResponse;
pub use router::{Dispatch, route};
pub use session::{ChatSession, Turn};
