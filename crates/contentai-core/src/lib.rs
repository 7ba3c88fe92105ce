pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod session;

// Re-export main types for convenience
pub use api::{ClientError, GenerateRequest, GenerateResponse, GenerationBackend, HttpBackend, MAX_TOKENS};
pub use catalog::{Accent, ContentType};
pub use client::GenerationClient;
pub use config::{Config, ConfigError, DEFAULT_API_BASE_URL};
pub use session::{Outcome, Rejection, Session};
