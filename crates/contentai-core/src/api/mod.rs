//! Wire types and the backend seam for the `/generate` endpoint.

pub mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::ContentType;

/// Token budget sent with every generation request
pub const MAX_TOKENS: u32 = 1000;

/// Body of `POST {base}/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(rename = "maxTokens")]
    pub max_tokens: u32,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            prompt: prompt.into(),
            content_type,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Body returned by the backend. Success carries `content`, failure an optional `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GenerateResponse {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            message: None,
        }
    }

    pub fn failed(message: Option<&str>) -> Self {
        Self {
            success: false,
            content: None,
            message: message.map(str::to_string),
        }
    }
}

/// Ways a generation call can fail to produce a readable response
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to generation backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend answered {status} with a body that is not a generation response: {source}")]
    InvalidBody {
        status: reqwest::StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("generation task failed: {0}")]
    Task(String),
}

/// Anything that can turn a [`GenerateRequest`] into a [`GenerateResponse`]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError>;
}
