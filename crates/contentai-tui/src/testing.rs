//! Shared fixtures for front-end tests

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use contentai_core::{ClientError, GenerateRequest, GenerateResponse, GenerationBackend};
use tokio::sync::Notify;

use crate::app::App;

/// Holds every request until released, then answers with a fixed reply
pub struct GatedBackend {
    pub gate: Notify,
    reply: fn() -> Result<GenerateResponse, ClientError>,
}

#[async_trait]
impl GenerationBackend for GatedBackend {
    async fn generate(&self, _request: &GenerateRequest) -> Result<GenerateResponse, ClientError> {
        self.gate.notified().await;
        (self.reply)()
    }
}

pub fn gated(reply: fn() -> Result<GenerateResponse, ClientError>) -> (App, Arc<GatedBackend>) {
    let backend = Arc::new(GatedBackend {
        gate: Notify::new(),
        reply,
    });
    let app = App::new(backend.clone(), "http://localhost:3001/api");
    (app, backend)
}

pub async fn wait_for_completion(app: &mut App) {
    for _ in 0..200 {
        if app.poll_generation().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("generation task never finished");
}
