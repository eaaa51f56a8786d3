pub mod openai;

use async_trait::async_trait;

use crate::error::Result;

pub use openai::OpenAiClient;

/// A single instruction submitted to the generative backend.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

/// Opaque text-completion service: submit an instruction, receive text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
