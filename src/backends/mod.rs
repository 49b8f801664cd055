//! Answering backends

pub mod extractive;
pub mod generative;
pub mod prompt;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Answer;

pub use extractive::ExtractiveBackend;
pub use generative::GenerativeBackend;
pub use prompt::PromptBuilder;

/// Capability shared by all answering backends
///
/// Implementations:
/// - `ExtractiveBackend`: local ONNX span-extraction model
/// - `GenerativeBackend`: remote chat-completion service
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Answer a question against an assembled context
    async fn answer(&self, question: &str, context: &str) -> Result<Answer>;

    /// Backend name for logging
    fn name(&self) -> &str;

    /// Model identifier reported in answers
    fn model(&self) -> &str;
}
