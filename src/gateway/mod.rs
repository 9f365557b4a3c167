use async_trait::async_trait;

use crate::core::{
    models::FlashcardContent,
    LexicardError,
};

pub mod http;

pub use http::HttpGateway;

/// The content-generation service boundary. One call per word, no retries;
/// whether a failure is surfaced or swallowed is the caller's decision.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    async fn generate(&self, word: &str) -> Result<FlashcardContent, LexicardError>;
}
