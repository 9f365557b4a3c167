use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::ContentGateway;
use crate::core::{
    models::FlashcardContent,
    LexicardError,
};

/// Generation service client. POSTs `{"word": …}` and expects the card as
/// JSON back; any non-2xx status is a generation failure.
pub struct HttpGateway {
    client: Client,
    endpoint: String,
}

impl HttpGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LexicardError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LexicardError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait]
impl ContentGateway for HttpGateway {
    async fn generate(&self, word: &str) -> Result<FlashcardContent, LexicardError> {
        let body = serde_json::json!({ "word": word });

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(LexicardError::Generation(format!(
                "HTTP {} from {}",
                response.status(),
                self.endpoint
            )));
        }

        let content: FlashcardContent = response.json().await?;
        Ok(content)
    }
}
