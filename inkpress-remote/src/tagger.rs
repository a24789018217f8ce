//! Tag generation through the OpenAI chat completions API.

use async_trait::async_trait;
use inkpress_core::tags::{TagError, TagGenerator};
use serde::Deserialize;
use serde_json::json;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat-completions backed implementation of [`TagGenerator`].
///
/// Failures surface as [`TagError`] and are treated as "no tags" by the
/// metadata generator.
pub struct OpenAiTagger {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiTagger {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TagGenerator for OpenAiTagger {
    async fn generate_tags(&self, body: &str) -> Result<Vec<String>, TagError> {
        let prompt = format!(
            "Extract 5 to 8 keyword tags from the following article.\n\n\
             Article:\n{}\n\n\
             Output format: keywords only, comma separated, nothing else.",
            body
        );

        let request = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": 100,
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| TagError::Backend(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TagError::Backend(format!("{}: {}", status, message)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| TagError::Backend(err.to_string()))?;

        let text = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(parse_tags(&text))
    }
}

/// Split the model's comma-separated answer into clean tags.
fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
