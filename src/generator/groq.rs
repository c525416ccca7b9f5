use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::LlmConfig;
use crate::error::GeneratorError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const SYSTEM_PROMPT: &str = "\
You are a professional README generator. Create comprehensive, well-structured README files in markdown format. Follow these guidelines:
1. Use emojis for section headers
2. Include badges for technologies, version, and status
3. Write clear, concise descriptions
4. Structure content with proper markdown formatting
5. Include detailed setup instructions
6. Add visual elements like screenshots or diagrams when mentioned
7. Use code blocks for commands and configuration
8. Include contact information and social links
9. Add a license section
10. Make it visually appealing with proper spacing and organization";

/// Client for an OpenAI-compatible chat-completion API (Groq)
///
/// One request in, free text out. No retries: a failed call surfaces
/// immediately to the caller.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    /// Creates a client for the configured endpoint
    pub fn new(config: LlmConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Sends the README prompt and returns the raw completion text
    pub async fn complete(&self, user_prompt: &str) -> Result<String, GeneratorError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request = CompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            stream: false,
        };

        info!("requesting completion from {} with model {}", url, self.config.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("completion API returned {}: {}", status, body);
            return Err(GeneratorError::Upstream(format!(
                "completion API returned {status}: {body}"
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                GeneratorError::MalformedResponse("response carried no choices".to_string())
            })
    }
}
