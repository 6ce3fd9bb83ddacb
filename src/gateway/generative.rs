//! Generative text client (Gemini `generateContent` API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SummaryConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::SummaryGateway;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Client for a `models/{model}:generateContent` endpoint
pub struct GenerativeClient {
    client: Client,
    config: SummaryConfig,
}

impl GenerativeClient {
    pub fn new(config: SummaryConfig) -> GatewayResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        info!("Summary client: model={}", config.model);
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Text of the first part of the first candidate
fn first_candidate_text(body: &str) -> GatewayResult<String> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::MalformedResponse("no candidates".to_string()))?;

    candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| GatewayError::MalformedResponse("first candidate has no text".to_string()))
}

#[async_trait]
impl SummaryGateway for GenerativeClient {
    async fn generate(&self, prompt: &str) -> GatewayResult<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!("Requesting summary from {}", self.config.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Summary endpoint returned {}", status);
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let text = first_candidate_text(&body)?;
        debug!("Summary received: {} chars", text.len());
        Ok(text)
    }
}
