//! Webhook submission client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::answers::AnswerSet;
use crate::config::SubmissionConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::SubmissionGateway;

/// Posts the answer set as JSON to a fixed webhook URL
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(config: &SubmissionConfig) -> GatewayResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            url: config.webhook_url.clone(),
        })
    }
}

#[async_trait]
impl SubmissionGateway for WebhookClient {
    async fn submit(&self, answers: &AnswerSet) -> GatewayResult<()> {
        debug!("POST {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(answers)
            .send()
            .await
            .map_err(|e| {
                error!("Error submitting application: {}", e);
                GatewayError::Transport(e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!("Application sent to webhook: {:?}", answers);
            Ok(())
        } else {
            error!(
                "Failed to send application to webhook: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
            Err(GatewayError::Status(status.as_u16()))
        }
    }
}
