//! External endpoints
//!
//! The wizard only needs a success/failure signal from the submission
//! webhook and a block of text from the summary endpoint. Both sit behind
//! traits so sessions can be driven against in-memory fakes.

pub mod generative;
pub mod webhook;

use async_trait::async_trait;

use crate::answers::AnswerSet;
use crate::error::GatewayResult;

pub use generative::GenerativeClient;
pub use webhook::WebhookClient;

/// Receives the finished answer set
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Deliver the answers. Any non-success status or transport failure is
    /// an error; the response body is ignored.
    async fn submit(&self, answers: &AnswerSet) -> GatewayResult<()>;
}

/// Turns a prompt into prose
#[async_trait]
pub trait SummaryGateway: Send + Sync {
    /// Text of the first candidate the endpoint returns
    async fn generate(&self, prompt: &str) -> GatewayResult<String>;
}
