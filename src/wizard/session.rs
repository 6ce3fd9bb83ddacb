//! Application session
//!
//! Drives a [`Wizard`] and a [`SummaryGenerator`] against real gateways.
//! Methods take `&self`: the controller is locked only around state changes,
//! never across a network call, so a second `advance` issued while the
//! submission is outstanding sees the in-flight guard and does nothing.
//! Submission and summary use separate locks and may overlap.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

use crate::alerts::AlertCenter;
use crate::answers::Field;
use crate::error::{GatewayError, SummaryError, ValidationError, WizardError};
use crate::gateway::{SubmissionGateway, SummaryGateway};
use crate::summary::SummaryGenerator;
use crate::wizard::state::{Transition, Wizard};
use crate::wizard::step::Step;

pub const SUBMIT_FAILED_ALERT: &str = "Application failed to send. Please try again.";
pub const CONNECTION_ALERT: &str =
    "An error occurred. Please check your internet connection and try again.";
pub const SUMMARY_FAILED_ALERT: &str = "Could not generate a summary. Please try again.";

pub const SUCCESS_TITLE: &str = "Thank you for your application!";
pub const SUCCESS_MESSAGE: &str =
    "We will reach out to you via email or SMS within the next 48 hours.";

/// Alert text for a failed submission
pub fn submission_alert(error: &GatewayError) -> &'static str {
    match error {
        GatewayError::Transport(_) => CONNECTION_ALERT,
        GatewayError::Status(_) | GatewayError::MalformedResponse(_) => SUBMIT_FAILED_ALERT,
    }
}

/// What an `advance` call amounted to
#[derive(Debug)]
pub enum Progress {
    Moved(Step),
    Blocked(ValidationError),
    /// The gateway accepted the application
    Submitted,
    /// The gateway call failed; the wizard is back on the last step
    SubmissionFailed(GatewayError),
    /// Another advance is already submitting
    Suppressed,
}

pub struct Session {
    wizard: Mutex<Wizard>,
    summary: Mutex<SummaryGenerator>,
    submission_gateway: Arc<dyn SubmissionGateway>,
    summary_gateway: Option<Arc<dyn SummaryGateway>>,
    alerts: AlertCenter,
}

impl Session {
    pub fn new(submission_gateway: Arc<dyn SubmissionGateway>, alerts: AlertCenter) -> Self {
        Self {
            wizard: Mutex::new(Wizard::new()),
            summary: Mutex::new(SummaryGenerator::new()),
            submission_gateway,
            summary_gateway: None,
            alerts,
        }
    }

    pub fn with_summary_gateway(mut self, gateway: Arc<dyn SummaryGateway>) -> Self {
        self.summary_gateway = Some(gateway);
        self
    }

    pub fn alerts(&self) -> &AlertCenter {
        &self.alerts
    }

    /// Copy of the controller state
    pub fn wizard(&self) -> Wizard {
        self.wizard.lock().clone()
    }

    pub fn summary_available(&self) -> bool {
        self.summary_gateway.is_some()
    }

    /// Whether the summary action can be offered right now
    pub fn summary_ready(&self) -> bool {
        self.summary_available()
            && !self.summary.lock().is_busy()
            && crate::summary::is_eligible(self.wizard.lock().answers())
    }

    pub fn edit(&self, field: Field, value: impl Into<String>) -> Result<(), WizardError> {
        self.wizard.lock().edit(field, value)
    }

    pub fn retreat(&self) -> Result<Step, WizardError> {
        self.wizard.lock().retreat()
    }

    pub async fn advance(&self) -> Result<Progress, WizardError> {
        let transition = self.wizard.lock().advance()?;
        let ticket = match transition {
            Transition::Moved(step) => return Ok(Progress::Moved(step)),
            Transition::Blocked(e) => return Ok(Progress::Blocked(e)),
            Transition::Suppressed => return Ok(Progress::Suppressed),
            Transition::Submit(ticket) => ticket,
        };

        let outcome = self.submission_gateway.submit(&ticket.answers).await;

        match self.wizard.lock().complete_submission(outcome) {
            Ok(()) => Ok(Progress::Submitted),
            Err(e) => {
                self.alerts.error(submission_alert(&e));
                Ok(Progress::SubmissionFailed(e))
            }
        }
    }

    /// Produce the applicant summary from the current answers.
    ///
    /// Failures raise an alert and leave the wizard untouched.
    pub async fn generate_summary(&self) -> Result<String, SummaryError> {
        let Some(gateway) = self.summary_gateway.as_ref() else {
            return Err(SummaryError::Unavailable);
        };

        let answers = self.wizard.lock().answers().clone();
        let prompt = self.summary.lock().begin(&answers)?;

        let outcome = gateway.generate(&prompt).await;

        let result = self.summary.lock().finish(outcome);
        match &result {
            Ok(_) => info!("Summary generated for {}", answers.name.trim()),
            Err(e) => {
                warn!("Summary unavailable: {}", e);
                self.alerts.error(SUMMARY_FAILED_ALERT);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerSet;
    use crate::error::GatewayResult;
    use crate::wizard::state::{Phase, SubmissionState};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Submission gateway that yields once and then answers with a fixed status
    struct FakeWebhook {
        calls: AtomicUsize,
        status: u16,
        received: Mutex<Vec<AnswerSet>>,
    }

    impl FakeWebhook {
        fn new(status: u16) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                status,
                received: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SubmissionGateway for FakeWebhook {
        async fn submit(&self, answers: &AnswerSet) -> GatewayResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.received.lock().push(answers.clone());
            tokio::task::yield_now().await;
            if (200..300).contains(&self.status) {
                Ok(())
            } else {
                Err(GatewayError::Status(self.status))
            }
        }
    }

    /// Submission gateway that stays pending until released
    #[derive(Default)]
    struct HeldWebhook {
        release: tokio::sync::Notify,
    }

    #[async_trait]
    impl SubmissionGateway for HeldWebhook {
        async fn submit(&self, _answers: &AnswerSet) -> GatewayResult<()> {
            self.release.notified().await;
            Ok(())
        }
    }

    struct FixedSummary(Option<&'static str>);

    #[async_trait]
    impl SummaryGateway for FixedSummary {
        async fn generate(&self, _prompt: &str) -> GatewayResult<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| GatewayError::MalformedResponse("no candidates".to_string()))
        }
    }

    fn alerts() -> AlertCenter {
        AlertCenter::new(Duration::from_secs(3))
    }

    async fn fill_all(session: &Session) {
        session.advance().await.unwrap();
        for (field, value) in [
            (Field::Name, "John Doe"),
            (Field::Email, "john@x.com"),
            (Field::Phone, "1234567890"),
            (Field::Gender, "male"),
            (Field::Country, "ghana"),
            (Field::City, "Accra"),
            (Field::Qualification, "bachelor"),
        ] {
            session.edit(field, value).unwrap();
            if field != Field::Qualification {
                assert!(matches!(session.advance().await.unwrap(), Progress::Moved(_)));
            }
        }
    }

    #[tokio::test]
    async fn test_concurrent_advances_submit_once() {
        let webhook = FakeWebhook::new(200);
        let session = Session::new(webhook.clone(), alerts());
        fill_all(&session).await;

        let (first, second) = tokio::join!(session.advance(), session.advance());
        let outcomes = [first.unwrap(), second.unwrap()];

        assert_eq!(webhook.calls.load(Ordering::SeqCst), 1);
        assert!(outcomes.iter().any(|p| matches!(p, Progress::Submitted)));
        assert!(outcomes.iter().any(|p| matches!(p, Progress::Suppressed)));
        assert_eq!(session.wizard().phase(), Phase::Done);
    }

    #[tokio::test]
    async fn test_advance_control_while_in_flight() {
        let webhook = Arc::new(HeldWebhook::default());
        let session = Session::new(webhook.clone(), alerts());
        fill_all(&session).await;
        assert_eq!(session.wizard().advance_label(), "Apply");
        assert!(session.wizard().can_advance());

        let observe = async {
            while session.wizard().phase() != Phase::Submitting {
                tokio::task::yield_now().await;
            }
            let wizard = session.wizard();
            assert_eq!(wizard.advance_label(), "Applying...");
            assert!(!wizard.can_advance());
            webhook.release.notify_one();
        };
        let (progress, ()) = tokio::join!(session.advance(), observe);

        assert!(matches!(progress.unwrap(), Progress::Submitted));
        assert_eq!(session.wizard().advance_label(), "Submitted");
        assert!(!session.wizard().can_advance());
    }

    #[tokio::test]
    async fn test_failed_submission_raises_alert() {
        let webhook = FakeWebhook::new(500);
        let session = Session::new(webhook.clone(), alerts());
        fill_all(&session).await;
        let before = session.wizard().answers().clone();

        let progress = session.advance().await.unwrap();
        assert!(matches!(
            progress,
            Progress::SubmissionFailed(GatewayError::Status(500))
        ));

        let wizard = session.wizard();
        assert_eq!(wizard.step(), Some(Step::Qualification));
        assert_eq!(wizard.submission_state(), SubmissionState::Idle);
        assert_eq!(wizard.answers(), &before);

        let active = session.alerts().active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, SUBMIT_FAILED_ALERT);
    }

    #[tokio::test]
    async fn test_summary_does_not_touch_wizard() {
        let session = Session::new(FakeWebhook::new(200), alerts())
            .with_summary_gateway(Arc::new(FixedSummary(Some("A fine applicant."))));
        fill_all(&session).await;
        let before = session.wizard();

        assert!(session.summary_ready());
        let text = session.generate_summary().await.unwrap();
        assert_eq!(text, "A fine applicant.");

        let after = session.wizard();
        assert_eq!(after.phase(), before.phase());
        assert_eq!(after.answers(), before.answers());
    }

    #[tokio::test]
    async fn test_summary_failure_alerts() {
        let session = Session::new(FakeWebhook::new(200), alerts())
            .with_summary_gateway(Arc::new(FixedSummary(None)));
        fill_all(&session).await;

        let err = session.generate_summary().await.unwrap_err();
        assert!(matches!(err, SummaryError::Gateway(_)));
        assert_eq!(session.alerts().active()[0].message, SUMMARY_FAILED_ALERT);
        assert_eq!(session.wizard().step(), Some(Step::Qualification));
    }

    #[tokio::test]
    async fn test_summary_without_gateway_is_unavailable() {
        let session = Session::new(FakeWebhook::new(200), alerts());
        assert!(!session.summary_ready());
        assert!(matches!(
            session.generate_summary().await,
            Err(SummaryError::Unavailable)
        ));
    }

    #[test]
    fn test_submission_alert_text() {
        assert_eq!(
            submission_alert(&GatewayError::Status(404)),
            SUBMIT_FAILED_ALERT
        );
    }
}
