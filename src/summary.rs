//! Applicant summary generation
//!
//! Independent of the wizard: it may run from any step once name, email and
//! qualification are filled, and never touches the answers or the cursor.

use tracing::{debug, warn};

use crate::answers::{AnswerSet, Field};
use crate::error::{GatewayError, SummaryError};

/// Busy guard for the summary action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    Idle,
    InFlight,
    Done,
}

/// Fields that must be filled before a summary can be requested
pub const REQUIRED_FIELDS: [Field; 3] = [Field::Name, Field::Email, Field::Qualification];

pub fn is_eligible(answers: &AnswerSet) -> bool {
    REQUIRED_FIELDS.iter().all(|f| answers.is_filled(*f))
}

/// Prompt sent to the text-generation endpoint
pub fn build_prompt(answers: &AnswerSet) -> String {
    let value = |field: Field| field.display_value(answers.get(field).trim());
    format!(
        "Write a short professional summary (no more than 150 words) of the following \
         work-from-home applicant, suitable for a recruiter reviewing applications.\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Gender: {}\n\
         Country: {}\n\
         City: {}\n\
         Highest qualification: {}\n\n\
         Write in the third person and do not invent details that are not listed above.",
        value(Field::Name),
        value(Field::Email),
        value(Field::Phone),
        value(Field::Gender),
        value(Field::Country),
        value(Field::City),
        value(Field::Qualification),
    )
}

/// Tracks the one summary request that may be outstanding
#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    state: SummaryState,
    latest: Option<String>,
}

impl Default for SummaryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryGenerator {
    pub fn new() -> Self {
        Self {
            state: SummaryState::Idle,
            latest: None,
        }
    }

    pub fn state(&self) -> SummaryState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == SummaryState::InFlight
    }

    /// Last summary produced, if any
    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    /// Claim the generator and build the prompt
    pub fn begin(&mut self, answers: &AnswerSet) -> Result<String, SummaryError> {
        if self.is_busy() {
            return Err(SummaryError::Busy);
        }
        if !is_eligible(answers) {
            return Err(SummaryError::NotReady);
        }
        self.state = SummaryState::InFlight;
        debug!("Summary generation started");
        Ok(build_prompt(answers))
    }

    /// Record the endpoint's answer.
    ///
    /// Failure drops back to idle so the action can be retried.
    pub fn finish(
        &mut self,
        outcome: Result<String, GatewayError>,
    ) -> Result<String, SummaryError> {
        match outcome {
            Ok(text) => {
                self.state = SummaryState::Done;
                self.latest = Some(text.clone());
                Ok(text)
            }
            Err(e) => {
                self.state = SummaryState::Idle;
                warn!("Summary generation failed: {}", e);
                Err(SummaryError::Gateway(e))
            }
        }
    }
}
