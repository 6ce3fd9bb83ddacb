//! Wizard State Management
//!
//! The controller is synchronous and does no I/O. Reaching the end of the
//! last field step hands out a [`SubmissionTicket`]; whoever drives the
//! wizard performs the request and reports back through
//! [`Wizard::complete_submission`].

use tracing::{debug, info, warn};

use crate::answers::{AnswerSet, Field};
use crate::error::{GatewayError, ValidationError, WizardError};
use crate::wizard::step::Step;

/// Where the wizard is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing a step, waiting for input
    Active(Step),
    /// Final answers handed to the submission gateway
    Submitting,
    /// Submission accepted
    Done,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active(step) => step.title(),
            Self::Submitting => "Submitting",
            Self::Done => "Complete",
        }
    }
}

/// Submission guard, derived from the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    InFlight,
    Completed,
}

/// Answers captured at the moment the final step validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub answers: AnswerSet,
}

/// Result of [`Wizard::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Moved forward to this step
    Moved(Step),
    /// The current field failed its rule; the step is unchanged
    Blocked(ValidationError),
    /// The last field passed; the caller must send this ticket
    Submit(SubmissionTicket),
    /// A submission is already in flight; nothing happened
    Suppressed,
}

/// Complete wizard state
#[derive(Debug, Clone)]
pub struct Wizard {
    phase: Phase,
    answers: AnswerSet,
    error: Option<ValidationError>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            phase: Phase::Active(Step::Intro),
            answers: AnswerSet::new(),
            error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current step, if one is displayed
    pub fn step(&self) -> Option<Step> {
        match self.phase {
            Phase::Active(step) => Some(step),
            Phase::Submitting | Phase::Done => None,
        }
    }

    /// Step cursor in `[1, N]`. Submitting and done report the last step.
    pub fn cursor(&self) -> usize {
        match self.phase {
            Phase::Active(step) => step.number(),
            Phase::Submitting | Phase::Done => Step::LAST_FIELD.number(),
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn submission_state(&self) -> SubmissionState {
        match self.phase {
            Phase::Active(_) => SubmissionState::Idle,
            Phase::Submitting => SubmissionState::InFlight,
            Phase::Done => SubmissionState::Completed,
        }
    }

    /// The advance control is disabled while a submission is in flight
    pub fn can_advance(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    pub fn can_retreat(&self) -> bool {
        matches!(self.phase, Phase::Active(step) if step != Step::Intro)
    }

    pub fn progress(&self) -> f64 {
        match self.phase {
            Phase::Active(step) => step.progress(),
            Phase::Submitting | Phase::Done => 1.0,
        }
    }

    /// Label for the advance control
    pub fn advance_label(&self) -> &'static str {
        match self.phase {
            Phase::Active(Step::Intro) => "Start",
            Phase::Active(step) if step.is_last() => "Apply",
            Phase::Active(_) => "Next",
            Phase::Submitting => "Applying...",
            Phase::Done => "Submitted",
        }
    }

    /// Update the field bound to the current step and clear its error
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> Result<(), WizardError> {
        match self.phase {
            Phase::Active(step) if step.field() == Some(field) => {
                self.answers.set(field, value);
                self.clear_error();
                Ok(())
            }
            phase => Err(WizardError::FieldNotActive {
                field,
                phase: phase.name(),
            }),
        }
    }

    pub fn advance(&mut self) -> Result<Transition, WizardError> {
        let step = match self.phase {
            Phase::Active(step) => step,
            Phase::Submitting => {
                debug!("Advance ignored: submission in flight");
                return Ok(Transition::Suppressed);
            }
            Phase::Done => return Err(WizardError::AlreadySubmitted),
        };

        if let Err(e) = step.validate(&self.answers) {
            debug!("Step {} blocked: {}", step.number(), e);
            self.error = Some(e);
            return Ok(Transition::Blocked(e));
        }
        self.clear_error();

        match step.next() {
            Some(next) => {
                self.phase = Phase::Active(next);
                debug!("Advanced to step {} ({})", next.number(), next.title());
                Ok(Transition::Moved(next))
            }
            None => {
                self.phase = Phase::Submitting;
                info!("All steps valid, submitting application");
                Ok(Transition::Submit(SubmissionTicket {
                    answers: self.answers.clone(),
                }))
            }
        }
    }

    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        let prev = match self.phase {
            Phase::Active(step) => step.prev(),
            Phase::Submitting | Phase::Done => None,
        };
        let Some(prev) = prev else {
            return Err(WizardError::CannotRetreat(self.phase.name()));
        };
        self.phase = Phase::Active(prev);
        self.clear_error();
        debug!("Went back to step {} ({})", prev.number(), prev.title());
        Ok(prev)
    }

    /// Apply the outcome of the submission request.
    ///
    /// Success finishes the wizard. Failure returns to the last field step
    /// with the answers untouched so the applicant can try again.
    pub fn complete_submission(
        &mut self,
        outcome: Result<(), GatewayError>,
    ) -> Result<(), GatewayError> {
        if self.phase != Phase::Submitting {
            warn!("Submission result arrived with no submission in flight");
            return outcome;
        }
        match outcome {
            Ok(()) => {
                self.phase = Phase::Done;
                info!("Application submitted");
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Active(Step::LAST_FIELD);
                warn!("Application submission failed: {}", e);
                Err(e)
            }
        }
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}
