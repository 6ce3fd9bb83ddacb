//! Ansyla WFH Application
//!
//! A step-by-step application form: one question per screen, validated
//! before moving on, submitted once to a webhook at the end. An optional
//! text-generation endpoint can write a short summary of the applicant.
//!
//! ## Module Structure
//!
//! - `answers`: the answer set and the option tables
//! - `validation`: per-field rules
//! - `wizard`: steps, the controller and the async session driver
//! - `summary`: applicant summary generation
//! - `gateway`: webhook and text-generation clients
//! - `alerts`: transient, auto-dismissing alerts
//! - `preferences`: persisted theme preference
//! - `config`: configuration loading

pub mod alerts;
pub mod answers;
pub mod config;
pub mod error;
pub mod gateway;
pub mod preferences;
pub mod summary;
pub mod validation;
pub mod wizard;

pub use alerts::{Alert, AlertCenter, AlertEvent, AlertHandle, AlertLevel};
pub use answers::{AnswerSet, Choice, Field};
pub use config::AppConfig;
pub use error::{
    ConfigError, GatewayError, PreferenceError, SummaryError, ValidationError, WizardError,
};
pub use gateway::{GenerativeClient, SubmissionGateway, SummaryGateway, WebhookClient};
pub use preferences::{PreferenceStore, Theme};
pub use summary::{SummaryGenerator, SummaryState};
pub use validation::validate;
pub use wizard::{Phase, Progress, Session, Step, SubmissionState, Transition, Wizard};
