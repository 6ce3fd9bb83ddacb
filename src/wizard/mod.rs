//! Application wizard
//!
//! One question per screen:
//! 1. Introduction
//! 2. Name, email, phone, gender, country, city, qualification
//! 3. Submission to the webhook from the last step

pub mod session;
pub mod state;
pub mod step;

pub use session::{Progress, Session};
pub use state::{Phase, SubmissionState, SubmissionTicket, Transition, Wizard};
pub use step::{InputKind, Step};
