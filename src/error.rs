//! Error types for the application wizard

use thiserror::Error;

use crate::answers::Field;

/// Result type alias for gateway calls
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// A field failed its rule. Displays as the message shown under the field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", missing_message(.0))]
    Missing(Field),

    #[error("{}", malformed_message(.0))]
    Malformed(Field),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            Self::Missing(field) | Self::Malformed(field) => *field,
        }
    }
}

fn missing_message(field: &Field) -> &'static str {
    match field {
        Field::Name => "Please enter your full name.",
        Field::Email => "Please enter your email address.",
        Field::Phone => "Please enter your phone number.",
        Field::Gender => "Please select your gender.",
        Field::Country => "Please select your country.",
        Field::City => "Please enter your city.",
        Field::Qualification => "Please select your highest qualification.",
    }
}

fn malformed_message(field: &Field) -> &'static str {
    match field {
        Field::Name => "Please enter your full name.",
        Field::Email => "Please enter a valid email address.",
        Field::Phone => "Please enter a valid phone number (10-15 digits).",
        Field::Gender => "Please select one of the listed gender options.",
        Field::Country => "Please select one of the listed countries.",
        Field::City => "Please enter your city.",
        Field::Qualification => "Please select one of the listed qualifications.",
    }
}

/// A transition the wizard does not allow from its current phase
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("cannot go back from {0}")]
    CannotRetreat(&'static str),

    #[error("field '{field}' cannot be edited while on {phase}")]
    FieldNotActive { field: Field, phase: &'static str },

    #[error("the application has already been submitted")]
    AlreadySubmitted,
}

/// Failure talking to an external endpoint
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Summary generation could not start or did not produce text
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("name, email and qualification are required before generating a summary")]
    NotReady,

    #[error("a summary is already being generated")]
    Busy,

    #[error("summary generation is not configured")]
    Unavailable,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
