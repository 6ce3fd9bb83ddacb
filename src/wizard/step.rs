//! Wizard steps
//!
//! Every screen of the application is a variant here. Matching on `Step`
//! yields its question, its input descriptor and the field it collects, so a
//! new step cannot be added without all three.

use crate::answers::{AnswerSet, Choice, Field, COUNTRIES, GENDERS, QUALIFICATIONS};
use crate::error::ValidationError;
use crate::validation;

/// A screen of the wizard, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Intro,
    Name,
    Email,
    Phone,
    Gender,
    Country,
    City,
    Qualification,
}

/// How the answer for a step is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// No input, the step only shows text
    None,
    Text { placeholder: &'static str },
    Email { placeholder: &'static str },
    Tel { placeholder: &'static str },
    Select {
        prompt: &'static str,
        choices: &'static [Choice],
    },
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::Intro,
        Step::Name,
        Step::Email,
        Step::Phone,
        Step::Gender,
        Step::Country,
        Step::City,
        Step::Qualification,
    ];

    /// The terminal field step
    pub const LAST_FIELD: Step = Step::Qualification;

    pub fn total_steps() -> usize {
        Self::ALL.len()
    }

    /// 1-based position of the step (the cursor value)
    pub fn number(&self) -> usize {
        match self {
            Self::Intro => 1,
            Self::Name => 2,
            Self::Email => 3,
            Self::Phone => 4,
            Self::Gender => 5,
            Self::Country => 6,
            Self::City => 7,
            Self::Qualification => 8,
        }
    }

    pub fn from_number(number: usize) -> Option<Step> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Field collected on this step
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Intro => None,
            Self::Name => Some(Field::Name),
            Self::Email => Some(Field::Email),
            Self::Phone => Some(Field::Phone),
            Self::Gender => Some(Field::Gender),
            Self::Country => Some(Field::Country),
            Self::City => Some(Field::City),
            Self::Qualification => Some(Field::Qualification),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Intro => "Welcome",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::Gender => "Gender",
            Self::Country => "Country",
            Self::City => "City",
            Self::Qualification => "Highest Qualification",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            Self::Intro => {
                "Apply to work from home with Ansyla. We will ask you seven short questions."
            }
            Self::Name => "What is your full name?",
            Self::Email => "What is your email address?",
            Self::Phone => "What is your phone number?",
            Self::Gender => "What is your gender?",
            Self::Country => "Which country do you live in?",
            Self::City => "Which city do you live in?",
            Self::Qualification => "What is your highest qualification?",
        }
    }

    pub fn input(&self) -> InputKind {
        match self {
            Self::Intro => InputKind::None,
            Self::Name => InputKind::Text {
                placeholder: "John Doe",
            },
            Self::Email => InputKind::Email {
                placeholder: "john.doe@example.com",
            },
            Self::Phone => InputKind::Tel {
                placeholder: "e.g., 1234567890",
            },
            Self::Gender => InputKind::Select {
                prompt: "Select your gender",
                choices: GENDERS,
            },
            Self::Country => InputKind::Select {
                prompt: "Select your country",
                choices: COUNTRIES,
            },
            Self::City => InputKind::Text {
                placeholder: "Manchester",
            },
            Self::Qualification => InputKind::Select {
                prompt: "Select an option",
                choices: QUALIFICATIONS,
            },
        }
    }

    /// Run the rule for this step's field. The intro always passes.
    pub fn validate(&self, answers: &AnswerSet) -> Result<(), ValidationError> {
        match self.field() {
            Some(field) => validation::validate(field, answers),
            None => Ok(()),
        }
    }

    pub fn next(&self) -> Option<Step> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(&self) -> Option<Step> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST_FIELD
    }

    /// Progress fraction: `(step - 1) / (total - 1)`
    pub fn progress(&self) -> f64 {
        (self.number() - 1) as f64 / (Self::total_steps() - 1) as f64
    }
}
