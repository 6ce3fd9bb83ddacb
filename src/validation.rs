//! Per-field validation rules
//!
//! Each field of the answer set has exactly one rule. Rules only look at the
//! field they are asked about; the wizard decides which field to check.

use regex::Regex;
use std::sync::LazyLock;

use crate::answers::{AnswerSet, Field};
use crate::error::ValidationError;

/// local@domain with at least one dot in the domain part
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Digits only, 10 to 15 of them
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").expect("valid phone regex"));

/// Check one field of the answer set
pub fn validate(field: Field, answers: &AnswerSet) -> Result<(), ValidationError> {
    validate_value(field, answers.get(field))
}

/// Check a raw value against a field's rule
pub fn validate_value(field: Field, value: &str) -> Result<(), ValidationError> {
    match field {
        Field::Name | Field::City => require_text(field, value),
        Field::Email => {
            require_text(field, value)?;
            matches(field, &EMAIL_PATTERN, value)
        }
        Field::Phone => {
            require_text(field, value)?;
            matches(field, &PHONE_PATTERN, value)
        }
        Field::Gender | Field::Country | Field::Qualification => require_choice(field, value),
    }
}

fn require_text(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}

fn matches(field: Field, pattern: &Regex, value: &str) -> Result<(), ValidationError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Malformed(field))
    }
}

fn require_choice(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    let known = field
        .choices()
        .is_some_and(|choices| choices.iter().any(|c| c.code == value));
    if known {
        Ok(())
    } else {
        Err(ValidationError::Malformed(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_answers() -> AnswerSet {
        AnswerSet {
            name: "John Doe".to_string(),
            email: "john@x.com".to_string(),
            phone: "1234567890".to_string(),
            gender: "male".to_string(),
            country: "ghana".to_string(),
            city: "Accra".to_string(),
            qualification: "bachelor".to_string(),
        }
    }

    #[test]
    fn test_complete_answers_pass() {
        let answers = complete_answers();
        for field in Field::ALL {
            assert_eq!(validate(field, &answers), Ok(()), "{}", field);
        }
    }

    #[test]
    fn test_name_requires_non_whitespace() {
        assert_eq!(
            validate_value(Field::Name, "   "),
            Err(ValidationError::Missing(Field::Name))
        );
        assert!(validate_value(Field::Name, " Ama ").is_ok());
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(
            validate_value(Field::Email, ""),
            Err(ValidationError::Missing(Field::Email))
        );
        assert_eq!(
            validate_value(Field::Email, "not-an-email"),
            Err(ValidationError::Malformed(Field::Email))
        );
        assert_eq!(
            validate_value(Field::Email, "a@localhost"),
            Err(ValidationError::Malformed(Field::Email))
        );
        assert_eq!(
            validate_value(Field::Email, "a b@c.com"),
            Err(ValidationError::Malformed(Field::Email))
        );
        assert!(validate_value(Field::Email, "a@b.co").is_ok());
        assert!(validate_value(Field::Email, "john.doe@mail.example.com").is_ok());
    }

    #[test]
    fn test_phone_rules() {
        assert_eq!(
            validate_value(Field::Phone, "12a4567890"),
            Err(ValidationError::Malformed(Field::Phone))
        );
        assert_eq!(
            validate_value(Field::Phone, "123456789"),
            Err(ValidationError::Malformed(Field::Phone))
        );
        assert_eq!(
            validate_value(Field::Phone, "1234567890123456"),
            Err(ValidationError::Malformed(Field::Phone))
        );
        assert_eq!(
            validate_value(Field::Phone, "+233 24 123 4567"),
            Err(ValidationError::Malformed(Field::Phone))
        );
        assert_eq!(
            validate_value(Field::Phone, ""),
            Err(ValidationError::Missing(Field::Phone))
        );
        assert!(validate_value(Field::Phone, "1234567890").is_ok());
        assert!(validate_value(Field::Phone, "123456789012345").is_ok());
    }

    #[test]
    fn test_enumerated_fields() {
        assert_eq!(
            validate_value(Field::Gender, ""),
            Err(ValidationError::Missing(Field::Gender))
        );
        assert_eq!(
            validate_value(Field::Gender, "Male"),
            Err(ValidationError::Malformed(Field::Gender))
        );
        assert!(validate_value(Field::Gender, "prefer_not_to_say").is_ok());

        assert!(validate_value(Field::Country, "kenya").is_ok());
        assert_eq!(
            validate_value(Field::Country, "togo"),
            Err(ValidationError::Malformed(Field::Country))
        );

        for code in ["high_school", "bachelor", "master", "phd", "other"] {
            assert!(validate_value(Field::Qualification, code).is_ok());
        }
        assert_eq!(
            validate_value(Field::Qualification, ""),
            Err(ValidationError::Missing(Field::Qualification))
        );
    }
}
