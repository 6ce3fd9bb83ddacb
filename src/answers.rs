//! Answer Set
//!
//! The record of everything the applicant has entered so far. Every field is
//! plain text; gender, country and qualification hold one of the codes from
//! the tables below once the applicant picks an option.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One selectable option of an enumerated field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Wire value stored in the answer set and sent to the webhook
    pub code: &'static str,
    /// Human readable label
    pub label: &'static str,
}

const fn choice(code: &'static str, label: &'static str) -> Choice {
    Choice { code, label }
}

pub const GENDERS: &[Choice] = &[
    choice("male", "Male"),
    choice("female", "Female"),
    choice("non_binary", "Non-binary"),
    choice("prefer_not_to_say", "Prefer not to say"),
];

pub const COUNTRIES: &[Choice] = &[
    choice("ghana", "Ghana"),
    choice("nigeria", "Nigeria"),
    choice("kenya", "Kenya"),
];

pub const QUALIFICATIONS: &[Choice] = &[
    choice("high_school", "High School Diploma/GED"),
    choice("bachelor", "Bachelor's Degree"),
    choice("master", "Master's Degree"),
    choice("phd", "Ph.D. or Doctorate"),
    choice("other", "Other"),
];

/// Named field of the answer set, in wizard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Gender,
    Country,
    City,
    Qualification,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Gender,
        Field::Country,
        Field::City,
        Field::Qualification,
    ];

    /// JSON key used in the submission body
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Gender => "gender",
            Self::Country => "country",
            Self::City => "city",
            Self::Qualification => "qualification",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::Gender => "Gender",
            Self::Country => "Country",
            Self::City => "City",
            Self::Qualification => "Highest Qualification",
        }
    }

    /// Option table for enumerated fields, `None` for free text
    pub fn choices(&self) -> Option<&'static [Choice]> {
        match self {
            Self::Gender => Some(GENDERS),
            Self::Country => Some(COUNTRIES),
            Self::Qualification => Some(QUALIFICATIONS),
            Self::Name | Self::Email | Self::Phone | Self::City => None,
        }
    }

    /// Parse a field from its key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Display form of a stored value: the label for known codes, the raw
    /// value otherwise.
    pub fn display_value<'a>(&self, value: &'a str) -> &'a str {
        match self.choices() {
            Some(choices) => choices
                .iter()
                .find(|c| c.code == value)
                .map(|c| c.label)
                .unwrap_or(value),
            None => value,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accumulated applicant answers
///
/// Serializes to the exact webhook body: seven string keys, nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub country: String,
    pub city: String,
    pub qualification: String,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Gender => &self.gender,
            Field::Country => &self.country,
            Field::City => &self.city,
            Field::Qualification => &self.qualification,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Gender => self.gender = value,
            Field::Country => self.country = value,
            Field::City => self.city = value,
            Field::Qualification => self.qualification = value,
        }
    }

    /// True when the field holds something other than whitespace
    pub fn is_filled(&self, field: Field) -> bool {
        !self.get(field).trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_every_field() {
        let mut answers = AnswerSet::new();
        for field in Field::ALL {
            answers.set(field, format!("value-{}", field.key()));
        }
        for field in Field::ALL {
            assert_eq!(answers.get(field), format!("value-{}", field.key()));
        }
    }

    #[test]
    fn test_serializes_to_webhook_body() {
        let answers = AnswerSet {
            name: "John Doe".to_string(),
            email: "john@x.com".to_string(),
            phone: "1234567890".to_string(),
            gender: "male".to_string(),
            country: "ghana".to_string(),
            city: "Accra".to_string(),
            qualification: "bachelor".to_string(),
        };
        let value = serde_json::to_value(&answers).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 7);
        for field in Field::ALL {
            assert_eq!(object[field.key()], answers.get(field));
        }
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Field::from_key("email"), Some(Field::Email));
        assert_eq!(Field::from_key(" Qualification "), Some(Field::Qualification));
        assert_eq!(Field::from_key("age"), None);
    }

    #[test]
    fn test_display_value_uses_labels() {
        assert_eq!(Field::Qualification.display_value("phd"), "Ph.D. or Doctorate");
        assert_eq!(Field::Country.display_value("kenya"), "Kenya");
        assert_eq!(Field::Country.display_value("france"), "france");
        assert_eq!(Field::City.display_value("Accra"), "Accra");
    }

    #[test]
    fn test_is_filled_ignores_whitespace() {
        let mut answers = AnswerSet::new();
        answers.set(Field::City, "   ");
        assert!(!answers.is_filled(Field::City));
        answers.set(Field::City, " Accra ");
        assert!(answers.is_filled(Field::City));
    }
}
