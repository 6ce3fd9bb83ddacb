//! Validate command - check one answer without running the wizard

use anyhow::{anyhow, Result};
use wfh_apply::validation::validate_value;
use wfh_apply::Field;

use crate::style::*;

pub fn run(field: &str, value: &str) -> Result<()> {
    let field = Field::from_key(field).ok_or_else(|| {
        let known: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
        anyhow!("Unknown field '{}'. Expected one of: {}", field, known.join(", "))
    })?;

    match validate_value(field, value) {
        Ok(()) => {
            print_success(&format!("{} is valid", field.label()));
            Ok(())
        }
        Err(e) => {
            print_error(&e.to_string());
            if let Some(choices) = field.choices() {
                let codes: Vec<&str> = choices.iter().map(|c| c.code).collect();
                print_hint(&format!("Accepted values: {}", codes.join(", ")));
            }
            Err(anyhow!("{} is not valid", field.label()))
        }
    }
}
