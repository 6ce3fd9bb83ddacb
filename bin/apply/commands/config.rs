//! Config command - print the effective configuration

use anyhow::Result;
use wfh_apply::{AppConfig, PreferenceStore};

use crate::style::*;

pub fn run(config: &AppConfig, preferences: &PreferenceStore) -> Result<()> {
    print_header("Configuration");

    print_key_value("Webhook URL", &config.submission.webhook_url);
    print_key_value(
        "Webhook timeout",
        &format!("{}s", config.submission.timeout_secs),
    );
    println!();

    let summary_state = if config.summary.is_enabled() {
        "enabled"
    } else {
        "disabled"
    };
    print_key_value("Summary", summary_state);
    print_key_value("Summary endpoint", &config.summary.api_base);
    print_key_value("Summary model", &config.summary.model);
    print_key_value("Summary API key", &config.summary.masked_api_key());
    println!();

    print_key_value("Alert duration", &format!("{}ms", config.alerts.display_ms));
    print_key_value("Preferences", &preferences.path().display().to_string());
    print_key_value("Theme", preferences.theme().name());
    println!();
    Ok(())
}
