//! Theme command - show or change the stored theme preference

use anyhow::Result;
use clap::ValueEnum;
use wfh_apply::{PreferenceStore, Theme};

use crate::style::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Toggle,
    Dark,
    Light,
}

pub fn run(preferences: &PreferenceStore, action: Option<ThemeAction>) -> Result<()> {
    let theme = match action {
        None => {
            print_key_value("Theme", preferences.theme().name());
            print_key_value("Stored in", &preferences.path().display().to_string());
            return Ok(());
        }
        Some(ThemeAction::Toggle) => preferences.toggle()?,
        Some(ThemeAction::Dark) => {
            preferences.set_theme(Theme::Dark)?;
            Theme::Dark
        }
        Some(ThemeAction::Light) => {
            preferences.set_theme(Theme::Light)?;
            Theme::Light
        }
    };
    print_success(&format!("Theme set to {}", theme.name()));
    Ok(())
}
