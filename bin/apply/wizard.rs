//! Interactive application wizard

use anyhow::{bail, Result};
use console::{style, Term};
use dialoguer::theme::Theme as PromptTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use wfh_apply::wizard::session::{SUCCESS_MESSAGE, SUCCESS_TITLE};
use wfh_apply::wizard::InputKind;
use wfh_apply::{
    AlertCenter, AlertEvent, AlertLevel, AppConfig, GenerativeClient, Phase, PreferenceStore,
    Progress, Session, Step, SummaryError, WebhookClient, Wizard,
};

use crate::print_banner;
use crate::style::*;

const BACK_COMMAND: &str = ":back";
const SUMMARY_COMMAND: &str = ":summary";
const THEME_COMMAND: &str = ":theme";
const QUIT_COMMAND: &str = ":quit";

/// What the applicant asked for on a step
enum Action {
    Answer(String),
    Back,
    Summary,
    ToggleTheme,
    Quit,
}

pub async fn run_apply_wizard(config: &AppConfig, preferences: &PreferenceStore) -> Result<()> {
    let term = Term::stdout();
    term.clear_screen()?;

    print_banner();
    println!(
        "  {}",
        style("Answer one question at a time. Type :back to go back.").dim()
    );

    let alerts = AlertCenter::new(config.alerts.display_duration());
    let mut alert_events = alerts.subscribe();
    let mut theme_changes = preferences.subscribe();

    let webhook = WebhookClient::new(&config.submission)?;
    let mut session = Session::new(Arc::new(webhook), alerts);
    if config.summary.is_enabled() {
        let generator = GenerativeClient::new(config.summary.clone())?;
        session = session.with_summary_gateway(Arc::new(generator));
    } else {
        print_hint("Summary generation is off (set GEMINI_API_KEY to enable it).");
    }

    let mut prompt_style = prompt_theme(*theme_changes.borrow_and_update());

    loop {
        if theme_changes.has_changed().unwrap_or(false) {
            prompt_style = prompt_theme(*theme_changes.borrow_and_update());
        }

        let wizard = session.wizard();
        let step = match wizard.phase() {
            Phase::Active(step) => step,
            Phase::Done => {
                println!();
                print_box(SUCCESS_TITLE, &["", SUCCESS_MESSAGE, ""]);
                println!();
                return Ok(());
            }
            Phase::Submitting => bail!("submission still in flight"),
        };

        print_step(step.number(), Step::total_steps(), step.title(), wizard.progress());
        if let Some(error) = wizard.error() {
            print_error(&error.to_string());
        }

        match ask(step, &wizard, &session, prompt_style.as_ref())? {
            Action::Answer(value) => {
                if let Some(field) = step.field() {
                    session.edit(field, value)?;
                }
                advance(&session, step).await?;
            }
            Action::Back => {
                session.retreat()?;
            }
            Action::Summary => show_summary(&session).await,
            Action::ToggleTheme => {
                let theme = preferences.toggle()?;
                session
                    .alerts()
                    .info(format!("Theme set to {}", theme.name()));
            }
            Action::Quit => {
                let quit = Confirm::with_theme(prompt_style.as_ref())
                    .with_prompt("  Leave without applying? Your answers will be lost")
                    .default(false)
                    .interact()?;
                if quit {
                    println!();
                    println!("  {} Cancelled", style("✗").red());
                    return Ok(());
                }
            }
        }

        drain_alerts(&mut alert_events);
    }
}

fn ask(
    step: Step,
    wizard: &Wizard,
    session: &Session,
    theme: &dyn PromptTheme,
) -> Result<Action> {
    println!("  {}", step.question());
    let label = wizard.advance_label();

    match step.input() {
        InputKind::None => {
            let start = Confirm::with_theme(theme)
                .with_prompt(format!("  {} your application?", label))
                .default(true)
                .interact()?;
            if start {
                Ok(Action::Answer(String::new()))
            } else {
                Ok(Action::Quit)
            }
        }
        InputKind::Text { placeholder }
        | InputKind::Email { placeholder }
        | InputKind::Tel { placeholder } => {
            print_hint(&format!("e.g. {}  (Enter: {})", placeholder, label));
            let current = step
                .field()
                .map(|f| wizard.answers().get(f).to_string())
                .unwrap_or_default();
            let value: String = Input::with_theme(theme)
                .with_prompt(format!("  {}", step.title()))
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?;
            Ok(match value.trim() {
                BACK_COMMAND => Action::Back,
                SUMMARY_COMMAND => Action::Summary,
                THEME_COMMAND => Action::ToggleTheme,
                QUIT_COMMAND => Action::Quit,
                _ => Action::Answer(value),
            })
        }
        InputKind::Select { prompt, choices } => {
            let mut items: Vec<String> = choices.iter().map(|c| c.label.to_string()).collect();
            items.push("← Back".to_string());
            let summary_idx = session.summary_ready().then(|| {
                items.push("✨ Generate summary".to_string());
                items.len() - 1
            });

            let current = step.field().map(|f| wizard.answers().get(f)).unwrap_or("");
            let default = choices.iter().position(|c| c.code == current).unwrap_or(0);

            let selection = Select::with_theme(theme)
                .with_prompt(format!("  {} (Enter: {})", prompt, label))
                .items(&items)
                .default(default)
                .interact_opt()?;

            Ok(match selection {
                None => Action::Quit,
                Some(idx) if idx < choices.len() => Action::Answer(choices[idx].code.to_string()),
                Some(idx) if Some(idx) == summary_idx => Action::Summary,
                Some(_) => Action::Back,
            })
        }
    }
}

async fn advance(session: &Session, step: Step) -> Result<()> {
    if !session.wizard().can_advance() {
        return Ok(());
    }

    // Only the last step talks to the network
    let spinner = step.is_last().then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let request = session.advance();
    tokio::pin!(request);
    let mut refresh = tokio::time::interval(Duration::from_millis(100));
    let progress = loop {
        tokio::select! {
            progress = &mut request => break progress?,
            _ = refresh.tick() => {
                if let Some(pb) = &spinner {
                    pb.set_message(session.wizard().advance_label());
                }
            }
        }
    };

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match progress {
        // Validation errors are printed with the re-asked step
        Progress::Moved(_) | Progress::Suppressed | Progress::Blocked(_) => {}
        Progress::Submitted => print_success("Application sent"),
        Progress::SubmissionFailed(e) => tracing::debug!("Submission failed: {}", e),
    }
    Ok(())
}

async fn show_summary(session: &Session) {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Generating summary...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = session.generate_summary().await;
    pb.finish_and_clear();

    match result {
        Ok(text) => {
            println!();
            let lines = wrap(&text, 64);
            let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
            print_box("Applicant summary", &lines);
        }
        Err(SummaryError::NotReady) => {
            print_error("Enter your name, email and qualification first.")
        }
        Err(SummaryError::Unavailable) => print_error("Summary generation is not configured."),
        // Gateway failures are reported through the alert surface
        Err(e) => tracing::debug!("Summary failed: {}", e),
    }
}

/// Print alerts raised since the last check
fn drain_alerts(events: &mut broadcast::Receiver<AlertEvent>) {
    loop {
        match events.try_recv() {
            Ok(AlertEvent::Raised(alert)) => match alert.level {
                AlertLevel::Error => print_error(&alert.message),
                AlertLevel::Info => print_info(&alert.message),
            },
            Ok(_) => {}
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
}
