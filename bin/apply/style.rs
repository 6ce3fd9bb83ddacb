//! Terminal styling for the application wizard

use console::{measure_text_width, style};
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme as PromptTheme};
use wfh_apply::Theme;

/// Prompt styling for the stored theme preference
pub fn prompt_theme(theme: Theme) -> Box<dyn PromptTheme> {
    match theme {
        Theme::Dark => Box::new(ColorfulTheme::default()),
        Theme::Light => Box::new(SimpleTheme),
    }
}

pub fn icon_success() -> String {
    style("✓").green().to_string()
}

pub fn icon_error() -> String {
    style("✗").red().to_string()
}

pub fn icon_info() -> String {
    style("ℹ").blue().to_string()
}

pub fn print_success(msg: &str) {
    println!("  {} {}", icon_success(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("  {} {}", icon_error(), style(msg).red());
}

pub fn print_info(msg: &str) {
    println!("  {} {}", icon_info(), msg);
}

pub fn print_hint(msg: &str) {
    println!("  {}", style(msg).dim());
}

pub fn print_header(title: &str) {
    let rule = "─".repeat(50usize.saturating_sub(measure_text_width(title)));
    println!();
    println!("{}", style(format!(" {} {}", title, rule)).cyan().bold());
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!("  {} {}", style(format!("{:<22}", format!("{}:", key))).dim(), value);
}

/// Step indicator: "3/8 Email" followed by a bar
pub fn print_step(number: usize, total: usize, title: &str, progress: f64) {
    println!();
    println!(
        "  {} {} {}",
        style(format!("{}/{}", number, total)).cyan(),
        style(title).bold(),
        progress_bar(progress, 24)
    );
}

pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let empty = width - filled;
    format!(
        "{}{} {}",
        style("█".repeat(filled)).green(),
        style("░".repeat(empty)).dim(),
        style(format!("{:>3.0}%", progress * 100.0)).dim()
    )
}

/// Framed block of text, e.g. the success screen or a summary
pub fn print_box(title: &str, content: &[&str]) {
    let max_len = content
        .iter()
        .map(|s| measure_text_width(s))
        .max()
        .unwrap_or(0)
        .max(measure_text_width(title));
    let width = max_len + 2;

    println!("  {}", style(format!("╭{}╮", "─".repeat(width))).dim());
    println!(
        "  {} {}{} {}",
        style("│").dim(),
        style(title).bold(),
        " ".repeat(width - 1 - measure_text_width(title)),
        style("│").dim()
    );
    println!("  {}", style(format!("├{}┤", "─".repeat(width))).dim());
    for line in content {
        println!(
            "  {} {}{} {}",
            style("│").dim(),
            line,
            " ".repeat(width - 1 - measure_text_width(line)),
            style("│").dim()
        );
    }
    println!("  {}", style(format!("╰{}╯", "─".repeat(width))).dim());
}

/// Break prose into lines of at most `width` columns
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let next_width = measure_text_width(&line) + 1 + measure_text_width(word);
            if !line.is_empty() && next_width > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}
