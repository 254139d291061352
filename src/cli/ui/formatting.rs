use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Detail,
    Success,
    Warning,
    Error,
}

pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self::with_preferences(current_preferences())
    }

    pub fn with_preferences(prefs: OutputPreferences) -> Self {
        Self { prefs }
    }

    pub fn is_plain(&self) -> bool {
        self.prefs.plain_mode || self.prefs.screen_reader_mode
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        self.apply_style(Style::Header, title)
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", self.detail_text(message));
    }

    pub fn detail_text(&self, message: impl fmt::Display) -> String {
        self.apply_style(Style::Detail, message)
    }

    pub fn print_success(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Success, message));
    }

    pub fn print_warning(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Warning, message));
    }

    pub fn print_error(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Error, message));
    }

    /// Bullet list entry: `•` normally, `-` in plain mode.
    pub fn bullet(&self, message: impl fmt::Display) -> String {
        let marker = if self.is_plain() { "-" } else { "•" };
        format!("  {marker} {message}")
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        match style {
            Style::Success => self.decorate("✔", "OK:", message, style),
            Style::Warning => self.decorate("⚠", "WARNING:", message, style),
            Style::Error => self.decorate("✖", "ERROR:", message, style),
            Style::Header => self.colorize(format!("=== {} ===", message), style),
            Style::Detail => self.colorize(message.to_string(), style),
        }
    }

    fn decorate(
        &self,
        icon: &str,
        plain_label: &str,
        message: impl fmt::Display,
        style: Style,
    ) -> String {
        if self.is_plain() {
            format!("{plain_label} {}", message)
        } else {
            self.colorize(format!("{icon} {}", message), style)
        }
    }

    fn colorize(&self, text: String, style: Style) -> String {
        if self.is_plain() {
            return text;
        }

        if self.prefs.high_contrast_mode {
            return text.bold().to_string();
        }

        match style {
            Style::Success => text.green().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Error => text.red().to_string(),
            Style::Header => text.bold().to_string(),
            Style::Detail => text.dimmed().to_string(),
        }
    }

    pub fn print_two_column(&self, entries: &[(&str, String)]) {
        for line in self.two_column_lines(entries) {
            println!("{line}");
        }
    }

    pub fn two_column_lines(&self, entries: &[(&str, String)]) -> Vec<String> {
        let label_width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        entries
            .iter()
            .map(|(label, value)| format!("  {:<width$}  {}", label, value, width = label_width))
            .collect()
    }
}
