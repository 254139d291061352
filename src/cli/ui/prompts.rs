use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use strsim::levenshtein;

use crate::cli::ui::test_mode::{self, TextTestInput};

const BACK_LABEL: &str = "← Back";
const MAX_SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPromptResult {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoicePromptResult {
    /// Selected label, or the raw answer when scripted.
    Value(String),
    Keep,
    Back,
    Cancel,
}

/// Reads one line. Esc answers `Back`, Ctrl-C answers `Cancel`.
pub fn text_input(label: &str, default: Option<&str>) -> io::Result<TextPromptResult> {
    if let Some(scripted) = test_mode::next_text_input(label) {
        return Ok(match scripted {
            TextTestInput::Value(value) => {
                println!("> {}", value);
                interpret_buffer(&value, default)
            }
            TextTestInput::Keep => TextPromptResult::Keep,
            TextTestInput::Back => TextPromptResult::Back,
            TextTestInput::Help => TextPromptResult::Help,
            TextTestInput::Cancel => TextPromptResult::Cancel,
        });
    }

    let mut guard = RawModeGuard::activate()?;
    let mut stdout = io::stdout();
    redraw_input(&mut stdout, "")?;
    let mut buffer = String::new();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    guard.deactivate();
                    println!();
                    return Ok(TextPromptResult::Cancel);
                }
                KeyCode::Char('u') | KeyCode::Char('U') => {
                    buffer.clear();
                    redraw_input(&mut stdout, &buffer)?;
                    continue;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => {
                guard.deactivate();
                println!();
                return Ok(TextPromptResult::Back);
            }
            KeyCode::Enter => {
                guard.deactivate();
                println!();
                return Ok(interpret_buffer(&buffer, default));
            }
            KeyCode::Backspace => {
                buffer.pop();
                redraw_input(&mut stdout, &buffer)?;
            }
            KeyCode::Delete => {
                buffer.clear();
                redraw_input(&mut stdout, &buffer)?;
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                redraw_input(&mut stdout, &buffer)?;
            }
            _ => {}
        }
    }
}

/// Arrow-key menu over `options`. Scripted answers are returned raw so the
/// caller can resolve labels, numbers and typos in one place.
pub fn choice_menu(
    title: &str,
    options: &[String],
    default: Option<usize>,
    enable_back: bool,
) -> io::Result<ChoicePromptResult> {
    if let Some(scripted) = test_mode::next_text_input(title) {
        return Ok(match scripted {
            TextTestInput::Value(value) if value.trim().is_empty() => ChoicePromptResult::Keep,
            TextTestInput::Value(value) => {
                println!("> {}", value);
                ChoicePromptResult::Value(value)
            }
            // Menus have no help text of their own.
            TextTestInput::Keep | TextTestInput::Help => ChoicePromptResult::Keep,
            TextTestInput::Back => ChoicePromptResult::Back,
            TextTestInput::Cancel => ChoicePromptResult::Cancel,
        });
    }

    if options.is_empty() {
        return Ok(ChoicePromptResult::Cancel);
    }

    let mut items: Vec<&str> = options.iter().map(String::as_str).collect();
    if enable_back {
        items.push(BACK_LABEL);
    }
    let theme = ColorfulTheme::default();
    let mut select = Select::with_theme(&theme).with_prompt(title).items(&items);
    if let Some(index) = default.filter(|index| *index < options.len()) {
        select = select.default(index);
    }

    let selection = select
        .interact_opt()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    Ok(match selection {
        Some(index) if index < options.len() => ChoicePromptResult::Value(options[index].clone()),
        Some(_) => ChoicePromptResult::Back,
        None => ChoicePromptResult::Cancel,
    })
}

pub fn confirm(prompt: &str, default: bool) -> io::Result<bool> {
    if let Some(scripted) = test_mode::next_text_input(prompt) {
        return Ok(match scripted {
            TextTestInput::Value(value) => {
                println!("> {}", value);
                parse_yes_no(&value).unwrap_or(default)
            }
            TextTestInput::Keep | TextTestInput::Help => default,
            TextTestInput::Back | TextTestInput::Cancel => false,
        });
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}

pub fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Closest option by edit distance, if it is close enough to be a typo.
pub fn suggest<'a>(input: &str, options: &'a [String]) -> Option<&'a str> {
    let needle = input.trim().to_ascii_lowercase();
    options
        .iter()
        .map(|option| (levenshtein(&option.to_ascii_lowercase(), &needle), option))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .map(|(_, option)| option.as_str())
}

fn redraw_input(stdout: &mut Stdout, buffer: &str) -> io::Result<()> {
    stdout.execute(cursor::MoveToColumn(0))?;
    stdout.execute(terminal::Clear(ClearType::CurrentLine))?;
    write!(stdout, "> {}", buffer)?;
    stdout.flush()
}

fn interpret_buffer(buffer: &str, default: Option<&str>) -> TextPromptResult {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return if default.is_some() {
            TextPromptResult::Keep
        } else {
            TextPromptResult::Value(String::new())
        };
    }

    match trimmed.to_ascii_lowercase().as_str() {
        ":cancel" => TextPromptResult::Cancel,
        ":back" => TextPromptResult::Back,
        ":help" => TextPromptResult::Help,
        ":clear" => TextPromptResult::Value(String::new()),
        _ => TextPromptResult::Value(buffer.to_string()),
    }
}

struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn deactivate(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}
