use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env,
    io::{self, BufRead},
    sync::{Mutex, MutexGuard, PoisonError},
};

/// `|`-separated answers consumed by every prompt before it touches the
/// terminal.
pub const TEXT_INPUTS_ENV: &str = "HOTEL_INTAKE_TEST_INPUTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
}

struct TextQueue {
    enabled: bool,
    inputs: VecDeque<TextTestInput>,
}

impl TextQueue {
    fn from_env() -> Self {
        if let Ok(raw) = env::var(TEXT_INPUTS_ENV) {
            Self {
                enabled: true,
                inputs: parse_text_sequences(&raw),
            }
        } else {
            Self::new()
        }
    }

    fn new() -> Self {
        Self {
            enabled: false,
            inputs: VecDeque::new(),
        }
    }
}

static TEXT_INPUTS: Lazy<Mutex<TextQueue>> = Lazy::new(|| Mutex::new(TextQueue::from_env()));

fn queue() -> MutexGuard<'static, TextQueue> {
    TEXT_INPUTS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Next scripted answer, or `None` when prompts should read the terminal.
/// An exhausted queue answers `Cancel` so a short script ends the run instead
/// of blocking on a terminal that is not there.
pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    let mut guard = queue();
    if !guard.enabled {
        return None;
    }
    Some(guard.inputs.pop_front().unwrap_or_else(|| {
        tracing::warn!(prompt = label, "Scripted input exhausted");
        TextTestInput::Cancel
    }))
}

pub fn install_text_inputs(inputs: Vec<TextTestInput>) {
    let mut guard = queue();
    guard.enabled = true;
    guard.inputs = inputs.into();
}

pub fn reset_text_inputs() {
    let mut guard = queue();
    guard.enabled = false;
    guard.inputs.clear();
}

/// Queues one answer per line. Blank lines are blank answers; lines starting
/// with `#` are skipped.
pub fn load_script<R: BufRead>(reader: R) -> io::Result<usize> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }
        inputs.push(if trimmed.is_empty() {
            TextTestInput::Value(String::new())
        } else {
            parse_text_input(trimmed)
        });
    }
    let count = inputs.len();
    install_text_inputs(inputs);
    tracing::debug!(count, "Loaded scripted answers");
    Ok(count)
}

pub fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<ESC>" | "<CANCEL>" => TextTestInput::Cancel,
        "<BACK>" => TextTestInput::Back,
        "<HELP>" => TextTestInput::Help,
        "<KEEP>" => TextTestInput::Keep,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    raw.split('|')
        .filter_map(|segment| {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(parse_text_input(trimmed))
            }
        })
        .collect()
}
