//! Terminal front-end for the intake wizard.

pub mod forms;
pub mod output;
pub mod screens;
mod shell;
pub mod ui;

use thiserror::Error;

use crate::config::ConfigError;
use crate::errors::IntakeError;

pub use shell::{
    run_cli, CliMode, IntakeSession, SessionOutcome, TerminalInteraction, PAGE_SUBTITLE,
    PAGE_TITLE, SCRIPT_ENV,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Intake(err.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Intake(err.into())
    }
}
