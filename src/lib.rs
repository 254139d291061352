#![doc(test(attr(deny(warnings))))]

//! Hotel Intake collects a hotel's public listing details through a four-step
//! wizard, validates each step, submits the record for analysis and presents
//! a static sample report.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod errors;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Hotel intake tracing initialized.");
    });
}
