//! Step sequencing, validation and the submission boundary.

pub mod controller;
pub mod step;
pub mod submission;
pub mod validation;

pub use controller::{Transition, WizardController, WizardPhase, WizardState};
pub use step::WizardStep;
pub use submission::{
    AcceptingSubmitter, SubmissionCollaborator, SubmissionError, SubmissionId, SubmissionReceipt,
};
pub use validation::{validate_step, DateRangeError, StepReport, ValidationError};
