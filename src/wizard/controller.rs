use crate::domain::{FormPatch, FormRecord};

use super::step::WizardStep;
use super::submission::{
    AcceptingSubmitter, SubmissionCollaborator, SubmissionError, SubmissionReceipt,
};
use super::validation::{validate_step, StepReport};

/// Step index plus the two terminal flags. Once `submitted` is set there is
/// no way back to editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub submitted: bool,
    pub viewing_dashboard: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: WizardStep::FIRST,
            submitted: false,
            viewing_dashboard: false,
        }
    }
}

/// Which screen the controller is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing(WizardStep),
    Submitted,
    ViewingDashboard,
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: WizardStep, to: WizardStep },
    /// The active step failed validation; nothing changed.
    Blocked(StepReport),
    /// Already at the boundary in the requested direction.
    Clamped,
    Submitted(SubmissionReceipt),
    DashboardOpened,
    /// Not available in the current phase.
    Ignored,
}

impl Transition {
    pub fn is_moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// Owns the [`FormRecord`] and sequences the four step panels.
///
/// Panels never mutate the record directly; they read it through
/// [`WizardController::record`] and push changes with
/// [`WizardController::update`].
pub struct WizardController<S: SubmissionCollaborator = AcceptingSubmitter> {
    record: FormRecord,
    state: WizardState,
    submitter: S,
    receipt: Option<SubmissionReceipt>,
}

impl WizardController<AcceptingSubmitter> {
    pub fn new() -> Self {
        Self::with_record(FormRecord::new())
    }

    pub fn with_record(record: FormRecord) -> Self {
        Self::with_submitter(record, AcceptingSubmitter::new())
    }
}

impl Default for WizardController<AcceptingSubmitter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SubmissionCollaborator> WizardController<S> {
    pub fn with_submitter(record: FormRecord, submitter: S) -> Self {
        Self {
            record,
            state: WizardState::default(),
            submitter,
            receipt: None,
        }
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn phase(&self) -> WizardPhase {
        if self.state.viewing_dashboard {
            WizardPhase::ViewingDashboard
        } else if self.state.submitted {
            WizardPhase::Submitted
        } else {
            WizardPhase::Editing(self.state.current_step)
        }
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Merges a panel's changes into the record. Ignored once submitted.
    pub fn update(&mut self, patch: FormPatch) -> bool {
        if self.state.submitted {
            tracing::warn!("Ignoring form update after submission");
            return false;
        }
        if patch.is_empty() {
            return false;
        }
        self.record.apply(patch);
        true
    }

    /// Validation of the active step, recomputed on every call.
    pub fn report(&self) -> StepReport {
        validate_step(self.state.current_step, &self.record)
    }

    pub fn can_advance(&self) -> bool {
        !self.state.submitted && self.report().is_ok()
    }

    pub fn next(&mut self) -> Transition {
        if self.state.submitted {
            return self.ignored("next");
        }
        let from = self.state.current_step;
        let Some(to) = from.next() else {
            return Transition::Clamped;
        };
        let report = self.report();
        if !report.is_ok() {
            tracing::debug!(step = from.number(), issues = report.issues.len(), "Next blocked");
            return Transition::Blocked(report);
        }
        self.state.current_step = to;
        tracing::debug!(from = from.number(), to = to.number(), "Advanced wizard step");
        Transition::Moved { from, to }
    }

    pub fn back(&mut self) -> Transition {
        if self.state.submitted {
            return self.ignored("back");
        }
        let from = self.state.current_step;
        let Some(to) = from.previous() else {
            return Transition::Clamped;
        };
        self.state.current_step = to;
        tracing::debug!(from = from.number(), to = to.number(), "Returned to previous step");
        Transition::Moved { from, to }
    }

    /// Hands the record to the submission collaborator. Only available on the
    /// last step; a rejected submission leaves the wizard editable.
    pub fn submit(&mut self) -> Result<Transition, SubmissionError> {
        if self.state.submitted || !self.state.current_step.is_last() {
            return Ok(self.ignored("submit"));
        }
        let report = self.report();
        if !report.is_ok() {
            return Ok(Transition::Blocked(report));
        }
        let receipt = self.submitter.submit(&self.record)?;
        tracing::info!(id = %receipt.id, "Intake submitted");
        self.state.submitted = true;
        self.receipt = Some(receipt.clone());
        Ok(Transition::Submitted(receipt))
    }

    pub fn view_dashboard(&mut self) -> Transition {
        if !self.state.submitted || self.state.viewing_dashboard {
            return self.ignored("view_dashboard");
        }
        self.state.viewing_dashboard = true;
        tracing::debug!("Opened dashboard");
        Transition::DashboardOpened
    }

    fn ignored(&self, action: &str) -> Transition {
        tracing::warn!(action, phase = ?self.phase(), "Wizard action not available");
        Transition::Ignored
    }
}
