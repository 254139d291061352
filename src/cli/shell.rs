use std::io;

use crate::cli::forms::{
    choice_labels, resolve_choice, summary_lines, ConfirmationResponse, FieldKind,
    FormInteraction, PanelOutcome, PromptContext, PromptResponse, StepPanel,
};
use crate::cli::output;
use crate::cli::screens::{
    confirmation_lines, run_dashboard, DashboardAction, DashboardInteraction,
};
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::progress::progress_line;
use crate::cli::ui::prompts::{
    self, choice_menu, suggest, text_input, ChoicePromptResult, TextPromptResult,
};
use crate::cli::ui::test_mode;
use crate::cli::CliError;
use crate::config::Config;
use crate::dashboard::{
    DashboardState, DashboardTab, Department, FilterPatch, ReportPeriod, ReviewSource,
};
use crate::domain::ChoiceOption;
use crate::wizard::{
    AcceptingSubmitter, StepReport, SubmissionCollaborator, SubmissionReceipt, Transition,
    WizardController, WizardStep,
};

/// Set to read answers from stdin, one per line, instead of the terminal.
pub const SCRIPT_ENV: &str = "HOTEL_INTAKE_CLI_SCRIPT";

pub const PAGE_TITLE: &str = "Improve Your Hotel Reviews & Bookings";
pub const PAGE_SUBTITLE: &str =
    "Paste your public listing links. We'll return a prioritized action plan.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

pub fn run_cli(config: &Config) -> Result<SessionOutcome, CliError> {
    let mode = CliMode::from_env();
    if mode == CliMode::Script {
        let count = test_mode::load_script(io::stdin().lock())?;
        tracing::info!(count, "Running intake in script mode");
    }

    let mut interaction = TerminalInteraction::new();
    let mut session = IntakeSession::new(config);
    Ok(session.run(&mut interaction))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Cancelled,
    Submitted(SubmissionReceipt),
}

/// Drives the controller through the step panels, the submission and the
/// post-submission screens.
pub struct IntakeSession<S: SubmissionCollaborator = AcceptingSubmitter> {
    controller: WizardController<S>,
    expand_optional: bool,
    formatter: Formatter,
}

impl IntakeSession<AcceptingSubmitter> {
    pub fn new(config: &Config) -> Self {
        Self::with_controller(
            WizardController::with_record(config.seed_record()),
            config.expand_optional_sections,
        )
    }
}

impl<S: SubmissionCollaborator> IntakeSession<S> {
    pub fn with_controller(controller: WizardController<S>, expand_optional: bool) -> Self {
        Self {
            controller,
            expand_optional,
            formatter: Formatter::new(),
        }
    }

    pub fn controller(&self) -> &WizardController<S> {
        &self.controller
    }

    pub fn run<I: FormInteraction + DashboardInteraction>(
        &mut self,
        interaction: &mut I,
    ) -> SessionOutcome {
        self.formatter.print_header(PAGE_TITLE);
        self.formatter.print_detail(PAGE_SUBTITLE);
        output::hint("Type :back to return to the previous field, :help for details, :clear to empty a field.");

        let mut start = 0;
        loop {
            let step = self.controller.current_step();
            self.render_step_header(step);
            let mut panel = StepPanel::new(step, self.controller.record(), self.expand_optional);

            match panel.run(&mut self.controller, interaction, start) {
                PanelOutcome::Cancelled => {
                    output::info("Intake cancelled. Nothing was submitted.");
                    return SessionOutcome::Cancelled;
                }
                PanelOutcome::Back => {
                    start = match self.controller.back() {
                        Transition::Moved { to, .. } => self.last_field_index(to),
                        _ => {
                            output::warning("Already at the first field.");
                            0
                        }
                    };
                }
                PanelOutcome::Completed if step.is_last() => {
                    let summary = summary_lines(self.controller.record());
                    match interaction.confirm(&summary) {
                        ConfirmationResponse::Confirm => match self.controller.submit() {
                            Ok(Transition::Submitted(receipt)) => {
                                self.finish(&receipt, interaction);
                                return SessionOutcome::Submitted(receipt);
                            }
                            Ok(Transition::Blocked(report)) => {
                                start = self.report_blocked(&panel, &report);
                            }
                            Ok(_) => start = 0,
                            Err(err) => {
                                output::error(&err);
                                output::hint("Nothing was lost; review the answers and try again.");
                                start = self.last_field_index(step);
                            }
                        },
                        ConfirmationResponse::Back => start = self.last_field_index(step),
                        ConfirmationResponse::Cancel => {
                            output::info("Intake cancelled. Nothing was submitted.");
                            return SessionOutcome::Cancelled;
                        }
                    }
                }
                PanelOutcome::Completed => {
                    start = match self.controller.next() {
                        Transition::Blocked(report) => self.report_blocked(&panel, &report),
                        _ => 0,
                    };
                }
            }
        }
    }

    fn render_step_header(&self, step: WizardStep) {
        output::section(step.title());
        self.formatter
            .print_detail(progress_line(step, self.formatter.is_plain()));
        self.formatter.print_detail(format!("{step} | {}", step.subtitle()));
    }

    fn last_field_index(&self, step: WizardStep) -> usize {
        let record = self.controller.record();
        StepPanel::new(step, record, self.expand_optional)
            .fields(record)
            .len()
            .saturating_sub(1)
    }

    fn report_blocked(&self, panel: &StepPanel, report: &StepReport) -> usize {
        output::warning(format!("{} is not complete yet:", report.step.name()));
        for message in report.messages() {
            println!("{}", self.formatter.bullet(message));
        }
        panel.first_issue_index(self.controller.record(), report)
    }

    fn finish<I: DashboardInteraction>(&mut self, receipt: &SubmissionReceipt, interaction: &mut I) {
        for line in confirmation_lines(&self.formatter, self.controller.record(), receipt) {
            println!("{line}");
        }
        if !interaction.view_dashboard() {
            return;
        }
        if let Transition::DashboardOpened = self.controller.view_dashboard() {
            let mut state = DashboardState::new(receipt.hotel_name.clone());
            run_dashboard(&self.formatter, &mut state, interaction);
        }
    }
}

/// Entries of the dashboard's action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DashboardMenu {
    Tab,
    Department,
    Source,
    Period,
    Reset,
    Exit,
}

impl ChoiceOption for DashboardMenu {
    fn all() -> &'static [Self] {
        &[
            DashboardMenu::Tab,
            DashboardMenu::Department,
            DashboardMenu::Source,
            DashboardMenu::Period,
            DashboardMenu::Reset,
            DashboardMenu::Exit,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            DashboardMenu::Tab => "Switch tab",
            DashboardMenu::Department => "Filter by department",
            DashboardMenu::Source => "Filter by source",
            DashboardMenu::Period => "Change period",
            DashboardMenu::Reset => "Reset filters",
            DashboardMenu::Exit => "Exit",
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            DashboardMenu::Tab => "tab",
            DashboardMenu::Department => "department",
            DashboardMenu::Source => "source",
            DashboardMenu::Period => "period",
            DashboardMenu::Reset => "reset",
            DashboardMenu::Exit => "exit",
        }
    }
}

/// Terminal implementation: crossterm line editor for text, dialoguer menus
/// for choices. Scripted answers are consumed by the prompt helpers.
pub struct TerminalInteraction {
    formatter: Formatter,
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self {
            formatter: Formatter::new(),
        }
    }

    fn render_prompt(&self, context: &PromptContext<'_>) {
        let descriptor = context.descriptor;
        let optional = if descriptor.required { "" } else { " (optional)" };
        println!(
            "\n[{}/{}] {}{}",
            context.index + 1,
            context.total,
            descriptor.label,
            optional
        );
        if let Some(current) = &context.current {
            self.formatter.print_detail(format!("Current: {current}"));
        }
        if let Some(placeholder) = descriptor.placeholder {
            self.formatter.print_detail(format!("Example: {placeholder}"));
        }
    }

    fn prompt_text(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        // Keyword entry treats a blank line as "done", never as "keep".
        let default = match context.descriptor.kind {
            FieldKind::Chips => None,
            _ => context.current.as_deref(),
        };
        match text_input(&context.descriptor.label, default) {
            Ok(TextPromptResult::Value(value)) => PromptResponse::Value(value),
            Ok(TextPromptResult::Keep) => PromptResponse::Keep,
            Ok(TextPromptResult::Back) => PromptResponse::Back,
            Ok(TextPromptResult::Help) => PromptResponse::Help,
            Ok(TextPromptResult::Cancel) => PromptResponse::Cancel,
            Err(err) => {
                tracing::error!(error = %err, "Text prompt failed");
                PromptResponse::Cancel
            }
        }
    }

    fn prompt_choice(&mut self, context: &PromptContext<'_>, options: &[String]) -> PromptResponse {
        let default = context
            .current
            .as_deref()
            .and_then(|current| options.iter().position(|option| option == current));
        map_choice(choice_menu(&context.descriptor.label, options, default, true))
    }

    fn prompt_toggles(&mut self, context: &PromptContext<'_>, options: &[String]) -> PromptResponse {
        const DONE: &str = "Done";
        let selected: Vec<&str> = context
            .current
            .as_deref()
            .map(|current| current.split(", ").collect())
            .unwrap_or_default();
        let plain = self.formatter.is_plain();
        let mut display: Vec<String> = options
            .iter()
            .map(|option| {
                let on = selected.contains(&option.as_str());
                let marker = match (plain, on) {
                    (true, true) => "[x]",
                    (true, false) => "[ ]",
                    (false, true) => "◉",
                    (false, false) => "○",
                };
                format!("{marker} {option}")
            })
            .collect();
        display.push(DONE.to_string());

        match map_choice(choice_menu(&context.descriptor.label, &display, None, true)) {
            PromptResponse::Value(choice) if choice == DONE => PromptResponse::Value(String::new()),
            PromptResponse::Value(choice) => match display.iter().position(|entry| *entry == choice) {
                Some(index) => PromptResponse::Value(options[index].clone()),
                None => PromptResponse::Value(choice),
            },
            other => other,
        }
    }

    /// Menu over a [`ChoiceOption`] set; `None` when the user backs out.
    fn select_option<T: ChoiceOption>(&mut self, title: &str, current: T) -> Option<T> {
        let options = choice_labels::<T>();
        let default = T::all().iter().position(|option| *option == current);
        loop {
            match choice_menu(title, &options, default, true) {
                Ok(ChoicePromptResult::Value(raw)) => match resolve_choice::<T>(&raw) {
                    Some(value) => return Some(value),
                    None => {
                        output::warning(format!("Value must be one of: {}", options.join(", ")));
                        if let Some(best) = suggest(&raw, &options) {
                            output::hint(format!("Did you mean `{best}`?"));
                        }
                    }
                },
                Ok(ChoicePromptResult::Keep) => return Some(current),
                Ok(ChoicePromptResult::Back | ChoicePromptResult::Cancel) => return None,
                Err(err) => {
                    tracing::error!(error = %err, "Menu prompt failed");
                    return None;
                }
            }
        }
    }
}

fn map_choice(result: io::Result<ChoicePromptResult>) -> PromptResponse {
    match result {
        Ok(ChoicePromptResult::Value(value)) => PromptResponse::Value(value),
        Ok(ChoicePromptResult::Keep) => PromptResponse::Keep,
        Ok(ChoicePromptResult::Back) => PromptResponse::Back,
        Ok(ChoicePromptResult::Cancel) => PromptResponse::Cancel,
        Err(err) => {
            tracing::error!(error = %err, "Menu prompt failed");
            PromptResponse::Cancel
        }
    }
}

impl FormInteraction for TerminalInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        self.render_prompt(context);
        match &context.descriptor.kind {
            FieldKind::Choice(options) => self.prompt_choice(context, options),
            FieldKind::Toggles(options) => self.prompt_toggles(context, options),
            FieldKind::Gate(_) => {
                let options = vec!["Yes".to_string(), "No".to_string()];
                self.prompt_choice(context, &options)
            }
            _ => self.prompt_text(context),
        }
    }

    fn confirm(&mut self, summary: &[String]) -> ConfirmationResponse {
        const OPTIONS: [&str; 3] = ["Generate Report", "Edit previous field", "Cancel"];
        output::section("Review & Submit");
        for line in summary {
            println!("  {line}");
        }
        let options: Vec<String> = OPTIONS.iter().map(|option| option.to_string()).collect();
        loop {
            match choice_menu("Ready to submit?", &options, Some(0), false) {
                Ok(ChoicePromptResult::Value(raw)) => {
                    let needle = raw.trim().to_ascii_lowercase();
                    match needle.as_str() {
                        "1" | "generate report" | "submit" | "y" | "yes" => {
                            return ConfirmationResponse::Confirm
                        }
                        "2" | "edit previous field" | "edit" => return ConfirmationResponse::Back,
                        "3" | "cancel" => return ConfirmationResponse::Cancel,
                        _ => output::warning(format!("Value must be one of: {}", OPTIONS.join(", "))),
                    }
                }
                Ok(ChoicePromptResult::Keep) => return ConfirmationResponse::Confirm,
                Ok(ChoicePromptResult::Back) => return ConfirmationResponse::Back,
                Ok(ChoicePromptResult::Cancel) => return ConfirmationResponse::Cancel,
                Err(err) => {
                    tracing::error!(error = %err, "Confirmation prompt failed");
                    return ConfirmationResponse::Cancel;
                }
            }
        }
    }
}

impl DashboardInteraction for TerminalInteraction {
    fn view_dashboard(&mut self) -> bool {
        prompts::confirm("View in Dashboard?", true).unwrap_or_else(|err| {
            tracing::error!(error = %err, "Confirmation prompt failed");
            false
        })
    }

    fn dashboard_action(&mut self, state: &DashboardState) -> DashboardAction {
        loop {
            let Some(entry) = self.select_option("Dashboard", DashboardMenu::Exit) else {
                return DashboardAction::Exit;
            };
            let action = match entry {
                DashboardMenu::Tab => self
                    .select_option::<DashboardTab>("Tab", state.tab)
                    .map(DashboardAction::SelectTab),
                DashboardMenu::Department => self
                    .select_option::<Department>("Department", state.filters.department)
                    .map(|department| {
                        DashboardAction::Filter(FilterPatch {
                            department: Some(department),
                            ..FilterPatch::default()
                        })
                    }),
                DashboardMenu::Source => self
                    .select_option::<ReviewSource>("Source", state.filters.source)
                    .map(|source| {
                        DashboardAction::Filter(FilterPatch {
                            source: Some(source),
                            ..FilterPatch::default()
                        })
                    }),
                DashboardMenu::Period => self
                    .select_option::<ReportPeriod>("Period", state.filters.period)
                    .map(|period| {
                        DashboardAction::Filter(FilterPatch {
                            period: Some(period),
                            ..FilterPatch::default()
                        })
                    }),
                DashboardMenu::Reset => Some(DashboardAction::Reset),
                DashboardMenu::Exit => Some(DashboardAction::Exit),
            };
            if let Some(action) = action {
                return action;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormPatch, FormRecord, Ota};
    use crate::wizard::{SubmissionError, WizardPhase};
    use std::collections::VecDeque;

    struct MockInteraction {
        prompts: VecDeque<PromptResponse>,
        confirmations: VecDeque<ConfirmationResponse>,
        dashboard: bool,
        actions: VecDeque<DashboardAction>,
        seen: Vec<(WizardStep, String)>,
    }

    impl MockInteraction {
        fn new(prompts: Vec<&str>) -> Self {
            Self {
                prompts: prompts.into_iter().map(response).collect(),
                confirmations: VecDeque::new(),
                dashboard: false,
                actions: VecDeque::new(),
                seen: Vec::new(),
            }
        }
    }

    fn response(token: &str) -> PromptResponse {
        match token {
            "<BACK>" => PromptResponse::Back,
            "<KEEP>" => PromptResponse::Keep,
            "<CANCEL>" => PromptResponse::Cancel,
            other => PromptResponse::Value(other.to_string()),
        }
    }

    impl FormInteraction for MockInteraction {
        fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
            self.seen
                .push((context.step, context.descriptor.label.clone()));
            self.prompts.pop_front().unwrap_or(PromptResponse::Cancel)
        }

        fn confirm(&mut self, _summary: &[String]) -> ConfirmationResponse {
            self.confirmations
                .pop_front()
                .unwrap_or(ConfirmationResponse::Confirm)
        }
    }

    impl DashboardInteraction for MockInteraction {
        fn view_dashboard(&mut self) -> bool {
            self.dashboard
        }

        fn dashboard_action(&mut self, _state: &DashboardState) -> DashboardAction {
            self.actions.pop_front().unwrap_or(DashboardAction::Exit)
        }
    }

    const HAPPY_PATH: [&str; 18] = [
        // Property
        "Grand Resort",
        "Independent",
        "Thailand",
        "Phuket",
        "Grand Resort",
        "GR Phuket",
        "",
        "<KEEP>",
        // Time period
        "2025-01-01",
        "2025-03-01",
        "<KEEP>",
        // Reviews
        "https://www.google.com/maps/place/grand",
        "https://www.tripadvisor.com/Hotel_Review-grand",
        "",
        "no",
        // Social
        "no",
        "no",
        // Unused
        "<CANCEL>",
    ];

    fn session() -> IntakeSession {
        IntakeSession::new(&Config::default())
    }

    #[test]
    fn full_walk_submits_and_opens_dashboard() {
        let mut interaction = MockInteraction::new(HAPPY_PATH.to_vec());
        interaction.dashboard = true;
        interaction.actions.push_back(DashboardAction::SelectTab(DashboardTab::Actions));

        let mut session = session();
        let outcome = session.run(&mut interaction);

        let SessionOutcome::Submitted(receipt) = outcome else {
            panic!("Expected submission, got {:?}", outcome);
        };
        assert_eq!(receipt.hotel_name, "Grand Resort");
        assert!(receipt.id.as_str().starts_with("HG-"));
        assert_eq!(session.controller().phase(), WizardPhase::ViewingDashboard);
        assert_eq!(interaction.prompts.len(), 1);
    }

    #[test]
    fn blocked_step_resumes_at_failing_field() {
        let mut prompts = HAPPY_PATH[..8].to_vec();
        // End date before start, then fixed.
        prompts.extend(["2025-01-10", "2025-01-01", "<KEEP>", "2025-01-05", "2025-01-20", "<KEEP>"]);
        let mut interaction = MockInteraction::new(prompts);

        let mut session = session();
        let outcome = session.run(&mut interaction);

        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert_eq!(session.controller().current_step(), WizardStep::Reviews);
        assert_eq!(session.controller().record().start_date, "2025-01-05");
        let period_prompts: Vec<_> = interaction
            .seen
            .iter()
            .filter(|(step, _)| *step == WizardStep::TimePeriod)
            .map(|(_, label)| label.as_str())
            .collect();
        assert_eq!(
            period_prompts,
            ["Start date", "End date", "Compare against", "Start date", "End date", "Compare against"]
        );
    }

    #[test]
    fn back_from_second_step_returns_to_last_property_field() {
        let mut prompts = HAPPY_PATH[..8].to_vec();
        prompts.push("<BACK>");
        let mut interaction = MockInteraction::new(prompts);

        let mut session = session();
        session.run(&mut interaction);

        assert_eq!(
            interaction.seen.last(),
            Some(&(WizardStep::Property, "Local language".to_string()))
        );
        assert_eq!(session.controller().current_step(), WizardStep::Property);
    }

    #[test]
    fn edit_from_confirmation_keeps_wizard_open() {
        let mut prompts = HAPPY_PATH[..17].to_vec();
        // Back into the context-notes gate, then answer it again.
        prompts.push("no");
        let mut interaction = MockInteraction::new(prompts);
        interaction.confirmations.push_back(ConfirmationResponse::Back);

        let mut session = session();
        let outcome = session.run(&mut interaction);

        assert!(matches!(outcome, SessionOutcome::Submitted(_)));
        assert_eq!(
            interaction.seen.last(),
            Some(&(WizardStep::Social, "Add internal context notes?".to_string()))
        );
    }

    struct OfflineSubmitter;

    impl SubmissionCollaborator for OfflineSubmitter {
        fn submit(&mut self, _record: &FormRecord) -> Result<SubmissionReceipt, SubmissionError> {
            Err(SubmissionError::Rejected("service unavailable".into()))
        }
    }

    #[test]
    fn rejected_submission_returns_to_last_field() {
        let mut record = FormRecord::new();
        record.apply(
            FormPatch::new()
                .hotel_name("Grand Resort")
                .brand("Independent")
                .country("Thailand")
                .city("Phuket")
                .keywords(["Grand Resort", "GR Phuket"].into_iter().collect())
                .start_date("2025-01-01")
                .end_date("2025-01-31")
                .google_maps_url("https://www.google.com/maps/place/grand")
                .trip_advisor_url("https://www.tripadvisor.com/Hotel_Review-grand")
                .selected_otas(vec![Ota::Expedia])
                .ota_url(Ota::Expedia, "https://www.expedia.com/grand"),
        );
        let mut controller = WizardController::with_submitter(record, OfflineSubmitter);
        controller.next();
        controller.next();
        controller.next();
        assert_eq!(controller.current_step(), WizardStep::Social);

        let mut session = IntakeSession::with_controller(controller, false);
        let mut interaction = MockInteraction::new(vec!["no", "no"]);
        let outcome = session.run(&mut interaction);

        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert_eq!(
            session.controller().phase(),
            WizardPhase::Editing(WizardStep::Social)
        );
        assert_eq!(interaction.seen.len(), 3);
    }

    #[test]
    fn dashboard_menu_resolves_labels_and_numbers() {
        assert_eq!(resolve_choice::<DashboardMenu>("reset"), Some(DashboardMenu::Reset));
        assert_eq!(resolve_choice::<DashboardMenu>("1"), Some(DashboardMenu::Tab));
        assert_eq!(
            resolve_choice::<DashboardMenu>("Filter by source"),
            Some(DashboardMenu::Source)
        );
    }
}
