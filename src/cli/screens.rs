//! Post-submission screens: the confirmation view and the static dashboard.

use crate::cli::ui::formatting::Formatter;
use crate::dashboard::{
    DashboardState, DashboardTab, Driver, FilterPatch, Impact, Priority, ACTION_PLAN,
    ACTION_WINDOW, KPIS, NEGATIVE_DRIVERS, POSITIVE_DRIVERS,
};
use crate::domain::{ChoiceOption, FormRecord};
use crate::wizard::SubmissionReceipt;

pub const ESTIMATED_READY_TIME: &str = "3 - 5 Minutes";

pub const NEXT_STEPS: [&str; 4] = [
    "Analysis of Google and TripAdvisor reviews",
    "Categorization of issues by department",
    "Comparison of performance across OTA platforms",
    "Generation of Top 5 prioritized owner actions",
];

pub fn confirmation_lines(
    formatter: &Formatter,
    record: &FormRecord,
    receipt: &SubmissionReceipt,
) -> Vec<String> {
    let mut lines = vec![
        formatter.header_text("Submission Received!"),
        format!(
            "We've received the data for {}. Our automated analysis engine is now generating \
             your prioritized action plan.",
            receipt.hotel_name
        ),
        String::new(),
    ];
    lines.extend(formatter.two_column_lines(&[
        ("Estimated Ready Time", ESTIMATED_READY_TIME.to_string()),
        ("Submission ID", receipt.id.to_string()),
        ("Review sources", review_source_count(record).to_string()),
    ]));
    lines.push(String::new());
    lines.push("What happens next?".to_string());
    lines.extend(NEXT_STEPS.iter().map(|step| formatter.bullet(step)));
    lines
}

fn review_source_count(record: &FormRecord) -> usize {
    2 + record.selected_otas.len()
}

/// Actions offered on the dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    SelectTab(DashboardTab),
    Filter(FilterPatch),
    Reset,
    Exit,
}

pub trait DashboardInteraction {
    /// Whether to open the dashboard from the confirmation screen.
    fn view_dashboard(&mut self) -> bool;

    fn dashboard_action(&mut self, state: &DashboardState) -> DashboardAction;
}

/// Renders the dashboard and applies actions until the user exits.
pub fn run_dashboard<I: DashboardInteraction>(
    formatter: &Formatter,
    state: &mut DashboardState,
    interaction: &mut I,
) {
    loop {
        for line in dashboard_lines(formatter, state) {
            println!("{line}");
        }
        match interaction.dashboard_action(state) {
            DashboardAction::SelectTab(tab) => state.select_tab(tab),
            DashboardAction::Filter(patch) => state.update_filters(patch),
            DashboardAction::Reset => state.reset_filters(),
            DashboardAction::Exit => {
                tracing::debug!("Leaving dashboard");
                return;
            }
        }
    }
}

pub fn dashboard_lines(formatter: &Formatter, state: &DashboardState) -> Vec<String> {
    let mut lines = vec![
        formatter.header_text(format!("HotelVoice | {}", state.hotel_name)),
        "Report Ready".to_string(),
        tab_bar(formatter, state.tab),
        format!(
            "Department: {} | Source: {} | Period: {}",
            state.filters.department.label(),
            state.filters.source.label(),
            state.filters.period.label()
        ),
        String::new(),
    ];
    match state.tab {
        DashboardTab::Overview => {
            lines.extend(kpi_lines(formatter));
            lines.push(String::new());
            lines.extend(driver_lines(formatter));
            lines.push(String::new());
            lines.extend(action_lines(formatter));
        }
        DashboardTab::Drivers => lines.extend(driver_lines(formatter)),
        DashboardTab::Actions => lines.extend(action_lines(formatter)),
        DashboardTab::Platforms | DashboardTab::Social => {
            lines.push(format!("{} is not part of the sample report.", state.tab.label()));
        }
    }
    lines
}

fn tab_bar(formatter: &Formatter, active: DashboardTab) -> String {
    DashboardTab::all()
        .iter()
        .map(|tab| {
            if *tab == active {
                if formatter.is_plain() {
                    format!("[{}]", tab.label())
                } else {
                    format!("▸ {}", tab.label())
                }
            } else {
                tab.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn kpi_lines(formatter: &Formatter) -> Vec<String> {
    let entries: Vec<(&str, String)> = KPIS
        .iter()
        .map(|kpi| {
            let arrow = match (formatter.is_plain(), kpi.trending_down()) {
                (true, _) => "",
                (false, true) => " ↓",
                (false, false) => " ↑",
            };
            (kpi.label, format!("{} ({}{})", kpi.value, kpi.trend, arrow))
        })
        .collect();
    formatter.two_column_lines(&entries)
}

fn driver_lines(formatter: &Formatter) -> Vec<String> {
    let mut lines = vec!["Top Positive Drivers".to_string()];
    lines.extend(POSITIVE_DRIVERS.iter().map(|driver| formatter.bullet(driver_text(driver))));
    lines.push("Top Negative Drivers".to_string());
    lines.extend(NEGATIVE_DRIVERS.iter().map(|driver| formatter.bullet(driver_text(driver))));
    lines
}

fn driver_text(driver: &Driver) -> String {
    let impact = match driver.impact {
        Impact::High => "High",
        Impact::Medium => "Medium",
        Impact::Low => "Low",
    };
    format!("{} {}% ({impact} Impact)", driver.theme, driver.score)
}

fn action_lines(formatter: &Formatter) -> Vec<String> {
    let mut lines = vec![
        format!("Top 5 Action Items ({ACTION_WINDOW})"),
        formatter.detail_text("Prioritized by impact on ranking and bookings"),
    ];
    for (index, item) in ACTION_PLAN.iter().enumerate() {
        let priority = match item.priority {
            Priority::Critical => "CRITICAL",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
        };
        lines.push(format!(
            "  {}. {} [{}, {}]",
            index + 1,
            item.task,
            item.owner,
            priority
        ));
    }
    lines
}
