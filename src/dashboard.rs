//! Static post-submission dashboard.
//!
//! All figures are canned placeholders. Filters and the active tab are local
//! display state; nothing here reads the submitted record besides the heading.

use serde::{Deserialize, Serialize};

use crate::domain::ChoiceOption;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    #[default]
    All,
    Housekeeping,
    #[serde(rename = "f&b")]
    FoodAndBeverage,
    Engineering,
    FrontOffice,
}

impl ChoiceOption for Department {
    fn all() -> &'static [Self] {
        &[
            Department::All,
            Department::Housekeeping,
            Department::FoodAndBeverage,
            Department::Engineering,
            Department::FrontOffice,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Department::All => "All Departments",
            Department::Housekeeping => "Housekeeping",
            Department::FoodAndBeverage => "Food & Beverage",
            Department::Engineering => "Engineering",
            Department::FrontOffice => "Front Office",
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            Department::All => "all",
            Department::Housekeeping => "housekeeping",
            Department::FoodAndBeverage => "f&b",
            Department::Engineering => "engineering",
            Department::FrontOffice => "front_office",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    #[default]
    All,
    Google,
    Tripadvisor,
    Booking,
    Agoda,
}

impl ChoiceOption for ReviewSource {
    fn all() -> &'static [Self] {
        &[
            ReviewSource::All,
            ReviewSource::Google,
            ReviewSource::Tripadvisor,
            ReviewSource::Booking,
            ReviewSource::Agoda,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ReviewSource::All => "All Sources",
            ReviewSource::Google => "Google Maps",
            ReviewSource::Tripadvisor => "TripAdvisor",
            ReviewSource::Booking => "Booking.com",
            ReviewSource::Agoda => "Agoda",
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            ReviewSource::All => "all",
            ReviewSource::Google => "google",
            ReviewSource::Tripadvisor => "tripadvisor",
            ReviewSource::Booking => "booking",
            ReviewSource::Agoda => "agoda",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportPeriod {
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[default]
    #[serde(rename = "last_30_days")]
    Last30Days,
    #[serde(rename = "last_90_days")]
    Last90Days,
}

impl ChoiceOption for ReportPeriod {
    fn all() -> &'static [Self] {
        &[
            ReportPeriod::Last7Days,
            ReportPeriod::Last30Days,
            ReportPeriod::Last90Days,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Last7Days => "Last 7 Days",
            ReportPeriod::Last30Days => "Last 30 Days",
            ReportPeriod::Last90Days => "Last 90 Days",
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            ReportPeriod::Last7Days => "last_7_days",
            ReportPeriod::Last30Days => "last_30_days",
            ReportPeriod::Last90Days => "last_90_days",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    #[default]
    Overview,
    Drivers,
    Actions,
    Platforms,
    Social,
}

impl ChoiceOption for DashboardTab {
    fn all() -> &'static [Self] {
        &[
            DashboardTab::Overview,
            DashboardTab::Drivers,
            DashboardTab::Actions,
            DashboardTab::Platforms,
            DashboardTab::Social,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Drivers => "Drivers & Themes",
            DashboardTab::Actions => "Action Plan",
            DashboardTab::Platforms => "OTA Comparison",
            DashboardTab::Social => "Social Context",
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "overview",
            DashboardTab::Drivers => "drivers",
            DashboardTab::Actions => "actions",
            DashboardTab::Platforms => "platforms",
            DashboardTab::Social => "social",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilters {
    pub department: Department,
    pub source: ReviewSource,
    pub period: ReportPeriod,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub department: Option<Department>,
    pub source: Option<ReviewSource>,
    pub period: Option<ReportPeriod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: &'static str,
    pub trend: &'static str,
}

impl Kpi {
    pub fn trending_down(&self) -> bool {
        self.trend.starts_with('-')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Driver {
    pub theme: &'static str,
    pub score: u8,
    pub impact: Impact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionItem {
    pub task: &'static str,
    pub owner: &'static str,
    pub priority: Priority,
}

pub const KPIS: [Kpi; 4] = [
    Kpi { label: "Overall Sentiment", value: "84%", trend: "+4.2%" },
    Kpi { label: "Review Volume", value: "1,248", trend: "+12%" },
    Kpi { label: "Avg. Rating", value: "4.6", trend: "+0.1" },
    Kpi { label: "Response Rate", value: "92%", trend: "-2.5%" },
];

pub const POSITIVE_DRIVERS: [Driver; 3] = [
    Driver { theme: "Staff Friendliness", score: 94, impact: Impact::High },
    Driver { theme: "Breakfast Variety", score: 88, impact: Impact::Medium },
    Driver { theme: "Ocean View Rooms", score: 91, impact: Impact::High },
];

pub const NEGATIVE_DRIVERS: [Driver; 3] = [
    Driver { theme: "AC Noise Levels", score: 62, impact: Impact::High },
    Driver { theme: "Elevator Wait Time", score: 45, impact: Impact::Medium },
    Driver { theme: "Pool Towel Availability", score: 38, impact: Impact::Low },
];

pub const ACTION_PLAN: [ActionItem; 5] = [
    ActionItem {
        task: "Replace AC Filters in 4th Floor Wing",
        owner: "Engineering",
        priority: Priority::Critical,
    },
    ActionItem {
        task: "Implement Secondary Towel Station at Pool",
        owner: "Housekeeping",
        priority: Priority::High,
    },
    ActionItem {
        task: "Staff Training: Personalizing Check-ins",
        owner: "Front Office",
        priority: Priority::Medium,
    },
    ActionItem {
        task: "Refresh Vegan Breakfast Menu Options",
        owner: "F&B",
        priority: Priority::Medium,
    },
    ActionItem {
        task: "Audit Elevator Response Optimization",
        owner: "Engineering",
        priority: Priority::High,
    },
];

pub const ACTION_WINDOW: &str = "Next 14 Days";

/// Local state of the dashboard screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub hotel_name: String,
    pub filters: DashboardFilters,
    pub tab: DashboardTab,
}

impl DashboardState {
    pub fn new(hotel_name: impl Into<String>) -> Self {
        Self {
            hotel_name: hotel_name.into(),
            ..Self::default()
        }
    }

    pub fn update_filters(&mut self, patch: FilterPatch) {
        if let Some(department) = patch.department {
            self.filters.department = department;
        }
        if let Some(source) = patch.source {
            self.filters.source = source;
        }
        if let Some(period) = patch.period {
            self.filters.period = period;
        }
    }

    pub fn reset_filters(&mut self) {
        self.filters = DashboardFilters::default();
    }

    pub fn select_tab(&mut self, tab: DashboardTab) {
        self.tab = tab;
    }

    pub fn is_filtered(&self) -> bool {
        self.filters != DashboardFilters::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_unfiltered_view() {
        let state = DashboardState::new("Grand Resort");
        assert_eq!(state.filters.department, Department::All);
        assert_eq!(state.filters.source, ReviewSource::All);
        assert_eq!(state.filters.period.wire(), "last_30_days");
        assert_eq!(state.tab, DashboardTab::Overview);
        assert!(!state.is_filtered());
    }

    #[test]
    fn filter_updates_merge_and_reset() {
        let mut state = DashboardState::new("Grand Resort");
        state.update_filters(FilterPatch {
            department: Some(Department::Engineering),
            ..FilterPatch::default()
        });
        state.update_filters(FilterPatch {
            source: Some(ReviewSource::Agoda),
            ..FilterPatch::default()
        });
        assert_eq!(state.filters.department, Department::Engineering);
        assert_eq!(state.filters.source, ReviewSource::Agoda);
        assert!(state.is_filtered());

        state.reset_filters();
        assert!(!state.is_filtered());
    }

    #[test]
    fn food_and_beverage_keeps_original_wire_value() {
        assert_eq!(Department::parse("f&b"), Some(Department::FoodAndBeverage));
        assert_eq!(
            serde_json::to_string(&Department::FoodAndBeverage).unwrap(),
            "\"f&b\""
        );
    }

    #[test]
    fn canned_content_is_complete() {
        assert_eq!(ACTION_PLAN.len(), 5);
        assert!(KPIS.iter().any(Kpi::trending_down));
        assert!(POSITIVE_DRIVERS.iter().all(|driver| driver.score > 80));
    }
}
