//! Per-step validation rules.
//!
//! Every validator is a pure function of the [`FormRecord`]. Failures are
//! reported as data; nothing here returns an error or panics, a failing step
//! simply keeps the forward action disabled.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;
use url::Url;

use crate::domain::FormRecord;

use super::step::WizardStep;

pub const MIN_KEYWORDS: usize = 2;
pub const MAX_ANALYSIS_DAYS: i64 = 180;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const GOOGLE_MAPS_HOST: &str = "google.com";
pub const TRIPADVISOR_HOST: &str = "tripadvisor";

/// A single field-level problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Problems with the analysis window once both dates are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Use YYYY-MM-DD format")]
    Format,
    #[error("End date must be after start date")]
    EndBeforeStart,
    #[error("Max analysis period is 180 days")]
    TooLong,
}

/// Outcome of validating one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: WizardStep,
    pub issues: Vec<ValidationError>,
}

impl StepReport {
    fn new(step: WizardStep) -> Self {
        Self {
            step,
            issues: Vec::new(),
        }
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.issues.push(ValidationError::new(field, message));
    }

    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|issue| issue.message.clone()).collect()
    }

    pub fn issue_for(&self, field: &str) -> Option<&ValidationError> {
        self.issues.iter().find(|issue| issue.field == field)
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_step(step: WizardStep, record: &FormRecord) -> StepReport {
    match step {
        WizardStep::Property => validate_property(record),
        WizardStep::TimePeriod => validate_time_period(record),
        WizardStep::Reviews => validate_reviews(record),
        WizardStep::Social => StepReport::new(WizardStep::Social),
    }
}

pub fn step_valid(step: WizardStep, record: &FormRecord) -> bool {
    validate_step(step, record).is_ok()
}

pub fn step1_valid(record: &FormRecord) -> bool {
    step_valid(WizardStep::Property, record)
}

pub fn step2_valid(record: &FormRecord) -> bool {
    step_valid(WizardStep::TimePeriod, record)
}

pub fn step3_valid(record: &FormRecord) -> bool {
    step_valid(WizardStep::Reviews, record)
}

/// The final step has no required fields.
pub fn step4_valid(_record: &FormRecord) -> bool {
    true
}

fn validate_property(record: &FormRecord) -> StepReport {
    let mut report = StepReport::new(WizardStep::Property);
    let required = [
        ("hotel_name", "Hotel name", &record.hotel_name),
        ("brand", "Brand", &record.brand),
        ("country", "Country", &record.country),
        ("city", "City/Area", &record.city),
    ];
    for (field, label, value) in required {
        if is_blank(value) {
            report.push(field, format!("{label} is required"));
        }
    }
    if record.keywords.len() < MIN_KEYWORDS {
        report.push(
            "keywords",
            format!(
                "Add at least {MIN_KEYWORDS} keywords ({} so far)",
                record.keywords.len()
            ),
        );
    }
    report
}

fn validate_time_period(record: &FormRecord) -> StepReport {
    let mut report = StepReport::new(WizardStep::TimePeriod);
    if is_blank(&record.start_date) {
        report.push("start_date", "Start date is required");
    }
    if is_blank(&record.end_date) {
        report.push("end_date", "End date is required");
    }
    if let Some(err) = date_range_error(&record.start_date, &record.end_date) {
        report.push("date_range", err.to_string());
    }
    report
}

fn validate_reviews(record: &FormRecord) -> StepReport {
    let mut report = StepReport::new(WizardStep::Reviews);
    check_provider_url(
        &mut report,
        "google_maps_url",
        &record.google_maps_url,
        GOOGLE_MAPS_HOST,
        "Google Maps URL",
    );
    check_provider_url(
        &mut report,
        "trip_advisor_url",
        &record.trip_advisor_url,
        TRIPADVISOR_HOST,
        "TripAdvisor URL",
    );
    for ota in &record.selected_otas {
        let filled = record.ota_url(*ota).is_some_and(|url| !is_blank(url));
        if !filled {
            report.push("ota_urls", format!("Enter a URL for {ota}"));
        }
    }
    report
}

// Presence and format are checked separately: an empty value is never a
// format error, only a missing one.
fn check_provider_url(
    report: &mut StepReport,
    field: &'static str,
    value: &str,
    provider: &str,
    label: &str,
) {
    if is_blank(value) {
        report.push(field, format!("{label} is required"));
    } else if !provider_url_ok(value, provider) {
        report.push(field, format!("Please enter a valid {label}"));
    }
}

/// Returns `false` only for a non-empty value that does not parse as a URL
/// whose host contains `provider`.
pub fn provider_url_ok(value: &str, provider: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match Url::parse(value.trim()) {
        Ok(url) => url.host_str().is_some_and(|host| host.contains(provider)),
        Err(_) => false,
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Checks ordering and span of the analysis window. Returns `None` while
/// either date is still blank; presence is reported separately.
pub fn date_range_error(start: &str, end: &str) -> Option<DateRangeError> {
    if is_blank(start) || is_blank(end) {
        return None;
    }
    let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
        return Some(DateRangeError::Format);
    };
    if end < start {
        return Some(DateRangeError::EndBeforeStart);
    }
    if (end - start).num_days() > MAX_ANALYSIS_DAYS {
        return Some(DateRangeError::TooLong);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormPatch, KeywordChips, Ota};

    fn property_record() -> FormRecord {
        let mut record = FormRecord::new();
        record.apply(
            FormPatch::new()
                .hotel_name("Grand Resort")
                .brand("Independent")
                .country("Thailand")
                .city("Phuket")
                .keywords(["Grand Resort", "GR Phuket"].into_iter().collect()),
        );
        record
    }

    fn reviews_record() -> FormRecord {
        let mut record = FormRecord::new();
        record.apply(
            FormPatch::new()
                .google_maps_url("https://www.google.com/maps/place/grand")
                .trip_advisor_url("https://www.tripadvisor.com/Hotel_Review-g1"),
        );
        record
    }

    #[test]
    fn property_step_matches_required_field_formula() {
        let full = property_record();
        assert!(step1_valid(&full));

        for blanked in ["hotel_name", "brand", "country", "city"] {
            let mut record = full.clone();
            match blanked {
                "hotel_name" => record.hotel_name = "  ".into(),
                "brand" => record.brand.clear(),
                "country" => record.country.clear(),
                _ => record.city = "\t".into(),
            }
            let report = validate_step(WizardStep::Property, &record);
            assert!(!report.is_ok());
            assert!(report.issue_for(blanked).is_some(), "{blanked} not flagged");
            assert!(!step1_valid(&record));
        }
    }

    #[test]
    fn property_step_needs_two_keywords() {
        let mut record = property_record();
        record.keywords = ["Grand Resort"].into_iter().collect::<KeywordChips>();
        assert!(!step1_valid(&record));
        let report = validate_step(WizardStep::Property, &record);
        assert_eq!(
            report.issue_for("keywords").map(|issue| issue.message.as_str()),
            Some("Add at least 2 keywords (1 so far)")
        );
    }

    #[test]
    fn same_day_window_is_valid() {
        assert_eq!(date_range_error("2025-01-01", "2025-01-01"), None);
    }

    #[test]
    fn reversed_window_is_rejected() {
        let err = date_range_error("2025-01-10", "2025-01-01").unwrap();
        assert_eq!(err.to_string(), "End date must be after start date");
    }

    #[test]
    fn window_longer_than_limit_is_rejected() {
        let err = date_range_error("2025-01-01", "2025-08-01").unwrap();
        assert_eq!(err.to_string(), "Max analysis period is 180 days");
        assert_eq!(date_range_error("2025-01-01", "2025-06-30"), None);
        assert_eq!(
            date_range_error("2025-01-01", "2025-07-01"),
            Some(DateRangeError::TooLong)
        );
    }

    #[test]
    fn blank_dates_block_without_range_error() {
        let mut record = FormRecord::new();
        record.start_date = "2025-01-01".into();
        assert_eq!(date_range_error(&record.start_date, &record.end_date), None);
        let report = validate_step(WizardStep::TimePeriod, &record);
        assert_eq!(report.messages(), vec!["End date is required".to_string()]);
    }

    #[test]
    fn malformed_dates_block_progress() {
        assert_eq!(
            date_range_error("01/01/2025", "2025-02-01"),
            Some(DateRangeError::Format)
        );
        let mut record = FormRecord::new();
        record.start_date = "2025-02-30".into();
        record.end_date = "2025-03-01".into();
        assert!(!step2_valid(&record));
    }

    #[test]
    fn provider_urls_are_checked_by_host() {
        assert!(provider_url_ok("https://www.google.com/maps/x", GOOGLE_MAPS_HOST));
        assert!(!provider_url_ok("https://maps.example.com", GOOGLE_MAPS_HOST));
        assert!(!provider_url_ok("not a url", GOOGLE_MAPS_HOST));
        assert!(provider_url_ok("", GOOGLE_MAPS_HOST));
        assert!(provider_url_ok(
            "https://www.tripadvisor.co.uk/Hotel_Review",
            TRIPADVISOR_HOST
        ));
    }

    #[test]
    fn empty_review_urls_fail_presence_not_format() {
        let report = validate_step(WizardStep::Reviews, &FormRecord::new());
        assert_eq!(
            report.messages(),
            vec![
                "Google Maps URL is required".to_string(),
                "TripAdvisor URL is required".to_string(),
            ]
        );
    }

    #[test]
    fn malformed_review_url_reports_format_error() {
        let mut record = reviews_record();
        record.google_maps_url = "not a url".into();
        let report = validate_step(WizardStep::Reviews, &record);
        assert_eq!(
            report.messages(),
            vec!["Please enter a valid Google Maps URL".to_string()]
        );
    }

    #[test]
    fn selected_ota_requires_non_blank_url() {
        let mut record = reviews_record();
        assert!(step3_valid(&record));

        record.apply(FormPatch::new().selected_otas(vec![Ota::Agoda]));
        assert!(!step3_valid(&record));

        record.apply(FormPatch::new().ota_url(Ota::Agoda, "   "));
        assert!(!step3_valid(&record));

        record.apply(FormPatch::new().ota_url(Ota::Agoda, "anything"));
        assert!(step3_valid(&record));
    }

    #[test]
    fn deselected_ota_no_longer_blocks() {
        let mut record = reviews_record();
        record.apply(FormPatch::new().selected_otas(vec![Ota::Expedia]));
        assert!(!step3_valid(&record));
        record.apply(FormPatch::new().selected_otas(record.toggled_otas(Ota::Expedia)));
        assert!(step3_valid(&record));
    }

    #[test]
    fn social_step_is_always_valid() {
        assert!(step4_valid(&FormRecord::new()));
        assert!(validate_step(WizardStep::Social, &FormRecord::new()).is_ok());
    }
}
