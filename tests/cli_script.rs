mod common;

use predicates::prelude::*;
use predicates::str::{contains, is_match};
use tempfile::TempDir;

use common::{scripted, HAPPY_PATH};

#[test]
fn script_mode_submits_and_shows_dashboard() {
    let home = TempDir::new().unwrap();
    let mut lines = HAPPY_PATH.to_vec();
    lines.extend(["yes", "tab", "Action Plan", "exit"]);

    scripted(&home, &lines)
        .assert()
        .success()
        .stdout(contains("Submission Received!"))
        .stdout(is_match(r"Submission ID\s+HG-[0-9A-Z]{9}").unwrap())
        .stdout(contains("HotelVoice | Grand Resort"))
        .stdout(contains("Top 5 Action Items (Next 14 Days)"));
}

#[test]
fn script_mode_can_skip_dashboard() {
    let home = TempDir::new().unwrap();
    let mut lines = HAPPY_PATH.to_vec();
    lines.push("no");

    scripted(&home, &lines)
        .assert()
        .success()
        .stdout(contains("Submission Received!"))
        .stdout(contains("HotelVoice").not());
}

#[test]
fn incomplete_step_reports_missing_keywords() {
    let home = TempDir::new().unwrap();
    // Only one keyword before finishing the chip list.
    let lines = [
        "Grand Resort",
        "Independent",
        "Thailand",
        "Phuket",
        "Grand Resort",
        "",
        "",
        "<CANCEL>",
    ];

    scripted(&home, &lines)
        .assert()
        .success()
        .stdout(contains("Add at least 2 keywords (1 so far)"))
        .stdout(contains("Intake cancelled. Nothing was submitted."))
        .stdout(contains("Submission Received!").not());
}

#[test]
fn invalid_date_range_is_reported_before_reviews() {
    let home = TempDir::new().unwrap();
    let mut lines = HAPPY_PATH[..8].to_vec();
    lines.extend(["2025-03-01", "2025-01-01", "", "<CANCEL>"]);

    scripted(&home, &lines)
        .assert()
        .success()
        .stdout(contains("End date must be after start date"))
        .stdout(contains("Submission Received!").not());
}

#[test]
fn exhausted_script_cancels_cleanly() {
    let home = TempDir::new().unwrap();

    scripted(&home, &["Grand Resort"])
        .assert()
        .success()
        .stdout(contains("Intake cancelled. Nothing was submitted."));
}
