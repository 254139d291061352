use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// Answers for a complete run: property, time period, reviews, social,
/// confirmation.
pub const HAPPY_PATH: &[&str] = &[
    "Grand Resort",
    "Independent",
    "Thailand",
    "Phuket",
    "Grand Resort",
    "GR Phuket",
    "",
    "",
    "2025-01-01",
    "2025-03-01",
    "",
    "https://www.google.com/maps/place/grand",
    "https://www.tripadvisor.com/Hotel_Review-grand",
    "",
    "no",
    "no",
    "no",
    "Generate Report",
];

/// Binary command with its configuration isolated in `home`.
pub fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hotel_intake_cli").expect("binary should build");
    cmd.env("HOTEL_INTAKE_HOME", home).env("RUST_LOG", "off");
    cmd
}

/// Script-mode command fed `lines` on stdin.
pub fn scripted(home: &TempDir, lines: &[&str]) -> Command {
    let mut cmd = cli(home.path());
    let mut input = lines.join("\n");
    input.push('\n');
    cmd.env("HOTEL_INTAKE_CLI_SCRIPT", "1").write_stdin(input);
    cmd
}
