//! System diagnostics and dependency checking.
//!
//! Verifies that the external tools the pipeline shells out to are installed
//! and answer a version probe.

use owo_colors::OwoColorize;
use std::process::Command;

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Tool is installed and working
    Ok,
    /// Tool is not found
    NotFound,
    /// Tool is found but has issues
    Warning(String),
}

/// Check if a command exists and is executable.
fn check_command(command: &str, probe_arg: &str) -> CheckResult {
    match Command::new(command).arg(probe_arg).output() {
        Ok(output) if output.status.success() => CheckResult::Ok,
        Ok(_) => CheckResult::Warning(format!("'{}' found but '{}' failed", command, probe_arg)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", command, e)),
    }
}

/// Check ffmpeg availability.
fn check_ffmpeg() -> CheckResult {
    check_command("ffmpeg", "-version")
}

/// Check that the configured aligner program exists.
///
/// Only the program itself is probed; aligner wrappers tend to exit nonzero
/// without their full argument list, so a spawnable binary counts as Ok.
fn check_aligner(command: &[String]) -> CheckResult {
    let Some(program) = command.first() else {
        return CheckResult::Warning("aligner command is empty".to_string());
    };
    match Command::new(program).arg("--version").output() {
        Ok(_) => CheckResult::Ok,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", program, e)),
    }
}

fn print_result(name: &str, result: &CheckResult, install_hint: &str) {
    match result {
        CheckResult::Ok => println!("  {} {}", "✓".green(), name),
        CheckResult::NotFound => {
            println!("  {} {}: not found", "✗".red(), name);
            println!("      {}", install_hint.dimmed());
        }
        CheckResult::Warning(message) => {
            println!("  {} {}: {}", "!".yellow(), name, message);
        }
    }
}

/// Check all external dependencies and print a report.
///
/// Returns true when everything required is available.
pub fn check_dependencies(aligner_command: &[String]) -> bool {
    println!("Checking dependencies...");

    let ffmpeg = check_ffmpeg();
    print_result(
        "ffmpeg",
        &ffmpeg,
        "install: sudo apt install ffmpeg (Debian/Ubuntu), sudo pacman -S ffmpeg (Arch)",
    );

    let aligner = check_aligner(aligner_command);
    let program = aligner_command.first().map(String::as_str).unwrap_or("");
    print_result(
        &format!("aligner ({})", program),
        &aligner,
        "set [aligner].command in the config, or SLIDECAST_ALIGNER",
    );

    matches!(ffmpeg, CheckResult::Ok) && matches!(aligner, CheckResult::Ok)
}
