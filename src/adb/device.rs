//! Launching and inspecting apps on a device.

use std::process::Command;
use std::thread;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use super::connection::{get_adb_prefix, run_shell, AdbError};
use crate::resolver::{AppResolver, MatchResult};

static FOCUSED_COMPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9_.]+)/[A-Za-z0-9_.$]+").expect("valid regex"));

/// Get the package of the currently focused window.
pub fn get_current_package(device_id: Option<&str>) -> Result<Option<String>, AdbError> {
    let stdout = run_shell(device_id, &["dumpsys", "window"])?;
    Ok(parse_focused_package(&stdout))
}

/// Get the currently focused app name.
///
/// # Returns
/// The app name if the resolver knows the package, otherwise "System Home".
pub fn get_current_app(resolver: &AppResolver, device_id: Option<&str>) -> String {
    get_current_package(device_id)
        .ok()
        .flatten()
        .and_then(|package| resolver.app_name(&package))
        .unwrap_or_else(|| "System Home".to_string())
}

pub(crate) fn parse_focused_package(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .filter(|line| line.contains("mCurrentFocus") || line.contains("mFocusedApp"))
        .find_map(|line| FOCUSED_COMPONENT.captures(line))
        .map(|caps| caps[1].to_string())
}

/// Launch a package by identifier.
///
/// # Arguments
/// * `package` - Android package identifier.
/// * `device_id` - Optional ADB device ID.
/// * `delay_ms` - Delay in milliseconds after launching (default 1000).
pub fn launch_package(
    package: &str,
    device_id: Option<&str>,
    delay_ms: Option<u64>,
) -> Result<(), AdbError> {
    let prefix = get_adb_prefix(device_id);
    let delay = delay_ms.unwrap_or(1000);

    let output = Command::new(&prefix[0])
        .args(&prefix[1..])
        .args([
            "shell",
            "monkey",
            "-p",
            package,
            "-c",
            "android.intent.category.LAUNCHER",
            "1",
        ])
        .output()?;

    if !output.status.success() {
        return Err(AdbError::CommandFailed(format!(
            "monkey -p {}: {}",
            package,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    thread::sleep(Duration::from_millis(delay));
    Ok(())
}

/// Resolve an app name and launch it.
///
/// # Returns
/// The match that was launched, or `None` if the name could not be resolved.
pub fn launch_app(
    resolver: &AppResolver,
    app_name: &str,
    device_id: Option<&str>,
    delay_ms: Option<u64>,
) -> Result<Option<MatchResult>, AdbError> {
    let Some(found) = resolver.resolve_detailed(app_name) else {
        return Ok(None);
    };

    launch_package(&found.identifier, device_id, delay_ms)?;
    Ok(Some(found))
}
