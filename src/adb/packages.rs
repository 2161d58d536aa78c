//! Installed application enumeration over ADB.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::connection::{run_shell, AdbError};
use crate::resolver::ApplicationRecord;

static PACKAGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*package:([A-Za-z0-9_.]+)").expect("valid regex"));

static COMPONENT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z0-9_.]+)/[A-Za-z0-9_.$]+").expect("valid regex"));

/// Enumerate installed applications on a device.
///
/// Enabled state comes from `pm list packages -d`, launchability from the
/// launcher activity query. `label` supplies display names, since the package
/// manager shell does not expose them.
pub fn list_installed_apps<F>(
    device_id: Option<&str>,
    label: F,
) -> Result<Vec<ApplicationRecord>, AdbError>
where
    F: Fn(&str) -> String,
{
    let all = run_shell(device_id, &["pm", "list", "packages"])?;
    let disabled = run_shell(device_id, &["pm", "list", "packages", "-d"])?;
    let launcher = run_shell(
        device_id,
        &[
            "cmd",
            "package",
            "query-activities",
            "--brief",
            "-a",
            "android.intent.action.MAIN",
            "-c",
            "android.intent.category.LAUNCHER",
        ],
    )?;

    let records = build_records(&all, &disabled, &launcher, label);
    tracing::info!("Enumerated {} installed packages", records.len());
    Ok(records)
}

/// Combine raw shell outputs into application records.
pub(crate) fn build_records<F>(
    all: &str,
    disabled: &str,
    launcher: &str,
    label: F,
) -> Vec<ApplicationRecord>
where
    F: Fn(&str) -> String,
{
    let disabled: HashSet<String> = parse_package_list(disabled).into_iter().collect();
    let launchable = parse_launcher_components(launcher);

    parse_package_list(all)
        .into_iter()
        .map(|identifier| ApplicationRecord {
            display_name: label(&identifier),
            is_enabled: !disabled.contains(&identifier),
            is_launchable: launchable.contains(&identifier),
            identifier,
        })
        .collect()
}

/// Parse `pm list packages` output into package identifiers.
pub(crate) fn parse_package_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| PACKAGE_LINE.captures(line))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Parse launcher activity components into their package identifiers.
pub(crate) fn parse_launcher_components(stdout: &str) -> HashSet<String> {
    stdout
        .lines()
        .filter_map(|line| COMPONENT_LINE.captures(line))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Fallback label: the last identifier segment, capitalized.
pub fn default_label(identifier: &str) -> String {
    let segment = identifier.rsplit('.').next().unwrap_or(identifier);
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => identifier.to_string(),
    }
}
