//! ADB command plumbing and device listing.

use std::process::Command;
use thiserror::Error;

/// Type of ADB connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionType {
    Usb,
    Wifi,
    Remote,
}

/// Information about a connected device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device_id: String,
    pub status: String,
    pub connection_type: ConnectionType,
    pub model: Option<String>,
}

/// ADB executable, resolved through `PATH`.
pub const ADB_BINARY: &str = "adb";

/// ADB errors.
#[derive(Error, Debug)]
pub enum AdbError {
    #[error("Failed to run adb: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Command execution failed: {0}")]
    CommandFailed(String),
}

/// Lists devices visible to the ADB server.
///
/// # Example
/// ```rust,no_run
/// use app_resolver::adb::ADBConnection;
///
/// let conn = ADBConnection::new();
/// let devices = conn.list_devices();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ADBConnection;

impl ADBConnection {
    /// Create a new ADB connection manager.
    pub fn new() -> Self {
        Self
    }

    /// List all connected devices.
    pub fn list_devices(&self) -> Result<Vec<DeviceInfo>, AdbError> {
        let output = Command::new(ADB_BINARY)
            .args(["devices", "-l"])
            .output()?;

        Ok(parse_devices(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `adb devices -l` output.
pub(crate) fn parse_devices(stdout: &str) -> Vec<DeviceInfo> {
    stdout
        .lines()
        .skip(1)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 {
                return None;
            }

            let device_id = parts[0].to_string();
            let connection_type = if device_id.contains(':') {
                ConnectionType::Remote
            } else if device_id.contains("usb") {
                ConnectionType::Usb
            } else {
                ConnectionType::Wifi
            };

            let model = parts
                .iter()
                .find_map(|p| p.strip_prefix("model:"))
                .map(str::to_string);

            Some(DeviceInfo {
                device_id,
                status: parts[1].to_string(),
                connection_type,
                model,
            })
        })
        .collect()
}

/// Get ADB command prefix with optional device specifier.
pub(crate) fn get_adb_prefix(device_id: Option<&str>) -> Vec<String> {
    match device_id {
        Some(id) => vec![ADB_BINARY.to_string(), "-s".to_string(), id.to_string()],
        None => vec![ADB_BINARY.to_string()],
    }
}

/// Run `adb shell <args>` and return stdout.
pub(crate) fn run_shell(device_id: Option<&str>, args: &[&str]) -> Result<String, AdbError> {
    let prefix = get_adb_prefix(device_id);

    let output = Command::new(&prefix[0])
        .args(&prefix[1..])
        .arg("shell")
        .args(args)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AdbError::CommandFailed(format!(
            "adb shell {}: {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
