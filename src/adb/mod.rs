//! ADB (Android Debug Bridge) module for device interaction.

mod connection;
mod device;
mod packages;

pub use connection::{ADBConnection, AdbError, ConnectionType, DeviceInfo};
pub use device::{get_current_app, get_current_package, launch_app, launch_package};
pub use packages::{default_label, list_installed_apps};
