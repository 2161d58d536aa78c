//! App Resolver - resolve free-form app names to Android package names
//!
//! This is the CLI entry point for the app-resolver tool.
//! Run with: cargo run --bin app-resolver -- [--inventory FILE] [--device] [--launch] [--save-settings] [QUERY...]

use app_resolver::adb::{self, ADBConnection};
use app_resolver::config;
use app_resolver::resolver::{load_records, AppResolver, ApplicationRecord, StoreState};
use app_resolver::settings::ResolverSettings;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut inventory: Option<String> = None;
    let mut from_device = false;
    let mut launch = false;
    let mut save_settings = false;
    let mut query_parts: Vec<String> = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--inventory" => {
                inventory = Some(
                    iter.next()
                        .ok_or_else(|| anyhow::anyhow!("--inventory requires a file path"))?,
                );
            }
            "--device" => from_device = true,
            "--launch" => launch = true,
            "--save-settings" => save_settings = true,
            _ => query_parts.push(arg),
        }
    }

    // Settings file first, environment overrides on top
    let mut settings = ResolverSettings::load();
    if let Ok(path) = env::var("APP_MAP_PATH") {
        settings.predefined_map_path = path;
    }
    if let Ok(id) = env::var("ADB_DEVICE_ID") {
        settings.device_id = id;
    }
    if let Some(min) = env::var("RESOLVER_MIN_TOKEN_SIMILARITY")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        settings.min_token_similarity = min;
    }
    if let Some(max) = env::var("RESOLVER_MAX_EDIT_DISTANCE")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        settings.max_edit_distance = max;
    }
    let settings = settings.sanitized();

    if save_settings {
        match settings.save() {
            Ok(path) => println!("💾 Settings saved to {}", path.display()),
            Err(e) => eprintln!("⚠️ Failed to save settings: {}", e),
        }
    }

    let predefined = if settings.predefined_map_path.is_empty() {
        config::bundled_predefined_tier()
    } else {
        config::predefined_file_or_empty(&settings.predefined_map_path)
    };
    let resolver = Arc::new(AppResolver::new(predefined, settings.matcher_config()));

    println!("🔎 App Resolver");
    println!("================================================");
    println!(
        "Predefined mapping: {} entries ({})",
        resolver.store().predefined().len(),
        if settings.predefined_map_path.is_empty() {
            "bundled"
        } else {
            settings.predefined_map_path.as_str()
        }
    );
    println!(
        "Thresholds: token similarity >= {:.2}, edit distance <= {}",
        resolver.matcher_config().min_token_similarity,
        resolver.matcher_config().max_edit_distance
    );
    if let Some(id) = settings.device() {
        println!("Device: {}", id);
    }
    println!("================================================\n");

    // Refresh the dynamic tier
    let records: Option<Vec<ApplicationRecord>> = if let Some(path) = inventory {
        match load_records(&path) {
            Ok(records) => Some(records),
            Err(e) => {
                eprintln!("⚠️ {}", e);
                Some(Vec::new())
            }
        }
    } else if from_device || (settings.auto_refresh && settings.device().is_some()) {
        Some(enumerate_device(&resolver, settings.device().map(str::to_string)).await)
    } else {
        None
    };

    if let Some(records) = records {
        let outcome = resolver.refresh(&records);
        match outcome.state {
            StoreState::DynamicActive => {
                println!("📱 Using dynamic mapping: {} apps\n", outcome.entries)
            }
            StoreState::PredefinedActive => println!(
                "📦 No apps discovered, using predefined mapping: {} entries\n",
                outcome.entries
            ),
        }
    }

    let device_id = settings.device().map(str::to_string);

    if !query_parts.is_empty() {
        let query = query_parts.join(" ");
        handle_query(&resolver, &query, launch, device_id.as_deref(), settings.launch_delay_ms);
    } else {
        // Interactive mode
        println!("Interactive mode. Type an app name and press Enter.");
        println!("Type 'quit' or 'exit' to exit.\n");

        let stdin = io::stdin();
        loop {
            print!("📝 App: ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let query = line.trim();

            if query.is_empty() {
                continue;
            }

            if query == "quit" || query == "exit" {
                println!("Goodbye! 👋");
                break;
            }

            handle_query(&resolver, query, launch, device_id.as_deref(), settings.launch_delay_ms);
        }
    }

    Ok(())
}

/// Enumerate installed apps on a background thread.
async fn enumerate_device(
    resolver: &Arc<AppResolver>,
    device_id: Option<String>,
) -> Vec<ApplicationRecord> {
    match ADBConnection::new().list_devices() {
        Ok(devices) if devices.is_empty() => tracing::warn!("No ADB devices connected"),
        Ok(devices) => {
            for device in devices {
                tracing::debug!("Found device {} ({})", device.device_id, device.status);
            }
        }
        Err(e) => tracing::warn!("Failed to list ADB devices: {}", e),
    }

    let resolver = Arc::clone(resolver);
    let task = tokio::task::spawn_blocking(move || {
        adb::list_installed_apps(device_id.as_deref(), |identifier| {
            resolver
                .store()
                .predefined()
                .reverse_lookup(identifier)
                .map(str::to_string)
                .unwrap_or_else(|| adb::default_label(identifier))
        })
    });

    match task.await {
        Ok(Ok(records)) => records,
        Ok(Err(e)) => {
            tracing::warn!("App enumeration failed: {}", e);
            Vec::new()
        }
        Err(e) => {
            tracing::error!("App enumeration task panicked: {}", e);
            Vec::new()
        }
    }
}

fn handle_query(
    resolver: &AppResolver,
    query: &str,
    launch: bool,
    device_id: Option<&str>,
    delay_ms: u64,
) {
    let found = if launch {
        match adb::launch_app(resolver, query, device_id, Some(delay_ms)) {
            Ok(found) => found,
            Err(e) => {
                eprintln!("❌ Launch failed: {}\n", e);
                return;
            }
        }
    } else {
        resolver.resolve_detailed(query)
    };

    match found {
        Some(found) => {
            println!("✅ {}", found.identifier);
            println!("   key: {}", found.matched_key);
            println!("   strategy: {}", found.strategy);
            println!("   tier: {}", found.tier);
            if launch {
                println!("   launched");
            }
            println!();
        }
        None => println!("❌ App not found: {}\n", query),
    }
}
