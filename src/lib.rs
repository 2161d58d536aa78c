// Copyright 2025 Zhipu AI (Original Python implementation)
// Copyright 2025 ModerRAS (Rust implementation)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # App Resolver
//!
//! Resolves free-form, possibly misspelled or reordered application names
//! into Android package identifiers.
//!
//! Names produced by an instruction-following model rarely match a launcher
//! label byte for byte ("Center Game", "chorme", "google-maps"). The resolver
//! answers from exactly one mapping tier at a time: the catalog discovered on
//! the device when one is available, otherwise a bundled fallback table.
//!
//! ## Example
//!
//! ```rust
//! use app_resolver::{AppResolver, ApplicationRecord};
//!
//! let resolver = AppResolver::bundled();
//! assert_eq!(resolver.resolve("Chrome").as_deref(), Some("com.android.chrome"));
//!
//! // Apps discovered on the device take over completely.
//! resolver.refresh(&[ApplicationRecord::new("com.example.gc", "Game Center")]);
//! assert_eq!(resolver.resolve("game centre").as_deref(), Some("com.example.gc"));
//! assert_eq!(resolver.resolve("Chrome"), None);
//! ```
//!
//! ## Launching over ADB
//!
//! ```rust,no_run
//! use app_resolver::{adb, AppResolver};
//!
//! fn main() -> anyhow::Result<()> {
//!     let resolver = AppResolver::bundled();
//!     let records = adb::list_installed_apps(None, adb::default_label)?;
//!     resolver.refresh(&records);
//!
//!     if let Some(found) = adb::launch_app(&resolver, "YouTube", None, None)? {
//!         println!("Launched {} via {}", found.identifier, found.strategy);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adb;
pub mod config;
pub mod resolver;
pub mod settings;

pub use resolver::{
    AppResolver, ApplicationRecord, MappingStore, MappingTier, MatchResult, MatchStrategy,
    MatcherConfig, StoreState, TierKind,
};
pub use settings::ResolverSettings;
