//! Configuration module for the app resolver.

mod apps;

pub use apps::{
    bundled_predefined_tier, load_predefined_file, parse_predefined, predefined_file_or_empty,
    predefined_tier_or_empty, ConfigError, BUNDLED_APP_MAP,
};
