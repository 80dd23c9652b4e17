//! Configuration loading for the Workday Balance Engine.
//!
//! The tier limit, premium multipliers and record screening policy are read
//! from YAML files so they can change without a rebuild.
//!
//! # Example
//!
//! ```no_run
//! use workday_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded rules: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, EngineFile, EngineMetadata, OvertimeConfig, PremiumTier, RecordSettings,
};
