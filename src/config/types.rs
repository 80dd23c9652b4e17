//! Configuration types for workday balance rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::DEFAULT_TIER_LIMIT_MINUTES;
use crate::error::{EngineError, EngineResult};
use crate::models::PairPolicy;

/// Metadata about the rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// A short code identifying the rule set.
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The version or effective date of the rule set.
    pub version: String,
}

/// How incoming records are screened.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordSettings {
    /// What to do with an arrival that has no leaving (or the reverse).
    #[serde(default)]
    pub incomplete_pairs: PairPolicy,
}

/// Engine configuration file structure (`engine.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Rule set metadata.
    #[serde(flatten)]
    pub metadata: EngineMetadata,
    /// Record screening settings.
    #[serde(default)]
    pub records: RecordSettings,
}

/// A premium tier of overtime pay.
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumTier {
    /// A label for reports (e.g. "50% premium").
    pub label: String,
    /// The multiplier applied to the hourly rate (e.g. 1.5).
    pub multiplier: Decimal,
}

/// Overtime configuration from `overtime.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeConfig {
    /// Daily overtime minutes paid at the 50% premium before the 100%
    /// premium applies.
    pub tier_limit_minutes: u32,
    /// The tier for minutes up to the limit.
    pub fifty_percent: PremiumTier,
    /// The tier for minutes beyond the limit.
    pub hundred_percent: PremiumTier,
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            tier_limit_minutes: DEFAULT_TIER_LIMIT_MINUTES,
            fifty_percent: PremiumTier {
                label: "50% premium".to_string(),
                multiplier: Decimal::new(15, 1),
            },
            hundred_percent: PremiumTier {
                label: "100% premium".to_string(),
                multiplier: Decimal::new(20, 1),
            },
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    records: RecordSettings,
    overtime: OvertimeConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the tier limit is zero or a
    /// multiplier is not positive.
    pub fn new(
        metadata: EngineMetadata,
        records: RecordSettings,
        overtime: OvertimeConfig,
    ) -> EngineResult<Self> {
        if overtime.tier_limit_minutes == 0 {
            return Err(EngineError::InvalidConfig {
                message: "tier_limit_minutes must be positive".to_string(),
            });
        }

        for tier in [&overtime.fifty_percent, &overtime.hundred_percent] {
            if tier.multiplier <= Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!("multiplier for '{}' must be positive", tier.label),
                });
            }
        }

        Ok(Self {
            metadata,
            records,
            overtime,
        })
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the record screening settings.
    pub fn records(&self) -> &RecordSettings {
        &self.records
    }

    /// Returns the overtime configuration.
    pub fn overtime(&self) -> &OvertimeConfig {
        &self.overtime
    }
}

impl Default for EngineConfig {
    /// The standard rules: 120 minute tier limit, 1.5x and 2.0x premiums,
    /// half-filled pairs ignored.
    fn default() -> Self {
        Self {
            metadata: EngineMetadata {
                code: "default".to_string(),
                name: "Standard workday balance".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            records: RecordSettings::default(),
            overtime: OvertimeConfig::default(),
        }
    }
}
