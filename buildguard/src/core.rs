//! Engine context shared by every driver.
//! No UI or I/O state beyond the one-time catalog load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzer::filters::CascadingFilter;
use crate::analyzer::index::CompatibilityIndex;
use crate::build::{Build, Category};
use crate::catalog::CatalogStore;
use crate::compliance::physical::PhysicalValidator;
use crate::compliance::power::PowerBudgetEstimator;
use crate::compliance::report::CompatibilityReport;
use crate::compliance::validator::BuildValidator;

#[derive(Debug, thiserror::Error)]
pub enum BuildGuardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },
    #[error("Invalid catalog directory: {0}")]
    InvalidDirectory(String),
    #[error("Unknown component category: {0}")]
    UnknownCategory(String),
    #[error("No {category} named '{name}' in the catalog")]
    UnknownComponent { category: Category, name: String },
    #[error("No SSD or HDD named '{0}' in the catalog")]
    UnknownStorage(String),
}

/// Thresholds used by the filters and validators.
///
/// The defaults are the documented engine constants; drivers may load
/// overrides from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOptions {
    /// Required PSU headroom over the estimated budget (1.2 = 20%).
    pub psu_headroom: f64,
    /// GPU length above this share of the case limit draws a warning.
    pub gpu_clearance_ratio: f64,
    /// CPU TDP above this share of the cooler rating draws a warning.
    pub cooler_tdp_margin: f64,
    pub power_floor_w: f64,
    /// Motherboard, RAM and storage.
    pub base_overhead_w: f64,
    /// Fans and peripherals.
    pub peripheral_overhead_w: f64,
    pub default_cpu_tdp_w: f64,
    pub default_gpu_tdp_w: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            psu_headroom: 1.2,
            gpu_clearance_ratio: 0.9,
            cooler_tdp_margin: 0.8,
            power_floor_w: 300.0,
            base_overhead_w: 50.0,
            peripheral_overhead_w: 30.0,
            default_cpu_tdp_w: 65.0,
            default_gpu_tdp_w: 180.0,
        }
    }
}

impl EngineOptions {
    /// Parse a JSON object of overrides. Keys left out keep their defaults;
    /// unknown keys and anything other than an object are rejected.
    pub fn from_json(json: &str) -> Result<Self, BuildGuardError> {
        let parse_error = |message: String| BuildGuardError::Parse {
            file: "engine options".to_string(),
            message,
        };
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| parse_error(e.to_string()))?;
        if !value.is_object() {
            return Err(parse_error("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
    }
}

/// The catalog plus every service that reads it, constructed once and
/// passed by reference to callers.
pub struct BuildGuardCore {
    catalog: CatalogStore,
    options: EngineOptions,
}

impl BuildGuardCore {
    pub fn new(catalog: CatalogStore) -> Self {
        Self::with_options(catalog, EngineOptions::default())
    }

    pub fn with_options(catalog: CatalogStore, options: EngineOptions) -> Self {
        Self { catalog, options }
    }

    /// Load a normalized catalog directory with default options.
    pub fn load(dir: &Path) -> Result<Self, BuildGuardError> {
        let catalog = CatalogStore::load_from_directory(dir)?;
        tracing::info!("Catalog ready: {} records", catalog.total_count());
        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn index(&self) -> CompatibilityIndex<'_> {
        CompatibilityIndex::new(&self.catalog)
    }

    pub fn filter(&self) -> CascadingFilter<'_> {
        CascadingFilter::with_options(&self.catalog, &self.options)
    }

    pub fn power(&self) -> PowerBudgetEstimator {
        PowerBudgetEstimator::with_options(&self.options)
    }

    pub fn physical(&self) -> PhysicalValidator {
        PhysicalValidator::with_options(&self.options)
    }

    pub fn validator(&self) -> BuildValidator {
        BuildValidator::with_options(&self.options)
    }

    pub fn estimated_power_budget(&self, build: &Build) -> f64 {
        self.power().estimated_power_budget(build)
    }

    /// Pairwise socket, memory, form-factor and PSU checks.
    pub fn verify_compatibility_complete(&self, build: &Build) -> CompatibilityReport {
        self.validator().verify_compatibility_complete(build)
    }

    /// Every check the engine knows, merged into one report.
    pub fn validate_build(&self, build: &Build) -> CompatibilityReport {
        self.validator().validate_build(build)
    }
}
