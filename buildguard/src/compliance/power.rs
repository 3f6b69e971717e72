//! Power budget estimation
//!
//! Sums the CPU and GPU draw with fixed overheads for the rest of the
//! system. Each contribution prefers the record's own TDP and otherwise
//! falls back to a default (CPU) or a per-category table (GPU). The total
//! never drops below the configured floor.

use serde::Serialize;

use crate::build::Build;
use crate::catalog::Gpu;
use crate::core::EngineOptions;

/// Typical board power per GPU performance category, in watts.
pub const GPU_CATEGORY_POWER_W: [(&str, f64); 6] = [
    ("entry_level", 75.0),
    ("budget", 120.0),
    ("mid_range", 180.0),
    ("high_end", 250.0),
    ("enthusiast", 320.0),
    ("flagship", 400.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PowerSource {
    /// The record's own TDP.
    Tdp,
    /// GPU category table.
    CategoryTable,
    Default,
    /// No such component in the build.
    Absent,
}

/// How an estimate was put together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerBreakdown {
    pub cpu_w: f64,
    pub cpu_source: PowerSource,
    pub gpu_w: f64,
    pub gpu_source: PowerSource,
    pub overhead_w: f64,
    /// CPU + GPU + overhead, before the floor.
    pub raw_total_w: f64,
    pub total_w: f64,
}

impl PowerBreakdown {
    pub fn floor_applied(&self) -> bool {
        self.total_w > self.raw_total_w
    }
}

#[derive(Debug, Clone)]
pub struct PowerBudgetEstimator {
    default_cpu_tdp_w: f64,
    default_gpu_tdp_w: f64,
    overhead_w: f64,
    floor_w: f64,
}

impl Default for PowerBudgetEstimator {
    fn default() -> Self {
        Self::with_options(&EngineOptions::default())
    }
}

impl PowerBudgetEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &EngineOptions) -> Self {
        Self {
            default_cpu_tdp_w: options.default_cpu_tdp_w,
            default_gpu_tdp_w: options.default_gpu_tdp_w,
            overhead_w: options.base_overhead_w + options.peripheral_overhead_w,
            floor_w: options.power_floor_w,
        }
    }

    /// Estimated wattage the PSU has to deliver for `build`. Never fails.
    pub fn estimated_power_budget(&self, build: &Build) -> f64 {
        self.breakdown(build).total_w
    }

    pub fn breakdown(&self, build: &Build) -> PowerBreakdown {
        let (cpu_w, cpu_source) = match build.cpu() {
            Some(cpu) => match cpu.tdp_w() {
                Some(tdp) => (tdp, PowerSource::Tdp),
                None => (self.default_cpu_tdp_w, PowerSource::Default),
            },
            None => (0.0, PowerSource::Absent),
        };

        let (gpu_w, gpu_source) = match build.gpu() {
            Some(gpu) => self.gpu_draw(gpu),
            None => (0.0, PowerSource::Absent),
        };

        let raw_total_w = cpu_w + gpu_w + self.overhead_w;
        let total_w = raw_total_w.max(self.floor_w);
        tracing::debug!(
            "Power estimate: cpu {:.0}W ({:?}), gpu {:.0}W ({:?}), total {:.0}W",
            cpu_w,
            cpu_source,
            gpu_w,
            gpu_source,
            total_w
        );

        PowerBreakdown {
            cpu_w,
            cpu_source,
            gpu_w,
            gpu_source,
            overhead_w: self.overhead_w,
            raw_total_w,
            total_w,
        }
    }

    /// Table wattage for a GPU category; unknown or missing categories get
    /// the default.
    pub fn gpu_category_power(&self, category: Option<&str>) -> f64 {
        category
            .and_then(|c| {
                GPU_CATEGORY_POWER_W
                    .iter()
                    .find(|(name, _)| *name == c)
                    .map(|(_, watts)| *watts)
            })
            .unwrap_or(self.default_gpu_tdp_w)
    }

    fn gpu_draw(&self, gpu: &Gpu) -> (f64, PowerSource) {
        if let Some(tdp) = gpu.tdp_w() {
            return (tdp, PowerSource::Tdp);
        }
        let source = if gpu.category().map_or(false, is_known_gpu_category) {
            PowerSource::CategoryTable
        } else {
            PowerSource::Default
        };
        (self.gpu_category_power(gpu.category()), source)
    }
}

fn is_known_gpu_category(category: &str) -> bool {
    GPU_CATEGORY_POWER_W.iter().any(|(name, _)| *name == category)
}
