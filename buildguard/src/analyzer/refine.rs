//! Performance refinement over an already-narrowed candidate list.
//!
//! These run after the cascading filter: they never look at the build, only
//! at the records handed to them. A record whose field is unknown fails any
//! numeric criterion on that field.

use serde::{Deserialize, Serialize};

use crate::catalog::{Cpu, Gpu, Ram};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuCriteria {
    /// Exact `calculated_metrics.cpu_category`, e.g. `high_end`.
    pub category: Option<String>,
    pub min_cores: Option<u32>,
    pub min_threads: Option<u32>,
    pub max_tdp_w: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RamCriteria {
    pub min_capacity_gb: Option<f64>,
    pub min_frequency_mhz: Option<f64>,
    pub generation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuCriteria {
    pub category: Option<String>,
    pub min_vram_gb: Option<f64>,
}

fn at_least<T: PartialOrd>(value: Option<T>, min: Option<T>) -> bool {
    match min {
        Some(min) => value.map_or(false, |v| v >= min),
        None => true,
    }
}

fn at_most<T: PartialOrd>(value: Option<T>, max: Option<T>) -> bool {
    match max {
        Some(max) => value.map_or(false, |v| v <= max),
        None => true,
    }
}

fn same_text(value: Option<&str>, wanted: Option<&str>) -> bool {
    wanted.map_or(true, |w| value == Some(w))
}

pub fn cpus_by_performance<'a>(
    cpus: impl IntoIterator<Item = &'a Cpu>,
    criteria: &CpuCriteria,
) -> Vec<&'a Cpu> {
    cpus.into_iter()
        .filter(|cpu| {
            same_text(cpu.category(), criteria.category.as_deref())
                && at_least(cpu.cores(), criteria.min_cores)
                && at_least(cpu.threads(), criteria.min_threads)
                && at_most(cpu.tdp_w(), criteria.max_tdp_w)
        })
        .collect()
}

pub fn ram_by_specs<'a>(
    rams: impl IntoIterator<Item = &'a Ram>,
    criteria: &RamCriteria,
) -> Vec<&'a Ram> {
    rams.into_iter()
        .filter(|ram| {
            same_text(ram.generation(), criteria.generation.as_deref())
                && at_least(ram.capacity_gb(), criteria.min_capacity_gb)
                && at_least(ram.frequency_mhz(), criteria.min_frequency_mhz)
        })
        .collect()
}

pub fn gpus_by_performance<'a>(
    gpus: impl IntoIterator<Item = &'a Gpu>,
    criteria: &GpuCriteria,
) -> Vec<&'a Gpu> {
    gpus.into_iter()
        .filter(|gpu| {
            same_text(gpu.category(), criteria.category.as_deref())
                && at_least(gpu.vram_gb(), criteria.min_vram_gb)
        })
        .collect()
}
