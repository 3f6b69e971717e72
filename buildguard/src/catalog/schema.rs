//! Component Record Schema
//!
//! Typed records for the nine normalized catalog categories. The JSON layout
//! follows the normalizer's output (`architecture.socket`,
//! `memory_specs.ram_type.generation`, `compatibility.supported_gpu_length`,
//! ...). Every field is optional; accessors return `None` for anything that
//! was missing, empty or unparsable.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::lenient;

/// Identity fields shared by every category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub producer: Option<String>,
    /// Manufacturer part number
    #[serde(default, deserialize_with = "lenient::text")]
    pub mpn: Option<String>,
}

/// A numeric quantity with an optional unit, e.g. `{"value": 320, "unit": "mm"}`.
///
/// Also accepts a bare number or numeric string. Anything else decodes to an
/// empty measure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Measure {
    pub value: Option<f64>,
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gb_equivalent: Option<f64>,
}

impl Measure {
    pub fn new(value: f64, unit: &str) -> Self {
        Self {
            value: Some(value),
            unit: Some(unit.to_string()),
            gb_equivalent: None,
        }
    }

    /// The value, only if it is strictly positive.
    ///
    /// The normalizer uses `0` as a stand-in for "unknown" in several places,
    /// so a zero length or wattage never takes part in a comparison.
    pub fn positive(&self) -> Option<f64> {
        self.value.filter(|v| *v > 0.0)
    }

    /// Capacity in gigabytes, using `gb_equivalent` when the normalizer
    /// provided it and the unit otherwise (binary multiples).
    pub fn as_gb(&self) -> Option<f64> {
        if let Some(gb) = self.gb_equivalent.filter(|v| *v > 0.0) {
            return Some(gb);
        }
        let value = self.positive()?;
        let unit = self.unit.as_deref().unwrap_or("GB").to_ascii_uppercase();
        Some(match unit.as_str() {
            "MB" => value / 1024.0,
            "TB" => value * 1024.0,
            _ => value,
        })
    }
}

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match &value {
            Value::Object(map) => Measure {
                value: map.get("value").and_then(lenient::number_from_value),
                unit: map.get("unit").and_then(lenient::text_from_value),
                gb_equivalent: map.get("gb_equivalent").and_then(lenient::number_from_value),
            },
            other => Measure {
                value: lenient::number_from_value(other),
                unit: None,
                gb_equivalent: None,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// CPU
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    #[serde(flatten)]
    pub part: PartInfo,
    #[serde(default, deserialize_with = "lenient::group")]
    pub architecture: CpuArchitecture,
    /// Older exports put the TDP at the top level.
    #[serde(default, skip_serializing_if = "is_empty_measure")]
    pub tdp: Measure,
    #[serde(default, deserialize_with = "lenient::group")]
    pub calculated_metrics: CpuMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuArchitecture {
    #[serde(default, deserialize_with = "lenient::text")]
    pub socket: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub cores: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub threads: Option<u32>,
    #[serde(default)]
    pub tdp: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuMetrics {
    #[serde(default, deserialize_with = "lenient::text")]
    pub cpu_category: Option<String>,
}

impl Cpu {
    pub fn socket(&self) -> Option<&str> {
        self.architecture.socket.as_deref()
    }

    pub fn tdp_w(&self) -> Option<f64> {
        self.architecture.tdp.positive().or_else(|| self.tdp.positive())
    }

    pub fn cores(&self) -> Option<u32> {
        self.architecture.cores
    }

    pub fn threads(&self) -> Option<u32> {
        self.architecture.threads
    }

    pub fn category(&self) -> Option<&str> {
        self.calculated_metrics.cpu_category.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Motherboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Motherboard {
    #[serde(flatten)]
    pub part: PartInfo,
    #[serde(default, deserialize_with = "lenient::group")]
    pub platform: Platform,
    #[serde(default, deserialize_with = "lenient::text")]
    pub form_factor: Option<String>,
    #[serde(default, deserialize_with = "lenient::group")]
    pub memory: BoardMemory,
    #[serde(default, deserialize_with = "lenient::group")]
    pub connectivity: BoardConnectivity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(default, deserialize_with = "lenient::text")]
    pub socket: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub chipset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardMemory {
    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    pub memory_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub slots: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConnectivity {
    #[serde(default, deserialize_with = "lenient::count")]
    pub sata_ports: Option<u32>,
    #[serde(default, deserialize_with = "lenient::group")]
    pub video_outputs: VideoOutputs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoOutputs {
    #[serde(default, deserialize_with = "lenient::count")]
    pub total: Option<u32>,
}

impl Motherboard {
    pub fn socket(&self) -> Option<&str> {
        self.platform.socket.as_deref()
    }

    pub fn chipset(&self) -> Option<&str> {
        self.platform.chipset.as_deref()
    }

    pub fn form_factor(&self) -> Option<&str> {
        self.form_factor.as_deref()
    }

    pub fn memory_type(&self) -> Option<&str> {
        self.memory.memory_type.as_deref()
    }

    pub fn ram_slots(&self) -> Option<u32> {
        self.memory.slots
    }

    pub fn sata_ports(&self) -> Option<u32> {
        self.connectivity.sata_ports
    }

    pub fn video_output_count(&self) -> Option<u32> {
        self.connectivity.video_outputs.total
    }
}

// ---------------------------------------------------------------------------
// RAM
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ram {
    #[serde(flatten)]
    pub part: PartInfo,
    #[serde(default, deserialize_with = "lenient::group")]
    pub memory_specs: MemorySpecs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySpecs {
    #[serde(default, deserialize_with = "lenient::group")]
    pub ram_type: RamType,
    #[serde(default)]
    pub capacity: Measure,
    #[serde(default)]
    pub frequency: Measure,
    #[serde(default, deserialize_with = "lenient::count")]
    pub sticks: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RamType {
    /// `DDR3`, `DDR4`, `DDR5`, or absent when the normalizer could not tell.
    #[serde(default, deserialize_with = "lenient::text")]
    pub generation: Option<String>,
}

impl Ram {
    pub fn generation(&self) -> Option<&str> {
        self.memory_specs.ram_type.generation.as_deref()
    }

    pub fn capacity_gb(&self) -> Option<f64> {
        self.memory_specs.capacity.as_gb()
    }

    pub fn frequency_mhz(&self) -> Option<f64> {
        self.memory_specs.frequency.positive()
    }

    pub fn stick_count(&self) -> Option<u32> {
        self.memory_specs.sticks
    }
}

// ---------------------------------------------------------------------------
// GPU
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    #[serde(flatten)]
    pub part: PartInfo,
    #[serde(default, alias = "dimensions", deserialize_with = "lenient::group")]
    pub physical: GpuPhysical,
    #[serde(default, deserialize_with = "lenient::group")]
    pub performance: GpuPerformance,
    #[serde(default, deserialize_with = "lenient::group")]
    pub power: PowerConnectors,
    #[serde(default, deserialize_with = "lenient::group")]
    pub calculated_metrics: GpuMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuPhysical {
    #[serde(default)]
    pub length: Measure,
    /// Expansion slot width; can be fractional (2.5 slot cards).
    #[serde(default, deserialize_with = "lenient::number")]
    pub slots: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuPerformance {
    #[serde(default)]
    pub tdp: Measure,
    #[serde(default)]
    pub vram: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerConnectors {
    #[serde(default, deserialize_with = "lenient::count")]
    pub eight_pin_connectors: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub six_pin_connectors: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuMetrics {
    /// Performance tier such as `mid_range` or `flagship`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub gpu_category: Option<String>,
}

impl Gpu {
    pub fn length_mm(&self) -> Option<f64> {
        self.physical.length.positive()
    }

    pub fn slot_width(&self) -> Option<f64> {
        self.physical.slots
    }

    pub fn tdp_w(&self) -> Option<f64> {
        self.performance.tdp.positive()
    }

    pub fn vram_gb(&self) -> Option<f64> {
        self.performance.vram.as_gb()
    }

    pub fn category(&self) -> Option<&str> {
        self.calculated_metrics.gpu_category.as_deref()
    }

    /// Total PCIe power connectors (8-pin + 6-pin), when either is known.
    pub fn power_connector_count(&self) -> Option<u32> {
        match (self.power.eight_pin_connectors, self.power.six_pin_connectors) {
            (None, None) => None,
            (eight, six) => Some(eight.unwrap_or(0) + six.unwrap_or(0)),
        }
    }
}

// ---------------------------------------------------------------------------
// Case
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(flatten)]
    pub part: PartInfo,
    #[serde(default, deserialize_with = "lenient::group")]
    pub compatibility: CaseCompatibility,
    #[serde(default, deserialize_with = "lenient::group")]
    pub fan_support: BTreeMap<String, FanSlots>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseCompatibility {
    /// Largest motherboard form factor the case accepts.
    #[serde(default, deserialize_with = "lenient::text")]
    pub motherboard: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub power_supply: Option<String>,
    #[serde(default)]
    pub supported_gpu_length: Measure,
    #[serde(default)]
    pub supported_cpu_cooler_height: Measure,
}

/// Fan mounts for one fan size.
///
/// Decodes from `{"installed": 2, "maximum": 4}`, from the shorthand
/// `"2/4"`, or from a bare maximum. Anything else is an empty entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FanSlots {
    pub installed: Option<u32>,
    pub maximum: Option<u32>,
}

impl<'de> Deserialize<'de> for FanSlots {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match &value {
            Value::Object(map) => FanSlots {
                installed: map.get("installed").and_then(lenient::count_from_value),
                maximum: map.get("maximum").and_then(lenient::count_from_value),
            },
            Value::String(text) => match text.split_once('/') {
                Some((installed, maximum)) => FanSlots {
                    installed: lenient::count_from_text(installed),
                    maximum: lenient::count_from_text(maximum),
                },
                None => FanSlots {
                    installed: None,
                    maximum: lenient::count_from_text(text),
                },
            },
            other => FanSlots {
                installed: None,
                maximum: lenient::count_from_value(other),
            },
        })
    }
}

impl Case {
    pub fn motherboard_support(&self) -> Option<&str> {
        self.compatibility.motherboard.as_deref()
    }

    pub fn power_supply_support(&self) -> Option<&str> {
        self.compatibility.power_supply.as_deref()
    }

    pub fn max_gpu_length_mm(&self) -> Option<f64> {
        self.compatibility.supported_gpu_length.positive()
    }

    pub fn max_cooler_height_mm(&self) -> Option<f64> {
        self.compatibility.supported_cpu_cooler_height.positive()
    }

    /// Total fan mounts across all sizes, if any size reports a maximum.
    pub fn fan_slots(&self) -> Option<u32> {
        self.fan_support
            .values()
            .filter_map(|slots| slots.maximum)
            .fold(None, |acc, n| Some(acc.unwrap_or(0) + n))
    }
}

// ---------------------------------------------------------------------------
// PSU
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Psu {
    #[serde(flatten)]
    pub part: PartInfo,
    #[serde(default, deserialize_with = "lenient::group")]
    pub power: PsuPower,
    /// Older exports put the wattage at the top level.
    #[serde(default, skip_serializing_if = "is_empty_measure")]
    pub wattage: Measure,
    #[serde(default, deserialize_with = "lenient::text")]
    pub form_factor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PsuPower {
    #[serde(default)]
    pub wattage: Measure,
    #[serde(default, deserialize_with = "lenient::group")]
    pub efficiency: Efficiency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Efficiency {
    /// e.g. `80+ Gold`
    #[serde(default, deserialize_with = "lenient::text")]
    pub full_rating: Option<String>,
}

impl Psu {
    pub fn wattage_w(&self) -> Option<f64> {
        self.power.wattage.positive().or_else(|| self.wattage.positive())
    }

    pub fn efficiency_rating(&self) -> Option<&str> {
        self.power.efficiency.full_rating.as_deref()
    }

    pub fn form_factor(&self) -> Option<&str> {
        self.form_factor.as_deref()
    }
}

// ---------------------------------------------------------------------------
// CPU cooler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuCooler {
    #[serde(flatten)]
    pub part: PartInfo,
    #[serde(default, deserialize_with = "lenient::group")]
    pub specifications: CoolerSpecs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoolerSpecs {
    #[serde(default, deserialize_with = "lenient::group")]
    pub supported_sockets: SocketList,
    #[serde(default)]
    pub height: Measure,
    /// Heat the cooler is rated to dissipate.
    #[serde(default)]
    pub tdp: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocketList {
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub sockets: Vec<String>,
}

impl CpuCooler {
    pub fn supported_sockets(&self) -> &[String] {
        &self.specifications.supported_sockets.sockets
    }

    pub fn supports_socket(&self, socket: &str) -> bool {
        self.supported_sockets().iter().any(|s| s == socket)
    }

    pub fn height_mm(&self) -> Option<f64> {
        self.specifications.height.positive()
    }

    pub fn tdp_rating_w(&self) -> Option<f64> {
        self.specifications.tdp.positive()
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ssd {
    #[serde(flatten)]
    pub part: PartInfo,
    #[serde(default, deserialize_with = "lenient::group")]
    pub storage_specs: SsdSpecs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsdSpecs {
    #[serde(default)]
    pub capacity: Measure,
    #[serde(default, deserialize_with = "lenient::text")]
    pub form_factor: Option<String>,
    /// `SATA`, `NVMe`, ...
    #[serde(default, deserialize_with = "lenient::text")]
    pub protocol: Option<String>,
}

impl Ssd {
    pub fn capacity_gb(&self) -> Option<f64> {
        self.storage_specs.capacity.as_gb()
    }

    pub fn form_factor(&self) -> Option<&str> {
        self.storage_specs.form_factor.as_deref()
    }

    pub fn protocol(&self) -> Option<&str> {
        self.storage_specs.protocol.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hdd {
    #[serde(flatten)]
    pub part: PartInfo,
    #[serde(default, deserialize_with = "lenient::group")]
    pub storage_specs: HddSpecs,
    #[serde(default, deserialize_with = "lenient::group")]
    pub performance_specs: HddPerformance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HddSpecs {
    #[serde(default)]
    pub capacity: Measure,
    #[serde(default, deserialize_with = "lenient::text")]
    pub form_factor: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub interface: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HddPerformance {
    #[serde(default, deserialize_with = "lenient::count")]
    pub rpm: Option<u32>,
}

impl Hdd {
    pub fn capacity_gb(&self) -> Option<f64> {
        self.storage_specs.capacity.as_gb()
    }

    pub fn form_factor(&self) -> Option<&str> {
        self.storage_specs.form_factor.as_deref()
    }

    pub fn interface(&self) -> Option<&str> {
        self.storage_specs.interface.as_deref()
    }

    pub fn rpm(&self) -> Option<u32> {
        self.performance_specs.rpm
    }
}

fn is_empty_measure(measure: &Measure) -> bool {
    measure.value.is_none() && measure.unit.is_none()
}
