//! Physical fit checks
//!
//! Dimension checks compare part sizes against case limits, connectivity
//! checks count what has to be plugged into the motherboard, and the cooling
//! check compares CPU TDP against the cooler's rating. Each check runs only
//! when both sides carry a usable number; otherwise it is skipped quietly.

use crate::build::{Build, Category};
use crate::compliance::report::{CompatibilityReport, Issue, IssueKind};
use crate::core::EngineOptions;

#[derive(Debug, Clone)]
pub struct PhysicalValidator {
    gpu_clearance_ratio: f64,
    cooler_tdp_margin: f64,
}

impl Default for PhysicalValidator {
    fn default() -> Self {
        Self::with_options(&EngineOptions::default())
    }
}

impl PhysicalValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &EngineOptions) -> Self {
        Self {
            gpu_clearance_ratio: options.gpu_clearance_ratio,
            cooler_tdp_margin: options.cooler_tdp_margin,
        }
    }

    /// GPU length and cooler height against the case limits.
    ///
    /// The GPU check has a soft tier: a card that fits but uses more than
    /// the clearance ratio of the available length draws a warning. The
    /// cooler check has no such tier.
    pub fn validate_dimensions(&self, build: &Build) -> CompatibilityReport {
        let mut report = CompatibilityReport::new();
        let Some(case) = build.case() else {
            return report;
        };

        if let Some(gpu) = build.gpu() {
            if let (Some(length), Some(max)) = (gpu.length_mm(), case.max_gpu_length_mm()) {
                if length > max {
                    report.push(Issue::new(
                        "gpu_length",
                        IssueKind::Incompatibility,
                        format!("GPU too long: {:.0}mm exceeds the case limit of {:.0}mm", length, max),
                        &[Category::Gpu, Category::Case],
                    ));
                } else if length > max * self.gpu_clearance_ratio {
                    report.push(Issue::new(
                        "gpu_length",
                        IssueKind::TightMargin,
                        format!("GPU fits with little clearance: {:.0}mm of {:.0}mm", length, max),
                        &[Category::Gpu, Category::Case],
                    ));
                }
            }
        }

        if let Some(cooler) = build.cpu_cooler() {
            if let (Some(height), Some(max)) = (cooler.height_mm(), case.max_cooler_height_mm()) {
                if height > max {
                    report.push(Issue::new(
                        "cooler_height",
                        IssueKind::Incompatibility,
                        format!(
                            "CPU cooler too tall: {:.0}mm exceeds the case limit of {:.0}mm",
                            height, max
                        ),
                        &[Category::CpuCooler, Category::Case],
                    ));
                }
            }
        }

        report
    }

    /// RAM sticks against motherboard slots and SATA devices against SATA
    /// ports.
    pub fn validate_connectivity(&self, build: &Build) -> CompatibilityReport {
        let mut report = CompatibilityReport::new();
        let Some(board) = build.motherboard() else {
            return report;
        };

        let ram = build.installed_ram();
        if let Some(slots) = board.ram_slots().filter(|_| !ram.is_empty()) {
            let needed: u32 = ram.iter().map(|r| r.stick_count().unwrap_or(1)).sum();
            if needed > slots {
                report.push(Issue::new(
                    "ram_slots",
                    IssueKind::Incompatibility,
                    format!("Not enough RAM slots: {} needed, {} available", needed, slots),
                    &[Category::Ram, Category::Motherboard],
                ));
            }
        }

        let storage = build.installed_storage();
        if let Some(ports) = board.sata_ports().filter(|_| !storage.is_empty()) {
            let needed = storage.iter().filter(|d| d.is_sata()).count();
            if needed > ports as usize {
                report.push(Issue::new(
                    "sata_ports",
                    IssueKind::Incompatibility,
                    format!("Not enough SATA ports: {} needed, {} available", needed, ports),
                    &[Category::Motherboard, Category::Ssd, Category::Hdd],
                ));
            }
        }

        report
    }

    /// CPU TDP against the cooler's rated TDP. Only ever warns.
    pub fn verify_cooling(&self, build: &Build) -> CompatibilityReport {
        let mut report = CompatibilityReport::new();
        let (Some(cpu), Some(cooler)) = (build.cpu(), build.cpu_cooler()) else {
            return report;
        };
        let (Some(tdp), Some(rating)) = (cpu.tdp_w(), cooler.tdp_rating_w()) else {
            return report;
        };

        let message = if tdp > rating {
            format!("Cooler undersized: CPU {:.0}W vs cooler rating {:.0}W", tdp, rating)
        } else if tdp > rating * self.cooler_tdp_margin {
            format!("Cooler near its limit: CPU {:.0}W vs cooler rating {:.0}W", tdp, rating)
        } else {
            return report;
        };
        report.push(Issue::new(
            "cooler_tdp",
            IssueKind::TightMargin,
            message,
            &[Category::Cpu, Category::CpuCooler],
        ));
        report
    }
}
