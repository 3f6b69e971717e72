//! Build Validator
//!
//! Runs every applicable pairwise check over a (possibly partial) build and
//! collects the findings. No check stops another: a build with a socket
//! mismatch still gets its PSU and dimension findings.
//!
//! ## Checks
//!
//! | Rule               | Pair                 | Error when                        |
//! |--------------------|----------------------|-----------------------------------|
//! | `cpu_socket`       | CPU / motherboard    | sockets differ (case-sensitive)   |
//! | `ram_generation`   | RAM / motherboard    | generation != board memory type   |
//! | `case_form_factor` | case / motherboard   | case support smaller than board   |
//! | `psu_wattage`      | PSU / whole build    | wattage below estimated budget    |
//! | `gpu_length`       | GPU / case           | card longer than case limit       |
//! | `cooler_height`    | cooler / case        | cooler taller than case limit     |
//! | `ram_slots`        | RAM / motherboard    | more sticks than slots            |
//! | `sata_ports`       | storage / motherboard| more SATA devices than ports      |
//! | `cooler_tdp`       | CPU / cooler         | never (warnings only)             |
//!
//! A field missing on either side of the first four produces a warning and
//! never an error.

use crate::analyzer::form_factor::{match_form_factor, FormFactorMatch};
use crate::build::{Build, Category};
use crate::compliance::physical::PhysicalValidator;
use crate::compliance::power::PowerBudgetEstimator;
use crate::compliance::report::{CompatibilityReport, Issue, IssueKind};
use crate::core::EngineOptions;

#[derive(Debug, Clone)]
pub struct BuildValidator {
    power: PowerBudgetEstimator,
    physical: PhysicalValidator,
    psu_headroom: f64,
}

impl Default for BuildValidator {
    fn default() -> Self {
        Self::with_options(&EngineOptions::default())
    }
}

impl BuildValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &EngineOptions) -> Self {
        Self {
            power: PowerBudgetEstimator::with_options(options),
            physical: PhysicalValidator::with_options(options),
            psu_headroom: options.psu_headroom,
        }
    }

    /// Socket, memory generation, case form factor and PSU wattage.
    pub fn verify_compatibility_complete(&self, build: &Build) -> CompatibilityReport {
        let mut report = CompatibilityReport::new();
        self.check_socket(build, &mut report);
        self.check_memory_generation(build, &mut report);
        self.check_case_form_factor(build, &mut report);
        self.check_psu(build, &mut report);
        report
    }

    /// Everything: the pairwise checks, then dimensions, connectivity and
    /// cooling, in that order.
    pub fn validate_build(&self, build: &Build) -> CompatibilityReport {
        let mut report = self.verify_compatibility_complete(build);
        report.merge(self.physical.validate_dimensions(build));
        report.merge(self.physical.validate_connectivity(build));
        report.merge(self.physical.verify_cooling(build));

        tracing::debug!(
            "Validated build ({} components): {} errors, {} warnings",
            build.categories().count(),
            report.errors.len(),
            report.warnings.len()
        );
        report
    }

    pub fn power(&self) -> &PowerBudgetEstimator {
        &self.power
    }

    fn check_socket(&self, build: &Build, report: &mut CompatibilityReport) {
        let (Some(cpu), Some(board)) = (build.cpu(), build.motherboard()) else {
            return;
        };
        let pair = [Category::Cpu, Category::Motherboard];
        match (cpu.socket(), board.socket()) {
            (Some(cpu_socket), Some(board_socket)) if cpu_socket != board_socket => {
                report.push(Issue::new(
                    "cpu_socket",
                    IssueKind::Incompatibility,
                    format!(
                        "Socket mismatch: CPU {} vs motherboard {}",
                        cpu_socket, board_socket
                    ),
                    &pair,
                ));
            }
            (Some(_), Some(_)) => {}
            _ => report.push(Issue::new(
                "cpu_socket",
                IssueKind::MissingData,
                "CPU or motherboard socket not specified",
                &pair,
            )),
        }
    }

    fn check_memory_generation(&self, build: &Build, report: &mut CompatibilityReport) {
        let (Some(ram), Some(board)) = (build.ram(), build.motherboard()) else {
            return;
        };
        let pair = [Category::Ram, Category::Motherboard];
        match (ram.generation(), board.memory_type()) {
            (Some(generation), Some(supported)) if generation != supported => {
                report.push(Issue::new(
                    "ram_generation",
                    IssueKind::Incompatibility,
                    format!(
                        "RAM incompatible: {} vs motherboard {}",
                        generation, supported
                    ),
                    &pair,
                ));
            }
            (Some(_), Some(_)) => {}
            _ => report.push(Issue::new(
                "ram_generation",
                IssueKind::MissingData,
                "RAM generation or motherboard memory type not specified",
                &pair,
            )),
        }
    }

    fn check_case_form_factor(&self, build: &Build, report: &mut CompatibilityReport) {
        let (Some(case), Some(board)) = (build.case(), build.motherboard()) else {
            return;
        };
        let pair = [Category::Case, Category::Motherboard];
        let (Some(support), Some(form_factor)) = (case.motherboard_support(), board.form_factor())
        else {
            report.push(Issue::new(
                "case_form_factor",
                IssueKind::MissingData,
                "Case or motherboard form factor not specified",
                &pair,
            ));
            return;
        };

        let result = match_form_factor(support, form_factor);
        if result.is_compatible() {
            return;
        }
        report.push(Issue::new(
            "case_form_factor",
            IssueKind::Incompatibility,
            format!(
                "Case ({}) does not fit a {} motherboard",
                support, form_factor
            ),
            &pair,
        ));
        if result == FormFactorMatch::Unrecognized {
            report.push(Issue::new(
                "case_form_factor",
                IssueKind::AmbiguousFormFactor,
                format!(
                    "Form factor '{}' or '{}' is not a known standard; compared by name only",
                    support, form_factor
                ),
                &pair,
            ));
        }
    }

    fn check_psu(&self, build: &Build, report: &mut CompatibilityReport) {
        let Some(psu) = build.psu() else {
            return;
        };
        let required = self.power.estimated_power_budget(build);
        let recommended = required * self.psu_headroom;

        match psu.wattage_w() {
            None => report.push(Issue::new(
                "psu_wattage",
                IssueKind::MissingData,
                "PSU wattage not specified; power budget not checked",
                &[Category::Psu],
            )),
            Some(watts) if watts < required => report.push(Issue::new(
                "psu_wattage",
                IssueKind::Incompatibility,
                format!(
                    "PSU insufficient: {:.0}W < {:.0}W required",
                    watts, required
                ),
                &[Category::Psu],
            )),
            Some(watts) if watts < recommended => report.push(Issue::new(
                "psu_wattage",
                IssueKind::TightMargin,
                format!(
                    "PSU has little headroom: {:.0}W (recommended: {:.0}W)",
                    watts, recommended
                ),
                &[Category::Psu],
            )),
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Case, Cpu, Gpu, Measure, Motherboard, Psu, Ram};

    fn cpu(socket: &str, tdp: f64) -> Cpu {
        let mut cpu = Cpu::default();
        cpu.architecture.socket = Some(socket.to_string());
        cpu.architecture.tdp = Measure::new(tdp, "W");
        cpu
    }

    fn board(socket: &str, form_factor: &str, memory: &str) -> Motherboard {
        let mut mb = Motherboard::default();
        mb.platform.socket = Some(socket.to_string());
        mb.form_factor = Some(form_factor.to_string());
        mb.memory.memory_type = Some(memory.to_string());
        mb
    }

    fn psu(watts: f64) -> Psu {
        let mut psu = Psu::default();
        psu.power.wattage = Measure::new(watts, "W");
        psu
    }

    fn case(support: &str) -> Case {
        let mut case = Case::default();
        case.compatibility.motherboard = Some(support.to_string());
        case
    }

    fn gpu(tdp: f64) -> Gpu {
        let mut gpu = Gpu::default();
        gpu.performance.tdp = Measure::new(tdp, "W");
        gpu
    }

    #[test]
    fn test_empty_build_is_compatible() {
        let report = BuildValidator::new().verify_compatibility_complete(&Build::new());
        assert!(report.compatible);
        assert_eq!(report.total_issues(), 0);
    }

    #[test]
    fn test_socket_mismatch_is_case_sensitive() {
        let validator = BuildValidator::new();
        let build = Build::new()
            .with(cpu("AM4", 65.0))
            .with(board("am4", "ATX", "DDR4"));
        let report = validator.verify_compatibility_complete(&build);
        assert!(!report.compatible);
        assert_eq!(
            report.error_messages(),
            vec!["Socket mismatch: CPU AM4 vs motherboard am4"]
        );
    }

    #[test]
    fn test_missing_socket_only_warns() {
        let build = Build::new()
            .with(Cpu::default())
            .with(board("AM4", "ATX", "DDR4"));
        let report = BuildValidator::new().verify_compatibility_complete(&build);
        assert!(report.compatible);
        assert_eq!(report.warnings[0].kind, IssueKind::MissingData);
    }

    #[test]
    fn test_ram_generation() {
        let mut ram = Ram::default();
        ram.memory_specs.ram_type.generation = Some("DDR5".into());
        let build = Build::new().with(ram).with(board("AM4", "ATX", "DDR4"));
        let report = BuildValidator::new().verify_compatibility_complete(&build);
        assert_eq!(
            report.error_messages(),
            vec!["RAM incompatible: DDR5 vs motherboard DDR4"]
        );
    }

    #[test]
    fn test_case_form_factor() {
        let validator = BuildValidator::new();

        let fits = Build::new()
            .with(case("ATX"))
            .with(board("AM4", "Micro-ATX", "DDR4"));
        assert!(validator.verify_compatibility_complete(&fits).compatible);

        let too_small = Build::new()
            .with(case("Micro-ATX"))
            .with(board("AM4", "ATX", "DDR4"));
        let report = validator.verify_compatibility_complete(&too_small);
        assert_eq!(report.errors.len(), 1);
        assert!(report.warnings.is_empty());

        let unknown = Build::new()
            .with(case("HTPC"))
            .with(board("AM4", "ATX", "DDR4"));
        let report = validator.verify_compatibility_complete(&unknown);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings[0].kind, IssueKind::AmbiguousFormFactor);

        let unspecified = Build::new()
            .with(Case::default())
            .with(board("AM4", "ATX", "DDR4"));
        let report = validator.verify_compatibility_complete(&unspecified);
        assert!(report.compatible);
        assert_eq!(
            report.warning_messages(),
            vec!["Case or motherboard form factor not specified"]
        );
    }

    #[test]
    fn test_psu_margin_tiers() {
        let validator = BuildValidator::new();
        // 120 + 250 + 80 = 450W required, 540W recommended.
        let build = |watts| Build::new().with(cpu("AM4", 120.0)).with(gpu(250.0)).with(psu(watts));

        let report = validator.verify_compatibility_complete(&build(400.0));
        assert_eq!(report.error_messages(), vec!["PSU insufficient: 400W < 450W required"]);

        let report = validator.verify_compatibility_complete(&build(500.0));
        assert!(report.compatible);
        assert_eq!(
            report.warning_messages(),
            vec!["PSU has little headroom: 500W (recommended: 540W)"]
        );

        assert_eq!(
            validator.verify_compatibility_complete(&build(600.0)).total_issues(),
            0
        );
    }

    #[test]
    fn test_psu_without_wattage_warns() {
        let report = BuildValidator::new().verify_compatibility_complete(&Build::new().with(Psu::default()));
        assert!(report.compatible);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].rule_id, "psu_wattage");
    }

    #[test]
    fn test_checks_do_not_short_circuit() {
        let mut ram = Ram::default();
        ram.memory_specs.ram_type.generation = Some("DDR5".into());
        let build = Build::new()
            .with(cpu("LGA1700", 125.0))
            .with(board("AM4", "ATX", "DDR4"))
            .with(ram)
            .with(psu(250.0));
        let report = BuildValidator::new().validate_build(&build);
        assert!(report.has_rule("cpu_socket"));
        assert!(report.has_rule("ram_generation"));
        assert!(report.has_rule("psu_wattage"));
        assert_eq!(report.errors.len(), 3);
    }
}
