//! Cascading Filter
//!
//! Narrows each category's candidate list to what is compatible with the
//! components already chosen. The caller picks one category at a time and
//! re-queries the dependent categories after each pick:
//!
//! ```text
//! architecture ──▶ CPUs
//!      │
//!      ▼
//!   socket ──▶ motherboards ──▶ form factor ──▶ cases ──▶ PSUs
//!      │                             │                     ▲
//!      └────────────┬────────────────┘                     │
//!                   ▼                                 power budget
//!                  RAM
//! ```
//!
//! Every query is a linear scan and keeps catalog order.

use serde::{Deserialize, Serialize};

use crate::analyzer::form_factor::is_form_factor_compatible;
use crate::analyzer::index::CompatibilityIndex;
use crate::analyzer::sockets::{SocketFamilies, SocketFamily};
use crate::build::Build;
use crate::catalog::{CatalogStore, Case, Cpu, CpuCooler, Motherboard, Psu, Ram};
use crate::compliance::power::PowerBudgetEstimator;
use crate::core::EngineOptions;

pub struct CascadingFilter<'a> {
    catalog: &'a CatalogStore,
    power: PowerBudgetEstimator,
    psu_headroom: f64,
}

/// RAM candidates together with the generations that admitted them.
#[derive(Debug, Clone, PartialEq)]
pub struct RamCandidates<'a> {
    pub rams: Vec<&'a Ram>,
    pub supported_generations: Vec<String>,
}

/// What the user has pinned down so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionFilter {
    /// CPU producer, e.g. `AMD`.
    pub architecture: Option<String>,
    pub socket: Option<String>,
    pub motherboard_form_factor: Option<String>,
}

/// Candidate lists for every category the selection can narrow. A `None`
/// list means the selection says nothing about that category yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions<'a> {
    pub cpus: Option<Vec<&'a Cpu>>,
    pub motherboards: Option<Vec<&'a Motherboard>>,
    pub ram: Option<RamCandidates<'a>>,
    pub cases: Option<Vec<&'a Case>>,
}

impl<'a> CascadingFilter<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self::with_options(catalog, &EngineOptions::default())
    }

    pub fn with_options(catalog: &'a CatalogStore, options: &EngineOptions) -> Self {
        Self {
            catalog,
            power: PowerBudgetEstimator::with_options(options),
            psu_headroom: options.psu_headroom,
        }
    }

    /// CPUs whose producer matches exactly.
    pub fn cpus_by_architecture(&self, producer: &str) -> Vec<&'a Cpu> {
        self.catalog
            .cpus()
            .iter()
            .filter(|cpu| cpu.part.producer.as_deref() == Some(producer))
            .collect()
    }

    /// Motherboards whose socket matches exactly (case-sensitive).
    pub fn motherboards_by_socket(&self, socket: &str) -> Vec<&'a Motherboard> {
        let boards: Vec<_> = self
            .catalog
            .motherboards()
            .iter()
            .filter(|mb| mb.socket() == Some(socket))
            .collect();
        tracing::debug!("{} motherboards for socket {}", boards.len(), socket);
        boards
    }

    /// RAM whose generation is supported by at least one motherboard
    /// matching `socket` and `form_factor` (either may be omitted).
    pub fn ram_compatible_with_motherboard(
        &self,
        socket: Option<&str>,
        form_factor: Option<&str>,
    ) -> RamCandidates<'a> {
        self.narrow_ram(self.catalog.rams(), socket, form_factor)
    }

    /// Same as [`ram_compatible_with_motherboard`](Self::ram_compatible_with_motherboard)
    /// over an arbitrary RAM list, e.g. one that was already narrowed.
    pub fn narrow_ram<'r>(
        &self,
        rams: impl IntoIterator<Item = &'r Ram>,
        socket: Option<&str>,
        form_factor: Option<&str>,
    ) -> RamCandidates<'r> {
        let supported =
            CompatibilityIndex::new(self.catalog).supported_ram_generations(socket, form_factor);
        let rams: Vec<&'r Ram> = rams
            .into_iter()
            .filter(|ram| ram.generation().map_or(false, |g| supported.contains(g)))
            .collect();
        tracing::debug!(
            "{} RAM kits across generations {:?}",
            rams.len(),
            supported
        );
        RamCandidates {
            rams,
            supported_generations: supported.into_iter().collect(),
        }
    }

    /// Cases whose declared motherboard support fits a board of
    /// `board_form_factor`.
    pub fn cases_compatible_with_form_factor(&self, board_form_factor: &str) -> Vec<&'a Case> {
        self.catalog
            .cases()
            .iter()
            .filter(|case| {
                case.motherboard_support()
                    .map_or(false, |support| is_form_factor_compatible(support, board_form_factor))
            })
            .collect()
    }

    /// PSUs that fit `case` (when given) and cover the build's estimated
    /// budget with headroom.
    ///
    /// A PSU without a usable wattage cannot be shown to cover anything and
    /// is left out. The form factor is only checked when both the case and
    /// the PSU declare one.
    pub fn psus_compatible(&self, case: Option<&Case>, build: &Build) -> Vec<&'a Psu> {
        let required = self.power.estimated_power_budget(build) * self.psu_headroom;
        let case_support = case.and_then(Case::power_supply_support);

        self.catalog
            .psus()
            .iter()
            .filter(|psu| match (case_support, psu.form_factor()) {
                (Some(support), Some(psu_ff)) => is_form_factor_compatible(support, psu_ff),
                _ => true,
            })
            .filter(|psu| psu.wattage_w().map_or(false, |w| w >= required))
            .collect()
    }

    /// Coolers that list `socket` exactly.
    pub fn coolers_for_socket(&self, socket: &str) -> Vec<&'a CpuCooler> {
        self.catalog
            .coolers()
            .iter()
            .filter(|cooler| cooler.supports_socket(socket))
            .collect()
    }

    /// Coolers with at least one socket in `family`.
    pub fn coolers_for_family(&self, family: SocketFamily) -> Vec<&'a CpuCooler> {
        self.catalog
            .coolers()
            .iter()
            .filter(|cooler| SocketFamilies::partition(cooler.supported_sockets()).supports(family))
            .collect()
    }

    /// Every candidate list the selection can narrow.
    pub fn suggestions(&self, selection: &SelectionFilter) -> Suggestions<'a> {
        let socket = selection.socket.as_deref();
        let form_factor = selection.motherboard_form_factor.as_deref();

        Suggestions {
            cpus: selection
                .architecture
                .as_deref()
                .map(|arch| self.cpus_by_architecture(arch)),
            motherboards: socket.map(|s| self.motherboards_by_socket(s)),
            ram: if socket.is_some() || form_factor.is_some() {
                Some(self.ram_compatible_with_motherboard(socket, form_factor))
            } else {
                None
            },
            cases: form_factor.map(|ff| self.cases_compatible_with_form_factor(ff)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Gpu, Measure};

    fn board(socket: &str, form_factor: &str, memory: &str) -> Motherboard {
        let mut mb = Motherboard::default();
        mb.platform.socket = Some(socket.to_string());
        mb.form_factor = Some(form_factor.to_string());
        mb.memory.memory_type = Some(memory.to_string());
        mb
    }

    fn ram(name: &str, generation: Option<&str>) -> Ram {
        let mut ram = Ram::default();
        ram.part.name = Some(name.to_string());
        ram.memory_specs.ram_type.generation = generation.map(str::to_string);
        ram
    }

    fn case(name: &str, board_support: &str, psu_support: &str) -> Case {
        let mut case = Case::default();
        case.part.name = Some(name.to_string());
        case.compatibility.motherboard = Some(board_support.to_string());
        case.compatibility.power_supply = Some(psu_support.to_string());
        case
    }

    fn psu(name: &str, watts: f64, form_factor: &str) -> Psu {
        let mut psu = Psu::default();
        psu.part.name = Some(name.to_string());
        psu.power.wattage = Measure::new(watts, "W");
        psu.form_factor = Some(form_factor.to_string());
        psu
    }

    fn names<'n, T: 'n>(items: &[&'n T], part: impl Fn(&T) -> Option<&str>) -> Vec<String> {
        items.iter().filter_map(|i| part(*i)).map(str::to_string).collect()
    }

    #[test]
    fn test_motherboards_by_socket_is_exact() {
        let catalog = CatalogStore::new()
            .with(board("AM4", "ATX", "DDR4"))
            .with(board("am4", "ATX", "DDR4"))
            .with(board("AM5", "ATX", "DDR5"));
        let filter = CascadingFilter::new(&catalog);

        let boards = filter.motherboards_by_socket("AM4");
        assert_eq!(boards.len(), 1);
        assert!(boards.iter().all(|mb| mb.socket() == Some("AM4")));
    }

    #[test]
    fn test_ram_follows_board_generations() {
        let catalog = CatalogStore::new()
            .with(board("AM4", "ATX", "DDR4"))
            .with(board("AM5", "ATX", "DDR5"))
            .with(ram("kit-ddr4", Some("DDR4")))
            .with(ram("kit-ddr5", Some("DDR5")))
            .with(ram("kit-unknown", None));
        let filter = CascadingFilter::new(&catalog);

        let result = filter.ram_compatible_with_motherboard(Some("AM4"), None);
        assert_eq!(result.supported_generations, vec!["DDR4"]);
        assert_eq!(names(&result.rams, |r| r.part.name.as_deref()), vec!["kit-ddr4"]);

        let unfiltered = filter.ram_compatible_with_motherboard(None, None);
        assert_eq!(unfiltered.rams.len(), 2);
    }

    #[test]
    fn test_cases_follow_form_factor_hierarchy() {
        let catalog = CatalogStore::new()
            .with(case("big", "ATX", "ATX"))
            .with(case("small", "Mini-ITX", "SFX"))
            .with(case("mid", "mATX", "ATX"));
        let filter = CascadingFilter::new(&catalog);

        let fits = filter.cases_compatible_with_form_factor("Micro-ATX");
        assert_eq!(names(&fits, |c| c.part.name.as_deref()), vec!["big", "mid"]);
    }

    #[test]
    fn test_psus_need_headroom_and_form_factor() {
        let catalog = CatalogStore::new()
            .with(psu("atx-350", 350.0, "ATX"))
            .with(psu("atx-360", 360.0, "ATX"))
            .with(psu("sfx-600", 600.0, "SFX"))
            .with(psu("atx-750", 750.0, "ATX"))
            .with(Psu::default());
        let filter = CascadingFilter::new(&catalog);

        // Empty build: 300W floor * 1.2 = 360W.
        let any = filter.psus_compatible(None, &Build::new());
        assert_eq!(
            names(&any, |p| p.part.name.as_deref()),
            vec!["atx-360", "sfx-600", "atx-750"]
        );

        let tower = case("tower", "ATX", "ATX");
        let fits = filter.psus_compatible(Some(&tower), &Build::new());
        assert_eq!(names(&fits, |p| p.part.name.as_deref()), vec!["atx-360", "atx-750"]);
    }

    #[test]
    fn test_psus_track_build_power() {
        let catalog = CatalogStore::new()
            .with(psu("atx-500", 500.0, "ATX"))
            .with(psu("atx-650", 650.0, "ATX"));
        let filter = CascadingFilter::new(&catalog);

        let mut gpu = Gpu::default();
        gpu.performance.tdp = Measure::new(320.0, "W");
        let mut cpu = Cpu::default();
        cpu.architecture.tdp = Measure::new(125.0, "W");
        // 125 + 320 + 80 = 525W; * 1.2 = 630W
        let build = Build::new().with(cpu).with(gpu);

        let fits = filter.psus_compatible(None, &build);
        assert_eq!(names(&fits, |p| p.part.name.as_deref()), vec!["atx-650"]);
    }

    #[test]
    fn test_coolers_by_socket_and_family() {
        let mut universal = CpuCooler::default();
        universal.part.name = Some("universal".into());
        universal.specifications.supported_sockets.sockets = vec!["AM4".into(), "1700".into()];
        let mut intel = CpuCooler::default();
        intel.part.name = Some("intel".into());
        intel.specifications.supported_sockets.sockets = vec!["LGA1700".into()];
        let catalog = CatalogStore::new().with(universal).with(intel);
        let filter = CascadingFilter::new(&catalog);

        assert_eq!(filter.coolers_for_socket("AM4").len(), 1);
        assert_eq!(filter.coolers_for_family(SocketFamily::Intel).len(), 2);
        assert_eq!(filter.coolers_for_family(SocketFamily::Amd).len(), 1);
    }

    #[test]
    fn test_suggestions_only_fill_what_selection_covers() {
        let catalog = CatalogStore::new()
            .with(board("AM4", "ATX", "DDR4"))
            .with(ram("kit", Some("DDR4")))
            .with(case("big", "ATX", "ATX"));
        let filter = CascadingFilter::new(&catalog);

        let empty = filter.suggestions(&SelectionFilter::default());
        assert_eq!(empty, Suggestions::default());

        let selection = SelectionFilter {
            socket: Some("AM4".into()),
            ..Default::default()
        };
        let s = filter.suggestions(&selection);
        assert!(s.cpus.is_none());
        assert_eq!(s.motherboards.map(|m| m.len()), Some(1));
        assert_eq!(s.ram.map(|r| r.rams.len()), Some(1));
        assert!(s.cases.is_none());
    }
}
