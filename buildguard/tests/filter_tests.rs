//! Cascading filter behavior over the fixture catalog

use buildguard::analyzer::refine::{cpus_by_performance, ram_by_specs, CpuCriteria, RamCriteria};
use buildguard::analyzer::{SelectionFilter, SocketFamily};
use buildguard::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_core() -> BuildGuardCore {
    BuildGuardCore::load(&fixture_path("catalog")).unwrap()
}

fn names<T>(items: &[&T], name: impl Fn(&T) -> Option<&str>) -> Vec<String> {
    items.iter().filter_map(|i| name(*i)).map(str::to_string).collect()
}

#[test]
fn test_cpus_by_architecture() {
    let core = load_core();
    let cpus = core.filter().cpus_by_architecture("AMD");
    assert_eq!(
        names(&cpus, |c| c.part.name.as_deref()),
        vec!["Ryzen 5 5600X", "Ryzen 9 7950X", "Engineering Sample"]
    );
    assert!(core.filter().cpus_by_architecture("amd").is_empty());
}

#[test]
fn test_socket_match_is_exact() {
    let core = load_core();
    let boards = core.filter().motherboards_by_socket("AM4");
    assert_eq!(
        names(&boards, |m| m.part.name.as_deref()),
        vec!["B550 Tomahawk", "B550I Aorus Pro AX"]
    );
    assert!(core.filter().motherboards_by_socket("am4").is_empty());
}

#[test]
fn test_ram_follows_socket_and_form_factor() {
    let core = load_core();
    let filter = core.filter();

    let intel = filter.ram_compatible_with_motherboard(Some("1700"), None);
    assert_eq!(intel.supported_generations, vec!["DDR4", "DDR5"]);
    assert_eq!(
        names(&intel.rams, |r| r.part.name.as_deref()),
        vec!["Vengeance LPX 16GB", "Trident Z5 32GB", "Fury Beast 64GB"]
    );

    let itx = filter.ram_compatible_with_motherboard(Some("AM4"), Some("Mini-ITX"));
    assert_eq!(itx.supported_generations, vec!["DDR4"]);
    assert_eq!(
        names(&itx.rams, |r| r.part.name.as_deref()),
        vec!["Vengeance LPX 16GB", "Fury Beast 64GB"]
    );
}

#[test]
fn test_ram_narrowing_is_idempotent() {
    let core = load_core();
    let filter = core.filter();

    let once = filter.ram_compatible_with_motherboard(Some("AM5"), Some("ATX"));
    let twice = filter.narrow_ram(once.rams.iter().copied(), Some("AM5"), Some("ATX"));
    assert_eq!(once, twice);
}

#[test]
fn test_cases_by_form_factor_hierarchy() {
    let core = load_core();
    let filter = core.filter();

    let matx = filter.cases_compatible_with_form_factor("Micro-ATX");
    assert_eq!(
        names(&matx, |c| c.part.name.as_deref()),
        vec!["H510", "Define 7 Compact", "Q300L"]
    );

    let atx = filter.cases_compatible_with_form_factor("ATX");
    assert_eq!(names(&atx, |c| c.part.name.as_deref()), vec!["H510", "Define 7 Compact"]);

    // Unknown standards only match by exact name.
    let thin = filter.cases_compatible_with_form_factor("thin_itx");
    assert_eq!(names(&thin, |c| c.part.name.as_deref()), vec!["Slim HTPC"]);
}

#[test]
fn test_psus_follow_case_and_budget() {
    let core = load_core();
    let filter = core.filter();
    let catalog = core.catalog();

    // Empty build: 300W floor, 360W with headroom. Unknown wattage is dropped.
    let any = filter.psus_compatible(None, &Build::new());
    assert_eq!(
        names(&any, |p| p.part.name.as_deref()),
        vec!["CX450", "RM650x", "SF750", "RM1000x"]
    );

    let build = Build::new()
        .with(catalog.cpus()[3].clone())
        .with(catalog.gpus()[0].clone());
    // 125 + 450 + 80 = 655W, 786W with headroom.
    let tower = &catalog.cases()[0];
    let fits = filter.psus_compatible(Some(tower), &build);
    assert_eq!(names(&fits, |p| p.part.name.as_deref()), vec!["RM1000x"]);

    let sff = &catalog.cases()[1];
    assert!(filter.psus_compatible(Some(sff), &build).is_empty());
}

#[test]
fn test_coolers_by_socket_and_family() {
    let core = load_core();
    let filter = core.filter();

    let am4 = filter.coolers_for_socket("AM4");
    assert_eq!(
        names(&am4, |c| c.part.name.as_deref()),
        vec!["Hyper 212", "Wraith Stealth", "NH-D15"]
    );

    let intel = filter.coolers_for_family(SocketFamily::Intel);
    assert_eq!(
        names(&intel, |c| c.part.name.as_deref()),
        vec!["Hyper 212", "NH-L9i", "NH-D15"]
    );
}

#[test]
fn test_suggestions_from_selection() {
    let core = load_core();
    let selection = SelectionFilter {
        architecture: Some("Intel".into()),
        socket: Some("1700".into()),
        motherboard_form_factor: Some("Micro-ATX".into()),
    };

    let suggestions = core.filter().suggestions(&selection);
    assert_eq!(suggestions.cpus.map(|c| c.len()), Some(2));
    assert_eq!(suggestions.motherboards.map(|m| m.len()), Some(2));
    let ram = suggestions.ram.unwrap();
    assert_eq!(ram.supported_generations, vec!["DDR4"]);
    assert_eq!(suggestions.cases.map(|c| c.len()), Some(3));
}

#[test]
fn test_refinement_after_cascade() {
    let core = load_core();
    let intel = core.filter().cpus_by_architecture("Intel");

    let criteria = CpuCriteria {
        min_cores: Some(8),
        max_tdp_w: Some(150.0),
        ..Default::default()
    };
    let picked = cpus_by_performance(intel, &criteria);
    assert_eq!(names(&picked, |c| c.part.name.as_deref()), vec!["Core i9-13900K"]);

    let criteria = RamCriteria {
        min_capacity_gb: Some(8.0),
        min_frequency_mhz: Some(1600.0),
        ..Default::default()
    };
    // Legacy 8GB is listed in MB.
    assert_eq!(ram_by_specs(core.catalog().rams(), &criteria).len(), 4);
}

#[test]
fn test_index_stats() {
    let core = load_core();
    let stats = core.index().stats();

    assert_eq!(stats.architectures, vec!["AMD", "Intel"]);
    assert_eq!(stats.sockets_by_architecture["AMD"], vec!["AM4", "AM5"]);
    assert_eq!(stats.motherboard_form_factors, vec!["ATX", "Micro-ATX", "Mini-ITX"]);
    assert_eq!(stats.ram_generations, vec!["DDR3", "DDR4", "DDR5"]);
    assert_eq!(stats.psu_form_factors, vec!["ATX", "SFX"]);
    assert_eq!(stats.counts[&Category::Case], 5);
}

#[test]
fn test_filters_are_deterministic() {
    let core = load_core();
    let filter = core.filter();
    let first = filter.ram_compatible_with_motherboard(Some("AM4"), None);
    for _ in 0..3 {
        assert_eq!(filter.ram_compatible_with_motherboard(Some("AM4"), None), first);
    }
}
