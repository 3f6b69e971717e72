//! Simple build example: walk the cascading filters, pick the first
//! candidate at each step and validate the result.

use buildguard::analyzer::SelectionFilter;
use buildguard::prelude::*;
use std::path::Path;

fn main() -> Result<(), BuildGuardError> {
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/catalog".to_string());
    let dir = Path::new(&dir);

    if !dir.is_dir() {
        eprintln!("Catalog directory not found: {}", dir.display());
        eprintln!("Usage: cargo run --example simple_build [path/to/normalized_data]");
        std::process::exit(1);
    }

    let core = BuildGuardCore::load(dir)?;
    let filter = core.filter();
    let mut build = Build::new();

    let Some(cpu) = filter.cpus_by_architecture("AMD").into_iter().next() else {
        println!("No AMD CPUs in the catalog.");
        return Ok(());
    };
    build.set(cpu.clone());
    println!("CPU:         {}", cpu.part.name.as_deref().unwrap_or("?"));

    let socket = cpu.socket().unwrap_or_default();
    if let Some(board) = filter.motherboards_by_socket(socket).into_iter().next() {
        build.set(board.clone());
        println!("Motherboard: {}", board.part.name.as_deref().unwrap_or("?"));
    }

    let selection = SelectionFilter {
        socket: Some(socket.to_string()),
        motherboard_form_factor: build
            .motherboard()
            .and_then(|mb| mb.form_factor())
            .map(str::to_string),
        ..Default::default()
    };
    let suggestions = filter.suggestions(&selection);

    if let Some(ram) = suggestions.ram.and_then(|r| r.rams.into_iter().next()) {
        build.set(ram.clone());
        println!("RAM:         {}", ram.part.name.as_deref().unwrap_or("?"));
    }
    if let Some(case) = suggestions.cases.and_then(|c| c.into_iter().next()) {
        build.set(case.clone());
        println!("Case:        {}", case.part.name.as_deref().unwrap_or("?"));
    }
    if let Some(psu) = filter.psus_compatible(build.case(), &build).into_iter().next() {
        build.set(psu.clone());
        println!("PSU:         {}", psu.part.name.as_deref().unwrap_or("?"));
    }

    println!();
    println!("Estimated power: {:.0}W", core.estimated_power_budget(&build));

    let report = core.validate_build(&build);
    for issue in report.errors.iter().chain(&report.warnings) {
        println!("  {:?}: {}", issue.severity(), issue.message);
    }

    if report.compatible {
        println!("\nBuild is compatible.");
    } else {
        println!("\nBuild has {} incompatibilities.", report.errors.len());
        std::process::exit(1);
    }
    Ok(())
}
