//! BuildGuard CLI - PC build compatibility checks from the command line.

use anyhow::{Context, Result};
use buildguard::analyzer::SocketFamily;
use buildguard::build::BuildSelection;
use buildguard::{
    Build, BuildGuardCore, Category, CatalogStore, CompatibilityReport, EngineOptions, Issue,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "buildguard")]
#[command(about = "PC build compatibility checker", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a build against a catalog
    Check {
        /// Directory holding the normalized catalog files
        #[arg(long, value_name = "DIR")]
        catalog: PathBuf,

        /// Build file: JSON object of category to component name
        #[arg(long, value_name = "FILE")]
        build: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Engine thresholds as JSON
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,

        /// Required PSU headroom over the estimated budget (e.g. 1.2)
        #[arg(long)]
        psu_headroom: Option<f64>,

        /// Exit with error code if issues found at this severity or higher
        #[arg(long, value_enum)]
        fail_on: Option<FailOn>,
    },

    /// List candidates in one category, narrowed by what is already chosen
    Filter {
        /// Directory holding the normalized catalog files
        #[arg(long, value_name = "DIR")]
        catalog: PathBuf,

        /// cpu, motherboard, ram, gpu, case, psu, cpu_cooler, ssd or hdd
        #[arg(value_name = "CATEGORY")]
        category: Category,

        /// CPU socket, e.g. AM4
        #[arg(long)]
        socket: Option<String>,

        /// Motherboard form factor, e.g. Micro-ATX
        #[arg(long)]
        form_factor: Option<String>,

        /// CPU producer, e.g. AMD
        #[arg(long)]
        architecture: Option<String>,

        /// Partial build to narrow against
        #[arg(long, value_name = "FILE")]
        build: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Summarize what a catalog offers
    Stats {
        /// Directory holding the normalized catalog files
        #[arg(long, value_name = "DIR")]
        catalog: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
}

#[derive(Clone, ValueEnum)]
enum FailOn {
    /// Fail when the build is incompatible
    Error,
    /// Fail on any finding
    Warning,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            catalog,
            build,
            format,
            options,
            psu_headroom,
            fail_on,
        } => handle_check(
            &catalog,
            &build,
            &format,
            options.as_deref(),
            psu_headroom,
            fail_on,
        ),
        Commands::Filter {
            catalog,
            category,
            socket,
            form_factor,
            architecture,
            build,
            format,
        } => handle_filter(
            &catalog,
            category,
            FilterArgs {
                socket,
                form_factor,
                architecture,
            },
            build.as_deref(),
            &format,
        ),
        Commands::Stats { catalog, format } => handle_stats(&catalog, &format),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    process::exit(exit_code);
}

fn load_options(path: Option<&Path>, psu_headroom: Option<f64>) -> Result<EngineOptions> {
    let mut options = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading options file {}", path.display()))?;
            EngineOptions::from_json(&json)?
        }
        None => EngineOptions::default(),
    };
    if let Some(headroom) = psu_headroom {
        options.psu_headroom = headroom;
    }
    Ok(options)
}

fn load_build(catalog: &CatalogStore, path: &Path) -> Result<Build> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading build file {}", path.display()))?;
    let selection = BuildSelection::from_json(&json)
        .with_context(|| format!("parsing build file {}", path.display()))?;
    Ok(catalog.resolve(&selection)?)
}

fn handle_check(
    catalog: &Path,
    build_path: &Path,
    format: &OutputFormat,
    options: Option<&Path>,
    psu_headroom: Option<f64>,
    fail_on: Option<FailOn>,
) -> Result<i32> {
    let options = load_options(options, psu_headroom)?;
    let store = CatalogStore::load_from_directory(catalog)
        .with_context(|| format!("loading catalog from {}", catalog.display()))?;
    let core = BuildGuardCore::with_options(store, options);
    let build = load_build(core.catalog(), build_path)?;

    let report = core.validate_build(&build);
    let power = core.power().breakdown(&build);

    match format {
        OutputFormat::Human => output_report_human(build_path, &report, power.total_w),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "build": build_path.display().to_string(),
                "compatible": report.compatible,
                "estimated_power_w": power.total_w,
                "power": power,
                "errors": report.errors,
                "warnings": report.warnings,
                "summary": {
                    "errors": report.errors.len(),
                    "warnings": report.warnings.len(),
                }
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    let failed = match fail_on {
        Some(FailOn::Error) => !report.compatible,
        Some(FailOn::Warning) => report.total_issues() > 0,
        None => false,
    };
    Ok(if failed { 1 } else { 0 })
}

fn output_report_human(build_path: &Path, report: &CompatibilityReport, power_w: f64) {
    println!("\nBuild: {}", build_path.display());
    println!("{}", "─".repeat(60));
    println!("  Estimated power: {:.0}W", power_w);

    let print_section = |title: &str, issues: &[Issue]| {
        if issues.is_empty() {
            return;
        }
        println!("\n  {}:", title);
        for issue in issues {
            println!("    - {}", issue);
        }
    };
    print_section("ERRORS", &report.errors[..]);
    print_section("WARNINGS", &report.warnings[..]);

    if report.total_issues() == 0 {
        println!("\n  No issues found");
    }

    println!("\n  Summary:");
    println!("    Errors:   {}", report.errors.len());
    println!("    Warnings: {}", report.warnings.len());
    println!(
        "    Result:   {}",
        if report.compatible {
            "compatible"
        } else {
            "incompatible"
        }
    );
}

struct FilterArgs {
    socket: Option<String>,
    form_factor: Option<String>,
    architecture: Option<String>,
}

fn handle_filter(
    catalog: &Path,
    category: Category,
    mut args: FilterArgs,
    build_path: Option<&Path>,
    format: &OutputFormat,
) -> Result<i32> {
    let core = BuildGuardCore::load(catalog)
        .with_context(|| format!("loading catalog from {}", catalog.display()))?;
    let build = match build_path {
        Some(path) => load_build(core.catalog(), path)?,
        None => Build::new(),
    };

    // Explicit flags win; otherwise take what the build already pins down.
    if args.socket.is_none() {
        args.socket = build
            .cpu()
            .and_then(|c| c.socket())
            .or_else(|| build.motherboard().and_then(|m| m.socket()))
            .map(str::to_string);
    }
    if args.form_factor.is_none() {
        args.form_factor = build
            .motherboard()
            .and_then(|m| m.form_factor())
            .map(str::to_string);
    }
    if args.architecture.is_none() {
        args.architecture = build
            .cpu()
            .and_then(|c| c.part.producer.as_deref())
            .map(str::to_string);
    }

    let (names, generations) = candidate_names(&core, category, &args, &build);
    tracing::info!("{} {} candidates", names.len(), category);

    match format {
        OutputFormat::Human => {
            if let Some(generations) = &generations {
                println!("Supported memory: {}", generations.join(", "));
            }
            for name in &names {
                println!("{}", name);
            }
        }
        OutputFormat::Json => {
            let mut output = serde_json::json!({
                "category": category,
                "count": names.len(),
                "candidates": names,
            });
            if let Some(generations) = generations {
                output["supported_generations"] = serde_json::json!(generations);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(0)
}

fn display_name(name: Option<&str>) -> String {
    name.unwrap_or("(unnamed)").to_string()
}

fn candidate_names(
    core: &BuildGuardCore,
    category: Category,
    args: &FilterArgs,
    build: &Build,
) -> (Vec<String>, Option<Vec<String>>) {
    let filter = core.filter();
    let catalog = core.catalog();
    let socket = args.socket.as_deref();
    let form_factor = args.form_factor.as_deref();

    let names = match category {
        Category::Cpu => {
            let cpus = match args.architecture.as_deref() {
                Some(arch) => filter.cpus_by_architecture(arch),
                None => catalog.cpus().iter().collect(),
            };
            cpus.into_iter()
                .filter(|c| socket.map_or(true, |s| c.socket() == Some(s)))
                .map(|c| display_name(c.part.name.as_deref()))
                .collect()
        }
        Category::Motherboard => core
            .index()
            .matching_motherboards(socket, form_factor)
            .map(|m| display_name(m.part.name.as_deref()))
            .collect(),
        Category::Ram => {
            let candidates = filter.ram_compatible_with_motherboard(socket, form_factor);
            let names = candidates
                .rams
                .iter()
                .map(|r| display_name(r.part.name.as_deref()))
                .collect();
            return (names, Some(candidates.supported_generations));
        }
        Category::Case => match form_factor {
            Some(ff) => filter
                .cases_compatible_with_form_factor(ff)
                .into_iter()
                .map(|c| display_name(c.part.name.as_deref()))
                .collect(),
            None => names_of(catalog.cases().iter().map(|c| c.part.name.as_deref())),
        },
        Category::Psu => filter
            .psus_compatible(build.case(), build)
            .into_iter()
            .map(|p| display_name(p.part.name.as_deref()))
            .collect(),
        Category::CpuCooler => {
            let family = args
                .architecture
                .as_deref()
                .and_then(SocketFamily::from_producer);
            let coolers = match (socket, family) {
                (Some(s), _) => filter.coolers_for_socket(s),
                (None, Some(family)) => filter.coolers_for_family(family),
                (None, None) => catalog.coolers().iter().collect(),
            };
            coolers
                .into_iter()
                .map(|c| display_name(c.part.name.as_deref()))
                .collect()
        }
        Category::Gpu => names_of(catalog.gpus().iter().map(|g| g.part.name.as_deref())),
        Category::Ssd => names_of(catalog.ssds().iter().map(|s| s.part.name.as_deref())),
        Category::Hdd => names_of(catalog.hdds().iter().map(|h| h.part.name.as_deref())),
    };
    (names, None)
}

fn names_of<'a>(names: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    names.map(display_name).collect()
}

fn handle_stats(catalog: &Path, format: &OutputFormat) -> Result<i32> {
    let core = BuildGuardCore::load(catalog)
        .with_context(|| format!("loading catalog from {}", catalog.display()))?;
    let stats = core.index().stats();

    match format {
        OutputFormat::Human => {
            println!("\nCatalog: {}", catalog.display());
            println!("{}", "─".repeat(60));
            for (category, count) in &stats.counts {
                println!("  {:<12} {}", category.label(), count);
            }
            println!();
            for (arch, sockets) in &stats.sockets_by_architecture {
                println!("  {} sockets: {}", arch, sockets.join(", "));
            }
            println!(
                "  Motherboard form factors: {}",
                stats.motherboard_form_factors.join(", ")
            );
            println!("  RAM generations: {}", stats.ram_generations.join(", "));
            println!("  PSU form factors: {}", stats.psu_form_factors.join(", "));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(0)
}
