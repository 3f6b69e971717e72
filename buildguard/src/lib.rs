//! BuildGuard - PC build compatibility engine
//!
//! Given a catalog of components (CPU, motherboard, RAM, GPU, case, PSU,
//! CPU cooler, SSD, HDD) and a partially assembled build, BuildGuard narrows
//! each category to the parts that still fit and validates the build against
//! socket, memory, form-factor, dimension, connector and power constraints.
//!
//! # Quick Start
//!
//! ```no_run
//! use buildguard::{BuildGuardCore, Build, Category};
//! use std::path::Path;
//!
//! let core = BuildGuardCore::load(Path::new("normalized_data")).unwrap();
//!
//! let mut build = Build::new();
//! if let Some(cpu) = core.catalog().find(Category::Cpu, "Ryzen 5 5600X") {
//!     build.set(cpu);
//! }
//!
//! let report = core.validate_build(&build);
//! for issue in report.errors.iter().chain(&report.warnings) {
//!     println!("{:?}: {}", issue.severity(), issue.message);
//! }
//! ```
//!
//! # Features
//!
//! - **Cascading filters**: CPUs by architecture, boards by socket, RAM by
//!   board memory type, cases by form factor, PSUs by power budget
//! - **Build validation**: pairwise checks plus dimensions, slots, ports and
//!   cooling, collected without short-circuiting
//! - **Power estimation**: TDP with category fallbacks and a fixed floor

pub mod analyzer;
pub mod build;
pub mod catalog;
pub mod compliance;
pub mod core;

// Re-export main types
pub use analyzer::filters::{CascadingFilter, SelectionFilter};
pub use analyzer::index::{CatalogStats, CompatibilityIndex};
pub use build::{Build, Category, Component, StorageDevice};
pub use catalog::CatalogStore;
pub use compliance::{
    BuildValidator, CompatibilityReport, Issue, IssueKind, PhysicalValidator,
    PowerBudgetEstimator, Severity,
};
pub use core::{BuildGuardCore, BuildGuardError, EngineOptions};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Build, BuildGuardCore, BuildGuardError, Category, CompatibilityReport, EngineOptions,
        Issue, IssueKind, Severity,
    };
}
