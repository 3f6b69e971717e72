//! Build Compliance Module
//!
//! Power budget estimation, physical fit checks and the build validator
//! that merges them into one report.

pub mod physical;
pub mod power;
pub mod report;
pub mod validator;

pub use physical::PhysicalValidator;
pub use power::{PowerBreakdown, PowerBudgetEstimator, PowerSource};
pub use report::{CompatibilityReport, Issue, IssueKind, Severity};
pub use validator::BuildValidator;
