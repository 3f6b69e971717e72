//! Candidate narrowing: derived catalog lookups, the cascading filter and
//! the shared form-factor and socket rules they rely on.

pub mod filters;
pub mod form_factor;
pub mod index;
pub mod refine;
pub mod sockets;

pub use filters::{CascadingFilter, RamCandidates, SelectionFilter, Suggestions};
pub use form_factor::{is_form_factor_compatible, match_form_factor, FormFactorMatch};
pub use index::{CatalogStats, CompatibilityIndex};
pub use refine::{CpuCriteria, GpuCriteria, RamCriteria};
pub use sockets::{classify_socket, SocketClass, SocketFamilies, SocketFamily};
