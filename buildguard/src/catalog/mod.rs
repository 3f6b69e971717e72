//! Component catalog
//!
//! Typed, read-only records for every category, decoded from the normalized
//! JSON dataset. The decoding boundary is the only place where missing or
//! malformed fields are dealt with: past this point every attribute is an
//! `Option`.
//!
//! ```text
//! normalized_data/
//! ├── CPUData_normalized.json
//! ├── MotherboardData_normalized.json
//! ├── RAMData_normalized.json
//! ├── GPUData_normalized.json
//! ├── CaseData_normalized.json
//! ├── PSUData_normalized.json
//! ├── CPUCoolerData_normalized.json
//! ├── SSDData_normalized.json
//! └── HDDData_normalized.json
//! ```

pub mod lenient;
pub mod schema;
pub mod store;

pub use schema::*;
pub use store::CatalogStore;
