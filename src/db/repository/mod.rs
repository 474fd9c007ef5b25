//! Repository layer — entity-scoped database operations.
//!
//! Free functions over a borrowed `Connection`, one module per table.
//! All public functions are re-exported here so callers use
//! `db::get_patient(...)` without caring about the split.

mod diagnosis_history;
mod diagnostic_list;
mod lab_results;
mod patient;

// Re-export all public items from sub-modules
pub use diagnosis_history::*;
pub use diagnostic_list::*;
pub use lab_results::*;
pub use patient::*;
