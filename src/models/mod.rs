//! Data models shared across the store, sync, and API layers.

mod diagnosis;
mod patient;

pub use diagnosis::*;
pub use patient::*;
