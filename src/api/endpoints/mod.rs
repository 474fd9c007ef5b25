//! API endpoint handlers.
//!
//! One module per dashboard concern. Handlers stay thin: they resolve
//! a connection, call into the repository or sync layers, and wrap the
//! result in the response envelope.

pub mod health;
pub mod patients;
pub mod sync;
