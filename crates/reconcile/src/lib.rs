//! `parkval-reconcile` — form-field reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded field mappings, returns merge
//! decisions. No CLI, network, or storage dependencies.
//!
//! The engine answers one question per field: may the value freshly
//! fetched from an external data provider replace the value the form
//! currently holds? Blanks are filled, untouched defaults and earlier
//! auto-fills are refreshed, user edits stick.

pub mod config;
pub mod discrepancy;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod snapshot;
pub mod value;

pub use config::DefaultsConfig;
pub use engine::run_cycle;
pub use error::ReconcileError;
pub use model::{CycleResult, FieldAction, FieldDecision, FieldState};
pub use snapshot::ProviderSnapshot;
pub use value::FieldValue;
