//! Patient models.
//!
//! `Patient` mirrors the stored profile row. `PatientSummary` is the
//! trimmed shape the list endpoint returns, and `PatientDetail` is the
//! full dashboard payload with all three child collections attached.

use serde::{Deserialize, Serialize};

use super::{DiagnosisHistoryEntry, DiagnosticListEntry};

/// Stored patient profile.
///
/// Everything except `name` is optional: the provider feed omits
/// fields freely and absent values are stored as NULL, not defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub profile_picture: Option<String>,
    /// ISO `YYYY-MM-DD` when the provider value was well-formed,
    /// otherwise the raw provider string.
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub insurance_type: Option<String>,
}

/// List-endpoint row: enough to render the sidebar, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub date_of_birth: Option<String>,
}

/// Full detail payload for one patient.
#[derive(Debug, Clone, Serialize)]
pub struct PatientDetail {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub profile_picture: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub insurance_type: Option<String>,
    pub diagnosis_history: Vec<DiagnosisHistoryEntry>,
    pub diagnostic_list: Vec<DiagnosticListEntry>,
    /// Lab results are bare names on the wire, not objects.
    pub lab_results: Vec<String>,
}

/// Profile attributes written during sync. The row id is resolved
/// separately (by-name lookup or insert), so it is not carried here.
#[derive(Debug, Clone)]
pub struct PatientRecord {
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub profile_picture: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub insurance_type: Option<String>,
}
