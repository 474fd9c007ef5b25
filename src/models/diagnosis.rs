//! Diagnosis models: the vitals history and the diagnostic list.
//!
//! Stored rows keep the provider's flattened vitals (systolic and
//! diastolic split into value + level columns). The `New*` variants
//! are the insert shapes used by sync; ids are assigned by the store.

use serde::{Deserialize, Serialize};

/// One month of recorded vitals for a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisHistoryEntry {
    pub id: i64,
    pub patient_id: i64,
    /// English month name as received ("January" .. "December").
    /// Unrecognized values are kept and sort last within their year.
    pub month: Option<String>,
    pub year: Option<i64>,
    pub systolic_value: Option<i64>,
    pub systolic_level: Option<String>,
    pub diastolic_value: Option<i64>,
    pub diastolic_level: Option<String>,
    pub heart_rate: Option<i64>,
    pub respiratory_rate: Option<i64>,
    pub temperature: Option<f64>,
}

/// One diagnosed condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticListEntry {
    pub id: i64,
    pub patient_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Insert shape for a vitals entry.
#[derive(Debug, Clone)]
pub struct NewDiagnosisHistoryEntry {
    pub month: Option<String>,
    pub year: Option<i64>,
    pub systolic_value: Option<i64>,
    pub systolic_level: Option<String>,
    pub diastolic_value: Option<i64>,
    pub diastolic_level: Option<String>,
    pub heart_rate: Option<i64>,
    pub respiratory_rate: Option<i64>,
    pub temperature: Option<f64>,
}

/// Insert shape for a diagnostic-list entry.
#[derive(Debug, Clone)]
pub struct NewDiagnosticListEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}
