//! Sync engine — one-way pull from the Coalition feed into the store.
//!
//! The provider is the source of truth. A sync resolves the target
//! patient by name, overwrites the profile attributes, and replaces
//! all three child collections with the payload's sets. The whole
//! write runs in one transaction: a failed sync leaves the store
//! exactly as it was.

use rusqlite::Connection;
use thiserror::Error;

use crate::db::{self, Database, DatabaseError};
use crate::models::{
    NewDiagnosisHistoryEntry, NewDiagnosticListEntry, PatientRecord,
};
use crate::provider::{
    normalize_date_of_birth, PatientSource, ProviderError, ProviderPatient,
};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("{name} not found")]
    TargetNotFound { name: String },
}

/// Result of a completed sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub patient_id: i64,
    /// False when an existing row was updated in place.
    pub created: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// Payload mapping
// ═══════════════════════════════════════════════════════════════════════════

fn patient_record(payload: &ProviderPatient) -> PatientRecord {
    PatientRecord {
        name: payload.name.clone(),
        gender: payload.gender.clone(),
        age: payload.age,
        profile_picture: payload.profile_picture.clone(),
        date_of_birth: normalize_date_of_birth(payload.date_of_birth.as_deref()),
        phone_number: payload.phone_number.clone(),
        emergency_contact: payload.emergency_contact.clone(),
        insurance_type: payload.insurance_type.clone(),
    }
}

fn history_entries(payload: &ProviderPatient) -> Vec<NewDiagnosisHistoryEntry> {
    payload
        .diagnosis_history
        .iter()
        .map(|entry| NewDiagnosisHistoryEntry {
            month: entry.month.clone(),
            year: entry.year,
            systolic_value: entry.blood_pressure.systolic.value,
            systolic_level: entry.blood_pressure.systolic.levels.clone(),
            diastolic_value: entry.blood_pressure.diastolic.value,
            diastolic_level: entry.blood_pressure.diastolic.levels.clone(),
            heart_rate: entry.heart_rate.value,
            respiratory_rate: entry.respiratory_rate.value,
            temperature: entry.temperature.value,
        })
        .collect()
}

fn diagnostic_entries(payload: &ProviderPatient) -> Vec<NewDiagnosticListEntry> {
    payload
        .diagnostic_list
        .iter()
        .map(|entry| NewDiagnosticListEntry {
            name: entry.name.clone(),
            description: entry.description.clone(),
            status: entry.status.clone(),
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Sync operations
// ═══════════════════════════════════════════════════════════════════════════

/// Upsert one provider payload entry into the store.
///
/// The patient is matched by exact name; duplicates resolve to the
/// lowest id, so repeated syncs keep converging on the same row. All
/// writes happen inside a single transaction.
pub fn sync_patient(
    conn: &mut Connection,
    payload: &ProviderPatient,
) -> Result<SyncOutcome, SyncError> {
    let record = patient_record(payload);
    let history = history_entries(payload);
    let diagnostics = diagnostic_entries(payload);
    let synced_at = chrono::Utc::now().to_rfc3339();

    let tx = conn.transaction().map_err(DatabaseError::from)?;

    let (patient_id, created) = match db::find_patient_id_by_name(&tx, &record.name)? {
        Some(id) => {
            db::update_patient(&tx, id, &record, &synced_at)?;
            (id, false)
        }
        None => {
            let id = db::insert_patient(&tx, &record, &synced_at)?;
            (id, true)
        }
    };

    db::replace_diagnosis_history(&tx, patient_id, &history)?;
    db::replace_diagnostic_list(&tx, patient_id, &diagnostics)?;
    db::replace_lab_results(&tx, patient_id, &payload.lab_results)?;

    tx.commit().map_err(DatabaseError::from)?;

    tracing::debug!(patient_id, created, "Patient sync committed");

    Ok(SyncOutcome {
        patient_id,
        created,
    })
}

/// Fetch the provider feed and sync the named patient.
///
/// The feed is an array; only the entry whose name matches exactly is
/// consumed. Everything here blocks (HTTP then SQLite), so callers in
/// async context run this via `spawn_blocking`.
pub fn fetch_and_sync(
    source: &dyn PatientSource,
    db: &Database,
    target_name: &str,
) -> Result<SyncOutcome, SyncError> {
    let patients = source.fetch_patients()?;
    tracing::debug!(count = patients.len(), "Provider feed fetched");

    let payload = patients
        .into_iter()
        .find(|p| p.name == target_name)
        .ok_or_else(|| SyncError::TargetNotFound {
            name: target_name.to_string(),
        })?;

    let mut conn = db.open()?;
    sync_patient(&mut conn, &payload)
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
