//! Patient read endpoints.
//!
//! `GET /api/patient/list` — roster of stored patients.
//! `GET /api/patient/:id` — full dashboard record for one patient.
//! `GET /api/patient` — same record for the configured default patient.
//!
//! Reads never touch the provider; they serve whatever the last sync
//! stored.

use axum::extract::{Path, State};
use axum::Json;
use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, DataEnvelope};
use crate::db;
use crate::models::{Patient, PatientDetail, PatientSummary};

const NO_PATIENT_FOUND: &str = "No patient found";

/// `GET /api/patient/list` — all stored patients, sorted by name.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<DataEnvelope<Vec<PatientSummary>>>, ApiError> {
    let conn = ctx.db.open()?;
    let patients = db::list_patient_summaries(&conn)?;

    Ok(Json(DataEnvelope::new(patients)))
}

/// `GET /api/patient/:id` — full record for one patient.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<DataEnvelope<PatientDetail>>, ApiError> {
    let conn = ctx.db.open()?;
    let patient = db::get_patient(&conn, id)?
        .ok_or_else(|| ApiError::NotFound(NO_PATIENT_FOUND.to_string()))?;
    let detail = load_detail(&conn, patient)?;

    Ok(Json(DataEnvelope::new(detail)))
}

/// `GET /api/patient` — full record for the configured default patient.
///
/// Duplicate names resolve to the lowest id, same as the sync path.
pub async fn default_detail(
    State(ctx): State<ApiContext>,
) -> Result<Json<DataEnvelope<PatientDetail>>, ApiError> {
    let conn = ctx.db.open()?;
    let patient = db::get_patient_by_name(&conn, &ctx.config.default_patient_name)?
        .ok_or_else(|| ApiError::NotFound(NO_PATIENT_FOUND.to_string()))?;
    let detail = load_detail(&conn, patient)?;

    Ok(Json(DataEnvelope::new(detail)))
}

/// Assemble the full dashboard record: the profile row plus its three
/// child collections.
fn load_detail(conn: &Connection, patient: Patient) -> Result<PatientDetail, ApiError> {
    let diagnosis_history = db::get_diagnosis_history(conn, patient.id)?;
    let diagnostic_list = db::get_diagnostic_list(conn, patient.id)?;
    let lab_results = db::get_lab_results(conn, patient.id)?;

    Ok(PatientDetail {
        id: patient.id,
        name: patient.name,
        gender: patient.gender,
        age: patient.age,
        profile_picture: patient.profile_picture,
        date_of_birth: patient.date_of_birth,
        phone_number: patient.phone_number,
        emergency_contact: patient.emergency_contact,
        insurance_type: patient.insurance_type,
        diagnosis_history,
        diagnostic_list,
        lab_results,
    })
}
