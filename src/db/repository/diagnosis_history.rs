use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{DiagnosisHistoryEntry, NewDiagnosisHistoryEntry};

/// Month-name rank for history ordering. Stored values are English
/// month names; anything unrecognized ranks 0 and sorts last within
/// its year.
const MONTH_RANK: &str = "CASE month
        WHEN 'January' THEN 1 WHEN 'February' THEN 2 WHEN 'March' THEN 3
        WHEN 'April' THEN 4 WHEN 'May' THEN 5 WHEN 'June' THEN 6
        WHEN 'July' THEN 7 WHEN 'August' THEN 8 WHEN 'September' THEN 9
        WHEN 'October' THEN 10 WHEN 'November' THEN 11 WHEN 'December' THEN 12
        ELSE 0 END";

/// Vitals history for a patient, most recent month first.
pub fn get_diagnosis_history(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<DiagnosisHistoryEntry>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, patient_id, month, year, systolic_value, systolic_level,
         diastolic_value, diastolic_level, heart_rate, respiratory_rate, temperature
         FROM diagnosis_history WHERE patient_id = ?1
         ORDER BY year DESC, {MONTH_RANK} DESC"
    ))?;

    let rows = stmt.query_map([patient_id], |row| {
        Ok(DiagnosisHistoryEntry {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            month: row.get(2)?,
            year: row.get(3)?,
            systolic_value: row.get(4)?,
            systolic_level: row.get(5)?,
            diastolic_value: row.get(6)?,
            diastolic_level: row.get(7)?,
            heart_rate: row.get(8)?,
            respiratory_rate: row.get(9)?,
            temperature: row.get(10)?,
        })
    })?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

/// Replace the full vitals history for a patient.
///
/// Sync treats child collections as provider-owned sets: delete
/// everything, insert the new set. Callers wrap this in a transaction.
pub fn replace_diagnosis_history(
    conn: &Connection,
    patient_id: i64,
    entries: &[NewDiagnosisHistoryEntry],
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM diagnosis_history WHERE patient_id = ?1",
        [patient_id],
    )?;

    for entry in entries {
        conn.execute(
            "INSERT INTO diagnosis_history (patient_id, month, year, systolic_value,
             systolic_level, diastolic_value, diastolic_level, heart_rate,
             respiratory_rate, temperature)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                patient_id,
                entry.month,
                entry.year,
                entry.systolic_value,
                entry.systolic_level,
                entry.diastolic_value,
                entry.diastolic_level,
                entry.heart_rate,
                entry.respiratory_rate,
                entry.temperature,
            ],
        )?;
    }

    Ok(())
}
