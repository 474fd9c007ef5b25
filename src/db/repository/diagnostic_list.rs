use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{DiagnosticListEntry, NewDiagnosticListEntry};

/// Diagnostic list for a patient, in insertion order.
///
/// The provider feed carries no ordering key for diagnostics, so the
/// payload order (preserved by ascending id) is the display order.
pub fn get_diagnostic_list(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<DiagnosticListEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, name, description, status
         FROM diagnostic_list WHERE patient_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([patient_id], |row| {
        Ok(DiagnosticListEntry {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            status: row.get(4)?,
        })
    })?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

/// Replace the full diagnostic list for a patient.
pub fn replace_diagnostic_list(
    conn: &Connection,
    patient_id: i64,
    entries: &[NewDiagnosticListEntry],
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM diagnostic_list WHERE patient_id = ?1",
        [patient_id],
    )?;

    for entry in entries {
        conn.execute(
            "INSERT INTO diagnostic_list (patient_id, name, description, status)
             VALUES (?1, ?2, ?3, ?4)",
            params![patient_id, entry.name, entry.description, entry.status],
        )?;
    }

    Ok(())
}
