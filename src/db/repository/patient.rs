use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{Patient, PatientRecord, PatientSummary};

const PATIENT_COLUMNS: &str = "id, name, gender, age, profile_picture, date_of_birth,
         phone_number, emergency_contact, insurance_type";

/// Resolve a patient id by exact name.
///
/// Names are not unique; when duplicates exist the lowest id is the
/// canonical match, so repeated syncs keep updating the same row.
pub fn find_patient_id_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<i64>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id FROM patients WHERE name = ?1 ORDER BY id ASC LIMIT 1")?;

    match stmt.query_row([name], |row| row.get::<_, i64>(0)) {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

pub fn insert_patient(
    conn: &Connection,
    record: &PatientRecord,
    synced_at: &str,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (name, gender, age, profile_picture, date_of_birth,
         phone_number, emergency_contact, insurance_type, last_synced_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.name,
            record.gender,
            record.age,
            record.profile_picture,
            record.date_of_birth,
            record.phone_number,
            record.emergency_contact,
            record.insurance_type,
            synced_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite the profile attributes of an existing patient.
///
/// The name is the match key during sync and is left untouched.
pub fn update_patient(
    conn: &Connection,
    id: i64,
    record: &PatientRecord,
    synced_at: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE patients SET gender = ?1, age = ?2, profile_picture = ?3,
         date_of_birth = ?4, phone_number = ?5, emergency_contact = ?6,
         insurance_type = ?7, last_synced_at = ?8
         WHERE id = ?9",
        params![
            record.gender,
            record.age,
            record.profile_picture,
            record.date_of_birth,
            record.phone_number,
            record.emergency_contact,
            record.insurance_type,
            synced_at,
            id,
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"
    ))?;

    match stmt.query_row([id], map_patient_row) {
        Ok(patient) => Ok(Some(patient)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// Fetch a patient by exact name, lowest id first.
pub fn get_patient_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE name = ?1 ORDER BY id ASC LIMIT 1"
    ))?;

    match stmt.query_row([name], map_patient_row) {
        Ok(patient) => Ok(Some(patient)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// All patients as list-endpoint summaries, sorted by name.
pub fn list_patient_summaries(conn: &Connection) -> Result<Vec<PatientSummary>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, gender, age, date_of_birth FROM patients ORDER BY name ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(PatientSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            gender: row.get(2)?,
            age: row.get(3)?,
            date_of_birth: row.get(4)?,
        })
    })?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(row?);
    }
    Ok(patients)
}

fn map_patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        gender: row.get(2)?,
        age: row.get(3)?,
        profile_picture: row.get(4)?,
        date_of_birth: row.get(5)?,
        phone_number: row.get(6)?,
        emergency_contact: row.get(7)?,
        insurance_type: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn record(name: &str) -> PatientRecord {
        PatientRecord {
            name: name.to_string(),
            gender: Some("Female".to_string()),
            age: Some(28),
            profile_picture: None,
            date_of_birth: Some("1996-08-23".to_string()),
            phone_number: Some("(415) 555-1234".to_string()),
            emergency_contact: None,
            insurance_type: Some("Sunrise Health Assurance".to_string()),
        }
    }

    #[test]
    fn insert_then_get_round_trips() {
        let conn = open_memory_database().unwrap();
        let id = insert_patient(&conn, &record("Jessica Taylor"), "2024-03-01T00:00:00Z")
            .unwrap();

        let patient = get_patient(&conn, id).unwrap().unwrap();
        assert_eq!(patient.name, "Jessica Taylor");
        assert_eq!(patient.age, Some(28));
        assert_eq!(patient.date_of_birth.as_deref(), Some("1996-08-23"));
    }

    #[test]
    fn get_missing_patient_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_patient(&conn, 99).unwrap().is_none());
    }

    #[test]
    fn name_lookup_prefers_lowest_id() {
        let conn = open_memory_database().unwrap();
        let first = insert_patient(&conn, &record("Jessica Taylor"), "t0").unwrap();
        let second = insert_patient(&conn, &record("Jessica Taylor"), "t0").unwrap();
        assert!(second > first);

        let found = find_patient_id_by_name(&conn, "Jessica Taylor").unwrap();
        assert_eq!(found, Some(first));

        let patient = get_patient_by_name(&conn, "Jessica Taylor").unwrap().unwrap();
        assert_eq!(patient.id, first);
    }

    #[test]
    fn name_lookup_is_exact() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &record("Jessica Taylor"), "t0").unwrap();

        assert!(find_patient_id_by_name(&conn, "jessica taylor").unwrap().is_none());
        assert!(find_patient_id_by_name(&conn, "Jessica").unwrap().is_none());
    }

    #[test]
    fn update_overwrites_attributes_but_not_name() {
        let conn = open_memory_database().unwrap();
        let id = insert_patient(&conn, &record("Jessica Taylor"), "t0").unwrap();

        let mut changed = record("Ignored Name");
        changed.age = Some(29);
        changed.insurance_type = None;
        update_patient(&conn, id, &changed, "t1").unwrap();

        let patient = get_patient(&conn, id).unwrap().unwrap();
        assert_eq!(patient.name, "Jessica Taylor");
        assert_eq!(patient.age, Some(29));
        assert_eq!(patient.insurance_type, None);

        let synced: String = conn
            .query_row("SELECT last_synced_at FROM patients WHERE id = ?1", [id], |r| r.get(0))
            .unwrap();
        assert_eq!(synced, "t1");
    }

    #[test]
    fn summaries_sorted_by_name() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &record("Ryan Johnson"), "t0").unwrap();
        insert_patient(&conn, &record("Ana Baker"), "t0").unwrap();
        insert_patient(&conn, &record("Jessica Taylor"), "t0").unwrap();

        let summaries = list_patient_summaries(&conn).unwrap();
        let names: Vec<&str> = summaries.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Baker", "Jessica Taylor", "Ryan Johnson"]);
    }
}
