use rusqlite::{params, Connection};

use crate::db::DatabaseError;

/// Lab result names for a patient, in insertion order.
///
/// Lab results are bare strings in the provider feed and on the wire,
/// so the repository works with strings directly.
pub fn get_lab_results(conn: &Connection, patient_id: i64) -> Result<Vec<String>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT result_name FROM lab_results WHERE patient_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([patient_id], |row| row.get::<_, String>(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Replace the full lab result set for a patient.
pub fn replace_lab_results(
    conn: &Connection,
    patient_id: i64,
    results: &[String],
) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM lab_results WHERE patient_id = ?1", [patient_id])?;

    for result in results {
        conn.execute(
            "INSERT INTO lab_results (patient_id, result_name) VALUES (?1, ?2)",
            params![patient_id, result],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn seed_patient(conn: &Connection) -> i64 {
        conn.execute("INSERT INTO patients (name) VALUES ('Jessica Taylor')", [])
            .unwrap();
        conn.last_insert_rowid()
    }

    #[test]
    fn results_round_trip_in_order() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);

        let results = vec![
            "Blood Tests".to_string(),
            "CT Scans".to_string(),
            "Radiology Reports".to_string(),
        ];
        replace_lab_results(&conn, patient_id, &results).unwrap();

        assert_eq!(get_lab_results(&conn, patient_id).unwrap(), results);
    }

    #[test]
    fn duplicate_names_are_kept() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);

        let results = vec!["Blood Tests".to_string(), "Blood Tests".to_string()];
        replace_lab_results(&conn, patient_id, &results).unwrap();

        assert_eq!(get_lab_results(&conn, patient_id).unwrap().len(), 2);
    }

    #[test]
    fn replace_with_empty_set_clears_results() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);

        replace_lab_results(&conn, patient_id, &["Blood Tests".to_string()]).unwrap();
        replace_lab_results(&conn, patient_id, &[]).unwrap();

        assert!(get_lab_results(&conn, patient_id).unwrap().is_empty());
    }
}
