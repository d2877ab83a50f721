use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// One accepted submission, as written to the `submissions` table.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub id: String,
    pub schema_json: String,
    pub values_json: String,
    pub rendered_text: Option<String>,
}

/// Opens the database at `path`, creating the `submissions` table if needed.
pub fn open(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS submissions (
            id TEXT PRIMARY KEY,
            schema_json TEXT NOT NULL,
            values_json TEXT NOT NULL,
            rendered_text TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )?;
    Ok(conn)
}

pub fn insert_submission(path: &Path, record: &SubmissionRecord) -> rusqlite::Result<()> {
    let conn = open(path)?;
    conn.execute(
        "INSERT INTO submissions (id, schema_json, values_json, rendered_text)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            &record.id,
            &record.schema_json,
            &record.values_json,
            &record.rendered_text
        ],
    )?;
    Ok(())
}

/// Looks a submission up by id. `Ok(None)` when no row matches.
pub fn find_submission(path: &Path, id: &str) -> rusqlite::Result<Option<SubmissionRecord>> {
    let conn = open(path)?;
    conn.query_row(
        "SELECT id, schema_json, values_json, rendered_text FROM submissions WHERE id = ?1",
        params![id],
        |row| {
            Ok(SubmissionRecord {
                id: row.get(0)?,
                schema_json: row.get(1)?,
                values_json: row.get(2)?,
                rendered_text: row.get(3)?,
            })
        },
    )
        .optional()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_finds_a_submission() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.sqlite");
        let record = SubmissionRecord {
            id: "abc".to_string(),
            schema_json: "{}".to_string(),
            values_json: r#"{"fields":{},"arrays":{}}"#.to_string(),
            rendered_text: Some("Hola".to_string()),
        };

        insert_submission(&path, &record).unwrap();

        let found = find_submission(&path, "abc").unwrap().unwrap();
        assert_eq!(found.values_json, record.values_json);
        assert_eq!(found.rendered_text.as_deref(), Some("Hola"));
        assert!(find_submission(&path, "missing").unwrap().is_none());
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.sqlite");
        let record = SubmissionRecord {
            id: "same".to_string(),
            schema_json: "{}".to_string(),
            values_json: "{}".to_string(),
            rendered_text: None,
        };

        insert_submission(&path, &record).unwrap();
        assert!(insert_submission(&path, &record).is_err());
    }
}
