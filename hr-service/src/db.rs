//! Database module - SQLite document store
//!
//! Records are serde structs kept as JSON bodies in a single `documents`
//! table, partitioned by collection name.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, ToSql};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub struct DocumentStore {
    conn: Connection,
}

impl DocumentStore {
    /// Open (or create) a store file and apply the schema
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let store = Self {
            conn: Connection::open(path)?,
        };
        store.run_migrations()?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> AppResult<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.run_migrations()?;
        Ok(store)
    }

    /// Create tables if not exist
    fn run_migrations(&self) -> AppResult<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        tracing::debug!("Document schema applied");
        Ok(())
    }

    pub fn count(&self, collection: &str) -> AppResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Insert documents in one transaction, returning how many were written
    pub fn insert_many<T: Serialize>(&mut self, collection: &str, docs: &[T]) -> AppResult<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO documents (id, collection, body) VALUES (?1, ?2, ?3)")?;
            for doc in docs {
                let body = serde_json::to_string(doc)?;
                stmt.execute(params![Uuid::new_v4().to_string(), collection, body])?;
            }
        }
        tx.commit()?;
        Ok(docs.len())
    }

    /// All documents of a collection in insertion order
    pub fn find_all<T: DeserializeOwned>(&self, collection: &str) -> AppResult<Vec<T>> {
        self.query(
            "SELECT body FROM documents WHERE collection = ?1 ORDER BY rowid",
            params![collection],
        )
    }

    /// Documents whose top-level `field` equals `value`, in insertion order
    pub fn find_by<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> AppResult<Vec<T>> {
        let path = json_path(field);
        self.query(
            "SELECT body FROM documents
             WHERE collection = ?1 AND json_extract(body, ?2) = ?3
             ORDER BY rowid",
            params![collection, path, value],
        )
    }

    /// Like `find_by`, ordered ascending by `sort_field`
    pub fn find_by_sorted<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
        sort_field: &str,
    ) -> AppResult<Vec<T>> {
        let path = json_path(field);
        let sort_path = json_path(sort_field);
        self.query(
            "SELECT body FROM documents
             WHERE collection = ?1 AND json_extract(body, ?2) = ?3
             ORDER BY json_extract(body, ?4), rowid",
            params![collection, path, value, sort_path],
        )
    }

    pub fn find_one_by<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> AppResult<Option<T>> {
        Ok(self.find_by(collection, field, value)?.into_iter().next())
    }

    fn query<T: DeserializeOwned>(&self, sql: &str, args: &[&dyn ToSql]) -> AppResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let bodies = stmt
            .query_map(args, |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(AppError::from))
            .collect()
    }
}

fn json_path(field: &str) -> String {
    format!("$.{field}")
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    collection TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        owner: String,
        day: String,
    }

    fn note(owner: &str, day: &str) -> Note {
        Note {
            owner: owner.to_string(),
            day: day.to_string(),
        }
    }

    #[test]
    fn test_insert_and_count() {
        let mut store = DocumentStore::open_in_memory().unwrap();
        assert_eq!(store.count("notes").unwrap(), 0);

        let written = store
            .insert_many("notes", &[note("a", "2"), note("b", "1")])
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(store.count("notes").unwrap(), 2);
        assert_eq!(store.count("other").unwrap(), 0);
    }

    #[test]
    fn test_find_preserves_insertion_order() {
        let mut store = DocumentStore::open_in_memory().unwrap();
        let notes = vec![note("b", "2"), note("a", "1"), note("c", "3")];
        store.insert_many("notes", &notes).unwrap();

        let found: Vec<Note> = store.find_all("notes").unwrap();
        assert_eq!(found, notes);
    }

    #[test]
    fn test_find_by_field() {
        let mut store = DocumentStore::open_in_memory().unwrap();
        store
            .insert_many("notes", &[note("a", "3"), note("b", "1"), note("a", "1")])
            .unwrap();

        let found: Vec<Note> = store.find_by("notes", "owner", "a").unwrap();
        assert_eq!(found, vec![note("a", "3"), note("a", "1")]);

        let sorted: Vec<Note> = store.find_by_sorted("notes", "owner", "a", "day").unwrap();
        assert_eq!(sorted, vec![note("a", "1"), note("a", "3")]);

        let missing: Option<Note> = store.find_one_by("notes", "owner", "z").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_open_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("hr.sqlite3");

        {
            let mut store = DocumentStore::open(&path).unwrap();
            store.insert_many("notes", &[note("a", "1")]).unwrap();
        }

        let store = DocumentStore::open(&path).unwrap();
        assert_eq!(store.count("notes").unwrap(), 1);
    }
}
