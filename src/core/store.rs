//! Whole-file persistence of the keyword → (secret, timestamp) mapping.
//!
//! Every mutating operation validates first, changes the in-memory list,
//! and writes the complete database back via a temp-file rename, so a
//! crash between load and save leaves the previous file intact. A missing
//! or unreadable database is never an error: load falls back to an empty
//! store and the next save rewrites the file.

use crate::constants;
use crate::models::db_file::DbFile;
use crate::models::entry::Entry;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("the keyword can't be '{}'", constants::RESERVED_KEYWORD)]
    ReservedKeyword,

    #[error("a secret has already been saved with the keyword '{0}'")]
    DuplicateKeyword(String),

    #[error("no secret has been saved with the keyword '{0}'")]
    KeywordNotFound(String),

    #[error("write database {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialize database: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The full collection of entries plus its backing file.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    entries: Vec<Entry>,
}

impl Store {
    /// Load the store from disk. A missing file, unparseable JSON, a
    /// db1/db2 key-set mismatch, or a bad timestamp all yield an empty
    /// store; corruption is recovered, never propagated.
    pub fn load(path: &Path) -> Self {
        let entries = match read_db(path) {
            ReadOutcome::Loaded(entries) => entries,
            ReadOutcome::Missing => Vec::new(),
            ReadOutcome::Malformed => {
                eprintln!(
                    "warning: database {} is unreadable, starting empty",
                    path.display()
                );
                Vec::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    /// Write an empty database. Used for first-time setup and delete-all.
    pub fn reset(path: &Path) -> Result<(), StoreError> {
        let store = Self {
            path: path.to_path_buf(),
            entries: Vec::new(),
        };
        store.save()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, sorted by keyword.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only lookup, case-sensitive exact match.
    pub fn get(&self, keyword: &str) -> Result<&Entry, StoreError> {
        self.entries
            .iter()
            .find(|e| e.keyword == keyword)
            .ok_or_else(|| StoreError::KeywordNotFound(keyword.to_string()))
    }

    /// Add a new entry and persist. The reserved-keyword and duplicate
    /// checks run before any mutation, so a rejected insert changes
    /// nothing in memory or on disk.
    pub fn insert(&mut self, keyword: &str, secret: &str) -> Result<&Entry, StoreError> {
        // Only the "all" sentinel is matched case-insensitively; keyword
        // uniqueness stays case-sensitive.
        if keyword.eq_ignore_ascii_case(constants::RESERVED_KEYWORD) {
            return Err(StoreError::ReservedKeyword);
        }
        if self.entries.iter().any(|e| e.keyword == keyword) {
            return Err(StoreError::DuplicateKeyword(keyword.to_string()));
        }
        self.entries.push(Entry {
            keyword: keyword.to_string(),
            secret: secret.to_string(),
            updated_at: Utc::now(),
        });
        self.entries.sort_by(|a, b| a.keyword.cmp(&b.keyword));
        self.save()?;
        self.get(keyword)
    }

    /// Overwrite the secret of an existing entry, refresh its timestamp,
    /// and persist.
    pub fn update(&mut self, keyword: &str, secret: &str) -> Result<&Entry, StoreError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.keyword == keyword)
            .ok_or_else(|| StoreError::KeywordNotFound(keyword.to_string()))?;
        self.entries[idx].secret = secret.to_string();
        self.entries[idx].updated_at = Utc::now();
        self.save()?;
        Ok(&self.entries[idx])
    }

    /// Remove one entry and persist. Returns the removed entry.
    pub fn remove(&mut self, keyword: &str) -> Result<Entry, StoreError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.keyword == keyword)
            .ok_or_else(|| StoreError::KeywordNotFound(keyword.to_string()))?;
        let entry = self.entries.remove(idx);
        self.save()?;
        Ok(entry)
    }

    /// Delete every entry and persist the empty database.
    pub fn remove_all(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.save()
    }

    /// Serialize both maps into one file, fully replacing the previous
    /// contents. The write goes through a temp file in the same directory
    /// and a rename, so the database is never left partially written.
    pub fn save(&self) -> Result<(), StoreError> {
        let db = to_db_file(&self.entries);
        let json = serde_json::to_string_pretty(&db)?;

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| persistence(&self.path, e))?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| persistence(&self.path, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| persistence(&self.path, e))?;
        tmp.flush().ok();

        #[cfg(unix)]
        {
            let perm = fs::Permissions::from_mode(constants::DB_FILE_MODE);
            tmp.as_file()
                .set_permissions(perm)
                .map_err(|e| persistence(&self.path, e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| persistence(&self.path, e.error))?;
        Ok(())
    }
}

fn persistence(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Persistence {
        path: path.to_path_buf(),
        source,
    }
}

enum ReadOutcome {
    Missing,
    Malformed,
    Loaded(Vec<Entry>),
}

fn read_db(path: &Path) -> ReadOutcome {
    if !path.exists() {
        return ReadOutcome::Missing;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return ReadOutcome::Malformed,
    };
    let db: DbFile = match serde_json::from_str(&content) {
        Ok(db) => db,
        Err(_) => return ReadOutcome::Malformed,
    };
    match entries_from_db(db) {
        Some(entries) => ReadOutcome::Loaded(entries),
        None => ReadOutcome::Malformed,
    }
}

/// Rebuild the entry list from the two on-disk maps. The file is
/// all-or-nothing: a key present in one map but not the other, or a
/// timestamp that is not RFC 3339, makes the whole database malformed.
fn entries_from_db(db: DbFile) -> Option<Vec<Entry>> {
    if db.db1.len() != db.db2.len() {
        return None;
    }
    let mut entries = Vec::with_capacity(db.db1.len());
    // BTreeMap iteration keeps the entries sorted by keyword.
    for (keyword, secret) in db.db1 {
        let stamp = db.db2.get(&keyword)?;
        let updated_at = DateTime::parse_from_rfc3339(stamp)
            .ok()?
            .with_timezone(&Utc);
        entries.push(Entry {
            keyword,
            secret,
            updated_at,
        });
    }
    Some(entries)
}

fn to_db_file(entries: &[Entry]) -> DbFile {
    let mut db = DbFile::default();
    for entry in entries {
        db.db1.insert(entry.keyword.clone(), entry.secret.clone());
        db.db2
            .insert(entry.keyword.clone(), entry.updated_at.to_rfc3339());
    }
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(constants::DB_FILE_NAME);
        let store = Store::load(&path);
        (dir, store)
    }

    #[test]
    fn test_insert_then_get() {
        let (_dir, mut store) = test_store();
        let before = Utc::now();
        store.insert("bank", "p4ss").unwrap();
        let entry = store.get("bank").unwrap();
        assert_eq!(entry.secret, "p4ss");
        assert!(entry.updated_at >= before);
    }

    #[test]
    fn test_insert_reserved_keyword_any_case() {
        let (_dir, mut store) = test_store();
        for keyword in ["all", "All", "ALL", "aLl"] {
            let err = store.insert(keyword, "x").unwrap_err();
            assert!(matches!(err, StoreError::ReservedKeyword), "{}", keyword);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_duplicate_leaves_existing_unmodified() {
        let (_dir, mut store) = test_store();
        store.insert("bank", "original").unwrap();
        let stamp = store.get("bank").unwrap().updated_at;

        let err = store.insert("bank", "other").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKeyword(k) if k == "bank"));

        let entry = store.get("bank").unwrap();
        assert_eq!(entry.secret, "original");
        assert_eq!(entry.updated_at, stamp);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let (_dir, mut store) = test_store();
        store.insert("bank", "a").unwrap();
        store.insert("Bank", "b").unwrap();
        assert_eq!(store.get("bank").unwrap().secret, "a");
        assert_eq!(store.get("Bank").unwrap().secret, "b");
    }

    #[test]
    fn test_update_absent_fails_without_creating() {
        let (_dir, mut store) = test_store();
        let err = store.update("missing", "x").unwrap_err();
        assert!(matches!(err, StoreError::KeywordNotFound(k) if k == "missing"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let (_dir, mut store) = test_store();
        store.insert("bank", "p4ss").unwrap();
        let t0 = store.get("bank").unwrap().updated_at;
        store.update("bank", "newpass").unwrap();
        let entry = store.get("bank").unwrap();
        assert_eq!(entry.secret, "newpass");
        assert!(entry.updated_at >= t0);
    }

    #[test]
    fn test_remove_then_get_fails() {
        let (_dir, mut store) = test_store();
        store.insert("bank", "p4ss").unwrap();
        store.remove("bank").unwrap();
        let err = store.get("bank").unwrap_err();
        assert!(matches!(err, StoreError::KeywordNotFound(_)));
    }

    #[test]
    fn test_remove_absent_fails() {
        let (_dir, mut store) = test_store();
        let err = store.remove("missing").unwrap_err();
        assert!(matches!(err, StoreError::KeywordNotFound(_)));
    }

    #[test]
    fn test_remove_all_empties_store() {
        let (_dir, mut store) = test_store();
        store.insert("a", "1").unwrap();
        store.insert("b", "2").unwrap();
        store.remove_all().unwrap();
        assert!(store.is_empty());
        assert!(store.entries().is_empty());

        let reloaded = Store::load(store.path());
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_dir, mut store) = test_store();
        store.insert("bank", "p4ss").unwrap();
        store.insert("email", "hünter2 with spaces").unwrap();

        let reloaded = Store::load(store.path());
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::load(&dir.path().join("nonexistent.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(constants::DB_FILE_NAME);
        fs::write(&path, "not json at all {").unwrap();
        let store = Store::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_mismatched_key_sets_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(constants::DB_FILE_NAME);
        fs::write(&path, r#"{"db1":{"bank":"p4ss"},"db2":{}}"#).unwrap();
        let store = Store::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_bad_timestamp_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(constants::DB_FILE_NAME);
        fs::write(
            &path,
            r#"{"db1":{"bank":"p4ss"},"db2":{"bank":"on 2 Dec 2024 at 5:30:12 PM"}}"#,
        )
        .unwrap();
        let store = Store::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_reset_writes_empty_database() {
        let (_dir, mut store) = test_store();
        store.insert("bank", "p4ss").unwrap();
        Store::reset(store.path()).unwrap();
        let reloaded = Store::load(store.path());
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_disk_format_has_parallel_maps() {
        let (_dir, mut store) = test_store();
        store.insert("bank", "p4ss").unwrap();
        store.insert("email", "hunter2").unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let db1 = value["db1"].as_object().unwrap();
        let db2 = value["db2"].as_object().unwrap();
        assert_eq!(db1.len(), db2.len());
        for key in db1.keys() {
            assert!(db2.contains_key(key));
            assert!(db2[key].is_string());
        }
        assert_eq!(db1["bank"], "p4ss");
    }

    #[test]
    fn test_entries_sorted_by_keyword() {
        let (_dir, mut store) = test_store();
        store.insert("zoo", "1").unwrap();
        store.insert("bank", "2").unwrap();
        store.insert("mail", "3").unwrap();
        let keywords: Vec<_> = store.entries().iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["bank", "mail", "zoo"]);
    }

    #[test]
    fn test_save_failure_is_surfaced() {
        let dir = TempDir::new().unwrap();
        // Parent of the database path is a regular file, so the save
        // cannot create the directory.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let store = Store::load(&blocker.join("passwords.json"));
        let err = store.save().unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
    }

    #[test]
    fn test_bank_scenario() {
        let (_dir, mut store) = test_store();
        store.insert("bank", "p4ss").unwrap();
        let t0 = store.get("bank").unwrap().updated_at;
        assert_eq!(store.get("bank").unwrap().secret, "p4ss");

        store.update("bank", "newpass").unwrap();
        let entry = store.get("bank").unwrap();
        assert_eq!(entry.secret, "newpass");
        assert!(entry.updated_at >= t0);

        store.remove("bank").unwrap();
        assert!(matches!(
            store.get("bank").unwrap_err(),
            StoreError::KeywordNotFound(_)
        ));
    }
}
