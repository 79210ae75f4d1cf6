//! Catalog — thread-safe registry of named tables.
//!
//! An explicit context value rather than a process-wide singleton: tests
//! and embedders construct their own. Tables are shared by ownership-
//! counted handles, so dropping a name does not invalidate operators that
//! still reference the table.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, StorageError};
use crate::storage::Table;

/// Name → table registry.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables_read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Table>>> {
        self.tables.read().expect("catalog lock poisoned")
    }

    fn tables_write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Table>>> {
        self.tables.write().expect("catalog lock poisoned")
    }

    /// Register a table under a name. An existing table under the same
    /// name is replaced; handles to the old table stay valid.
    pub fn add_table(&self, name: impl Into<String>, table: Arc<Table>) {
        let name = name.into();
        tracing::debug!(table = %name, "adding table to catalog");
        self.tables_write().insert(name, table);
    }

    /// Remove a table by name. Fails if the name is unknown.
    pub fn drop_table(&self, name: &str) -> Result<()> {
        if self.tables_write().remove(name).is_none() {
            return Err(StorageError::TableNotFound(name.to_string()));
        }
        tracing::debug!(table = %name, "dropped table from catalog");
        Ok(())
    }

    /// Look up a table by name. Fails if the name is unknown.
    pub fn get_table(&self, name: &str) -> Result<Arc<Table>> {
        self.tables_read()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::TableNotFound(name.to_string()))
    }

    /// Whether a table with this name is registered.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables_read().contains_key(name)
    }

    /// All registered names, sorted for deterministic output.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables_read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every table.
    pub fn reset(&self) {
        self.tables_write().clear();
    }

    /// Write `name, column_count, row_count, chunk_count` per table.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        for name in self.table_names() {
            let table = self.tables_read().get(&name).cloned();
            if let Some(table) = table {
                writeln!(
                    out,
                    "{}, {}, {}, {}",
                    name,
                    table.column_count(),
                    table.row_count(),
                    table.chunk_count()
                )?;
            }
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Value};

    fn small_table() -> Arc<Table> {
        let mut table = Table::new(2);
        table.add_column("a", DataType::Int).unwrap();
        table.append(vec![Value::Int(1)]).unwrap();
        Arc::new(table)
    }

    #[test]
    fn test_add_get_has() {
        let catalog = Catalog::new();
        assert!(!catalog.has_table("t"));

        let table = small_table();
        catalog.add_table("t", Arc::clone(&table));

        assert!(catalog.has_table("t"));
        assert!(Arc::ptr_eq(&catalog.get_table("t").unwrap(), &table));
    }

    #[test]
    fn test_get_unknown_fails() {
        let err = Catalog::new().get_table("nope").unwrap_err();
        assert!(err.to_string().contains("'nope' not found"));
    }

    #[test]
    fn test_drop_table() {
        let catalog = Catalog::new();
        catalog.add_table("t", small_table());

        catalog.drop_table("t").unwrap();
        assert!(!catalog.has_table("t"));
        assert!(catalog.drop_table("t").is_err());
    }

    #[test]
    fn test_add_replaces_existing_name() {
        let catalog = Catalog::new();
        let first = small_table();
        let second = small_table();

        catalog.add_table("t", Arc::clone(&first));
        catalog.add_table("t", Arc::clone(&second));

        assert!(Arc::ptr_eq(&catalog.get_table("t").unwrap(), &second));
        // The displaced table is still usable through old handles.
        assert_eq!(first.row_count(), 1);
    }

    #[test]
    fn test_table_names_sorted() {
        let catalog = Catalog::new();
        for name in ["zeta", "alpha", "mid"] {
            catalog.add_table(name, small_table());
        }
        assert_eq!(catalog.table_names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_reset() {
        let catalog = Catalog::new();
        catalog.add_table("t", small_table());
        catalog.reset();
        assert!(catalog.table_names().is_empty());
    }

    #[test]
    fn test_print() {
        let catalog = Catalog::new();
        catalog.add_table("t", small_table());

        let mut out = Vec::new();
        catalog.print(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "t, 1, 1, 1\n");
    }
}
