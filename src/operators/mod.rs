//! Query operators.
//!
//! An operator holds its input operators and produces a shared read-only
//! table on [`Operator::execute`]. Execution is synchronous on the
//! caller's thread; results are not memoized.

pub mod table_scan;

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::storage::Table;

pub use table_scan::TableScan;

/// Common contract of all operators: evaluate and hand out the output
/// table. `Send + Sync` so pipelines can be shared across threads.
pub trait Operator: Send + Sync {
    fn execute(&self) -> Result<Arc<Table>>;
}

// ── Leaf Operators ─────────────────────────────────────────────────

/// Leaf operator feeding a prebuilt table into a pipeline.
#[derive(Debug)]
pub struct TableWrapper {
    table: Arc<Table>,
}

impl TableWrapper {
    pub fn new(table: Arc<Table>) -> Self {
        Self { table }
    }
}

impl Operator for TableWrapper {
    fn execute(&self) -> Result<Arc<Table>> {
        Ok(Arc::clone(&self.table))
    }
}

/// Leaf operator resolving a catalog table by name at execute time.
#[derive(Debug)]
pub struct GetTable {
    catalog: Arc<Catalog>,
    name: String,
}

impl GetTable {
    pub fn new(catalog: Arc<Catalog>, name: impl Into<String>) -> Self {
        Self {
            catalog,
            name: name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.name
    }
}

impl Operator for GetTable {
    fn execute(&self) -> Result<Arc<Table>> {
        self.catalog.get_table(&self.name)
    }
}

// ── Tests ──────────────────────────────────────────────────────────
