//! Opal — in-memory columnar storage and query execution core.
//!
//! Tables are partitioned into fixed-size horizontal chunks; each chunk
//! holds one typed segment per column. Segments exist in three physical
//! representations (raw value arrays, dictionary-compressed arrays, and
//! positional references into a base table), and the [`TableScan`]
//! operator evaluates a comparison against a constant over all three,
//! producing a new table of reference segments.
//!
//! ```
//! use std::sync::Arc;
//! use opal::{DataType, ScanType, TableScan, TableWrapper, Table, Value};
//! use opal::operators::Operator;
//!
//! let mut table = Table::new(2);
//! table.add_column("a", DataType::Int).unwrap();
//! for v in [1, 2, 3, 4] {
//!     table.append(vec![Value::Int(v)]).unwrap();
//! }
//!
//! let input = Arc::new(TableWrapper::new(Arc::new(table)));
//! let scan = TableScan::new(input, 0, ScanType::GreaterThan, Value::Int(2));
//! assert_eq!(scan.execute().unwrap().row_count(), 2);
//! ```

pub mod catalog;
pub mod error;
pub mod operators;
pub mod storage;
pub mod types;

pub use catalog::Catalog;
pub use error::{Result, StorageError};
pub use operators::{GetTable, Operator, TableScan, TableWrapper};
pub use storage::{
    AttributeVector, Chunk, Dictionary, DictionarySegment, ReferenceSegment, Segment, Table,
    ValueSegment,
};
pub use types::{
    ChunkId, ChunkOffset, ColumnId, ColumnValue, DataType, PosList, RowId, ScanType, Value,
    ValueId, INVALID_VALUE_ID,
};
