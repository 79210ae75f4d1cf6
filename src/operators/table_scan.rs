//! Predicate table scan.
//!
//! Scans one column of the input table against a constant and produces a
//! new table of reference segments sharing a single position list. The
//! algorithm is selected per chunk from the actual segment representation:
//!
//! - value segments are swept linearly with one hoisted comparator;
//! - dictionary segments are planned through the sorted dictionary, so
//!   order relations on values collapse to order relations on value ids
//!   and the chunk costs O(rows + log dictionary);
//! - reference segments are chased row id by row id through the
//!   referenced table, emitting the *original* row ids, so scan outputs
//!   always reference base storage, never an intermediate view.

use std::sync::Arc;

use crate::error::{Result, StorageError};
use crate::storage::dictionary_segment::{lower_bound_in, upper_bound_in};
use crate::storage::{Chunk, DictionarySegment, ReferenceSegment, Segment, Table, ValueSegment};
use crate::types::{
    with_data_type, ChunkId, ChunkOffset, ColumnId, ColumnValue, DataType, PosList, RowId,
    ScanType, Value, INVALID_VALUE_ID,
};

use super::Operator;

// ── Dictionary Scan Planning ───────────────────────────────────────

/// Value-id predicate compiled from `(scan_type, search_value)` against a
/// sorted dictionary. The attribute vector is then swept once, comparing
/// ids instead of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DictionaryScanPlan {
    /// No row of the chunk can match.
    EmitNone,
    /// Every row of the chunk matches.
    EmitAll,
    /// A row matches when `value_id <op> pivot` holds.
    Compare(ScanType, u32),
}

/// Compile the scan predicate into a value-id plan.
///
/// `lower` is the smallest id with an entry `>= search`, `upper` the
/// smallest with an entry `> search`; ids below `lower` hold smaller
/// values, ids at or above `upper` hold greater ones. Each operator
/// reduces to one id comparison against one of the two bounds, with the
/// invalid-bound cases degenerating to all or none.
fn plan_dictionary_scan<T: ColumnValue>(
    dictionary: &[T],
    scan_type: ScanType,
    search_value: &T,
) -> DictionaryScanPlan {
    use DictionaryScanPlan::{Compare, EmitAll, EmitNone};

    let lower = lower_bound_in(dictionary, search_value);
    let contains = lower != INVALID_VALUE_ID
        && dictionary[lower as usize].total_cmp(search_value) == std::cmp::Ordering::Equal;

    match scan_type {
        ScanType::Equals => {
            if contains {
                Compare(ScanType::Equals, lower)
            } else {
                EmitNone
            }
        }
        ScanType::NotEquals => {
            if contains {
                Compare(ScanType::NotEquals, lower)
            } else {
                EmitAll
            }
        }
        ScanType::LessThan => match lower {
            INVALID_VALUE_ID => EmitAll,
            0 => EmitNone,
            pivot => Compare(ScanType::LessThan, pivot),
        },
        ScanType::LessThanEquals => match upper_bound_in(dictionary, search_value) {
            INVALID_VALUE_ID => EmitAll,
            0 => EmitNone,
            pivot => Compare(ScanType::LessThan, pivot),
        },
        ScanType::GreaterThan => match upper_bound_in(dictionary, search_value) {
            INVALID_VALUE_ID => EmitNone,
            pivot => Compare(ScanType::GreaterThanEquals, pivot),
        },
        ScanType::GreaterThanEquals => match lower {
            INVALID_VALUE_ID => EmitNone,
            pivot => Compare(ScanType::GreaterThanEquals, pivot),
        },
    }
}

// ── Table Scan ─────────────────────────────────────────────────────

/// Scan operator: one input, a column, a comparison, and a search value.
pub struct TableScan {
    input: Arc<dyn Operator>,
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: Value,
}

impl TableScan {
    pub fn new(
        input: Arc<dyn Operator>,
        column_id: ColumnId,
        scan_type: ScanType,
        search_value: Value,
    ) -> Self {
        Self {
            input,
            column_id,
            scan_type,
            search_value,
        }
    }

    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    pub fn search_value(&self) -> &Value {
        &self.search_value
    }

    fn type_mismatch<T: ColumnValue>(actual: DataType) -> StorageError {
        StorageError::TypeMismatch {
            expected: T::DATA_TYPE,
            actual,
        }
    }

    /// Scan monomorphized for the column's element type.
    fn scan_typed<T: ColumnValue>(&self, input: &Arc<Table>) -> Result<Arc<Table>> {
        let search_value = T::from_value(self.search_value.clone())?;

        let mut pos_list = PosList::new();
        // Set to the base table as soon as a reference segment is scanned;
        // the output must resolve through base storage.
        let mut referenced_table: Option<Arc<Table>> = None;

        for chunk_id in 0..input.chunk_count() {
            let chunk = input.get_chunk(chunk_id);
            if chunk.size() == 0 {
                continue;
            }

            match chunk.get_segment(self.column_id) {
                Segment::Value(segment) => {
                    self.scan_value_segment::<T>(segment, chunk_id, &search_value, &mut pos_list)?
                }
                Segment::Dictionary(segment) => self.scan_dictionary_segment::<T>(
                    segment,
                    chunk_id,
                    &search_value,
                    &mut pos_list,
                )?,
                Segment::Reference(segment) => {
                    referenced_table.get_or_insert_with(|| Arc::clone(segment.referenced_table()));
                    self.scan_reference_segment::<T>(segment, &search_value, &mut pos_list)?;
                }
            }
        }

        tracing::debug!(
            rows = pos_list.len(),
            scan_type = ?self.scan_type,
            column_id = self.column_id,
            "table scan complete"
        );

        let base_table = referenced_table.unwrap_or_else(|| Arc::clone(input));
        Ok(Arc::new(Self::assemble_output(
            input,
            &base_table,
            Arc::new(pos_list),
        )))
    }

    /// Linear sweep over an uncompressed segment.
    fn scan_value_segment<T: ColumnValue>(
        &self,
        segment: &ValueSegment,
        chunk_id: ChunkId,
        search_value: &T,
        pos_list: &mut PosList,
    ) -> Result<()> {
        let values = segment
            .typed_values::<T>()
            .ok_or_else(|| Self::type_mismatch::<T>(segment.data_type()))?;

        for (offset, value) in values.iter().enumerate() {
            if self.scan_type.accepts(value.total_cmp(search_value)) {
                pos_list.push(RowId::new(chunk_id, offset as ChunkOffset));
            }
        }
        Ok(())
    }

    /// Plan against the sorted dictionary, then sweep the attribute vector
    /// once comparing value ids.
    fn scan_dictionary_segment<T: ColumnValue>(
        &self,
        segment: &DictionarySegment,
        chunk_id: ChunkId,
        search_value: &T,
        pos_list: &mut PosList,
    ) -> Result<()> {
        let dictionary = segment
            .typed_dictionary::<T>()
            .ok_or_else(|| Self::type_mismatch::<T>(segment.data_type()))?;

        match plan_dictionary_scan(dictionary, self.scan_type, search_value) {
            DictionaryScanPlan::EmitNone => {}
            DictionaryScanPlan::EmitAll => {
                for offset in 0..segment.len() {
                    pos_list.push(RowId::new(chunk_id, offset as ChunkOffset));
                }
            }
            DictionaryScanPlan::Compare(value_id_op, pivot) => {
                let vector = segment.attribute_vector();
                for offset in 0..vector.len() {
                    if value_id_op.accepts(vector.get(offset).cmp(&pivot)) {
                        pos_list.push(RowId::new(chunk_id, offset as ChunkOffset));
                    }
                }
            }
        }
        Ok(())
    }

    /// Chase each incoming row id into the referenced table and emit the
    /// original row id on a match.
    fn scan_reference_segment<T: ColumnValue>(
        &self,
        segment: &ReferenceSegment,
        search_value: &T,
        pos_list: &mut PosList,
    ) -> Result<()> {
        let table = segment.referenced_table();
        let column_id = segment.referenced_column_id();

        for &row_id in segment.pos_list().iter() {
            let chunk = table.get_chunk(row_id.chunk_id);
            let offset = row_id.chunk_offset as usize;

            let matched = match chunk.get_segment(column_id) {
                Segment::Value(resolved) => {
                    let values = resolved
                        .typed_values::<T>()
                        .ok_or_else(|| Self::type_mismatch::<T>(resolved.data_type()))?;
                    self.scan_type.accepts(values[offset].total_cmp(search_value))
                }
                Segment::Dictionary(resolved) => {
                    let dictionary = resolved
                        .typed_dictionary::<T>()
                        .ok_or_else(|| Self::type_mismatch::<T>(resolved.data_type()))?;
                    let value_id = resolved.attribute_vector().get(offset);
                    self.scan_type
                        .accepts(dictionary[value_id as usize].total_cmp(search_value))
                }
                Segment::Reference(_) => return Err(StorageError::NestedReference),
            };

            if matched {
                pos_list.push(row_id);
            }
        }
        Ok(())
    }

    /// One output chunk: a reference segment per input column, all sharing
    /// the position list and the base table.
    fn assemble_output(input: &Table, base_table: &Arc<Table>, pos_list: Arc<PosList>) -> Table {
        let mut output = Table::new(input.chunk_size());
        let mut output_chunk = Chunk::new();

        for column_id in 0..input.column_count() {
            output.add_column_definition(input.column_name(column_id), input.column_type(column_id));
            output_chunk.add_segment(Segment::Reference(ReferenceSegment::new(
                Arc::clone(base_table),
                column_id,
                Arc::clone(&pos_list),
            )));
        }

        output.emplace_chunk(output_chunk);
        output
    }
}

impl Operator for TableScan {
    fn execute(&self) -> Result<Arc<Table>> {
        let input = self.input.execute()?;
        if self.column_id >= input.column_count() {
            return Err(StorageError::ColumnOutOfRange(self.column_id));
        }
        let data_type = input.column_type(self.column_id);
        with_data_type!(data_type, |T| self.scan_typed::<T>(&input))
    }
}

// ── Tests ──────────────────────────────────────────────────────────
