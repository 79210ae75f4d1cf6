//! Horizontal table slice.

use crate::error::{Result, StorageError};
use crate::storage::segment::Segment;
use crate::types::{ColumnId, Value};

/// Ordered segments sharing one row domain: all segments of a chunk have
/// identical length. `Clone` so a table can copy-on-write a chunk that a
/// reader still holds.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    segments: Vec<Segment>,
}

impl Chunk {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Install one more column segment. The caller keeps segment lengths
    /// aligned with the chunk's row domain.
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Append one row across all segments.
    ///
    /// The row is validated against every segment before any value is
    /// stored, so a failed append leaves all segments at their old length.
    pub fn append(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.segments.len() {
            return Err(StorageError::RowWidthMismatch {
                expected: self.segments.len(),
                actual: values.len(),
            });
        }

        for (segment, value) in self.segments.iter().zip(&values) {
            match segment {
                Segment::Value(value_segment) => {
                    if value_segment.data_type() != value.data_type() {
                        return Err(StorageError::TypeMismatch {
                            expected: value_segment.data_type(),
                            actual: value.data_type(),
                        });
                    }
                }
                Segment::Dictionary(_) | Segment::Reference(_) => {
                    return Err(StorageError::ImmutableSegment)
                }
            }
        }

        for (segment, value) in self.segments.iter_mut().zip(values) {
            segment.append(value)?;
        }
        Ok(())
    }

    /// Segment of the given column.
    ///
    /// # Panics
    ///
    /// Panics if `column_id` is out of range.
    pub fn get_segment(&self, column_id: ColumnId) -> &Segment {
        &self.segments[column_id as usize]
    }

    /// Number of column segments.
    pub fn column_count(&self) -> u16 {
        self.segments.len() as u16
    }

    /// Number of rows: the first segment's length, zero for a chunk
    /// without segments.
    pub fn size(&self) -> usize {
        self.segments.first().map_or(0, Segment::len)
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::value_segment::ValueSegment;
    use crate::types::DataType;

    fn two_column_chunk() -> Chunk {
        let mut chunk = Chunk::new();
        chunk.add_segment(Segment::Value(ValueSegment::new(DataType::Int)));
        chunk.add_segment(Segment::Value(ValueSegment::new(DataType::Text)));
        chunk
    }

    #[test]
    fn test_empty_chunk_size() {
        assert_eq!(Chunk::new().size(), 0);
        assert_eq!(two_column_chunk().size(), 0);
    }

    #[test]
    fn test_append_row() {
        let mut chunk = two_column_chunk();
        chunk
            .append(vec![Value::Int(1), Value::from("one")])
            .unwrap();
        chunk
            .append(vec![Value::Int(2), Value::from("two")])
            .unwrap();

        assert_eq!(chunk.size(), 2);
        assert_eq!(chunk.column_count(), 2);
        assert_eq!(chunk.get_segment(0).get(1).unwrap(), Value::Int(2));
        assert_eq!(chunk.get_segment(1).get(0).unwrap(), Value::from("one"));
    }

    #[test]
    fn test_append_rejects_wrong_width() {
        let mut chunk = two_column_chunk();
        let err = chunk.append(vec![Value::Int(1)]).unwrap_err();
        assert!(err.to_string().contains("expected 2 values, got 1"));
        assert_eq!(chunk.size(), 0);
    }

    #[test]
    fn test_failed_append_leaves_segments_aligned() {
        let mut chunk = two_column_chunk();
        chunk
            .append(vec![Value::Int(1), Value::from("one")])
            .unwrap();

        // Second column has the wrong type; nothing may be stored.
        let err = chunk.append(vec![Value::Int(2), Value::Int(3)]).unwrap_err();
        assert!(err.to_string().contains("Type mismatch"));
        assert_eq!(chunk.get_segment(0).len(), 1);
        assert_eq!(chunk.get_segment(1).len(), 1);
    }
}
