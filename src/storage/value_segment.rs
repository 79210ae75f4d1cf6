//! Uncompressed typed column storage.

use crate::error::{Result, StorageError};
use crate::types::{ColumnValue, DataType, Value};

/// Contiguous typed array of column values, one enum variant per member of
/// the closed type set. Append-only while its chunk is being filled.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSegment {
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Text(Vec<String>),
}

impl ValueSegment {
    /// Create an empty segment for the given element type.
    pub fn new(data_type: DataType) -> Self {
        match data_type {
            DataType::Int => ValueSegment::Int(Vec::new()),
            DataType::Long => ValueSegment::Long(Vec::new()),
            DataType::Float => ValueSegment::Float(Vec::new()),
            DataType::Double => ValueSegment::Double(Vec::new()),
            DataType::Text => ValueSegment::Text(Vec::new()),
        }
    }

    /// Element type of this segment.
    pub fn data_type(&self) -> DataType {
        match self {
            ValueSegment::Int(_) => DataType::Int,
            ValueSegment::Long(_) => DataType::Long,
            ValueSegment::Float(_) => DataType::Float,
            ValueSegment::Double(_) => DataType::Double,
            ValueSegment::Text(_) => DataType::Text,
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            ValueSegment::Int(values) => values.len(),
            ValueSegment::Long(values) => values.len(),
            ValueSegment::Float(values) => values.len(),
            ValueSegment::Double(values) => values.len(),
            ValueSegment::Text(values) => values.len(),
        }
    }

    /// True if the segment holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one value. The variant must match the segment's element type.
    pub fn append(&mut self, value: Value) -> Result<()> {
        match (self, value) {
            (ValueSegment::Int(values), Value::Int(v)) => values.push(v),
            (ValueSegment::Long(values), Value::Long(v)) => values.push(v),
            (ValueSegment::Float(values), Value::Float(v)) => values.push(v),
            (ValueSegment::Double(values), Value::Double(v)) => values.push(v),
            (ValueSegment::Text(values), Value::Text(v)) => values.push(v),
            (segment, value) => {
                return Err(StorageError::TypeMismatch {
                    expected: segment.data_type(),
                    actual: value.data_type(),
                })
            }
        }
        Ok(())
    }

    /// Value at `i` as a tagged variant.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn get(&self, i: usize) -> Value {
        match self {
            ValueSegment::Int(values) => Value::Int(values[i]),
            ValueSegment::Long(values) => Value::Long(values[i]),
            ValueSegment::Float(values) => Value::Float(values[i]),
            ValueSegment::Double(values) => Value::Double(values[i]),
            ValueSegment::Text(values) => Value::Text(values[i].clone()),
        }
    }

    /// Borrow the values as a typed slice, or `None` when `T` is not this
    /// segment's element type.
    pub fn typed_values<T: ColumnValue>(&self) -> Option<&[T]> {
        T::values_in(self)
    }
}

// ── Tests ──────────────────────────────────────────────────────────
