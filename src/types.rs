//! Core identifier types, the closed scalar type set, and type dispatch.
//!
//! A column's element type is only known at execution time, carried as a
//! [`DataType`] tag next to the data. The closed set is bridged to
//! monomorphic code through the [`ColumnValue`] trait and the
//! [`with_data_type!`] macro, so operators dispatch with an exhaustive
//! match instead of downcasts.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StorageError};
use crate::storage::{Dictionary, DictionarySegment, ValueSegment};

// ── Identifiers ────────────────────────────────────────────────────

/// Index of a chunk within a table.
pub type ChunkId = u32;

/// Row offset within a chunk.
pub type ChunkOffset = u32;

/// Index of a column within a table's schema.
pub type ColumnId = u16;

/// Index into a dictionary segment's dictionary.
pub type ValueId = u32;

/// Sentinel value id: no qualifying dictionary entry.
///
/// Narrower attribute vectors never store this value in normal use, but a
/// narrowing cast of the sentinel still reads as the max of that width.
pub const INVALID_VALUE_ID: ValueId = ValueId::MAX;

/// Location of a single row: chunk plus offset within the chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId {
    pub chunk_id: ChunkId,
    pub chunk_offset: ChunkOffset,
}

impl RowId {
    pub fn new(chunk_id: ChunkId, chunk_offset: ChunkOffset) -> Self {
        Self {
            chunk_id,
            chunk_offset,
        }
    }
}

/// Ordered sequence of row ids, produced by operators and shared by every
/// reference segment of an operator's output.
pub type PosList = Vec<RowId>;

// ── Scan Comparison ────────────────────────────────────────────────

/// Comparison operator of a predicate scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanType {
    Equals,
    NotEquals,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
}

impl ScanType {
    /// Whether an `lhs cmp rhs` ordering outcome satisfies this operator.
    ///
    /// Lets a scan hoist a single comparator out of its inner loop: the
    /// per-row work is one `total_cmp` plus this match.
    pub fn accepts(self, ord: Ordering) -> bool {
        match self {
            ScanType::Equals => ord == Ordering::Equal,
            ScanType::NotEquals => ord != Ordering::Equal,
            ScanType::LessThan => ord == Ordering::Less,
            ScanType::LessThanEquals => ord != Ordering::Greater,
            ScanType::GreaterThan => ord == Ordering::Greater,
            ScanType::GreaterThanEquals => ord != Ordering::Less,
        }
    }
}

// ── Data Types ─────────────────────────────────────────────────────

/// Closed set of scalar column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Long,
    Float,
    Double,
    Text,
}

impl DataType {
    /// Stable boundary spelling, consistent between `add_column` and the
    /// dispatch in scan and compression.
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Text => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int" => Ok(DataType::Int),
            "long" => Ok(DataType::Long),
            "float" => Ok(DataType::Float),
            "double" => Ok(DataType::Double),
            "string" => Ok(DataType::Text),
            other => Err(StorageError::UnknownDataType(other.to_string())),
        }
    }
}

// ── Values ─────────────────────────────────────────────────────────

/// A scalar of unknown-at-compile-time type: tagged variant over the
/// closed type set. Conversion to a concrete type is strict, see
/// [`ColumnValue::from_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
}

impl Value {
    /// The tag of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int(_) => DataType::Int,
            Value::Long(_) => DataType::Long,
            Value::Float(_) => DataType::Float,
            Value::Double(_) => DataType::Double,
            Value::Text(_) => DataType::Text,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

// ── Column Value Trait ─────────────────────────────────────────────

/// A concrete member of the closed scalar type set.
///
/// Bridges untyped storage (`Value`, segment enums) and monomorphic
/// algorithms: strict conversion from the tagged variant, a total order
/// (floats compare via `total_cmp`, so sorting and binary search are
/// deterministic even with NaN), and variant downcasts into the segment
/// enums.
pub trait ColumnValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    const DATA_TYPE: DataType;

    /// Total order over the type.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Strict conversion from the tagged variant. No cross-type coercion:
    /// a `Value::Int` does not convert to `i64`.
    fn from_value(value: Value) -> Result<Self>;

    /// Wrap into the tagged variant.
    fn into_value(self) -> Value;

    /// Borrow the typed values of a value segment, if it holds this type.
    fn values_in(segment: &ValueSegment) -> Option<&[Self]>;

    /// Borrow the typed dictionary of a dictionary segment, if it holds
    /// this type.
    fn dictionary_in(segment: &DictionarySegment) -> Option<&[Self]>;
}

macro_rules! impl_column_value {
    ($ty:ty, $variant:ident, $cmp:expr) => {
        impl ColumnValue for $ty {
            const DATA_TYPE: DataType = DataType::$variant;

            fn total_cmp(&self, other: &Self) -> Ordering {
                $cmp(self, other)
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(StorageError::TypeMismatch {
                        expected: DataType::$variant,
                        actual: other.data_type(),
                    }),
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn values_in(segment: &ValueSegment) -> Option<&[Self]> {
                match segment {
                    ValueSegment::$variant(values) => Some(values),
                    _ => None,
                }
            }

            fn dictionary_in(segment: &DictionarySegment) -> Option<&[Self]> {
                match segment.dictionary() {
                    Dictionary::$variant(values) => Some(values),
                    _ => None,
                }
            }
        }
    };
}

impl_column_value!(i32, Int, |a: &i32, b: &i32| a.cmp(b));
impl_column_value!(i64, Long, |a: &i64, b: &i64| a.cmp(b));
impl_column_value!(f32, Float, f32::total_cmp);
impl_column_value!(f64, Double, f64::total_cmp);
impl_column_value!(String, Text, |a: &String, b: &String| a.cmp(b));

// ── Type Dispatch ──────────────────────────────────────────────────

/// Instantiate an expression once per member of the closed type set and
/// select the instantiation matching a runtime [`DataType`] tag.
///
/// ```ignore
/// let row_count = with_data_type!(table.column_type(id), |T| {
///     scan_column::<T>(&table, id)
/// });
/// ```
macro_rules! with_data_type {
    ($data_type:expr, |$t:ident| $body:expr) => {
        match $data_type {
            $crate::types::DataType::Int => {
                type $t = i32;
                $body
            }
            $crate::types::DataType::Long => {
                type $t = i64;
                $body
            }
            $crate::types::DataType::Float => {
                type $t = f32;
                $body
            }
            $crate::types::DataType::Double => {
                type $t = f64;
                $body
            }
            $crate::types::DataType::Text => {
                type $t = ::std::string::String;
                $body
            }
        }
    };
}

pub(crate) use with_data_type;

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_spelling_roundtrip() {
        for data_type in [
            DataType::Int,
            DataType::Long,
            DataType::Float,
            DataType::Double,
            DataType::Text,
        ] {
            assert_eq!(data_type.as_str().parse::<DataType>().unwrap(), data_type);
        }
    }

    #[test]
    fn test_data_type_unknown_spelling() {
        let err = "varchar".parse::<DataType>().unwrap_err();
        assert!(err.to_string().contains("varchar"));
    }

    #[test]
    fn test_scan_type_accepts() {
        use Ordering::*;

        assert!(ScanType::Equals.accepts(Equal));
        assert!(!ScanType::Equals.accepts(Less));

        assert!(ScanType::NotEquals.accepts(Less));
        assert!(ScanType::NotEquals.accepts(Greater));
        assert!(!ScanType::NotEquals.accepts(Equal));

        assert!(ScanType::LessThan.accepts(Less));
        assert!(!ScanType::LessThan.accepts(Equal));

        assert!(ScanType::LessThanEquals.accepts(Less));
        assert!(ScanType::LessThanEquals.accepts(Equal));
        assert!(!ScanType::LessThanEquals.accepts(Greater));

        assert!(ScanType::GreaterThan.accepts(Greater));
        assert!(!ScanType::GreaterThan.accepts(Equal));

        assert!(ScanType::GreaterThanEquals.accepts(Greater));
        assert!(ScanType::GreaterThanEquals.accepts(Equal));
        assert!(!ScanType::GreaterThanEquals.accepts(Less));
    }

    #[test]
    fn test_value_data_type() {
        assert_eq!(Value::from(1).data_type(), DataType::Int);
        assert_eq!(Value::from(1i64).data_type(), DataType::Long);
        assert_eq!(Value::from(1.0f32).data_type(), DataType::Float);
        assert_eq!(Value::from(1.0f64).data_type(), DataType::Double);
        assert_eq!(Value::from("x").data_type(), DataType::Text);
    }

    #[test]
    fn test_from_value_strict() {
        assert_eq!(i32::from_value(Value::Int(7)).unwrap(), 7);

        // No widening between variants.
        let err = i64::from_value(Value::Int(7)).unwrap_err();
        assert!(err.to_string().contains("expected long, got int"));

        let err = String::from_value(Value::Double(1.5)).unwrap_err();
        assert!(err.to_string().contains("expected string"));
    }

    #[test]
    fn test_float_total_order_handles_nan() {
        let mut values = vec![1.0f32, f32::NAN, -3.5, 0.0];
        values.sort_by(|a, b| ColumnValue::total_cmp(a, b));
        assert_eq!(values[0], -3.5);
        assert_eq!(values[1], 0.0);
        assert_eq!(values[2], 1.0);
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_with_data_type_dispatch() {
        fn name_of<T: ColumnValue>() -> DataType {
            T::DATA_TYPE
        }

        for data_type in [
            DataType::Int,
            DataType::Long,
            DataType::Float,
            DataType::Double,
            DataType::Text,
        ] {
            let resolved = with_data_type!(data_type, |T| name_of::<T>());
            assert_eq!(resolved, data_type);
        }
    }
}
