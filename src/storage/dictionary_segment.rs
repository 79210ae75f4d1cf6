//! Dictionary-compressed column storage.
//!
//! A dictionary segment owns a sorted, deduplicated dictionary of values
//! and a width-fitted attribute vector mapping each row offset to its
//! dictionary position. Immutable after construction.

use crate::error::Result;
use crate::storage::attribute_vector::AttributeVector;
use crate::storage::value_segment::ValueSegment;
use crate::types::{ColumnValue, DataType, Value, ValueId, INVALID_VALUE_ID};

// ── Bound Search ───────────────────────────────────────────────────

/// Smallest index whose entry is `>= value`, or [`INVALID_VALUE_ID`] when
/// every entry is smaller.
///
/// The dictionary holds at most one entry equal to `value`, so any hit
/// reported by the binary search is already the bound.
pub(crate) fn lower_bound_in<T: ColumnValue>(dictionary: &[T], value: &T) -> ValueId {
    let index = match dictionary.binary_search_by(|entry| entry.total_cmp(value)) {
        Ok(index) | Err(index) => index,
    };
    if index == dictionary.len() {
        INVALID_VALUE_ID
    } else {
        index as ValueId
    }
}

/// Smallest index whose entry is `> value`, or [`INVALID_VALUE_ID`] when
/// every entry is smaller or equal.
pub(crate) fn upper_bound_in<T: ColumnValue>(dictionary: &[T], value: &T) -> ValueId {
    let index = match dictionary.binary_search_by(|entry| entry.total_cmp(value)) {
        Ok(index) => index + 1,
        Err(index) => index,
    };
    if index == dictionary.len() {
        INVALID_VALUE_ID
    } else {
        index as ValueId
    }
}

// ── Dictionary ─────────────────────────────────────────────────────

/// Sorted, deduplicated value dictionary, one variant per member of the
/// closed type set. Strictly increasing under the type's total order.
#[derive(Debug, Clone, PartialEq)]
pub enum Dictionary {
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Text(Vec<String>),
}

impl Dictionary {
    fn len(&self) -> usize {
        match self {
            Dictionary::Int(values) => values.len(),
            Dictionary::Long(values) => values.len(),
            Dictionary::Float(values) => values.len(),
            Dictionary::Double(values) => values.len(),
            Dictionary::Text(values) => values.len(),
        }
    }

    fn get(&self, value_id: ValueId) -> Value {
        match self {
            Dictionary::Int(values) => Value::Int(values[value_id as usize]),
            Dictionary::Long(values) => Value::Long(values[value_id as usize]),
            Dictionary::Float(values) => Value::Float(values[value_id as usize]),
            Dictionary::Double(values) => Value::Double(values[value_id as usize]),
            Dictionary::Text(values) => Value::Text(values[value_id as usize].clone()),
        }
    }
}

// ── Dictionary Segment ─────────────────────────────────────────────

/// Dictionary-compressed segment: sorted unique dictionary plus a
/// width-fitted attribute vector of the same length as the source data.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionarySegment {
    dictionary: Dictionary,
    attribute_vector: AttributeVector,
}

/// Sort, deduplicate, and index one typed column.
fn build<T: ColumnValue>(values: &[T]) -> Result<(Vec<T>, AttributeVector)> {
    let mut dictionary = values.to_vec();
    dictionary.sort_unstable_by(|a, b| a.total_cmp(b));
    dictionary.dedup_by(|a, b| a.total_cmp(b) == std::cmp::Ordering::Equal);

    let mut attribute_vector = AttributeVector::fitted(dictionary.len(), values.len())?;
    for (i, value) in values.iter().enumerate() {
        let value_id = lower_bound_in(&dictionary, value);
        debug_assert!(
            value_id != INVALID_VALUE_ID,
            "value must be present in its own dictionary"
        );
        attribute_vector.set(i, value_id)?;
    }
    Ok((dictionary, attribute_vector))
}

impl DictionarySegment {
    /// Compress a value segment. The logical values are preserved exactly;
    /// only the physical layout changes.
    pub fn from_value_segment(segment: &ValueSegment) -> Result<Self> {
        let (dictionary, attribute_vector) = match segment {
            ValueSegment::Int(values) => {
                let (dictionary, vector) = build(values)?;
                (Dictionary::Int(dictionary), vector)
            }
            ValueSegment::Long(values) => {
                let (dictionary, vector) = build(values)?;
                (Dictionary::Long(dictionary), vector)
            }
            ValueSegment::Float(values) => {
                let (dictionary, vector) = build(values)?;
                (Dictionary::Float(dictionary), vector)
            }
            ValueSegment::Double(values) => {
                let (dictionary, vector) = build(values)?;
                (Dictionary::Double(dictionary), vector)
            }
            ValueSegment::Text(values) => {
                let (dictionary, vector) = build(values)?;
                (Dictionary::Text(dictionary), vector)
            }
        };
        Ok(Self {
            dictionary,
            attribute_vector,
        })
    }

    /// Element type of this segment.
    pub fn data_type(&self) -> DataType {
        match &self.dictionary {
            Dictionary::Int(_) => DataType::Int,
            Dictionary::Long(_) => DataType::Long,
            Dictionary::Float(_) => DataType::Float,
            Dictionary::Double(_) => DataType::Double,
            Dictionary::Text(_) => DataType::Text,
        }
    }

    /// Value at row offset `i`, decoded through the dictionary.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn get(&self, i: usize) -> Value {
        self.value_by_value_id(self.attribute_vector.get(i))
    }

    /// Dictionary entry for `value_id`.
    ///
    /// # Panics
    ///
    /// Panics if `value_id` is not a dictionary position.
    pub fn value_by_value_id(&self, value_id: ValueId) -> Value {
        self.dictionary.get(value_id)
    }

    /// Smallest value id whose entry is `>= value`, or
    /// [`INVALID_VALUE_ID`] when every entry is smaller. Fails when the
    /// search value's type does not match the segment.
    pub fn lower_bound(&self, value: &Value) -> Result<ValueId> {
        match &self.dictionary {
            Dictionary::Int(dict) => Ok(lower_bound_in(dict, &i32::from_value(value.clone())?)),
            Dictionary::Long(dict) => Ok(lower_bound_in(dict, &i64::from_value(value.clone())?)),
            Dictionary::Float(dict) => Ok(lower_bound_in(dict, &f32::from_value(value.clone())?)),
            Dictionary::Double(dict) => Ok(lower_bound_in(dict, &f64::from_value(value.clone())?)),
            Dictionary::Text(dict) => Ok(lower_bound_in(dict, &String::from_value(value.clone())?)),
        }
    }

    /// Smallest value id whose entry is `> value`, or
    /// [`INVALID_VALUE_ID`] when every entry is smaller or equal. Fails
    /// when the search value's type does not match the segment.
    pub fn upper_bound(&self, value: &Value) -> Result<ValueId> {
        match &self.dictionary {
            Dictionary::Int(dict) => Ok(upper_bound_in(dict, &i32::from_value(value.clone())?)),
            Dictionary::Long(dict) => Ok(upper_bound_in(dict, &i64::from_value(value.clone())?)),
            Dictionary::Float(dict) => Ok(upper_bound_in(dict, &f32::from_value(value.clone())?)),
            Dictionary::Double(dict) => Ok(upper_bound_in(dict, &f64::from_value(value.clone())?)),
            Dictionary::Text(dict) => Ok(upper_bound_in(dict, &String::from_value(value.clone())?)),
        }
    }

    /// Number of distinct values in the dictionary.
    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Number of rows (attribute vector entries).
    pub fn len(&self) -> usize {
        self.attribute_vector.len()
    }

    /// True if the segment holds no rows.
    pub fn is_empty(&self) -> bool {
        self.attribute_vector.is_empty()
    }

    /// The underlying dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The underlying attribute vector.
    pub fn attribute_vector(&self) -> &AttributeVector {
        &self.attribute_vector
    }

    /// Borrow the dictionary as a typed slice, or `None` when `T` is not
    /// this segment's element type.
    pub fn typed_dictionary<T: ColumnValue>(&self) -> Option<&[T]> {
        T::dictionary_in(self)
    }
}

// ── Tests ──────────────────────────────────────────────────────────
