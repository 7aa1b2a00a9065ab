//! Table, Row, and CellValue data structures

use std::borrow::Cow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

use super::schema::Column;

/// A cell value with type information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // NaN compares equal to itself so equality stays reflexive
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl Eq for CellValue {}

/// Canonical bit pattern for hashing floats: all NaNs collapse to one
/// pattern and -0.0 collapses to 0.0, keeping Hash consistent with Eq.
fn canonical_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0f64.to_bits()
    } else {
        f.to_bits()
    }
}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Int and Float share a tag so that numerically equal values
        // hash alike, matching the cross-type Eq above.
        match self {
            CellValue::Null => 0u8.hash(state),
            CellValue::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            CellValue::Int(i) => {
                2u8.hash(state);
                canonical_bits(*i as f64).hash(state);
            }
            CellValue::Float(f) => {
                2u8.hash(state);
                canonical_bits(*f).hash(state);
            }
            CellValue::String(s) => {
                3u8.hash(state);
                s.hash(state);
            }
        }
    }
}

/// Numeric ordering with NaN sorting after every other value
fn num_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Total order over cell values: null first, then bool, then
    /// numbers, then text. Mixed Int/Float pairs compare numerically,
    /// with Int ordered before a numerically equal Float so the order
    /// never depends on input position. NaN sorts after all floats.
    ///
    /// This is deliberately not an `Ord` impl: the Int-before-Float
    /// tie-break contradicts the cross-type `Eq` above.
    pub fn total_order(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Bool(_), _) => Ordering::Less,
            (_, Bool(_)) => Ordering::Greater,
            (Int(a), Int(b)) => a.cmp(b),
            (Int(a), Float(b)) => num_order(*a as f64, *b).then(Ordering::Less),
            (Float(a), Int(b)) => num_order(*a, *b as f64).then(Ordering::Greater),
            (Float(a), Float(b)) => num_order(*a, *b),
            (Int(_) | Float(_), String(_)) => Ordering::Less,
            (String(_), Int(_) | Float(_)) => Ordering::Greater,
            (String(a), String(b)) => a.cmp(b),
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A row in the table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

impl From<Vec<CellValue>> for Row {
    fn from(cells: Vec<CellValue>) -> Self {
        Self::new(cells)
    }
}

/// A table containing columns and rows.
///
/// Construction validates the schema invariants: column names must be
/// unique, and every row must have exactly one cell per column. All core
/// operations borrow a table and return a new one; nothing mutates a
/// table after it is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Result<Self, SchemaError> {
        check_unique_names(&columns)?;
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Create a new empty table from column names
    pub fn with_column_names<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column::new(name, i))
            .collect();
        Self::new(columns)
    }

    /// Create a table from column names and rows of cells
    pub fn from_rows<I, S>(names: I, rows: Vec<Vec<CellValue>>) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::with_column_names(names)?;
        for cells in rows {
            table.push_row(cells)?;
        }
        Ok(table)
    }

    /// Add a row to the table
    pub fn push_row(&mut self, cells: Vec<CellValue>) -> Result<(), SchemaError> {
        if cells.len() != self.columns.len() {
            return Err(SchemaError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: cells.len(),
            });
        }
        self.rows.push(Row::new(cells));
        Ok(())
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterate over column names in schema order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Re-check the schema invariants. Fields are public, so operations
    /// that consume a table verify it before relying on the invariants.
    pub(crate) fn validate(&self) -> Result<(), SchemaError> {
        check_unique_names(&self.columns)?;
        for (i, row) in self.rows.iter().enumerate() {
            if row.cells.len() != self.columns.len() {
                return Err(SchemaError::RaggedRow {
                    row: i,
                    expected: self.columns.len(),
                    actual: row.cells.len(),
                });
            }
        }
        Ok(())
    }
}

fn check_unique_names(columns: &[Column]) -> Result<(), SchemaError> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for col in columns {
        if !seen.insert(col.name.as_str()) {
            return Err(SchemaError::DuplicateColumn {
                name: col.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = Table::with_column_names(["a", "b", "a"]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateColumn {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_ragged_row_rejected() {
        let mut table = Table::with_column_names(["a", "b"]).unwrap();
        let err = table.push_row(vec![CellValue::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::RaggedRow {
                row: 0,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_cross_type_numeric_equality() {
        assert_eq!(CellValue::Int(1), CellValue::Float(1.0));
        assert_ne!(CellValue::Int(1), CellValue::Float(1.5));
        assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
        assert_ne!(CellValue::Bool(true), CellValue::Int(1));
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::hash::{Hash, Hasher};

        fn hash_of(v: &CellValue) -> u64 {
            let mut h = rustc_hash::FxHasher::default();
            v.hash(&mut h);
            h.finish()
        }

        assert_eq!(hash_of(&CellValue::Int(1)), hash_of(&CellValue::Float(1.0)));
        assert_eq!(
            hash_of(&CellValue::Float(0.0)),
            hash_of(&CellValue::Float(-0.0))
        );
        assert_eq!(
            hash_of(&CellValue::Float(f64::NAN)),
            hash_of(&CellValue::Float(-f64::NAN))
        );
    }

    #[test]
    fn test_total_order_ranks_types() {
        use std::cmp::Ordering;

        let values = [
            CellValue::Null,
            CellValue::Bool(false),
            CellValue::Bool(true),
            CellValue::Int(-3),
            CellValue::Float(2.5),
            CellValue::Int(7),
            CellValue::Float(f64::NAN),
            CellValue::from("apple"),
            CellValue::from("banana"),
        ];

        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                let ord = a.total_order(b);
                // Antisymmetric against the known ranking
                assert_eq!(ord.reverse(), b.total_order(a));
                if i < j {
                    assert_eq!(ord, Ordering::Less, "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn test_total_order_breaks_numeric_ties_by_type() {
        use std::cmp::Ordering;

        assert_eq!(
            CellValue::Int(1).total_order(&CellValue::Float(1.0)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Float(1.0).total_order(&CellValue::Int(1)),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Int(2).total_order(&CellValue::Float(1.5)),
            Ordering::Greater
        );
    }
}
