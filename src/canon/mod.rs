//! Canonical form and equivalence for tables
//!
//! Two tables represent the same data set when one is a row and/or column
//! permutation of the other. `canonicalize` produces the permutation-
//! independent normal form; `equivalent` compares two tables through it.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;

use crate::config::{EquivOptions, NullEquality};
use crate::error::SchemaError;
use crate::model::{CellValue, Column, Table};

/// Produce the canonical form of a table: columns sorted by name, rows
/// sorted by the composite of all cells in that column order.
///
/// The result is a pure function of the input's column set and multiset of
/// rows; input row and column order do not matter. Canonicalizing an
/// already canonical table returns an identical table.
pub fn canonicalize(table: &Table) -> Result<Table, SchemaError> {
    table.validate()?;

    // Column permutation: lexicographic by name, byte order
    let mut order: Vec<usize> = (0..table.column_count()).collect();
    order.sort_by(|&a, &b| table.columns[a].name.cmp(&table.columns[b].name));

    let columns: Vec<Column> = order
        .iter()
        .enumerate()
        .map(|(new_index, &old_index)| {
            let col = &table.columns[old_index];
            Column::with_type(col.name.clone(), new_index, col.inferred_type)
        })
        .collect();

    let mut rows: Vec<Vec<CellValue>> = table
        .rows
        .iter()
        .map(|row| order.iter().map(|&i| row.cells[i].clone()).collect())
        .collect();

    rows.sort_by(|a, b| compare_rows(a, b));

    let mut result = Table::new(columns)?;
    for cells in rows {
        result.push_row(cells)?;
    }
    Ok(result)
}

/// Lexicographic comparison of two rows under the cell total order
fn compare_rows(a: &[CellValue], b: &[CellValue]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.total_order(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Check whether two tables are equivalent up to row and column
/// permutation, with null cells comparing equal to each other.
pub fn equivalent(a: &Table, b: &Table) -> Result<bool, SchemaError> {
    equivalent_with(a, b, &EquivOptions::default())
}

/// Equivalence with an explicit null-equality policy.
///
/// Tables with different column-name sets are never equivalent; that is a
/// `false` result, not an error.
pub fn equivalent_with(a: &Table, b: &Table, opts: &EquivOptions) -> Result<bool, SchemaError> {
    a.validate()?;
    b.validate()?;

    let names_a: FxHashSet<&str> = a.column_names().collect();
    let names_b: FxHashSet<&str> = b.column_names().collect();
    if names_a != names_b {
        return Ok(false);
    }

    let canon_a = canonicalize(a)?;
    let canon_b = canonicalize(b)?;

    if canon_a.row_count() != canon_b.row_count() {
        return Ok(false);
    }

    for (row_a, row_b) in canon_a.rows.iter().zip(&canon_b.rows) {
        for (x, y) in row_a.cells.iter().zip(&row_b.cells) {
            if !cells_equal(x, y, opts.null_equality) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn cells_equal(a: &CellValue, b: &CellValue, null_equality: NullEquality) -> bool {
    match (a.is_null(), b.is_null()) {
        (true, true) => null_equality == NullEquality::Equal,
        (false, false) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            ["name", "score", "active"],
            vec![
                vec!["carol".into(), CellValue::Int(3), true.into()],
                vec!["alice".into(), CellValue::Int(1), false.into()],
                vec!["bob".into(), CellValue::Int(2), true.into()],
            ],
        )
        .unwrap()
    }

    /// Reorder rows and columns of a table by explicit permutations
    fn permuted(table: &Table, col_perm: &[usize], row_perm: &[usize]) -> Table {
        let names: Vec<&str> = col_perm
            .iter()
            .map(|&i| table.columns[i].name.as_str())
            .collect();
        let rows: Vec<Vec<CellValue>> = row_perm
            .iter()
            .map(|&r| col_perm.iter().map(|&c| table.rows[r].cells[c].clone()).collect())
            .collect();
        Table::from_rows(names, rows).unwrap()
    }

    #[test]
    fn test_canonicalize_sorts_columns_and_rows() {
        let canon = canonicalize(&sample()).unwrap();
        let names: Vec<&str> = canon.column_names().collect();
        assert_eq!(names, ["active", "name", "score"]);
        // Rows sorted by (active, name, score): false first, then by name
        assert_eq!(canon.rows[0].cells[1], "alice".into());
        assert_eq!(canon.rows[1].cells[1], "bob".into());
        assert_eq!(canon.rows[2].cells[1], "carol".into());
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let once = canonicalize(&sample()).unwrap();
        let twice = canonicalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_canonicalize_ignores_input_row_order() {
        let table = sample();
        let shuffled = permuted(&table, &[0, 1, 2], &[2, 0, 1]);
        assert_eq!(
            canonicalize(&table).unwrap(),
            canonicalize(&shuffled).unwrap()
        );
    }

    #[test]
    fn test_equivalent_under_permutation() {
        let table = sample();
        let shuffled = permuted(&table, &[2, 0, 1], &[1, 2, 0]);
        assert!(equivalent(&table, &shuffled).unwrap());
        assert!(equivalent(&shuffled, &table).unwrap());
    }

    #[test]
    fn test_equivalent_is_reflexive() {
        let table = sample();
        assert!(equivalent(&table, &table).unwrap());
    }

    #[test]
    fn test_equivalent_is_symmetric_on_mismatch() {
        let a = sample();
        let mut b = sample();
        b.rows[0].cells[1] = CellValue::Int(99);
        assert_eq!(equivalent(&a, &b).unwrap(), equivalent(&b, &a).unwrap());
        assert!(!equivalent(&a, &b).unwrap());
    }

    #[test]
    fn test_different_column_sets_are_not_equivalent() {
        let a = Table::from_rows(["x", "y"], vec![vec![1i64.into(), 2i64.into()]]).unwrap();
        let b = Table::from_rows(["x", "z"], vec![vec![1i64.into(), 2i64.into()]]).unwrap();
        assert!(!equivalent(&a, &b).unwrap());
    }

    #[test]
    fn test_row_count_mismatch() {
        let a = Table::from_rows(["x"], vec![vec![1i64.into()]]).unwrap();
        let b = Table::from_rows(["x"], vec![vec![1i64.into()], vec![1i64.into()]]).unwrap();
        assert!(!equivalent(&a, &b).unwrap());
    }

    #[test]
    fn test_numeric_equality_across_types() {
        let a = Table::from_rows(["x"], vec![vec![CellValue::Int(1)]]).unwrap();
        let b = Table::from_rows(["x"], vec![vec![CellValue::Float(1.0)]]).unwrap();
        assert!(equivalent(&a, &b).unwrap());
    }

    #[test]
    fn test_null_equality_policies() {
        let a = Table::from_rows(["x"], vec![vec![CellValue::Null]]).unwrap();
        let b = Table::from_rows(["x"], vec![vec![CellValue::Null]]).unwrap();

        // Default: null == null
        assert!(equivalent(&a, &b).unwrap());

        // Legacy policy: strictly reflexive comparison, null never equals null
        let opts = EquivOptions::new().with_null_equality(NullEquality::Distinct);
        assert!(!equivalent_with(&a, &b, &opts).unwrap());
    }

    #[test]
    fn test_invalid_table_is_an_error() {
        let mut table = sample();
        table.columns[1].name = "name".to_string();
        assert!(matches!(
            canonicalize(&table),
            Err(SchemaError::DuplicateColumn { .. })
        ));
    }
}
