//! Long-to-wide reshape ("cast")
//!
//! A long table stores one observation per row as a (key, value) pair next
//! to the identifying columns. `cast` pivots it wide: one output column per
//! distinct key value, rows joined on the remaining fixed columns.

use indexmap::map::Entry;
use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::FxBuildHasher;

use crate::config::{CastOptions, DuplicatePolicy, JoinMode};
use crate::error::{CastError, SchemaError};
use crate::model::{CellValue, Table};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Mapping from a fixed-column tuple to the value cell of one sub-table
type GroupMap = FxIndexMap<Vec<CellValue>, CellValue>;

/// Reshape a long table into wide form.
///
/// The fixed columns are the schema minus `key_column` and `value_column`,
/// in schema order. The result has one column per distinct `key_column`
/// value (named by its display string, in first-appearance order) appended
/// after the fixed columns, with rows combined by a hash join on the
/// fixed-column tuple according to `opts.join`.
///
/// Duplicate `(fixed columns, key)` combinations are ambiguous; they fail
/// with `CastError::DuplicateKey` under the default `Reject` policy, or
/// keep the first occurrence in input order under `FirstWins`.
pub fn cast(
    table: &Table,
    key_column: &str,
    value_column: &str,
    opts: &CastOptions,
) -> Result<Table, CastError> {
    table.validate()?;

    if key_column == value_column {
        return Err(SchemaError::KeyValueSame {
            name: key_column.to_string(),
        }
        .into());
    }
    let key_idx = table
        .column_index(key_column)
        .ok_or_else(|| SchemaError::UnknownColumn {
            name: key_column.to_string(),
        })?;
    let value_idx = table
        .column_index(value_column)
        .ok_or_else(|| SchemaError::UnknownColumn {
            name: value_column.to_string(),
        })?;

    let fixed: Vec<usize> = (0..table.column_count())
        .filter(|&i| i != key_idx && i != value_idx)
        .collect();

    // Group row indices by key value, in first-appearance order
    let mut groups: FxIndexMap<CellValue, Vec<usize>> = FxIndexMap::default();
    for (i, row) in table.rows.iter().enumerate() {
        groups
            .entry(row.cells[key_idx].clone())
            .or_default()
            .push(i);
    }

    // One sub-table per distinct key value: fixed tuple -> value cell.
    // Groups are independent, so they are built in parallel; collect()
    // keeps them in key order.
    let groups: Vec<(&CellValue, &Vec<usize>)> = groups.iter().collect();
    let sub_maps: Vec<GroupMap> = groups
        .par_iter()
        .map(|&(key, row_indices)| {
            build_group(table, &fixed, value_idx, key, row_indices, opts.duplicates)
        })
        .collect::<Result<_, CastError>>()?;

    // Accumulating join over the sub-tables, left to right
    let mut acc: FxIndexMap<Vec<CellValue>, Vec<CellValue>> = FxIndexMap::default();
    for (i, sub) in sub_maps.iter().enumerate() {
        if i == 0 {
            acc = sub
                .iter()
                .map(|(tuple, value)| (tuple.clone(), vec![value.clone()]))
                .collect();
            continue;
        }
        match opts.join {
            JoinMode::Inner => {
                let mut next: FxIndexMap<Vec<CellValue>, Vec<CellValue>> = FxIndexMap::default();
                for (tuple, mut values) in std::mem::take(&mut acc) {
                    if let Some(value) = sub.get(&tuple) {
                        values.push(value.clone());
                        next.insert(tuple, values);
                    }
                }
                acc = next;
            }
            JoinMode::Outer => {
                for (tuple, values) in acc.iter_mut() {
                    values.push(sub.get(tuple).cloned().unwrap_or(CellValue::Null));
                }
                for (tuple, value) in sub {
                    if !acc.contains_key(tuple) {
                        let mut values = vec![CellValue::Null; i];
                        values.push(value.clone());
                        acc.insert(tuple.clone(), values);
                    }
                }
            }
        }
    }

    // Result schema: fixed columns, then one column per distinct key value
    let mut names: Vec<String> = fixed
        .iter()
        .map(|&i| table.columns[i].name.clone())
        .collect();
    names.extend(groups.iter().map(|(key, _)| key.display().into_owned()));

    let mut result = Table::with_column_names(names).map_err(CastError::Schema)?;
    for (tuple, values) in acc {
        let mut cells = tuple;
        cells.extend(values);
        result.push_row(cells).map_err(CastError::Schema)?;
    }
    Ok(result)
}

/// Build the sub-table for one key value: rows where the key column equals
/// `key`, projected onto the fixed columns plus the value column.
fn build_group(
    table: &Table,
    fixed: &[usize],
    value_idx: usize,
    key: &CellValue,
    row_indices: &[usize],
    duplicates: DuplicatePolicy,
) -> Result<GroupMap, CastError> {
    let mut map = GroupMap::default();
    for &r in row_indices {
        let row = &table.rows[r];
        let tuple: Vec<CellValue> = fixed.iter().map(|&i| row.cells[i].clone()).collect();
        match map.entry(tuple) {
            Entry::Occupied(entry) => match duplicates {
                DuplicatePolicy::Reject => {
                    return Err(CastError::DuplicateKey {
                        key: key.display().into_owned(),
                        group: display_tuple(entry.key()),
                    });
                }
                // Row indices come in input order, so the first insert wins
                DuplicatePolicy::FirstWins => {}
            },
            Entry::Vacant(entry) => {
                entry.insert(row.cells[value_idx].clone());
            }
        }
    }
    Ok(map)
}

fn display_tuple(cells: &[CellValue]) -> String {
    cells
        .iter()
        .map(|c| c.display().into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}
