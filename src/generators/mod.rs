//! Trace generators, one per algorithm
//!
//! Each submodule exports a `descriptor()` (listing, default inputs, visual
//! config) and a `generate` function matching [`Generator`]. Generators read
//! their inputs through the helpers below, copy what they need, and record
//! one entry per atomic operation: a loop header, a comparison, an
//! assignment. Variables are snapshotted in full on every entry.
//!
//! [`Generator`]: crate::registry::Generator

pub mod binary_search;
pub mod set_matrix_zeroes;
pub mod stock_profit;
pub mod two_sum;
pub mod two_sum_sorted;
pub mod unique_paths;

use crate::error::GenerateError;
use crate::registry::InputMap;
use crate::trace::value::{Value, ValueKind};

fn input<'a>(inputs: &'a InputMap, key: &str) -> Result<&'a Value, GenerateError> {
    inputs.get(key).ok_or_else(|| GenerateError::MissingInput {
        key: key.to_string(),
    })
}

fn wrong_kind(key: &str, expected: ValueKind, got: &Value) -> GenerateError {
    GenerateError::WrongKind {
        key: key.to_string(),
        expected,
        got: got.kind(),
    }
}

pub(crate) fn number(inputs: &InputMap, key: &str) -> Result<i64, GenerateError> {
    let value = input(inputs, key)?;
    value
        .as_number()
        .ok_or_else(|| wrong_kind(key, ValueKind::Number, value))
}

pub(crate) fn sequence(inputs: &InputMap, key: &str) -> Result<Vec<i64>, GenerateError> {
    let value = input(inputs, key)?;
    value
        .as_sequence()
        .map(<[i64]>::to_vec)
        .ok_or_else(|| wrong_kind(key, ValueKind::Sequence, value))
}

/// A rectangular, non-empty matrix with every cell filled
pub(crate) fn dense_matrix(inputs: &InputMap, key: &str) -> Result<Vec<Vec<i64>>, GenerateError> {
    let value = input(inputs, key)?;
    let rows = value
        .as_matrix()
        .ok_or_else(|| wrong_kind(key, ValueKind::Matrix, value))?;

    let cols = rows.first().map_or(0, Vec::len);
    if rows.is_empty() || cols == 0 {
        return Err(GenerateError::invalid_input(key, "matrix must not be empty"));
    }

    rows.iter()
        .enumerate()
        .map(|(r, row)| {
            if row.len() != cols {
                return Err(GenerateError::invalid_input(
                    key,
                    format!("row {} has {} cells, expected {}", r, row.len(), cols),
                ));
            }
            row.iter()
                .enumerate()
                .map(|(c, cell)| {
                    cell.ok_or_else(|| {
                        GenerateError::invalid_input(key, format!("cell [{},{}] is empty", r, c))
                    })
                })
                .collect()
        })
        .collect()
}

pub(crate) fn require_sorted(key: &str, items: &[i64]) -> Result<(), GenerateError> {
    match items.windows(2).position(|w| w[0] > w[1]) {
        Some(i) => Err(GenerateError::invalid_input(
            key,
            format!("must be sorted, but {} > {} at index {}", items[i], items[i + 1], i),
        )),
        None => Ok(()),
    }
}

/// Optional index as a traced value
pub(crate) fn index_value(index: Option<usize>) -> Value {
    index.map_or(Value::Empty, |i| Value::Number(i as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, Value)]) -> InputMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_number_reports_wrong_kind() {
        let map = inputs(&[("m", Value::Sequence(vec![1]))]);
        assert_eq!(
            number(&map, "m"),
            Err(GenerateError::WrongKind {
                key: "m".to_string(),
                expected: ValueKind::Number,
                got: ValueKind::Sequence,
            })
        );
        assert!(matches!(
            number(&map, "n"),
            Err(GenerateError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_dense_matrix_rejects_ragged_and_empty() {
        let ragged = inputs(&[(
            "matrix",
            Value::Matrix(vec![vec![Some(1), Some(2)], vec![Some(3)]]),
        )]);
        assert!(matches!(
            dense_matrix(&ragged, "matrix"),
            Err(GenerateError::InvalidInput { .. })
        ));

        let empty = inputs(&[("matrix", Value::Matrix(vec![]))]);
        assert!(dense_matrix(&empty, "matrix").is_err());

        let hole = inputs(&[("matrix", Value::Matrix(vec![vec![Some(1), None]]))]);
        assert!(dense_matrix(&hole, "matrix").is_err());
    }

    #[test]
    fn test_require_sorted() {
        assert!(require_sorted("nums", &[1, 2, 2, 5]).is_ok());
        assert!(require_sorted("nums", &[]).is_ok());
        assert!(require_sorted("nums", &[3, 1]).is_err());
    }
}
