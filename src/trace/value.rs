//! Snapshot value representation
//!
//! This module defines the [`Value`] enum, the closed set of shapes a traced
//! variable (or an input) can take. Renderers dispatch on it exhaustively.
//!
//! # Value Types
//!
//! - [`Value::Empty`]: the null sentinel, a drawable "nothing yet" value
//! - [`Value::Flag`]: boolean flag
//! - [`Value::Number`]: 64-bit signed integer
//! - [`Value::Sequence`]: ordered list of numbers
//! - [`Value::Matrix`]: rows of numbers, where a cell may be empty
//! - [`Value::Map`]: number keyed map, ordered by key
//!
//! # Text Form
//!
//! Inputs can be written on the command line. [`Value::parse`] reads a value
//! of a known [`ValueKind`]:
//!
//! ```text
//! Number    3
//! Sequence  2,7,11,15      or  [2, 7, 11, 15]
//! Matrix    1,1,1;1,0,1    (rows split by ';', `_` for an empty cell)
//! Map       2:0,7:1
//! Flag      true
//! Empty     null
//! ```

use crate::error::ValueParseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Variable values captured in a trace entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    #[default]
    Empty,
    Flag(bool),
    Number(i64),
    Sequence(Vec<i64>),
    Matrix(Vec<Vec<Option<i64>>>),
    Map(BTreeMap<i64, i64>),
}

/// The shape of a [`Value`], without its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Empty,
    Flag,
    Number,
    Sequence,
    Matrix,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Empty => "empty",
            ValueKind::Flag => "flag",
            ValueKind::Number => "number",
            ValueKind::Sequence => "sequence",
            ValueKind::Matrix => "matrix",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Build a matrix value where every cell is filled
    pub fn filled_matrix(rows: &[Vec<i64>]) -> Self {
        Value::Matrix(
            rows.iter()
                .map(|row| row.iter().copied().map(Some).collect())
                .collect(),
        )
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Flag(_) => ValueKind::Flag,
            Value::Number(_) => ValueKind::Number,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Matrix(_) => ValueKind::Matrix,
            Value::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_empty_value(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Get the number, returns None if not a Number
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the flag, returns None if not a Flag
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[i64]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&[Vec<Option<i64>>]> {
        match self {
            Value::Matrix(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<i64, i64>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Parse the text form of a value of the given kind
    pub fn parse(text: &str, kind: ValueKind) -> Result<Value, ValueParseError> {
        let text = text.trim();
        match kind {
            ValueKind::Empty => match text {
                "" | "null" | "none" | "_" => Ok(Value::Empty),
                _ => Err(ValueParseError::new(kind, text, "expected `null`")),
            },
            ValueKind::Flag => match text.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(Value::Flag(true)),
                "false" | "0" | "no" => Ok(Value::Flag(false)),
                _ => Err(ValueParseError::new(kind, text, "expected `true` or `false`")),
            },
            ValueKind::Number => parse_number(text)
                .map(Value::Number)
                .map_err(|message| ValueParseError::new(kind, text, message)),
            ValueKind::Sequence => parse_list(strip_brackets(text, '[', ']'))
                .map(Value::Sequence)
                .map_err(|message| ValueParseError::new(kind, text, message)),
            ValueKind::Matrix => parse_matrix(text)
                .map(Value::Matrix)
                .map_err(|message| ValueParseError::new(kind, text, message)),
            ValueKind::Map => parse_map(strip_brackets(text, '{', '}'))
                .map(Value::Map)
                .map_err(|message| ValueParseError::new(kind, text, message)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => f.write_str("null"),
            Value::Flag(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Number(n) => write!(f, "{}", n),
            Value::Sequence(items) => write!(f, "[{}]", join(items.iter())),
            Value::Matrix(rows) => {
                f.write_str("[")?;
                for (idx, row) in rows.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    let cells = row
                        .iter()
                        .map(|cell| cell.map_or_else(|| "_".to_string(), |n| n.to_string()))
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, "[{}]", cells)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                let entries = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{}}}", entries)
            }
        }
    }
}

fn join<'a>(items: impl Iterator<Item = &'a i64>) -> String {
    items
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn strip_brackets(text: &str, open: char, close: char) -> &str {
    text.strip_prefix(open)
        .and_then(|rest| rest.strip_suffix(close))
        .unwrap_or(text)
        .trim()
}

fn parse_number(text: &str) -> Result<i64, String> {
    text.trim()
        .parse::<i64>()
        .map_err(|e| format!("`{}` is not an integer ({})", text.trim(), e))
}

fn parse_list(text: &str) -> Result<Vec<i64>, String> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',').map(parse_number).collect()
}

fn parse_cell(text: &str) -> Result<Option<i64>, String> {
    match text.trim() {
        "_" | "null" => Ok(None),
        other => parse_number(other).map(Some),
    }
}

fn parse_matrix(text: &str) -> Result<Vec<Vec<Option<i64>>>, String> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(';')
        .map(|row| {
            let row = strip_brackets(row.trim(), '[', ']');
            if row.is_empty() {
                return Ok(Vec::new());
            }
            row.split(',').map(parse_cell).collect()
        })
        .collect()
}

fn parse_map(text: &str) -> Result<BTreeMap<i64, i64>, String> {
    if text.is_empty() {
        return Ok(BTreeMap::new());
    }
    text.split(',')
        .map(|pair| {
            let (key, value) = pair
                .split_once(':')
                .ok_or_else(|| format!("`{}` is not a key:value pair", pair.trim()))?;
            Ok((parse_number(key)?, parse_number(value)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_and_flag() {
        assert_eq!(Value::parse(" 42 ", ValueKind::Number).unwrap(), Value::Number(42));
        assert_eq!(Value::parse("-7", ValueKind::Number).unwrap(), Value::Number(-7));
        assert_eq!(Value::parse("True", ValueKind::Flag).unwrap(), Value::Flag(true));
        assert!(Value::parse("seven", ValueKind::Number).is_err());
    }

    #[test]
    fn test_parse_sequence_with_and_without_brackets() {
        let expected = Value::Sequence(vec![2, 7, 11, 15]);
        assert_eq!(Value::parse("2,7,11,15", ValueKind::Sequence).unwrap(), expected);
        assert_eq!(Value::parse("[2, 7, 11, 15]", ValueKind::Sequence).unwrap(), expected);
        assert_eq!(
            Value::parse("[]", ValueKind::Sequence).unwrap(),
            Value::Sequence(Vec::new())
        );
    }

    #[test]
    fn test_parse_matrix_rows() {
        let value = Value::parse("1,1,1; 1,0,1; 1,_,1", ValueKind::Matrix).unwrap();
        let rows = value.as_matrix().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![Some(1), Some(0), Some(1)]);
        assert_eq!(rows[2][1], None);
    }

    #[test]
    fn test_parse_map() {
        let value = Value::parse("{2:0, 7:1}", ValueKind::Map).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get(&2), Some(&0));
        assert_eq!(map.get(&7), Some(&1));
        assert!(Value::parse("2-0", ValueKind::Map).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Empty.to_string(), "null");
        assert_eq!(Value::Sequence(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(
            Value::Matrix(vec![vec![Some(1), None]]).to_string(),
            "[[1, _]]"
        );
        let map = Value::Map([(2, 0)].into_iter().collect());
        assert_eq!(map.to_string(), "{2: 0}");
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::Number(1).kind(), ValueKind::Number);
        assert_eq!(Value::filled_matrix(&[vec![1]]).kind(), ValueKind::Matrix);
        assert_eq!(Value::default().kind(), ValueKind::Empty);
    }
}
