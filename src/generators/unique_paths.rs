//! 62. Unique Paths, bottom-up DP keeping a single row
//!
//! The optimized algorithm only stores `row`, but the trace also carries a
//! `grid` that fills in bottom-up so the whole table can be drawn. Cells not
//! yet computed are empty.

use super::number;
use crate::error::GenerateError;
use crate::registry::{
    AlgorithmDescriptor, InputMap, Layout, VisualConfig, VisualizerKind, VisualizerSpec,
};
use crate::trace::value::Value;
use crate::trace::{Highlight, Highlights, Marks, Role, TraceRecorder, Variables};

const CODE: &str = "\
class Solution:
    def uniquePaths(self, m: int, n: int) -> int:
        row = [1] * n

        for i in range(m - 1):
            newRow = [1] * n
            for j in range(n - 2, -1, -1):
                newRow[j] = newRow[j + 1] + row[j]
            row = newRow
        return row[0]";

mod line {
    pub const INIT: usize = 3;
    pub const OUTER: usize = 5;
    pub const NEW_ROW: usize = 6;
    pub const INNER: usize = 7;
    pub const COMBINE: usize = 8;
    pub const SWAP: usize = 9;
    pub const RETURN: usize = 10;
}

/// Grid dimensions beyond this are refused rather than traced
const MAX_DIMENSION: i64 = 20;

pub fn descriptor() -> AlgorithmDescriptor {
    let mut inputs = InputMap::new();
    inputs.insert("m".to_string(), Value::Number(3));
    inputs.insert("n".to_string(), Value::Number(7));

    AlgorithmDescriptor {
        id: "unique-paths",
        title: "62. Unique Paths",
        code: CODE,
        inputs,
        visual: VisualConfig {
            layout: Layout::Grid,
            visualizers: vec![
                VisualizerSpec::new("grid", VisualizerKind::Grid, "DP Grid State"),
                VisualizerSpec::new("row", VisualizerKind::Array, "Current Row (Optimized Memory)"),
            ],
        },
        generator: generate,
    }
}

struct State {
    m: usize,
    n: usize,
    row: Vec<i64>,
    grid: Vec<Vec<Option<i64>>>,
}

impl State {
    fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("grid".to_string(), Value::Matrix(self.grid.clone()));
        vars.insert("row".to_string(), Value::Sequence(self.row.clone()));
        vars.insert("m".to_string(), Value::Number(self.m as i64));
        vars.insert("n".to_string(), Value::Number(self.n as i64));
        vars
    }
}

fn dimension(inputs: &InputMap, key: &str) -> Result<usize, GenerateError> {
    let value = number(inputs, key)?;
    if !(1..=MAX_DIMENSION).contains(&value) {
        return Err(GenerateError::invalid_input(
            key,
            format!("must be between 1 and {}, got {}", MAX_DIMENSION, value),
        ));
    }
    Ok(value as usize)
}

pub fn generate(inputs: &InputMap, rec: &mut TraceRecorder) -> Result<(), GenerateError> {
    let m = dimension(inputs, "m")?;
    let n = dimension(inputs, "n")?;

    let mut grid = vec![vec![None; n]; m];
    grid[m - 1] = vec![Some(1); n];
    let mut state = State {
        m,
        n,
        row: vec![1; n],
        grid,
    };

    rec.record(
        line::INIT,
        "Initialize row = [1, 1, ..., 1] (Bottom row)",
        state.variables(),
        Highlights::default(),
    )?;

    for i in 0..m - 1 {
        let visual_row = m - 2 - i;
        rec.record(
            line::OUTER,
            format!("Start Outer Loop i={}. Calculating row {}.", i, visual_row),
            state.variables(),
            Highlights::default(),
        )?;

        let mut new_row = vec![1i64; n];
        state.grid[visual_row] = vec![Some(1); n];
        rec.record(
            line::NEW_ROW,
            "Initialize newRow with 1s",
            state.variables(),
            Marks::new()
                .mark("grid", Highlight::cell(visual_row, n - 1, Role::Current).labeled("new"))
                .build(),
        )?;

        for j in (0..n - 1).rev() {
            rec.record(
                line::INNER,
                format!("Start Inner Loop j={}.", j),
                state.variables(),
                Marks::new()
                    .mark("grid", Highlight::cell(visual_row, j, Role::Current).labeled("new"))
                    .mark("row", Highlight::index(j, Role::Current).labeled("j"))
                    .build(),
            )?;

            let right = new_row[j + 1];
            let down = state.row[j];
            new_row[j] = right
                .checked_add(down)
                .ok_or_else(|| GenerateError::invalid_input("m", "path count overflows"))?;
            state.grid[visual_row][j] = Some(new_row[j]);
            rec.record(
                line::COMBINE,
                format!("Calculate: {} (Right) + {} (Down) = {}", right, down, new_row[j]),
                state.variables(),
                Marks::new()
                    .mark("grid", Highlight::cell(visual_row, j, Role::Resolved).labeled("new"))
                    .mark("grid", Highlight::cell(visual_row, j + 1, Role::Reference).labeled("R"))
                    .mark("grid", Highlight::cell(visual_row + 1, j, Role::Reference).labeled("D"))
                    .mark("row", Highlight::index(j, Role::Current).labeled("j"))
                    .mark("row", Highlight::index(j + 1, Role::Reference).labeled("j+1"))
                    .build(),
            )?;
        }

        state.row = new_row;
        rec.record(
            line::SWAP,
            "Update row = newRow",
            state.variables(),
            Highlights::default(),
        )?;
    }

    rec.record(
        line::RETURN,
        format!("Return row[0] = {}", state.row[0]),
        state.variables(),
        Marks::new()
            .mark("grid", Highlight::cell(0, 0, Role::Resolved).labeled("ans"))
            .mark("row", Highlight::index(0, Role::Resolved).labeled("ans"))
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(m: i64, n: i64) -> Result<crate::trace::Trace, GenerateError> {
        let mut inputs = InputMap::new();
        inputs.insert("m".to_string(), Value::Number(m));
        inputs.insert("n".to_string(), Value::Number(n));
        descriptor().generate(&inputs)
    }

    #[test]
    fn test_grid_fills_bottom_up() {
        let trace = run(3, 3).unwrap();
        let last = trace.last().unwrap();
        let grid = last.variable("grid").and_then(Value::as_matrix).unwrap();
        assert_eq!(grid[0], vec![Some(6), Some(3), Some(1)]);
        assert_eq!(grid[1], vec![Some(3), Some(2), Some(1)]);
        assert_eq!(grid[2], vec![Some(1), Some(1), Some(1)]);
    }

    #[test]
    fn test_first_entry_has_empty_cells() {
        let trace = run(2, 2).unwrap();
        let grid = trace.get(0).unwrap().variable("grid").and_then(Value::as_matrix).unwrap();
        assert_eq!(grid[0], vec![None, None]);
    }

    #[test]
    fn test_single_row_or_column() {
        let trace = run(1, 5).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().unwrap().variable("row"), Some(&Value::Sequence(vec![1; 5])));

        let trace = run(4, 1).unwrap();
        assert!(trace.last().unwrap().description.ends_with("= 1"));
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        assert!(matches!(run(0, 3), Err(GenerateError::InvalidInput { .. })));
        assert!(run(3, -1).is_err());
        assert!(run(3, MAX_DIMENSION + 1).is_err());
    }
}
