//! 73. Set Matrix Zeroes, in place with first row/column markers

use super::dense_matrix;
use crate::error::GenerateError;
use crate::registry::{
    AlgorithmDescriptor, InputMap, Layout, VisualConfig, VisualizerKind, VisualizerSpec,
};
use crate::trace::value::Value;
use crate::trace::{Highlight, Highlights, Marks, Role, TraceRecorder, Variables};

const CODE: &str = "\
class Solution:
    def setZeroes(self, matrix: List[List[int]]) -> None:
        ROWS, COLS = len(matrix), len(matrix[0])
        rowZero = False

        for r in range(ROWS):
            for c in range(COLS):
                if matrix[r][c] == 0:
                    matrix[0][c] = 0
                    if r > 0:
                        matrix[r][0] = 0
                    else:
                        rowZero = True

        for r in range(1, ROWS):
            for c in range(1, COLS):
                if matrix[0][c] == 0 or matrix[r][0] == 0:
                    matrix[r][c] = 0

        if matrix[0][0] == 0:
            for r in range(ROWS):
                matrix[r][0] = 0

        if rowZero:
            for c in range(COLS):
                matrix[0][c] = 0";

mod line {
    pub const DIMENSIONS: usize = 3;
    pub const FLAG: usize = 4;
    pub const SCAN: usize = 8;
    pub const MARK_COL: usize = 9;
    pub const MARK_ROW: usize = 11;
    pub const ROW_ZERO: usize = 13;
    pub const CHECK_MARKERS: usize = 17;
    pub const APPLY: usize = 18;
    pub const CHECK_CORNER: usize = 20;
    pub const FIRST_COL: usize = 22;
    pub const CHECK_FLAG: usize = 24;
    pub const FIRST_ROW: usize = 26;
    /// Terminal entry: the function returned
    pub const DONE: usize = 0;
}

pub fn descriptor() -> AlgorithmDescriptor {
    let mut inputs = InputMap::new();
    inputs.insert(
        "matrix".to_string(),
        Value::filled_matrix(&[vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]),
    );

    AlgorithmDescriptor {
        id: "set-matrix-zeroes",
        title: "73. Set Matrix Zeroes",
        code: CODE,
        inputs,
        visual: VisualConfig {
            layout: Layout::Grid,
            visualizers: vec![
                VisualizerSpec::new("matrix", VisualizerKind::Grid, "Matrix State"),
                VisualizerSpec::new("rowZero", VisualizerKind::Value, "rowZero (Flag)"),
            ],
        },
        generator: generate,
    }
}

struct State {
    matrix: Vec<Vec<i64>>,
    row_zero: bool,
}

impl State {
    fn rows(&self) -> usize {
        self.matrix.len()
    }

    fn cols(&self) -> usize {
        self.matrix[0].len()
    }

    fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("matrix".to_string(), Value::filled_matrix(&self.matrix));
        vars.insert("rowZero".to_string(), Value::Flag(self.row_zero));
        vars.insert("ROWS".to_string(), Value::Number(self.rows() as i64));
        vars.insert("COLS".to_string(), Value::Number(self.cols() as i64));
        vars
    }
}

fn cell(r: usize, c: usize, role: Role) -> Highlight {
    Highlight::cell(r, c, role)
}

pub fn generate(inputs: &InputMap, rec: &mut TraceRecorder) -> Result<(), GenerateError> {
    let mut state = State {
        matrix: dense_matrix(inputs, "matrix")?,
        row_zero: false,
    };
    let (rows, cols) = (state.rows(), state.cols());

    rec.record(
        line::DIMENSIONS,
        format!("ROWS = {}, COLS = {}", rows, cols),
        state.variables(),
        Highlights::default(),
    )?;
    rec.record(
        line::FLAG,
        "rowZero = False",
        state.variables(),
        Highlights::default(),
    )?;

    // Pass 1: record zeroes in the first row and column
    for r in 0..rows {
        for c in 0..cols {
            let is_zero = state.matrix[r][c] == 0;
            rec.record(
                line::SCAN,
                format!("Pass 1: Checking cell [{},{}]...", r, c),
                state.variables(),
                Marks::new().mark("matrix", cell(r, c, Role::Current)).build(),
            )?;
            if !is_zero {
                continue;
            }

            state.matrix[0][c] = 0;
            rec.record(
                line::MARK_COL,
                format!("Found a 0 at [{},{}]! Mark column: matrix[0][{}] = 0", r, c, c),
                state.variables(),
                Marks::new()
                    .mark("matrix", cell(r, c, Role::Violation).labeled("Found 0"))
                    .mark("matrix", cell(0, c, Role::Reference).labeled("Mark Col"))
                    .build(),
            )?;

            if r > 0 {
                state.matrix[r][0] = 0;
                rec.record(
                    line::MARK_ROW,
                    format!("Mark row: matrix[{}][0] = 0", r),
                    state.variables(),
                    Marks::new()
                        .mark("matrix", cell(r, c, Role::Violation))
                        .mark("matrix", cell(r, 0, Role::Reference).labeled("Mark Row"))
                        .build(),
                )?;
            } else {
                state.row_zero = true;
                rec.record(
                    line::ROW_ZERO,
                    "Current row is 0. Set rowZero = True",
                    state.variables(),
                    Marks::new()
                        .mark("matrix", cell(r, c, Role::Violation))
                        .build(),
                )?;
            }
        }
    }

    // Pass 2: zero the inner cells from the markers
    for r in 1..rows {
        for c in 1..cols {
            rec.record(
                line::CHECK_MARKERS,
                format!("Pass 2: Checking [{},{}] using markers...", r, c),
                state.variables(),
                Marks::new()
                    .mark("matrix", cell(r, c, Role::Current))
                    .mark("matrix", cell(0, c, Role::Reference).labeled("Col Marker"))
                    .mark("matrix", cell(r, 0, Role::Reference).labeled("Row Marker"))
                    .build(),
            )?;

            if state.matrix[0][c] == 0 || state.matrix[r][0] == 0 {
                state.matrix[r][c] = 0;
                rec.record(
                    line::APPLY,
                    format!("Marker found! Setting matrix[{}][{}] = 0", r, c),
                    state.variables(),
                    Marks::new()
                        .mark("matrix", cell(r, c, Role::Resolved).labeled("Set 0"))
                        .mark("matrix", cell(0, c, Role::Reference))
                        .mark("matrix", cell(r, 0, Role::Reference))
                        .build(),
                )?;
            }
        }
    }

    let corner_zero = state.matrix[0][0] == 0;
    rec.record(
        line::CHECK_CORNER,
        format!(
            "Checking matrix[0][0]... It is {}.",
            if corner_zero { "0" } else { "not 0" }
        ),
        state.variables(),
        Marks::new().mark("matrix", cell(0, 0, Role::Reference)).build(),
    )?;
    if corner_zero {
        for r in 0..rows {
            state.matrix[r][0] = 0;
            rec.record(
                line::FIRST_COL,
                format!("Setting first column: matrix[{}][0] = 0", r),
                state.variables(),
                Marks::new().mark("matrix", cell(r, 0, Role::Resolved)).build(),
            )?;
        }
    }

    rec.record(
        line::CHECK_FLAG,
        format!(
            "rowZero is {}.",
            if state.row_zero { "True" } else { "False" }
        ),
        state.variables(),
        Highlights::default(),
    )?;
    if state.row_zero {
        for c in 0..cols {
            state.matrix[0][c] = 0;
            rec.record(
                line::FIRST_ROW,
                format!("Setting first row: matrix[0][{}] = 0", c),
                state.variables(),
                Marks::new().mark("matrix", cell(0, c, Role::Resolved)).build(),
            )?;
        }
    }

    let zeroes = state.matrix.iter().flatten().filter(|&&v| v == 0).count();
    rec.record(
        line::DONE,
        format!("Done. The matrix now holds {} zero cell(s).", zeroes),
        state.variables(),
        Highlights::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rows: &[Vec<i64>]) -> Result<crate::trace::Trace, GenerateError> {
        let mut inputs = InputMap::new();
        inputs.insert("matrix".to_string(), Value::filled_matrix(rows));
        descriptor().generate(&inputs)
    }

    fn final_matrix(trace: &crate::trace::Trace) -> Vec<Vec<Option<i64>>> {
        trace
            .last()
            .and_then(|e| e.variable("matrix"))
            .and_then(Value::as_matrix)
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_zero_in_first_row_sets_row_zero() {
        let trace = run(&[vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
        assert_eq!(
            final_matrix(&trace),
            vec![vec![Some(0), Some(0), Some(0)], vec![Some(0), Some(4), Some(5)]]
        );
        assert_eq!(
            trace.last().unwrap().variable("rowZero"),
            Some(&Value::Flag(true))
        );
    }

    #[test]
    fn test_no_zeroes_leaves_matrix_unchanged() {
        let rows = vec![vec![1, 2], vec![3, 4]];
        let trace = run(&rows).unwrap();
        assert_eq!(final_matrix(&trace), Value::filled_matrix(&rows).as_matrix().unwrap().to_vec());
        assert!(trace.last().unwrap().description.contains("0 zero cell"));
    }

    #[test]
    fn test_terminal_entry_has_no_active_line() {
        let trace = run(&[vec![1]]).unwrap();
        assert_eq!(trace.last().unwrap().line, line::DONE);
    }

    #[test]
    fn test_empty_matrix_is_invalid() {
        let mut inputs = InputMap::new();
        inputs.insert("matrix".to_string(), Value::Matrix(Vec::new()));
        assert!(matches!(
            descriptor().generate(&inputs),
            Err(GenerateError::InvalidInput { .. })
        ));
    }
}
