//! 167. Two Sum II, converging pointers over a sorted array

use super::{number, require_sorted, sequence};
use crate::error::GenerateError;
use crate::registry::{
    AlgorithmDescriptor, InputMap, Layout, VisualConfig, VisualizerKind, VisualizerSpec,
};
use crate::trace::value::Value;
use crate::trace::{Highlight, Highlights, Marks, Role, TraceRecorder, Variables};

const CODE: &str = "\
class Solution:
    def twoSum(self, numbers: List[int], target: int) -> List[int]:
        l, r = 0, len(numbers) - 1

        while l < r:
            curSum = numbers[l] + numbers[r]

            if curSum > target:
                r -= 1
            elif curSum < target:
                l += 1
            else:
                return [l + 1, r + 1]
        return []";

mod line {
    pub const INIT: usize = 3;
    pub const LOOP: usize = 5;
    pub const SUM: usize = 6;
    pub const TOO_BIG: usize = 8;
    pub const MOVE_RIGHT: usize = 9;
    pub const TOO_SMALL: usize = 10;
    pub const MOVE_LEFT: usize = 11;
    pub const RETURN_PAIR: usize = 13;
    pub const RETURN_EMPTY: usize = 14;
}

pub fn descriptor() -> AlgorithmDescriptor {
    let mut inputs = InputMap::new();
    inputs.insert(
        "numbers".to_string(),
        Value::Sequence(vec![1, 3, 4, 5, 7, 11]),
    );
    inputs.insert("target".to_string(), Value::Number(9));

    AlgorithmDescriptor {
        id: "two-sum-ii",
        title: "167. Two Sum II - Input Array Is Sorted",
        code: CODE,
        inputs,
        visual: VisualConfig {
            layout: Layout::Array,
            visualizers: vec![
                VisualizerSpec::new("numbers", VisualizerKind::Array, "Sorted Input (numbers)"),
                VisualizerSpec::new("target", VisualizerKind::Value, "Target"),
                VisualizerSpec::new("curSum", VisualizerKind::Value, "Current Sum"),
            ],
        },
        generator: generate,
    }
}

struct State {
    numbers: Vec<i64>,
    target: i64,
    l: usize,
    r: usize,
    cur_sum: Option<i64>,
}

impl State {
    fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("numbers".to_string(), Value::Sequence(self.numbers.clone()));
        vars.insert("target".to_string(), Value::Number(self.target));
        vars.insert("l".to_string(), Value::Number(self.l as i64));
        vars.insert("r".to_string(), Value::Number(self.r as i64));
        vars.insert(
            "curSum".to_string(),
            self.cur_sum.map_or(Value::Empty, Value::Number),
        );
        vars
    }

    fn pointers(&self, role: Role) -> Marks {
        Marks::new()
            .mark("numbers", Highlight::index(self.l, role).labeled("l"))
            .mark("numbers", Highlight::index(self.r, role).labeled("r"))
    }
}

pub fn generate(inputs: &InputMap, rec: &mut TraceRecorder) -> Result<(), GenerateError> {
    let numbers = sequence(inputs, "numbers")?;
    require_sorted("numbers", &numbers)?;
    if numbers.is_empty() {
        return Err(GenerateError::invalid_input("numbers", "must not be empty"));
    }

    let mut state = State {
        r: numbers.len() - 1,
        numbers,
        target: number(inputs, "target")?,
        l: 0,
        cur_sum: None,
    };

    rec.record(
        line::INIT,
        format!("Initialize pointers l = 0, r = {}", state.r),
        state.variables(),
        state.pointers(Role::Reference).build(),
    )?;

    while state.l < state.r {
        rec.record(
            line::LOOP,
            format!("l ({}) < r ({}), keep searching.", state.l, state.r),
            state.variables(),
            state.pointers(Role::Reference).build(),
        )?;

        let (left, right) = (state.numbers[state.l], state.numbers[state.r]);
        let sum = left
            .checked_add(right)
            .ok_or_else(|| GenerateError::invalid_input("numbers", "sum overflows"))?;
        state.cur_sum = Some(sum);
        rec.record(
            line::SUM,
            format!("curSum = {} + {} = {}", left, right, sum),
            state.variables(),
            state.pointers(Role::Current).build(),
        )?;

        if sum > state.target {
            rec.record(
                line::TOO_BIG,
                format!("{} > {}: the sum is too big.", sum, state.target),
                state.variables(),
                state.pointers(Role::Current).build(),
            )?;
            state.r -= 1;
            rec.record(
                line::MOVE_RIGHT,
                format!("Move r left to {}", state.r),
                state.variables(),
                Marks::new()
                    .mark("numbers", Highlight::index(state.r, Role::Resolved).labeled("r"))
                    .mark("numbers", Highlight::index(state.l, Role::Reference).labeled("l"))
                    .build(),
            )?;
        } else if sum < state.target {
            rec.record(
                line::TOO_SMALL,
                format!("{} < {}: the sum is too small.", sum, state.target),
                state.variables(),
                state.pointers(Role::Current).build(),
            )?;
            state.l += 1;
            rec.record(
                line::MOVE_LEFT,
                format!("Move l right to {}", state.l),
                state.variables(),
                Marks::new()
                    .mark("numbers", Highlight::index(state.l, Role::Resolved).labeled("l"))
                    .mark("numbers", Highlight::index(state.r, Role::Reference).labeled("r"))
                    .build(),
            )?;
        } else {
            return rec.record(
                line::RETURN_PAIR,
                format!(
                    "curSum equals target. Return [{}, {}]",
                    state.l + 1,
                    state.r + 1
                ),
                state.variables(),
                state.pointers(Role::Violation).build(),
            );
        }
    }

    rec.record(
        line::RETURN_EMPTY,
        "Pointers met without a match. Return []",
        state.variables(),
        Highlights::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(numbers: Vec<i64>, target: i64) -> Result<crate::trace::Trace, GenerateError> {
        let mut inputs = InputMap::new();
        inputs.insert("numbers".to_string(), Value::Sequence(numbers));
        inputs.insert("target".to_string(), Value::Number(target));
        descriptor().generate(&inputs)
    }

    #[test]
    fn test_default_inputs_find_one_based_pair() {
        let trace = run(vec![1, 3, 4, 5, 7, 11], 9).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.line, line::RETURN_PAIR);
        // 4 + 5 = 9 at zero-based 2 and 3
        assert!(last.description.contains("[3, 4]"));
        assert_eq!(last.variable("curSum"), Some(&Value::Number(9)));
    }

    #[test]
    fn test_unsorted_input_is_rejected() {
        assert!(matches!(
            run(vec![5, 1], 6),
            Err(GenerateError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_single_element_has_no_pair() {
        let trace = run(vec![4], 8).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().unwrap().line, line::RETURN_EMPTY);
    }
}
