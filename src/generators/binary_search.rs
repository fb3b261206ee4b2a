//! 704. Binary Search

use super::{index_value, number, require_sorted, sequence};
use crate::error::GenerateError;
use crate::registry::{
    AlgorithmDescriptor, InputMap, Layout, VisualConfig, VisualizerKind, VisualizerSpec,
};
use crate::trace::value::Value;
use crate::trace::{Highlight, Highlights, Marks, Role, TraceRecorder, Variables};

const CODE: &str = "\
class Solution:
    def search(self, nums: List[int], target: int) -> int:
        l, r = 0, len(nums) - 1

        while l <= r:
            m = l + ((r - l) // 2)
            if nums[m] > target:
                r = m - 1
            elif nums[m] < target:
                l = m + 1
            else:
                return m
        return -1";

mod line {
    pub const INIT: usize = 3;
    pub const LOOP: usize = 5;
    pub const MID: usize = 6;
    pub const TOO_BIG: usize = 7;
    pub const MOVE_RIGHT: usize = 8;
    pub const TOO_SMALL: usize = 9;
    pub const MOVE_LEFT: usize = 10;
    pub const RETURN_FOUND: usize = 12;
    pub const RETURN_MISSING: usize = 13;
}

pub fn descriptor() -> AlgorithmDescriptor {
    let mut inputs = InputMap::new();
    inputs.insert(
        "nums".to_string(),
        Value::Sequence(vec![-1, 0, 3, 5, 9, 12]),
    );
    inputs.insert("target".to_string(), Value::Number(9));

    AlgorithmDescriptor {
        id: "binary-search",
        title: "704. Binary Search",
        code: CODE,
        inputs,
        visual: VisualConfig {
            layout: Layout::Array,
            visualizers: vec![
                VisualizerSpec::new("nums", VisualizerKind::Array, "Sorted Input (nums)"),
                VisualizerSpec::new("target", VisualizerKind::Value, "Target"),
                VisualizerSpec::new("l", VisualizerKind::Value, "Left (l)"),
                VisualizerSpec::new("r", VisualizerKind::Value, "Right (r)"),
                VisualizerSpec::new("m", VisualizerKind::Value, "Middle (m)"),
            ],
        },
        generator: generate,
    }
}

/// Pointers are signed: `r` drops to -1 when the target is below every element.
struct State {
    nums: Vec<i64>,
    target: i64,
    l: i64,
    r: i64,
    m: Option<usize>,
}

impl State {
    fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("nums".to_string(), Value::Sequence(self.nums.clone()));
        vars.insert("target".to_string(), Value::Number(self.target));
        vars.insert("l".to_string(), Value::Number(self.l));
        vars.insert("r".to_string(), Value::Number(self.r));
        vars.insert("m".to_string(), index_value(self.m));
        vars
    }

    fn in_bounds(&self, i: i64) -> Option<usize> {
        usize::try_from(i).ok().filter(|&i| i < self.nums.len())
    }

    fn window(&self) -> Marks {
        Marks::new()
            .mark_opt("nums", self.in_bounds(self.l), Role::Reference, "l")
            .mark_opt("nums", self.in_bounds(self.r), Role::Reference, "r")
    }

    fn with_mid(&self, role: Role) -> Marks {
        self.window().mark_opt("nums", self.m, role, "m")
    }
}

pub fn generate(inputs: &InputMap, rec: &mut TraceRecorder) -> Result<(), GenerateError> {
    let nums = sequence(inputs, "nums")?;
    require_sorted("nums", &nums)?;

    let mut state = State {
        r: nums.len() as i64 - 1,
        nums,
        target: number(inputs, "target")?,
        l: 0,
        m: None,
    };

    rec.record(
        line::INIT,
        format!("Search window l = 0, r = {}", state.r),
        state.variables(),
        state.window().build(),
    )?;

    while state.l <= state.r {
        rec.record(
            line::LOOP,
            format!("l ({}) <= r ({}), window is not empty.", state.l, state.r),
            state.variables(),
            state.window().build(),
        )?;

        let mid = state.l + (state.r - state.l) / 2;
        let m = state
            .in_bounds(mid)
            .ok_or_else(|| GenerateError::invalid_input("nums", "midpoint out of range"))?;
        state.m = Some(m);
        let value = state.nums[m];
        rec.record(
            line::MID,
            format!("m = {} + ({} - {}) // 2 = {}", state.l, state.r, state.l, m),
            state.variables(),
            state.with_mid(Role::Current).build(),
        )?;

        if value > state.target {
            rec.record(
                line::TOO_BIG,
                format!("nums[m] ({}) > target ({}): search left half.", value, state.target),
                state.variables(),
                state.with_mid(Role::Current).build(),
            )?;
            state.r = mid - 1;
            rec.record(
                line::MOVE_RIGHT,
                format!("r = m - 1 = {}", state.r),
                state.variables(),
                state.window().build(),
            )?;
        } else if value < state.target {
            rec.record(
                line::TOO_SMALL,
                format!("nums[m] ({}) < target ({}): search right half.", value, state.target),
                state.variables(),
                state.with_mid(Role::Current).build(),
            )?;
            state.l = mid + 1;
            rec.record(
                line::MOVE_LEFT,
                format!("l = m + 1 = {}", state.l),
                state.variables(),
                state.window().build(),
            )?;
        } else {
            return rec.record(
                line::RETURN_FOUND,
                format!("nums[{}] == {}. Return {}", m, state.target, m),
                state.variables(),
                Marks::new()
                    .mark("nums", Highlight::index(m, Role::Violation).labeled("found"))
                    .build(),
            );
        }
    }

    rec.record(
        line::RETURN_MISSING,
        format!("Window is empty, {} is not present. Return -1", state.target),
        state.variables(),
        Highlights::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(nums: Vec<i64>, target: i64) -> crate::trace::Trace {
        let mut inputs = InputMap::new();
        inputs.insert("nums".to_string(), Value::Sequence(nums));
        inputs.insert("target".to_string(), Value::Number(target));
        descriptor().generate(&inputs).unwrap()
    }

    #[test]
    fn test_finds_target_index() {
        let trace = run(vec![-1, 0, 3, 5, 9, 12], 9);
        let last = trace.last().unwrap();
        assert_eq!(last.line, line::RETURN_FOUND);
        assert_eq!(last.variable("m"), Some(&Value::Number(4)));
        assert!(last.description.ends_with("Return 4"));
    }

    #[test]
    fn test_missing_target_below_range() {
        let trace = run(vec![1, 2, 3], -5);
        let last = trace.last().unwrap();
        assert_eq!(last.line, line::RETURN_MISSING);
        assert_eq!(last.variable("r"), Some(&Value::Number(-1)));
    }

    #[test]
    fn test_empty_input_returns_minus_one() {
        let trace = run(Vec::new(), 3);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.get(0).unwrap().variable("m"), Some(&Value::Empty));
    }
}
