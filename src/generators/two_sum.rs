//! 1. Two Sum, one pass with a value -> index hash map

use super::{number, sequence};
use crate::error::GenerateError;
use crate::registry::{
    AlgorithmDescriptor, InputMap, Layout, VisualConfig, VisualizerKind, VisualizerSpec,
};
use crate::trace::value::Value;
use crate::trace::{Highlight, Highlights, Marks, Role, TraceRecorder, Variables};
use std::collections::BTreeMap;

const CODE: &str = "\
class Solution:
    def twoSum(self, nums: List[int], target: int) -> List[int]:
        prevMap = {}  # val -> index

        for i, n in enumerate(nums):
            diff = target - n
            if diff in prevMap:
                return [prevMap[diff], i]
            prevMap[n] = i
        return []";

mod line {
    pub const INIT: usize = 3;
    pub const LOOP: usize = 5;
    pub const DIFF: usize = 6;
    pub const CHECK: usize = 7;
    pub const RETURN_PAIR: usize = 8;
    pub const INSERT: usize = 9;
    pub const RETURN_EMPTY: usize = 10;
}

pub fn descriptor() -> AlgorithmDescriptor {
    let mut inputs = InputMap::new();
    inputs.insert("nums".to_string(), Value::Sequence(vec![2, 7, 11, 15]));
    inputs.insert("target".to_string(), Value::Number(9));

    AlgorithmDescriptor {
        id: "two-sum",
        title: "1. Two Sum",
        code: CODE,
        inputs,
        visual: VisualConfig {
            layout: Layout::Array,
            visualizers: vec![
                VisualizerSpec::new("nums", VisualizerKind::Array, "Input Array (nums)"),
                VisualizerSpec::new("target", VisualizerKind::Value, "Target"),
                VisualizerSpec::new("diff", VisualizerKind::Value, "Current Diff"),
                VisualizerSpec::new("prevMap", VisualizerKind::Map, "Hash Map (prevMap)"),
            ],
        },
        generator: generate,
    }
}

struct State {
    nums: Vec<i64>,
    target: i64,
    diff: Option<i64>,
    prev_map: BTreeMap<i64, i64>,
}

impl State {
    fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("nums".to_string(), Value::Sequence(self.nums.clone()));
        vars.insert("target".to_string(), Value::Number(self.target));
        vars.insert(
            "diff".to_string(),
            self.diff.map_or(Value::Empty, Value::Number),
        );
        vars.insert("prevMap".to_string(), Value::Map(self.prev_map.clone()));
        vars
    }
}

fn pointer(i: usize) -> Marks {
    Marks::new().mark("nums", Highlight::index(i, Role::Current).labeled("i"))
}

pub fn generate(inputs: &InputMap, rec: &mut TraceRecorder) -> Result<(), GenerateError> {
    let mut state = State {
        nums: sequence(inputs, "nums")?,
        target: number(inputs, "target")?,
        diff: None,
        prev_map: BTreeMap::new(),
    };

    rec.record(
        line::INIT,
        "Initialize empty hash map: prevMap = {}",
        state.variables(),
        Highlights::default(),
    )?;

    for i in 0..state.nums.len() {
        let n = state.nums[i];
        state.diff = None;
        rec.record(
            line::LOOP,
            format!("Loop i={}, n={}.", i, n),
            state.variables(),
            pointer(i).build(),
        )?;

        let diff = state
            .target
            .checked_sub(n)
            .ok_or_else(|| GenerateError::invalid_input("target", "target - n overflows"))?;
        state.diff = Some(diff);
        rec.record(
            line::DIFF,
            format!(
                "Calculate diff = target - n ({} - {} = {})",
                state.target, n, diff
            ),
            state.variables(),
            pointer(i).build(),
        )?;

        if let Some(&j) = state.prev_map.get(&diff) {
            let found = j as usize;
            rec.record(
                line::CHECK,
                format!(
                    "Check if diff ({}) is in prevMap... YES! Found at index {}.",
                    diff, j
                ),
                state.variables(),
                pointer(i)
                    .mark("nums", Highlight::index(found, Role::Violation).labeled("found"))
                    .mark("prevMap", Highlight::key(diff, Role::Violation).labeled("diff"))
                    .build(),
            )?;
            rec.record(
                line::RETURN_PAIR,
                format!("Return indices [{}, {}]", j, i),
                state.variables(),
                Marks::new()
                    .mark("nums", Highlight::index(found, Role::Resolved).labeled("found"))
                    .mark("nums", Highlight::index(i, Role::Resolved).labeled("i"))
                    .mark("prevMap", Highlight::key(diff, Role::Resolved))
                    .build(),
            )?;
            return Ok(());
        }

        rec.record(
            line::CHECK,
            format!("Check if diff ({}) is in prevMap... NO.", diff),
            state.variables(),
            pointer(i).build(),
        )?;

        state.prev_map.insert(n, i as i64);
        rec.record(
            line::INSERT,
            format!("Add n={} to prevMap with index {}.", n, i),
            state.variables(),
            Marks::new()
                .mark("nums", Highlight::index(i, Role::Resolved).labeled("i"))
                .mark("prevMap", Highlight::key(n, Role::Resolved))
                .build(),
        )?;
    }

    state.diff = None;
    rec.record(
        line::RETURN_EMPTY,
        format!("No pair sums to {}. Return []", state.target),
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
    fn test_early_return_skips_remaining_elements() {
        let trace = run(vec![3, 2, 4, 100, 200], 6);
        let last = trace.last().unwrap();
        assert_eq!(last.line, line::RETURN_PAIR);
        assert!(last.description.contains("[1, 2]"));
        assert!(trace.iter().all(|e| !e.description.contains("n=100")));
    }

    #[test]
    fn test_no_solution_ends_on_empty_return() {
        let trace = run(vec![1, 2], 100);
        let last = trace.last().unwrap();
        assert_eq!(last.line, line::RETURN_EMPTY);
        let map = last.variable("prevMap").and_then(Value::as_map).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_empty_nums_still_terminates() {
        let trace = run(Vec::new(), 1);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().unwrap().line, line::RETURN_EMPTY);
    }

    #[test]
    fn test_diff_is_empty_until_computed() {
        let trace = run(vec![2, 7], 9);
        assert_eq!(trace.get(0).unwrap().variable("diff"), Some(&Value::Empty));
        assert_eq!(trace.get(2).unwrap().variable("diff"), Some(&Value::Number(7)));
    }

    #[test]
    fn test_hit_marks_partner_key_in_prev_map() {
        let trace = run(vec![2, 7], 9);
        let hit = trace
            .iter()
            .find(|e| e.line == line::CHECK && e.description.contains("YES"))
            .unwrap();
        let marks = hit.highlights_for("prevMap");
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].target, crate::trace::Target::Key(2));
        assert_eq!(marks[0].role, Role::Violation);

        let insert = trace.iter().find(|e| e.line == line::INSERT).unwrap();
        assert_eq!(
            insert.highlights_for("prevMap")[0].target,
            crate::trace::Target::Key(2)
        );
    }
}
