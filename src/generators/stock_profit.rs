//! 121. Best Time to Buy and Sell Stock, sliding buy/sell window

use super::sequence;
use crate::error::GenerateError;
use crate::registry::{
    AlgorithmDescriptor, InputMap, Layout, VisualConfig, VisualizerKind, VisualizerSpec,
};
use crate::trace::value::Value;
use crate::trace::{Highlight, Marks, Role, TraceRecorder, Variables};

const CODE: &str = "\
class Solution:
    def maxProfit(self, prices: List[int]) -> int:
        l, r = 0, 1
        maxP = 0

        while r < len(prices):
            if prices[l] < prices[r]:
                profit = prices[r] - prices[l]
                maxP = max(maxP, profit)
            else:
                l = r
            r += 1
        return maxP";

mod line {
    pub const INIT_POINTERS: usize = 3;
    pub const INIT_MAX: usize = 4;
    pub const LOOP: usize = 6;
    pub const COMPARE: usize = 7;
    pub const PROFIT: usize = 8;
    pub const MAX: usize = 9;
    pub const MOVE_BUY: usize = 11;
    pub const ADVANCE: usize = 12;
    pub const RETURN: usize = 13;
}

pub fn descriptor() -> AlgorithmDescriptor {
    let mut inputs = InputMap::new();
    inputs.insert("prices".to_string(), Value::Sequence(vec![7, 1, 5, 3, 6, 4]));

    AlgorithmDescriptor {
        id: "best-time-to-buy-and-sell-stock",
        title: "121. Best Time to Buy and Sell Stock",
        code: CODE,
        inputs,
        visual: VisualConfig {
            layout: Layout::Split,
            visualizers: vec![
                VisualizerSpec::new("prices", VisualizerKind::Array, "Prices"),
                VisualizerSpec::new("profit", VisualizerKind::Value, "Window Profit"),
                VisualizerSpec::new("maxP", VisualizerKind::Value, "Best Profit (maxP)"),
            ],
        },
        generator: generate,
    }
}

struct State {
    prices: Vec<i64>,
    l: usize,
    r: usize,
    profit: Option<i64>,
    max_p: i64,
}

impl State {
    fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("prices".to_string(), Value::Sequence(self.prices.clone()));
        vars.insert("l".to_string(), Value::Number(self.l as i64));
        vars.insert("r".to_string(), Value::Number(self.r as i64));
        vars.insert(
            "profit".to_string(),
            self.profit.map_or(Value::Empty, Value::Number),
        );
        vars.insert("maxP".to_string(), Value::Number(self.max_p));
        vars
    }

    /// Buy pointer as a reference, sell pointer with the given role.
    /// `r` may sit one past the end once the loop is done.
    fn window(&self, sell: Role) -> Marks {
        let marks = Marks::new().mark("prices", Highlight::index(self.l, Role::Reference).labeled("l"));
        if self.r < self.prices.len() {
            marks.mark("prices", Highlight::index(self.r, sell).labeled("r"))
        } else {
            marks
        }
    }
}

pub fn generate(inputs: &InputMap, rec: &mut TraceRecorder) -> Result<(), GenerateError> {
    let prices = sequence(inputs, "prices")?;
    if prices.is_empty() {
        return Err(GenerateError::invalid_input("prices", "must not be empty"));
    }

    let mut state = State {
        prices,
        l: 0,
        r: 1,
        profit: None,
        max_p: 0,
    };

    rec.record(
        line::INIT_POINTERS,
        "Buy on day l = 0, sell on day r = 1",
        state.variables(),
        state.window(Role::Current).build(),
    )?;
    rec.record(
        line::INIT_MAX,
        "maxP = 0",
        state.variables(),
        state.window(Role::Current).build(),
    )?;

    while state.r < state.prices.len() {
        rec.record(
            line::LOOP,
            format!("r = {} is within the {} days.", state.r, state.prices.len()),
            state.variables(),
            state.window(Role::Current).build(),
        )?;

        let (buy, sell) = (state.prices[state.l], state.prices[state.r]);
        if buy < sell {
            rec.record(
                line::COMPARE,
                format!("prices[l] ({}) < prices[r] ({}): profitable.", buy, sell),
                state.variables(),
                state.window(Role::Current).build(),
            )?;

            let profit = sell
                .checked_sub(buy)
                .ok_or_else(|| GenerateError::invalid_input("prices", "profit overflows"))?;
            state.profit = Some(profit);
            rec.record(
                line::PROFIT,
                format!("profit = {} - {} = {}", sell, buy, profit),
                state.variables(),
                state.window(Role::Current).build(),
            )?;

            let improved = profit > state.max_p;
            state.max_p = state.max_p.max(profit);
            let description = if improved {
                format!("New best! maxP = {}", state.max_p)
            } else {
                format!("maxP stays {}", state.max_p)
            };
            rec.record(
                line::MAX,
                description,
                state.variables(),
                state
                    .window(if improved { Role::Resolved } else { Role::Current })
                    .build(),
            )?;
        } else {
            rec.record(
                line::COMPARE,
                format!("prices[l] ({}) >= prices[r] ({}): cheaper day found.", buy, sell),
                state.variables(),
                state.window(Role::Current).build(),
            )?;
            state.l = state.r;
            rec.record(
                line::MOVE_BUY,
                format!("Move buy day: l = {}", state.l),
                state.variables(),
                Marks::new()
                    .mark("prices", Highlight::index(state.l, Role::Resolved).labeled("l"))
                    .build(),
            )?;
        }

        state.r += 1;
        rec.record(
            line::ADVANCE,
            format!("Advance sell day: r = {}", state.r),
            state.variables(),
            state.window(Role::Current).build(),
        )?;
    }

    rec.record(
        line::RETURN,
        format!("Return maxP = {}", state.max_p),
        state.variables(),
        state.window(Role::Current).build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(prices: Vec<i64>) -> Result<crate::trace::Trace, GenerateError> {
        let mut inputs = InputMap::new();
        inputs.insert("prices".to_string(), Value::Sequence(prices));
        descriptor().generate(&inputs)
    }

    #[test]
    fn test_default_prices_profit_five() {
        let trace = run(vec![7, 1, 5, 3, 6, 4]).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.line, line::RETURN);
        assert_eq!(last.variable("maxP"), Some(&Value::Number(5)));
        assert!(last.description.contains('5'));
    }

    #[test]
    fn test_falling_prices_never_profit() {
        let trace = run(vec![7, 6, 4, 3, 1]).unwrap();
        assert_eq!(trace.last().unwrap().variable("maxP"), Some(&Value::Number(0)));
        assert_eq!(trace.last().unwrap().variable("profit"), Some(&Value::Empty));
    }

    #[test]
    fn test_new_best_marks_sell_day_resolved() {
        let trace = run(vec![7, 1, 5, 3, 6, 4]).unwrap();
        let best: Vec<_> = trace
            .iter()
            .filter(|e| e.description.starts_with("New best!"))
            .collect();
        assert_eq!(best.len(), 2);
        for entry in best {
            let sell = entry
                .highlights_for("prices")
                .iter()
                .find(|h| h.label.as_deref() == Some("r"))
                .unwrap();
            assert_eq!(sell.role, Role::Resolved);
        }
        assert!(trace
            .iter()
            .flat_map(|e| e.highlights_for("prices"))
            .all(|h| h.role != Role::Violation));
    }

    #[test]
    fn test_empty_prices_rejected() {
        assert!(run(Vec::new()).is_err());
    }

    #[test]
    fn test_single_day_skips_loop() {
        let trace = run(vec![3]).unwrap();
        assert_eq!(trace.len(), 3);
        assert!(trace.last().unwrap().highlights_for("prices").len() == 1);
    }
}
