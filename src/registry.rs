//! Problem catalog
//!
//! The registry is built once, on first use, and never changes afterwards.
//! Categories keep their display order; the empty ones are listed so the
//! sidebar shows the full roadmap.

use crate::error::GenerateError;
use crate::generators;
use crate::trace::value::{Value, ValueKind};
use crate::trace::{Trace, TraceRecorder, DEFAULT_TRACE_LIMIT};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Input name -> value
pub type InputMap = BTreeMap<String, Value>;

/// Input name -> required kind
pub type InputSchema = BTreeMap<String, ValueKind>;

/// Runs an algorithm over `inputs`, recording snapshots as it goes
pub type Generator = fn(&InputMap, &mut TraceRecorder) -> Result<(), GenerateError>;

/// How the visualizers of a problem are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Grid,
    Array,
    Split,
}

/// How a single variable is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizerKind {
    Grid,
    Array,
    Value,
    Map,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizerSpec {
    pub variable: &'static str,
    pub kind: VisualizerKind,
    pub label: &'static str,
}

impl VisualizerSpec {
    pub const fn new(variable: &'static str, kind: VisualizerKind, label: &'static str) -> Self {
        VisualizerSpec {
            variable,
            kind,
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualConfig {
    pub layout: Layout,
    pub visualizers: Vec<VisualizerSpec>,
}

/// Static description of one algorithm
#[derive(Debug, Clone)]
pub struct AlgorithmDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    /// Listing shown next to the visualization. Never executed.
    pub code: &'static str,
    /// Default inputs; their keys and kinds are the required input shape
    pub inputs: InputMap,
    pub visual: VisualConfig,
    pub generator: Generator,
}

impl AlgorithmDescriptor {
    pub fn schema(&self) -> InputSchema {
        self.inputs
            .iter()
            .map(|(key, value)| (key.clone(), value.kind()))
            .collect()
    }

    /// Run the generator directly with the default trace limit
    pub fn generate(&self, inputs: &InputMap) -> Result<Trace, GenerateError> {
        self.generate_with_limit(inputs, DEFAULT_TRACE_LIMIT)
    }

    pub fn generate_with_limit(
        &self,
        inputs: &InputMap,
        limit: usize,
    ) -> Result<Trace, GenerateError> {
        let mut recorder = TraceRecorder::new(limit);
        (self.generator)(inputs, &mut recorder)?;
        Ok(recorder.finish())
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: &'static str,
    pub title: &'static str,
    pub problems: Vec<AlgorithmDescriptor>,
}

impl Category {
    fn new(id: &'static str, title: &'static str, problems: Vec<AlgorithmDescriptor>) -> Self {
        Category {
            id,
            title,
            problems,
        }
    }
}

#[derive(Debug)]
pub struct Registry {
    categories: Vec<Category>,
    index: FxHashMap<&'static str, (usize, usize)>,
}

impl Registry {
    pub fn new(categories: Vec<Category>) -> Self {
        let mut index = FxHashMap::default();
        for (c, category) in categories.iter().enumerate() {
            for (p, problem) in category.problems.iter().enumerate() {
                index.insert(problem.id, (c, p));
            }
        }
        Registry { categories, index }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, id: &str) -> Option<&AlgorithmDescriptor> {
        let &(c, p) = self.index.get(id)?;
        self.categories.get(c)?.problems.get(p)
    }

    /// Category that owns a problem
    pub fn category_of(&self, id: &str) -> Option<&Category> {
        let &(c, _) = self.index.get(id)?;
        self.categories.get(c)
    }

    /// All problems in display order
    pub fn problems(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.categories.iter().flat_map(|c| c.problems.iter())
    }

    /// The problem selected at startup
    pub fn first(&self) -> Option<&AlgorithmDescriptor> {
        self.problems().next()
    }
}

/// The process-wide catalog
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(build_catalog)
}

fn build_catalog() -> Registry {
    Registry::new(vec![
        Category::new(
            "arrays",
            "Arrays & Hashing",
            vec![generators::two_sum::descriptor()],
        ),
        Category::new(
            "two-pointers",
            "Two Pointers",
            vec![generators::two_sum_sorted::descriptor()],
        ),
        Category::new(
            "sliding-window",
            "Sliding Window",
            vec![generators::stock_profit::descriptor()],
        ),
        Category::new("stack", "Stack", Vec::new()),
        Category::new(
            "binary-search",
            "Binary Search",
            vec![generators::binary_search::descriptor()],
        ),
        Category::new("linked-list", "Linked List", Vec::new()),
        Category::new("trees", "Trees", Vec::new()),
        Category::new("heap", "Heap / Priority Queue", Vec::new()),
        Category::new("backtracking", "Backtracking", Vec::new()),
        Category::new("tries", "Tries", Vec::new()),
        Category::new("graphs", "Graphs", Vec::new()),
        Category::new("advanced-graphs", "Advanced Graphs", Vec::new()),
        Category::new(
            "dp",
            "1-D Dynamic Programming",
            vec![generators::unique_paths::descriptor()],
        ),
        Category::new("2d-dp", "2-D Dynamic Programming", Vec::new()),
        Category::new("greedy", "Greedy", Vec::new()),
        Category::new("intervals", "Intervals", Vec::new()),
        Category::new(
            "math",
            "Math & Geometry",
            vec![generators::set_matrix_zeroes::descriptor()],
        ),
        Category::new("bit-manipulation", "Bit Manipulation", Vec::new()),
    ])
}
