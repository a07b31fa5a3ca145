//! Parse and encode options.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// Default nesting budget for parsing, comparison and serialization.
pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Default number of fractional digits kept when a float becomes a Real.
pub const DEFAULT_DECIMAL_PRECISION: u32 = 15;

/// Options for content stream parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum array/dictionary nesting before `StructureTooDeep`.
    pub max_depth: usize,
    /// Operators to keep. Empty keeps every operator.
    pub operators: FxHashSet<SmolStr>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            operators: FxHashSet::default(),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Keep only the named operators.
    pub fn with_operators<I, S>(mut self, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.operators = operators
            .into_iter()
            .map(|op| SmolStr::new(op.as_ref()))
            .collect();
        self
    }

    /// Whitelist from a space-separated list such as `"q Q cm Do"`.
    pub fn with_operator_list(self, list: &str) -> Self {
        self.with_operators(list.split_ascii_whitespace())
    }

    pub fn accepts(&self, operator: &str) -> bool {
        self.operators.is_empty() || self.operators.contains(operator)
    }
}

/// Options for converting host values into objects.
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Fractional digits kept when encoding `f32`/`f64`.
    pub decimal_precision: u32,
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            decimal_precision: DEFAULT_DECIMAL_PRECISION,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decimal_precision(mut self, places: u32) -> Self {
        self.decimal_precision = places;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
