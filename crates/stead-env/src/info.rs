//! The per-step diagnostic info map.

use indexmap::IndexMap;

/// Key under which every step reports the cumulative episode reward.
pub const TOTAL_REWARD_KEY: &str = "total_reward";

/// Key under which road-network variants surface the compact terrain
/// codes for debugging.
pub const DEBUG_OBSERVATION_KEY: &str = "observation";

/// A value in the info map.
#[derive(Clone, Debug, PartialEq)]
pub enum InfoValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    I64(i64),
    /// Floating-point value.
    F64(f64),
    /// Text value.
    Str(String),
    /// A flat numeric vector (e.g. a debug observation).
    Floats(Vec<f32>),
}

impl From<bool> for InfoValue {
    fn from(v: bool) -> Self {
        InfoValue::Bool(v)
    }
}

impl From<i64> for InfoValue {
    fn from(v: i64) -> Self {
        InfoValue::I64(v)
    }
}

impl From<f64> for InfoValue {
    fn from(v: f64) -> Self {
        InfoValue::F64(v)
    }
}

impl From<&str> for InfoValue {
    fn from(v: &str) -> Self {
        InfoValue::Str(v.to_string())
    }
}

impl From<Vec<f32>> for InfoValue {
    fn from(v: Vec<f32>) -> Self {
        InfoValue::Floats(v)
    }
}

/// Diagnostic key-value map returned from every step.
///
/// Insertion-ordered so repeated runs print identically.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Info {
    entries: IndexMap<String, InfoValue>,
}

impl Info {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<InfoValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.get(key)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
