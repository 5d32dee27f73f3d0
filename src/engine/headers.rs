//! Ordered header storage for the engine and the header merge policy.

use std::collections::HashMap;

use http::header::{HeaderName, HeaderValue};
use once_cell::sync::Lazy;

/// How a header copied into an engine request combines with existing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Replace any existing value; only the last one copied survives.
    Set,
    /// Append, keeping every value in order.
    Add,
}

// Keys are matched case-sensitively against lower-case `http` header names.
static MERGE_STRATEGIES: Lazy<HashMap<&'static str, MergeStrategy>> = Lazy::new(|| {
    ["host", "content-type", "user-agent", "content-length", "connection"]
        .into_iter()
        .map(|name| (name, MergeStrategy::Set))
        .collect()
});

/// Looks up the merge strategy for a header name. Unlisted names are `Add`.
#[must_use]
pub fn merge_strategy(name: &str) -> MergeStrategy {
    MERGE_STRATEGIES
        .get(name)
        .copied()
        .unwrap_or(MergeStrategy::Add)
}

/// Insertion-ordered header list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineHeaders {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl EngineHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every value stored under `name` with `value`.
    pub fn set(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.retain(|(k, _)| *k != name);
        self.entries.push((name, value));
    }

    pub fn add(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.push((name, value));
    }

    /// Copies a header in according to [`merge_strategy`].
    pub fn merge(&mut self, name: HeaderName, value: HeaderValue) {
        match merge_strategy(name.as_str()) {
            MergeStrategy::Set => self.set(name, value),
            MergeStrategy::Add => self.add(name, value),
        }
    }

    pub fn remove(&mut self, name: &HeaderName) {
        self.entries.retain(|(k, _)| k != name);
    }

    /// First value stored under `name`.
    pub fn get(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_all<'a>(&'a self, name: &'a HeaderName) -> impl Iterator<Item = &'a HeaderValue> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &HeaderName) -> bool {
        self.get(name).is_some()
    }

    /// Calls `f` for every stored pair in insertion order.
    pub fn visit_all<F>(&self, mut f: F)
    where
        F: FnMut(&HeaderName, &HeaderValue),
    {
        for (name, value) in &self.entries {
            f(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
