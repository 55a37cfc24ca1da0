//! Normalising caller-supplied dotted paths into a [`PatternSet`].

use std::collections::HashSet;

use aw_ast::{AccessPath, Expr};
use serde_json::Value;
use thiserror::Error;

use crate::path::path_matches;

/// The list of async function paths was not a sequence of strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("second argument must be a sequence of strings, got {0}")]
    NotASequence(&'static str),
    #[error("second argument must be a sequence of strings, element {index} is {found}")]
    NotAString { index: usize, found: &'static str },
}

/// Deduplicated access paths, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    paths: Vec<AccessPath>,
    seen: HashSet<String>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for pattern in patterns {
            set.insert(pattern.as_ref());
        }
        set
    }

    /// Validate and normalise a dynamically-typed pattern list.
    ///
    /// Only a JSON array of strings is accepted.
    pub fn from_value(value: &Value) -> Result<Self, PatternError> {
        let Value::Array(items) = value else {
            return Err(PatternError::NotASequence(json_kind(value)));
        };

        let mut set = Self::default();
        for (index, item) in items.iter().enumerate() {
            let pattern = item.as_str().ok_or(PatternError::NotAString {
                index,
                found: json_kind(item),
            })?;
            set.insert(pattern);
        }
        Ok(set)
    }

    /// Add a dotted pattern. Returns `false` if the exact string was
    /// already present.
    pub fn insert(&mut self, pattern: &str) -> bool {
        if !self.seen.insert(pattern.to_owned()) {
            return false;
        }
        self.paths.push(AccessPath::parse(pattern));
        true
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn get(&self, index: usize) -> Option<&AccessPath> {
        self.paths.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AccessPath> {
        self.paths.iter()
    }

    /// Index of the first pattern, in insertion order, that `callee` spells.
    pub fn find_match(&self, callee: &Expr) -> Option<usize> {
        self.paths
            .iter()
            .position(|path| path_matches(callee, path.segments()))
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a AccessPath;
    type IntoIter = std::slice::Iter<'a, AccessPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
