//! Allow-list of node kinds that count as an enclosing scope.

use std::collections::BTreeSet;

/// Python grammar kinds eligible to be reported as an enclosing context.
///
/// Functions, classes, and block-structured control flow. Adding a construct
/// (for example `match_statement`) is a one-line change here.
pub const PYTHON_SCOPE_KINDS: &[&str] = &[
    "function_definition",
    "class_definition",
    "if_statement",
    "for_statement",
    "while_statement",
    "try_statement",
    "with_statement",
    "async_function_definition",
    "async_for_statement",
];

/// A set of node kinds checked by membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeKinds {
    kinds: BTreeSet<String>,
}

impl NodeKinds {
    /// The default Python allow-list.
    pub fn python() -> Self {
        Self::from_kinds(PYTHON_SCOPE_KINDS.iter().copied())
    }

    pub fn from_kinds<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kinds: kinds.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    pub fn insert(&mut self, kind: impl Into<String>) -> bool {
        self.kinds.insert(kind.into())
    }

    pub fn remove(&mut self, kind: &str) -> bool {
        self.kinds.remove(kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }
}

impl Default for NodeKinds {
    fn default() -> Self {
        Self::python()
    }
}
