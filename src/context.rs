//! Enclosing-context search.
//!
//! Given a parsed tree and a one-based, inclusive line range, the finder walks
//! every node and keeps the largest allow-listed node whose line span fully
//! contains the range. Largest rather than innermost: when a function and an
//! `if` inside it both contain the range, the function is reported.
//!
//! The result is converted into the generic AST-node location record shared by
//! every language backend: one-based lines, zero-based columns, and comment and
//! offset fields left empty.

use crate::ts::{NodeKinds, SyntaxNode, TreeSitterError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the fallible finder API.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("invalid line range {start}..={end}: lines are 1-indexed and start must not exceed end")]
    InvalidRange { start: usize, end: usize },

    #[error("Tree-sitter error: {0}")]
    TreeSitter(#[from] TreeSitterError),
}

/// A one-based, inclusive line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<Self, ContextError> {
        if start == 0 || start > end {
            return Err(ContextError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single line.
    pub fn line(line: usize) -> Result<Self, ContextError> {
        Self::new(line, line)
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    /// Whether `start_line..=end_line` fully contains this range.
    pub const fn is_within(&self, start_line: usize, end_line: usize) -> bool {
        start_line <= self.start && self.end <= end_line
    }
}

/// A one-based line and zero-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationData {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLocation {
    pub start: LocationData,
    pub end: LocationData,
}

/// Generic AST-node record understood by downstream tooling.
///
/// Comment lists and raw offsets belong to the record shape but are not known
/// to this backend, so they are always `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub loc: NodeLocation,
    pub leading_comments: Option<Vec<serde_json::Value>>,
    pub inner_comments: Option<Vec<serde_json::Value>>,
    pub trailing_comments: Option<Vec<serde_json::Value>>,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl AstNode {
    /// Convert a syntax node into the caller-facing location record.
    pub fn from_node<N: SyntaxNode>(node: &N) -> Self {
        let start = node.start();
        let end = node.end();
        Self {
            node_type: node.kind().to_string(),
            loc: NodeLocation {
                start: LocationData {
                    line: start.line(),
                    column: start.column,
                },
                end: LocationData {
                    line: end.line(),
                    column: end.column,
                },
            },
            leading_comments: None,
            inner_comments: None,
            trailing_comments: None,
            start: None,
            end: None,
        }
    }

    pub const fn start_line(&self) -> usize {
        self.loc.start.line
    }

    pub const fn end_line(&self) -> usize {
        self.loc.end.line
    }
}

/// Result of an enclosing-context query.
///
/// `None` means either that nothing qualified or that parsing failed; use the
/// fallible API on [`crate::PythonBackend`] to tell them apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnclosingContext {
    pub enclosing_context: Option<AstNode>,
}

impl EnclosingContext {
    pub const fn none() -> Self {
        Self {
            enclosing_context: None,
        }
    }

    pub const fn is_found(&self) -> bool {
        self.enclosing_context.is_some()
    }

    pub fn node(&self) -> Option<&AstNode> {
        self.enclosing_context.as_ref()
    }
}

impl From<Option<AstNode>> for EnclosingContext {
    fn from(enclosing_context: Option<AstNode>) -> Self {
        Self { enclosing_context }
    }
}

struct Candidate<N> {
    size: usize,
    node: N,
}

/// Find the largest allow-listed node whose line span contains `range`.
///
/// Every node is visited. Among qualifying nodes the one with the largest
/// `end_line - start_line` wins; on a tie the first one in traversal order is
/// kept.
pub fn find_enclosing_node<N: SyntaxNode>(root: N, range: LineRange, kinds: &NodeKinds) -> Option<N> {
    let mut best = None;
    visit(root, range, kinds, &mut best);
    best.map(|candidate| candidate.node)
}

fn visit<N: SyntaxNode>(node: N, range: LineRange, kinds: &NodeKinds, best: &mut Option<Candidate<N>>) {
    let children = node.child_nodes();

    if kinds.contains(node.kind()) {
        let start_line = node.start().line();
        let end_line = node.end().line();

        if range.is_within(start_line, end_line) {
            let size = end_line - start_line;
            // Size-0 (one-line) nodes qualify too; only a strictly larger node replaces the first.
            if best.as_ref().map_or(true, |current| size > current.size) {
                *best = Some(Candidate { size, node });
            }
        }
    }

    for child in children {
        visit(child, range, kinds, best);
    }
}

/// Pooled finder functions that reuse the thread-local parser.
pub mod pooled {
    use super::*;
    use crate::pool;

    /// Find the enclosing context with the default Python allow-list.
    pub fn find_enclosing_context(
        source: &str,
        range: LineRange,
    ) -> Result<Option<AstNode>, ContextError> {
        let kinds = NodeKinds::python();
        pool::with_parser(|parser| {
            let tree = parser.parse(source)?;
            let found = find_enclosing_node(tree.root_node(), range, &kinds)
                .map(|node| AstNode::from_node(&node));
            Ok(found)
        })?
    }
}
