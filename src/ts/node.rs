//! Parser-independent view of a syntax tree node.
//!
//! Traversal code only needs a kind tag, a start and end position, and the
//! ordered children. [`SyntaxNode`] captures exactly that, so the finder and
//! the validator never touch tree-sitter types directly.

/// Kind tag tree-sitter uses for spans it could not parse.
pub const ERROR_KIND: &str = "ERROR";

/// A zero-based (row, column) position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// One-based line number of this position.
    pub const fn line(&self) -> usize {
        self.row.saturating_add(1)
    }
}

impl From<tree_sitter::Point> for Point {
    fn from(point: tree_sitter::Point) -> Self {
        Self {
            row: point.row,
            column: point.column,
        }
    }
}

/// Read-only access to one node of a parsed tree.
pub trait SyntaxNode: Sized {
    /// Grammar type tag, e.g. `function_definition`.
    fn kind(&self) -> &str;

    fn start(&self) -> Point;

    fn end(&self) -> Point;

    /// Children in source order.
    fn child_nodes(&self) -> Vec<Self>;

    /// Whether the parser inserted this node to mark an unparseable span.
    fn is_error_marker(&self) -> bool {
        self.kind() == ERROR_KIND
    }
}

impl<'tree> SyntaxNode for tree_sitter::Node<'tree> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn start(&self) -> Point {
        self.start_position().into()
    }

    fn end(&self) -> Point {
        self.end_position().into()
    }

    fn child_nodes(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        let children = tree_sitter::Node::children(self, &mut cursor).collect();
        children
    }

    // MISSING nodes are zero-width insertions and carry the expected token's
    // kind, so the tag alone does not identify them.
    fn is_error_marker(&self) -> bool {
        self.is_error() || self.is_missing()
    }
}

/// An owned snapshot of a syntax tree.
///
/// Useful when a tree has to outlive the parser that produced it, or for
/// building trees by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedNode {
    pub kind: String,
    pub start: Point,
    pub end: Point,
    pub children: Vec<OwnedNode>,
    /// Set for ERROR spans and MISSING insertions alike.
    pub is_error: bool,
}

impl OwnedNode {
    pub fn new(kind: impl Into<String>, start: Point, end: Point) -> Self {
        let kind = kind.into();
        let is_error = kind == ERROR_KIND;
        Self {
            kind,
            start,
            end,
            children: Vec::new(),
            is_error,
        }
    }

    pub fn with_children(mut self, children: Vec<OwnedNode>) -> Self {
        self.children = children;
        self
    }

    /// Copy an entire subtree out of any [`SyntaxNode`] implementation.
    ///
    /// Kinds are copied verbatim; error status is carried in `is_error`, so a
    /// MISSING node keeps the kind of the token the parser expected.
    pub fn snapshot<N: SyntaxNode>(node: &N) -> Self {
        Self {
            kind: node.kind().to_string(),
            start: node.start(),
            end: node.end(),
            children: node.child_nodes().iter().map(Self::snapshot).collect(),
            is_error: node.is_error_marker(),
        }
    }
}

impl<'a> SyntaxNode for &'a OwnedNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }

    fn child_nodes(&self) -> Vec<Self> {
        self.children.iter().collect()
    }

    fn is_error_marker(&self) -> bool {
        self.is_error
    }
}
