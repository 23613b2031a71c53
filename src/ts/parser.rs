use crate::ts::errors::TreeSitterError;
use crate::ts::node::{Point, SyntaxNode};
use tree_sitter::{Parser, Tree};

/// Tree-sitter parser wrapper for Python source code.
///
/// Parsing mutates the underlying engine state, hence `&mut self`. Keep one
/// instance per worker thread.
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new parser loaded with the Python grammar.
    pub fn new() -> Result<Self, TreeSitterError> {
        let mut parser = Parser::new();
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        parser
            .set_language(&language)
            .map_err(|e| TreeSitterError::LanguageSet {
                message: e.to_string(),
            })?;

        Ok(Self { parser })
    }

    /// Parse source code into a tree-sitter Tree.
    pub fn parse(&mut self, source: &str) -> Result<Tree, TreeSitterError> {
        self.parser
            .parse(source, None)
            .ok_or(TreeSitterError::ParseFailed)
    }

    /// Parse source code and return the tree along with the source.
    pub fn parse_with_source<'a>(
        &mut self,
        source: &'a str,
    ) -> Result<ParsedSource<'a>, TreeSitterError> {
        let tree = self.parse(source)?;
        Ok(ParsedSource { source, tree })
    }
}

/// A parsed source file with its tree-sitter tree.
pub struct ParsedSource<'a> {
    pub source: &'a str,
    pub tree: Tree,
}

impl<'a> ParsedSource<'a> {
    /// Get the root node of the tree.
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Check if the tree contains any error markers.
    pub fn has_errors(&self) -> bool {
        has_error_nodes(&self.tree.root_node())
    }

    /// Get all error markers in the tree, in traversal order.
    pub fn error_nodes(&self) -> Vec<ErrorNode> {
        let mut errors = Vec::new();
        collect_error_nodes(&self.tree.root_node(), &mut errors);
        errors
    }

    /// The source line containing `point`, without its line terminator.
    pub fn line_text(&self, point: Point) -> &'a str {
        self.source.lines().nth(point.row).unwrap_or("")
    }
}

/// Location of an error marker in the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNode {
    pub start: Point,
    pub end: Point,
}

/// Depth-first search for any error marker at any depth.
pub fn has_error_nodes<N: SyntaxNode>(node: &N) -> bool {
    if node.is_error_marker() {
        return true;
    }

    node.child_nodes().iter().any(has_error_nodes)
}

fn collect_error_nodes<N: SyntaxNode>(node: &N, errors: &mut Vec<ErrorNode>) {
    if node.is_error_marker() {
        errors.push(ErrorNode {
            start: node.start(),
            end: node.end(),
        });
    }

    for child in node.child_nodes() {
        collect_error_nodes(&child, errors);
    }
}
