//! Enclosing Context: locate the logical unit of Python code around a line range
//!
//! Given a file and a line range, the finder reports the largest function,
//! class or control-flow block whose span fully contains the range. A second
//! operation reports whether a file parses without syntax errors. Parsing is
//! delegated to tree-sitter with the Python grammar.
//!
//! # Architecture
//!
//! Traversal is written against [`SyntaxNode`], a minimal view of a tree node
//! (kind, start, end, children). The tree-sitter node type implements it, so
//! the search and validation logic never depend on the parser directly.
//!
//! Parsers are explicitly owned: a [`PythonBackend`] holds one and must not be
//! shared across threads. [`pool::with_parser`] provides one parser per thread
//! for callers that prefer free functions.
//!
//! # Example
//!
//! ```no_run
//! use enclosing_context::{LanguageParser, PythonBackend};
//!
//! let source = "def handler(event):\n    if event:\n        return 1\n    return 0\n";
//! let mut backend = PythonBackend::new().expect("python grammar loads");
//!
//! let ctx = backend.find_enclosing_context(source, 3, 3);
//! if let Some(node) = ctx.node() {
//!     println!("{} at lines {}-{}", node.node_type, node.start_line(), node.end_line());
//! }
//!
//! assert!(backend.dry_run(source).valid);
//! ```

pub mod backend;
pub mod config;
pub mod context;
pub mod pool;
pub mod ts;
pub mod validate;

// Re-exports
pub use backend::{LanguageParser, PythonBackend};
pub use config::{load_from_path, load_from_str, ConfigError, FinderConfig};
pub use context::{
    find_enclosing_node, AstNode, ContextError, EnclosingContext, LineRange, LocationData,
    NodeLocation,
};
pub use ts::{
    NodeKinds, OwnedNode, ParsedSource, Point, PythonParser, SyntaxNode, TreeSitterError,
    PYTHON_SCOPE_KINDS,
};
pub use validate::{validate_syntax, ValidationResult, SYNTAX_ERROR_MESSAGE};

/// Find the enclosing context for `line_start..=line_end` with a fresh parser.
///
/// Failures are logged and reported as an absent context. Prefer a long-lived
/// [`PythonBackend`] when issuing many queries.
pub fn find_enclosing_context(source: &str, line_start: usize, line_end: usize) -> EnclosingContext {
    match PythonBackend::new() {
        Ok(mut backend) => backend.find_enclosing_context(source, line_start, line_end),
        Err(e) => {
            log::error!("Error parsing Python code: {e}");
            EnclosingContext::none()
        }
    }
}
