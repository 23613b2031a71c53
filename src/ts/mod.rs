//! Tree-sitter integration for Python source.
//!
//! This module owns everything that touches the grammar: the parser wrapper,
//! the parser-independent node view used by traversal code, and the allow-list
//! of scope kinds.

pub mod errors;
pub mod kinds;
pub mod node;
pub mod parser;

pub use errors::TreeSitterError;
pub use kinds::{NodeKinds, PYTHON_SCOPE_KINDS};
pub use node::{OwnedNode, Point, SyntaxNode, ERROR_KIND};
pub use parser::{has_error_nodes, ErrorNode, ParsedSource, PythonParser};
