//! Syntax validation.
//!
//! A file is valid when its tree contains no error markers. The result is a
//! boolean signal plus one fixed message: errors are not counted, located, or
//! classified here. [`crate::ts::ParsedSource::error_nodes`] is available to
//! callers that want positions.

use crate::pool;
use crate::ts::{has_error_nodes, PythonParser, SyntaxNode, TreeSitterError};
use serde::{Deserialize, Serialize};

/// Message reported for any tree that contains an error marker.
pub const SYNTAX_ERROR_MESSAGE: &str = "Syntax error in Python code";

/// Outcome of a syntax check. `error` is empty when `valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: String::new(),
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: error.into(),
        }
    }
}

/// Check an already-parsed tree for error markers.
pub fn validate_tree<N: SyntaxNode>(root: &N) -> ValidationResult {
    if has_error_nodes(root) {
        ValidationResult::invalid(SYNTAX_ERROR_MESSAGE)
    } else {
        ValidationResult::ok()
    }
}

/// Parse `source` with `parser` and check it for error markers.
///
/// A parse that fails outright is reported as invalid with the error text.
pub fn validate_with(parser: &mut PythonParser, source: &str) -> ValidationResult {
    match parser.parse(source) {
        Ok(tree) => validate_tree(&tree.root_node()),
        Err(e) => parse_failure(&e),
    }
}

/// Validate that Python source has no syntax errors, using a fresh parser.
pub fn validate_syntax(source: &str) -> ValidationResult {
    match PythonParser::new() {
        Ok(mut parser) => validate_with(&mut parser, source),
        Err(e) => parse_failure(&e),
    }
}

fn parse_failure(error: &TreeSitterError) -> ValidationResult {
    log::error!("Error parsing Python code: {error}");
    ValidationResult::invalid(error.to_string())
}

/// Pooled validation functions that reuse the thread-local parser.
pub mod pooled {
    use super::*;

    /// Validate source code using the pooled parser.
    pub fn validate_syntax(source: &str) -> ValidationResult {
        match pool::with_parser(|parser| validate_with(parser, source)) {
            Ok(result) => result,
            Err(e) => parse_failure(&e),
        }
    }
}
