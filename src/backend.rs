//! Language backends.
//!
//! A backend owns one parser and answers both queries for its language. The
//! output shapes are shared by all backends so callers can mix them freely.

use crate::config::FinderConfig;
use crate::context::{find_enclosing_node, AstNode, ContextError, EnclosingContext, LineRange};
use crate::ts::{NodeKinds, PythonParser, TreeSitterError};
use crate::validate::{validate_with, ValidationResult};

/// Contract every language backend implements.
pub trait LanguageParser {
    /// Largest allow-listed construct fully containing `line_start..=line_end`.
    ///
    /// Never fails: parse failures and invalid ranges are logged and reported
    /// as an absent context, the same as "nothing found".
    fn find_enclosing_context(
        &mut self,
        source: &str,
        line_start: usize,
        line_end: usize,
    ) -> EnclosingContext;

    /// Check that `source` parses without syntax errors.
    fn dry_run(&mut self, source: &str) -> ValidationResult;
}

/// Python backend on top of tree-sitter.
pub struct PythonBackend {
    parser: PythonParser,
    kinds: NodeKinds,
}

impl PythonBackend {
    /// Create a backend with the default Python allow-list.
    pub fn new() -> Result<Self, TreeSitterError> {
        Self::with_kinds(NodeKinds::python())
    }

    pub fn with_kinds(kinds: NodeKinds) -> Result<Self, TreeSitterError> {
        Ok(Self {
            parser: PythonParser::new()?,
            kinds,
        })
    }

    /// Create a backend whose allow-list is adjusted by `config`.
    pub fn from_config(config: &FinderConfig) -> Result<Self, TreeSitterError> {
        Self::with_kinds(config.node_kinds())
    }

    pub fn kinds(&self) -> &NodeKinds {
        &self.kinds
    }

    /// Like [`LanguageParser::find_enclosing_context`], but keeps "parse
    /// failed" apart from "nothing found".
    pub fn try_find_enclosing_context(
        &mut self,
        source: &str,
        range: LineRange,
    ) -> Result<Option<AstNode>, ContextError> {
        let tree = self.parser.parse(source)?;
        let found = find_enclosing_node(tree.root_node(), range, &self.kinds)
            .map(|node| AstNode::from_node(&node));

        match &found {
            Some(node) => log::debug!(
                "lines {}-{} enclosed by {} at {}-{}",
                range.start(),
                range.end(),
                node.node_type,
                node.start_line(),
                node.end_line()
            ),
            None => log::debug!(
                "no enclosing context for lines {}-{}",
                range.start(),
                range.end()
            ),
        }

        Ok(found)
    }

    /// Direct access to the parser, e.g. to collect error positions.
    pub fn parser_mut(&mut self) -> &mut PythonParser {
        &mut self.parser
    }
}

impl LanguageParser for PythonBackend {
    fn find_enclosing_context(
        &mut self,
        source: &str,
        line_start: usize,
        line_end: usize,
    ) -> EnclosingContext {
        let range = match LineRange::new(line_start, line_end) {
            Ok(range) => range,
            Err(e) => {
                log::warn!("{e}");
                return EnclosingContext::none();
            }
        };

        match self.try_find_enclosing_context(source, range) {
            Ok(found) => found.into(),
            Err(e) => {
                log::error!("Error parsing Python code: {e}");
                EnclosingContext::none()
            }
        }
    }

    fn dry_run(&mut self, source: &str) -> ValidationResult {
        validate_with(&mut self.parser, source)
    }
}
