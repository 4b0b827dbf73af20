//! Tree-sitter Ruby parsing
//!
//! Parses spec source with tree-sitter-ruby and lowers the result into the
//! crate's arena [`SyntaxTree`], keeping node kinds, field names and byte
//! spans as tree-sitter reports them.

use tree_sitter::{Parser, TreeCursor};

use super::tree::{SyntaxTree, TreeBuilder};
use crate::error::{Error, Result};

/// Parser instance for spec files (tree-sitter parsers are !Sync, keep one per thread)
pub struct SpecParser {
    parser: Parser,
}

impl SpecParser {
    /// Create a parser configured for Ruby
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_ruby::LANGUAGE.into())
            .map_err(|e| Error::ParseFailed {
                reason: e.to_string(),
            })?;
        Ok(Self { parser })
    }

    /// Parse source text into an arena tree
    ///
    /// Syntax errors do not fail the parse; tree-sitter recovers and emits
    /// `ERROR` nodes, which the classifier treats as ordinary nodes.
    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseFailed {
                reason: "tree-sitter returned no tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!("Parsed spec source with syntax errors ({} bytes)", source.len());
        }

        let mut builder = TreeBuilder::with_source(root.kind(), source);
        let mut cursor = tree.walk();
        if cursor.goto_first_child() {
            lower_siblings(&mut cursor, &mut builder);
        }

        let lowered = builder.finish();
        tracing::trace!("Lowered tree-sitter tree into {} arena nodes", lowered.len());
        Ok(lowered)
    }
}

impl std::fmt::Debug for SpecParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecParser").finish_non_exhaustive()
    }
}

/// Copy the cursor's current node and its following siblings (recursively) into the builder
fn lower_siblings(cursor: &mut TreeCursor<'_>, builder: &mut TreeBuilder) {
    loop {
        let node = cursor.node();
        builder.push_span(
            node.kind(),
            cursor.field_name(),
            node.is_named(),
            node.start_byte(),
            node.end_byte(),
        );

        if cursor.goto_first_child() {
            lower_siblings(cursor, builder);
            cursor.goto_parent();
        }
        builder.pop_span();

        if !cursor.goto_next_sibling() {
            break;
        }
    }
}
