//! Open spec document: text buffer plus the latest syntax tree
//!
//! The document is the tree provider for resolution. It owns the arena
//! tree behind an `Arc` so a snapshot can be handed to a worker thread
//! while the interactive side keeps editing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ropey::Rope;

use super::parser::SpecParser;
use super::tree::SyntaxTree;
use crate::error::Result;

/// A parsed spec file
#[derive(Debug, Clone)]
pub struct SpecDocument {
    /// File path, if the document was loaded from disk
    pub path: Option<PathBuf>,
    /// Text content
    pub buffer: Rope,
    /// Incremented on every text change
    pub revision: u64,
    tree: Arc<SyntaxTree>,
}

impl SpecDocument {
    /// Parse `text` into a new document
    pub fn parse(parser: &mut SpecParser, text: &str) -> Result<Self> {
        let tree = parser.parse(text)?;
        Ok(Self {
            path: None,
            buffer: Rope::from_str(text),
            revision: 0,
            tree: Arc::new(tree),
        })
    }

    /// Read and parse a file from disk
    pub fn from_file(parser: &mut SpecParser, path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut doc = Self::parse(parser, &text)?;
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Replace the document text and re-parse
    pub fn set_text(&mut self, parser: &mut SpecParser, text: &str) -> Result<()> {
        let tree = parser.parse(text)?;
        self.buffer = Rope::from_str(text);
        self.tree = Arc::new(tree);
        self.revision += 1;
        tracing::debug!(
            "Re-parsed document {:?} at revision {}",
            self.path,
            self.revision
        );
        Ok(())
    }

    /// Shared snapshot of the current tree
    pub fn tree(&self) -> Arc<SyntaxTree> {
        Arc::clone(&self.tree)
    }

    /// Length of the document in bytes
    pub fn len_bytes(&self) -> usize {
        self.buffer.len_bytes()
    }

    /// Move an offset off whitespace before resolution
    ///
    /// When the node under `offset` is pure whitespace, or the offset sits in
    /// the leading indentation of its line, the offset moves to the last
    /// non-whitespace character of that line. Blank lines are left alone.
    pub fn anchor_offset(&self, offset: usize) -> usize {
        let len = self.buffer.len_bytes();
        if len == 0 {
            return 0;
        }
        let offset = offset.min(len);

        let node = self.tree.node_at(offset);
        let line_idx = self.buffer.byte_to_line(offset);
        let line_start = self.buffer.line_to_byte(line_idx);
        let line = self.buffer.line(line_idx).to_string();

        let before_cursor = line.get(..offset - line_start).unwrap_or("");
        let in_indent = before_cursor.chars().all(char::is_whitespace);
        if !node.is_whitespace() && !in_indent {
            return offset;
        }

        match line.trim_end().char_indices().last() {
            Some((last, _)) => line_start + last,
            None => offset,
        }
    }

    /// Convert a 0-indexed line/column (in chars) to a byte offset, clamped to the document
    pub fn line_col_to_offset(&self, line: usize, column: usize) -> usize {
        let line_count = self.buffer.len_lines();
        if line >= line_count {
            return self.buffer.len_bytes();
        }
        let line_start = self.buffer.line_to_char(line);
        let line_len = self.buffer.line(line).len_chars();
        let char_idx = line_start + column.min(line_len);
        self.buffer.char_to_byte(char_idx)
    }

    /// Convert a byte offset to a 0-indexed line/column (in chars)
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.buffer.len_bytes());
        let char_idx = self.buffer.byte_to_char(offset);
        let line = self.buffer.char_to_line(char_idx);
        (line, char_idx - self.buffer.line_to_char(line))
    }
}

/// Whether a file should get a cursor watch, based on its file name suffix
pub fn is_spec_path(path: &Path, suffixes: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
}
