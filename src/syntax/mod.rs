//! Syntax trees for spec files
//!
//! Provides the tree the scope resolver walks:
//! - Arena-backed [`SyntaxTree`] with `NodeId` handles and index parent links
//! - Tree-sitter Ruby parsing lowered into the arena
//! - [`SpecDocument`] pairing a text buffer with its latest tree
//!
//! ## Architecture
//!
//! ```text
//! File text → SpecParser (tree-sitter-ruby) → SyntaxTree (arena)
//!           → SpecDocument::anchor_offset → SyntaxTree::node_at → resolver
//! ```

mod document;
mod parser;
mod tree;

pub use document::{is_spec_path, SpecDocument};
pub use parser::SpecParser;
pub use tree::{Node, NodeId, SyntaxTree, TreeBuilder};
