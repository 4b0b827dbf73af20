//! Scope resolution for spec files
//!
//! Computes the lets, subjects, before hooks and group breadcrumb that are
//! in scope at a cursor offset. Runs on a worker thread: everything here is
//! a pure function of the tree and offset.

mod classify;
mod resolve;

pub use classify::{classify, NodeClass};
pub use resolve::resolve;

use std::collections::BTreeMap;

use serde::Serialize;

/// How a binding is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BindingKind {
    /// `let(:name) { ... }`
    Memoized,
    /// `let!(:name) { ... }`
    MemoizedBang,
    /// `subject { ... }`, always named "subject"
    Subject,
}

impl BindingKind {
    /// Declaration keyword as written in source
    pub fn keyword(&self) -> &'static str {
        match self {
            BindingKind::Memoized => "let",
            BindingKind::MemoizedBang => "let!",
            BindingKind::Subject => "subject",
        }
    }
}

/// A named value declaration in scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub kind: BindingKind,
    pub name: String,
    /// Raw text of the block body
    pub body: String,
    pub source_offset: usize,
}

/// A `before` hook in scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupHook {
    /// Call text up to the block, e.g. `before` or `before(:each)`
    pub call: String,
    /// Raw text of the block body
    pub body: String,
    /// Full source text of the hook
    pub text: String,
    pub source_offset: usize,
}

/// One enclosing `describe`/`context`/`it` level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDescriptor {
    pub label: String,
    pub source_offset: usize,
}

/// Result of one resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedContext {
    /// Keyed by binding name; the declaration nearest the cursor wins
    pub bindings: BTreeMap<String, Binding>,
    /// Outermost-declared first (execution order)
    pub hooks: Vec<SetupHook>,
    /// Outermost group first
    pub breadcrumb: Vec<GroupDescriptor>,
}

impl ResolvedContext {
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty() && self.hooks.is_empty() && self.breadcrumb.is_empty()
    }
}
