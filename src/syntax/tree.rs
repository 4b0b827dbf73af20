//! Arena-backed syntax tree
//!
//! Nodes live in a flat `Vec` owned by the tree and refer to each other by
//! `NodeId`. Parent links are plain indices, so a tree has no reference
//! cycles and can be shared with worker threads behind an `Arc`.

use std::fmt;

/// Handle to a node inside a [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node of every tree
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: &'static str,
    field: Option<&'static str>,
    named: bool,
    start: usize,
    end: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Immutable syntax tree over an owned copy of the source text
#[derive(Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// The root node
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node by handle
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Source text the tree was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Smallest node spanning `offset`
    ///
    /// Offsets past the end of the document are clamped to the last byte.
    /// A node spans `offset` when `start <= offset < end`; when no child
    /// spans it the current node is returned.
    pub fn node_at(&self, offset: usize) -> Node<'_> {
        let offset = offset.min(self.source.len().saturating_sub(1));
        let mut current = self.root();

        'descend: loop {
            for child in current.children() {
                if child.source_offset() <= offset && offset < child.end_offset() {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("nodes", &self.nodes.len())
            .field("source_len", &self.source.len())
            .finish()
    }
}

/// Read-only view of one node
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Grammar kind, e.g. `call`, `block_body`, `identifier`
    pub fn kind(&self) -> &'static str {
        self.tree.data(self.id).kind
    }

    /// Field name this node occupies in its parent (`method`, `block`, ...)
    pub fn field_name(&self) -> Option<&'static str> {
        self.tree.data(self.id).field
    }

    /// Named nodes are grammar rules; anonymous ones are punctuation/keywords
    pub fn is_named(&self) -> bool {
        self.tree.data(self.id).named
    }

    /// Byte offset of the node's first character
    pub fn source_offset(&self) -> usize {
        self.tree.data(self.id).start
    }

    /// Byte offset one past the node's last character
    pub fn end_offset(&self) -> usize {
        self.tree.data(self.id).end
    }

    /// Raw source text covered by the node
    pub fn text(&self) -> &'t str {
        let data = self.tree.data(self.id);
        self.tree.source.get(data.start..data.end).unwrap_or("")
    }

    /// Text spanning from this node's start up to `offset` (exclusive)
    pub fn text_until(&self, offset: usize) -> &'t str {
        let start = self.source_offset();
        let end = offset.clamp(start, self.end_offset());
        self.tree.source.get(start..end).unwrap_or("")
    }

    pub fn is_whitespace(&self) -> bool {
        self.text().trim().is_empty()
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        let tree = self.tree;
        tree.data(self.id).parent.map(|id| Node { tree, id })
    }

    pub fn child_count(&self) -> usize {
        self.tree.data(self.id).children.len()
    }

    pub fn child(&self, index: usize) -> Option<Node<'t>> {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .get(index)
            .map(|&id| Node { tree, id })
    }

    /// Ordered children, named and anonymous
    pub fn children(&self) -> impl Iterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    /// Ordered named children, skipping punctuation and keywords
    pub fn named_children(&self) -> impl Iterator<Item = Node<'t>> + 't {
        self.children().filter(|c| c.is_named())
    }

    /// First child stored under `field`
    pub fn child_by_field(&self, field: &str) -> Option<Node<'t>> {
        self.children().find(|c| c.field_name() == Some(field))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}..{}",
            self.kind(),
            self.source_offset(),
            self.end_offset()
        )
    }
}

/// Builds a [`SyntaxTree`] by appending source text
///
/// `open`/`close` bracket a node around whatever text is appended in
/// between; `token` appends text as a leaf. Used by the tree-sitter
/// lowering and by hosts or tests that build trees by hand.
#[derive(Debug)]
pub struct TreeBuilder {
    source: String,
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    /// Start a tree whose root has the given kind
    pub fn new(root_kind: &'static str) -> Self {
        Self {
            source: String::new(),
            nodes: vec![NodeData {
                kind: root_kind,
                field: None,
                named: true,
                start: 0,
                end: 0,
                parent: None,
                children: Vec::new(),
            }],
            stack: vec![NodeId::ROOT],
        }
    }

    /// Start a tree over existing source; nodes are added with [`Self::push_span`]
    pub fn with_source(root_kind: &'static str, source: impl Into<String>) -> Self {
        let mut builder = Self::new(root_kind);
        builder.source = source.into();
        builder.nodes[0].end = builder.source.len();
        builder
    }

    /// Current end of the source text
    pub fn offset(&self) -> usize {
        self.source.len()
    }

    /// Open a node at the current offset; subsequent nodes become its children
    pub fn open(&mut self, kind: &'static str, field: Option<&'static str>) -> &mut Self {
        let start = self.source.len();
        let id = self.attach(kind, field, is_named_kind(kind), start, start);
        self.stack.push(id);
        self
    }

    /// Close the most recently opened node at the current offset
    pub fn close(&mut self) -> &mut Self {
        if self.stack.len() > 1 {
            if let Some(id) = self.stack.pop() {
                self.nodes[id.0].end = self.source.len();
            }
        }
        self
    }

    /// Append `text` as a leaf node
    pub fn token(
        &mut self,
        kind: &'static str,
        field: Option<&'static str>,
        text: &str,
    ) -> &mut Self {
        let start = self.source.len();
        self.source.push_str(text);
        let end = self.source.len();
        self.attach(kind, field, is_named_kind(kind), start, end);
        self
    }

    /// Append text that belongs to no node of its own (whitespace, newlines)
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.source.push_str(text);
        self
    }

    /// Open a node over an explicit span of pre-supplied source
    pub fn push_span(
        &mut self,
        kind: &'static str,
        field: Option<&'static str>,
        named: bool,
        start: usize,
        end: usize,
    ) -> NodeId {
        let id = self.attach(kind, field, named, start, end);
        self.stack.push(id);
        id
    }

    /// Close a node opened with [`Self::push_span`], keeping its explicit end
    pub fn pop_span(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn finish(mut self) -> SyntaxTree {
        if self.nodes[0].end < self.source.len() {
            self.nodes[0].end = self.source.len();
        }
        let len = self.source.len();
        while self.stack.len() > 1 {
            if let Some(id) = self.stack.pop() {
                // Unclosed nodes run to the end of the document
                if self.nodes[id.0].end == self.nodes[id.0].start {
                    self.nodes[id.0].end = len;
                }
            }
        }
        SyntaxTree {
            source: self.source,
            nodes: self.nodes,
        }
    }

    fn attach(
        &mut self,
        kind: &'static str,
        field: Option<&'static str>,
        named: bool,
        start: usize,
        end: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.stack.last().copied().unwrap_or(NodeId::ROOT);
        self.nodes.push(NodeData {
            kind,
            field,
            named,
            start,
            end,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

/// Ruby keywords surface as anonymous nodes in the grammar
const KEYWORD_KINDS: &[&str] = &[
    "do", "end", "def", "if", "else", "elsif", "unless", "then", "begin", "class", "module",
    "return", "while", "until", "case", "when", "and", "or", "not", "yield",
];

/// Grammar rule names are words; punctuation and keywords are anonymous
fn is_named_kind(kind: &str) -> bool {
    kind.chars().any(|c| c.is_ascii_alphabetic()) && !KEYWORD_KINDS.contains(&kind)
}
