//! Scope resolution
//!
//! Walks from the cursor to the innermost enclosing block call, then up to
//! the document root, collecting what each level declares.

use std::collections::BTreeMap;

use super::classify::{block_body, block_of, classify, NodeClass};
use super::{ResolvedContext, SetupHook};
use crate::syntax::{Node, SyntaxTree};

/// Resolve the declarations in scope at `cursor_offset`
///
/// `cursor_offset` should already be anchored off whitespace (see
/// [`crate::syntax::SpecDocument::anchor_offset`]). A cursor outside any
/// block resolves from the root and yields the top-level declarations.
pub fn resolve(tree: &SyntaxTree, cursor_offset: usize) -> ResolvedContext {
    #[cfg(feature = "profile-tracing")]
    let _span = tracing::debug_span!("resolve", offset = cursor_offset).entered();

    let mut current = match enclosing_block_call(tree.node_at(cursor_offset)) {
        Some(call) => scannable_body(call),
        None => tree.root(),
    };

    let mut bindings = BTreeMap::new();
    // Hooks per level, innermost level first
    let mut hook_levels: Vec<Vec<SetupHook>> = Vec::new();
    let mut breadcrumb = Vec::new();

    loop {
        let mut level_hooks = Vec::new();
        for child in current.children() {
            match classify(child) {
                NodeClass::ValueBinding(binding) => {
                    // Ascent moves away from the cursor, so the first writer is nearest
                    bindings.entry(binding.name.clone()).or_insert(binding);
                }
                NodeClass::SetupHook(hook) => level_hooks.push(hook),
                NodeClass::Group(_) | NodeClass::Other => {}
            }
        }
        if !level_hooks.is_empty() {
            hook_levels.push(level_hooks);
        }

        if let NodeClass::Group(group) = classify(current) {
            breadcrumb.push(group);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    hook_levels.reverse();
    breadcrumb.reverse();

    let context = ResolvedContext {
        bindings,
        hooks: hook_levels.into_iter().flatten().collect(),
        breadcrumb,
    };
    tracing::debug!(
        "Resolved offset {}: {} bindings, {} hooks, depth {}",
        cursor_offset,
        context.bindings.len(),
        context.hooks.len(),
        context.breadcrumb.len()
    );
    context
}

/// Nearest ancestor-or-self that is a call with an attached block
fn enclosing_block_call(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if block_of(candidate).is_some() {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// The statement list inside a block call: `call { |args| body }` → `body`
fn scannable_body(call: Node<'_>) -> Node<'_> {
    let Some(block) = block_of(call) else {
        return call;
    };
    block_body(block).unwrap_or(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::BindingKind;
    use crate::syntax::SpecParser;

    fn parse(source: &str) -> SyntaxTree {
        SpecParser::new().unwrap().parse(source).unwrap()
    }

    fn offset_of(source: &str, needle: &str) -> usize {
        source.find(needle).expect("needle present")
    }

    const SCENARIO: &str = r#"describe "Outer" do
  let(:x) { 1 }

  context "Inner" do
    let!(:y) { 2 }
    before { setup! }

    it "works" do
      CURSOR
    end
  end
end
"#;

    #[test]
    fn test_scenario_resolution() {
        let tree = parse(SCENARIO);
        let context = resolve(&tree, offset_of(SCENARIO, "CURSOR"));

        let names: Vec<_> = context.bindings.keys().cloned().collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(context.bindings["x"].kind, BindingKind::Memoized);
        assert_eq!(context.bindings["y"].kind, BindingKind::MemoizedBang);
        assert_eq!(context.bindings["x"].body, "1");

        let hooks: Vec<_> = context.hooks.iter().map(|h| h.body.as_str()).collect();
        assert_eq!(hooks, vec!["setup!"]);

        let crumbs: Vec<_> = context.breadcrumb.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(crumbs, vec!["Outer", "Inner", "works"]);
    }

    #[test]
    fn test_inner_binding_shadows_outer() {
        let source = r#"describe "A" do
  let(:user) { :outer }
  context "B" do
    let(:user) { :inner }
    it "x" do
      CURSOR
    end
  end
end
"#;
        let tree = parse(source);
        let context = resolve(&tree, offset_of(source, "CURSOR"));
        assert_eq!(context.bindings.len(), 1);
        assert_eq!(context.bindings["user"].body, ":inner");
        assert_eq!(
            context.bindings["user"].source_offset,
            offset_of(source, "let(:user) { :inner }")
        );
    }

    #[test]
    fn test_same_depth_first_sibling_wins() {
        let source = "describe \"A\" do\n  let(:v) { :first }\n  let(:v) { :second }\n  it \"x\" do\n    CURSOR\n  end\nend\n";
        let tree = parse(source);
        let context = resolve(&tree, offset_of(source, "CURSOR"));
        assert_eq!(context.bindings["v"].body, ":first");
    }

    #[test]
    fn test_hooks_are_outermost_first() {
        let source = r#"describe "A" do
  before { one }
  context "B" do
    before { two }
    context "C" do
      before { three }
      before { four }
      it "x" do
        CURSOR
      end
    end
  end
end
"#;
        let tree = parse(source);
        let context = resolve(&tree, offset_of(source, "CURSOR"));
        let hooks: Vec<_> = context.hooks.iter().map(|h| h.body.as_str()).collect();
        assert_eq!(hooks, vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn test_breadcrumb_is_outermost_first() {
        let source = "describe \"A\" do\n  context \"B\" do\n    context \"C\" do\n      CURSOR\n    end\n  end\nend\n";
        let tree = parse(source);
        let context = resolve(&tree, offset_of(source, "CURSOR"));
        let crumbs: Vec<_> = context.breadcrumb.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(crumbs, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let tree = parse(SCENARIO);
        let offset = offset_of(SCENARIO, "CURSOR");
        let first = resolve(&tree, offset);
        let second = resolve(&tree, offset);
        assert_eq!(first, second);
        assert_eq!(tree.source(), SCENARIO);
    }

    #[test]
    fn test_cursor_outside_blocks_sees_top_level() {
        let source = "let(:top) { 1 }\nbefore { boot }\n\nputs :CURSOR\n";
        let tree = parse(source);
        let context = resolve(&tree, offset_of(source, "CURSOR"));
        assert!(context.bindings.contains_key("top"));
        assert_eq!(context.hooks.len(), 1);
        assert!(context.breadcrumb.is_empty());
    }

    #[test]
    fn test_empty_document_resolves_empty() {
        let tree = parse("");
        let context = resolve(&tree, 0);
        assert!(context.is_empty());
    }

    #[test]
    fn test_sibling_example_bindings_are_out_of_scope() {
        let source = r#"describe "A" do
  it "one" do
    let(:hidden) { 1 }
  end
  it "two" do
    CURSOR
  end
end
"#;
        let tree = parse(source);
        let context = resolve(&tree, offset_of(source, "CURSOR"));
        assert!(context.bindings.is_empty());
        let crumbs: Vec<_> = context.breadcrumb.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(crumbs, vec!["A", "two"]);
    }

    #[test]
    fn test_cursor_inside_let_body() {
        let source = "describe \"A\" do\n  let(:a) { 1 }\n  let(:b) { a + 1 }\nend\n";
        let tree = parse(source);
        let context = resolve(&tree, offset_of(source, "a + 1"));
        assert!(context.bindings.contains_key("a"));
        assert!(context.bindings.contains_key("b"));
        assert_eq!(context.breadcrumb.len(), 1);
    }
}
