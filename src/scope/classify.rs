//! Node classification
//!
//! Maps a syntax node onto the four shapes the resolver cares about. Only
//! block calls (`call` nodes with a `{ }` or `do ... end` block) classify as
//! anything other than [`NodeClass::Other`].

use super::{Binding, BindingKind, GroupDescriptor, SetupHook};
use crate::syntax::Node;

/// Call prefixes that open a breadcrumb level
const GROUP_PREFIXES: &[&str] = &["context", "describe", "it"];

/// The only receiver allowed on DSL calls (`RSpec.describe`)
const DSL_RECEIVER: &str = "RSpec";

/// Classification of a single node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeClass {
    ValueBinding(Binding),
    SetupHook(SetupHook),
    Group(GroupDescriptor),
    Other,
}

/// A node that looks like a DSL call but lacks the expected structure
#[derive(Debug)]
struct MalformedNode {
    reason: &'static str,
}

/// Classify a node; malformed candidates come back as [`NodeClass::Other`]
pub fn classify(node: Node<'_>) -> NodeClass {
    let Some(block) = block_of(node) else {
        return NodeClass::Other;
    };
    let Some(leading) = leading_call_text(node, block) else {
        return NodeClass::Other;
    };

    let result = if leading.starts_with("let") || leading.starts_with("subject") {
        value_binding(node, block, leading)
    } else if leading.starts_with("before") {
        Ok(setup_hook(node, block))
    } else if GROUP_PREFIXES.iter().any(|prefix| leading.starts_with(prefix)) {
        Ok(group(node))
    } else {
        return NodeClass::Other;
    };

    match result {
        Ok(class) => class,
        Err(MalformedNode { reason }) => {
            tracing::trace!("Treating {:?} as other: {}", node, reason);
            NodeClass::Other
        }
    }
}

/// The attached `{ }`/`do ... end` block, if the node is a block call
pub(super) fn block_of(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() != "call" {
        return None;
    }
    node.child_by_field("block")
        .or_else(|| node.children().find(|c| is_block_kind(c.kind())))
        .filter(|block| is_block_kind(block.kind()))
}

fn is_block_kind(kind: &str) -> bool {
    matches!(kind, "block" | "do_block")
}

/// The statement list wrapped by a block, if it has one
pub(super) fn block_body(block: Node<'_>) -> Option<Node<'_>> {
    block
        .named_children()
        .filter(|c| !matches!(c.kind(), "block_parameters" | "comment"))
        .last()
}

/// Call text before the arguments (or block), with an `RSpec.` receiver removed
///
/// Calls on any other receiver (`items.each do`) are not DSL calls.
fn leading_call_text<'t>(node: Node<'t>, block: Node<'t>) -> Option<&'t str> {
    let args_or_block = node.child_by_field("arguments").unwrap_or(block);
    let text = node.text_until(args_or_block.source_offset()).trim();

    match node.child_by_field("receiver") {
        None => Some(text),
        Some(receiver) if receiver.text() == DSL_RECEIVER => {
            let method = text.strip_prefix(DSL_RECEIVER)?;
            Some(method.trim_start_matches(['.', ':']))
        }
        Some(_) => None,
    }
}

fn value_binding(
    node: Node<'_>,
    block: Node<'_>,
    leading: &str,
) -> Result<NodeClass, MalformedNode> {
    let (kind, name) = match leading {
        "let" | "let!" => {
            let kind = if leading == "let!" {
                BindingKind::MemoizedBang
            } else {
                BindingKind::Memoized
            };
            let argument = node
                .child_by_field("arguments")
                .and_then(|args| args.named_children().next())
                .ok_or(MalformedNode {
                    reason: "binding call without a name argument",
                })?;
            let name = literal_name(argument.text());
            if name.is_empty() {
                return Err(MalformedNode {
                    reason: "binding name is empty",
                });
            }
            (kind, name.to_string())
        }
        _ if leading.starts_with("subject") => (BindingKind::Subject, "subject".to_string()),
        _ => {
            return Err(MalformedNode {
                reason: "unrecognized binding form",
            })
        }
    };

    Ok(NodeClass::ValueBinding(Binding {
        kind,
        name,
        body: body_text(block),
        source_offset: node.source_offset(),
    }))
}

fn setup_hook(node: Node<'_>, block: Node<'_>) -> NodeClass {
    NodeClass::SetupHook(SetupHook {
        call: node.text_until(block.source_offset()).trim().to_string(),
        body: body_text(block),
        text: node.text().to_string(),
        source_offset: node.source_offset(),
    })
}

/// Label from the first string argument, else the first argument's raw text
fn group(node: Node<'_>) -> NodeClass {
    let arguments = node.child_by_field("arguments");
    let first_string = arguments.and_then(|args| args.named_children().find(|a| a.kind() == "string"));
    let label = match first_string {
        Some(string) => strip_quotes(string.text()),
        None => arguments
            .and_then(|args| args.named_children().next())
            .map(|arg| arg.text())
            .unwrap_or(""),
    };

    NodeClass::Group(GroupDescriptor {
        label: label.to_string(),
        source_offset: node.source_offset(),
    })
}

fn body_text(block: Node<'_>) -> String {
    block_body(block)
        .map(|body| body.text().trim().to_string())
        .unwrap_or_default()
}

/// `:x`, `"x"` and `'x'` all name the binding `x`
fn literal_name(text: &str) -> &str {
    strip_quotes(text.trim().trim_start_matches(':'))
}

/// Strip one matching pair of surrounding quotes
fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text.strip_prefix(quote).and_then(|t| t.strip_suffix(quote)) {
            return inner;
        }
    }
    text
}
