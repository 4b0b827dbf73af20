//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::HashMap;

use rspec_context::host::{EditorSurface, Host, ListView};
use rspec_context::model::{EditorId, ProjectId};
use rspec_context::panel::DisplayRow;
use rspec_context::syntax::{SpecParser, SyntaxTree, TreeBuilder};

/// Parse Ruby source with the real parser
pub fn parse(source: &str) -> SyntaxTree {
    SpecParser::new().unwrap().parse(source).unwrap()
}

/// Byte offset of the first occurrence of `needle`
pub fn offset_of(source: &str, needle: &str) -> usize {
    source
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in source", needle))
}

pub const SCENARIO: &str = r#"describe "Outer" do
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

/// Builds spec-shaped trees by hand, mirroring the node shapes tree-sitter-ruby emits
///
/// Output is formatted with two-space indentation so the text matches what a
/// person would type, and can be compared against a real parse.
pub struct SpecTree {
    builder: TreeBuilder,
    depth: usize,
    marks: HashMap<String, usize>,
}

impl SpecTree {
    pub fn new() -> Self {
        Self {
            builder: TreeBuilder::new("program"),
            depth: 0,
            marks: HashMap::new(),
        }
    }

    /// `method "label" do ... end`
    pub fn group(&mut self, method: &str, label: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.indent();
        let label = format!("\"{}\"", label);
        self.builder
            .open("call", None)
            .token("identifier", Some("method"), method)
            .text(" ")
            .open("argument_list", Some("arguments"))
            .token("string", None, &label)
            .close()
            .text(" ")
            .open("do_block", Some("block"))
            .token("do", None, "do")
            .text("\n")
            .open("body_statement", None);
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.builder.close();
        self.indent();
        self.builder.token("end", None, "end").close().close().text("\n");
        self
    }

    /// `method(:name) { body }`, or `method { body }` without a name
    pub fn binding(&mut self, method: &str, name: Option<&str>, body: &str) -> &mut Self {
        self.indent();
        self.builder
            .open("call", None)
            .token("identifier", Some("method"), method);
        if let Some(name) = name {
            let symbol = format!(":{}", name);
            self.builder
                .open("argument_list", Some("arguments"))
                .token("(", None, "(")
                .token("simple_symbol", None, &symbol)
                .token(")", None, ")")
                .close();
        }
        self.brace_block(body);
        self.builder.close().text("\n");
        self
    }

    /// `before { body }`
    pub fn hook(&mut self, body: &str) -> &mut Self {
        self.indent();
        self.builder
            .open("call", None)
            .token("identifier", Some("method"), "before");
        self.brace_block(body);
        self.builder.close().text("\n");
        self
    }

    /// A bare identifier statement whose offset is recorded under `name`
    pub fn mark(&mut self, name: &str) -> &mut Self {
        self.indent();
        self.marks.insert(name.to_string(), self.builder.offset());
        self.builder.token("identifier", None, name).text("\n");
        self
    }

    pub fn finish(self) -> (SyntaxTree, HashMap<String, usize>) {
        (self.builder.finish(), self.marks)
    }

    fn brace_block(&mut self, body: &str) {
        self.builder
            .text(" ")
            .open("block", Some("block"))
            .token("{", None, "{")
            .text(" ")
            .open("block_body", None)
            .token("identifier", None, body)
            .close()
            .text(" ")
            .token("}", None, "}")
            .close();
    }

    fn indent(&mut self) {
        let pad = "  ".repeat(self.depth);
        self.builder.text(&pad);
    }
}

/// The scenario above, built by hand
pub fn scenario_tree() -> (SyntaxTree, usize) {
    let mut spec = SpecTree::new();
    spec.group("describe", "Outer", |s| {
        s.binding("let", Some("x"), "1");
        s.group("context", "Inner", |s| {
            s.binding("let!", Some("y"), "2");
            s.hook("setup!");
            s.group("it", "works", |s| {
                s.mark("CURSOR");
            });
        });
    });
    let (tree, marks) = spec.finish();
    (tree, marks["CURSOR"])
}

/// Host that records every effect the runtime applies
pub struct TestHost {
    pub editors: HashMap<EditorId, TestEditor>,
    pub lists: HashMap<ProjectId, TestList>,
}

#[derive(Debug, Default)]
pub struct TestEditor {
    pub caret: usize,
    pub scrolls: usize,
    pub broken: bool,
}

#[derive(Debug, Default)]
pub struct TestList {
    pub history: Vec<Vec<DisplayRow>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            editors: HashMap::new(),
            lists: HashMap::new(),
        }
    }

    pub fn with_editor(mut self, editor: EditorId, caret: usize) -> Self {
        self.editors.insert(
            editor,
            TestEditor {
                caret,
                ..TestEditor::default()
            },
        );
        self
    }

    pub fn with_list(mut self, project: ProjectId) -> Self {
        self.lists.insert(project, TestList::default());
        self
    }

    pub fn set_caret(&mut self, editor: EditorId, caret: usize) {
        if let Some(e) = self.editors.get_mut(&editor) {
            e.caret = caret;
        }
    }

    pub fn caret(&self, editor: EditorId) -> usize {
        self.editors[&editor].caret
    }

    pub fn last_rows(&self, project: ProjectId) -> Option<&Vec<DisplayRow>> {
        self.lists.get(&project).and_then(|l| l.history.last())
    }

    pub fn row_updates(&self, project: ProjectId) -> usize {
        self.lists.get(&project).map_or(0, |l| l.history.len())
    }
}

impl EditorSurface for TestEditor {
    fn caret_offset(&self) -> usize {
        self.caret
    }

    fn move_caret_to(&mut self, offset: usize) {
        if self.broken {
            panic!("editor surface is broken");
        }
        self.caret = offset;
    }

    fn scroll_caret_into_view(&mut self) {
        self.scrolls += 1;
    }
}

impl ListView for TestList {
    fn set_rows(&mut self, rows: &[DisplayRow]) {
        self.history.push(rows.to_vec());
    }
}

impl Host for TestHost {
    fn editor(&mut self, id: EditorId) -> Option<&mut dyn EditorSurface> {
        self.editors
            .get_mut(&id)
            .map(|e| e as &mut dyn EditorSurface)
    }

    fn list_view(&mut self, project: ProjectId) -> Option<&mut dyn ListView> {
        self.lists
            .get_mut(&project)
            .map(|l| l as &mut dyn ListView)
    }
}

/// Labels of a row list, dividers rendered as "---"
pub fn labels(rows: &[DisplayRow]) -> Vec<String> {
    rows.iter()
        .map(|row| match row {
            DisplayRow::Divider => "---".to_string(),
            row => row.label(),
        })
        .collect()
}
