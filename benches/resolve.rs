//! Benchmarks for scope resolution and row building
//!
//! Run with: cargo bench --bench resolve

use rspec_context::debounce::DebounceScheduler;
use rspec_context::syntax::{SpecDocument, SpecParser};
use rspec_context::{resolve, to_rows};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Helper to generate large spec files
// ============================================================================

/// `groups` top-level describes, each with nested contexts and examples
fn generate_large_spec(groups: usize) -> String {
    let mut source = String::with_capacity(groups * 400);
    source.push_str("require \"spec_helper\"\n\n");

    for i in 0..groups {
        source.push_str(&format!(
            r#"describe "Feature {i}" do
  let(:user) {{ create(:user, id: {i}) }}
  subject {{ described_class.new(user) }}
  before {{ sign_in(user) }}

  context "when enabled" do
    let!(:flag) {{ enable(:feature_{i}) }}
    before do
      travel_to(Time.current)
    end

    it "works" do
      expect(subject).to be_enabled
    end
  end
end

"#
        ));
    }
    source
}

fn deepest_example(source: &str) -> usize {
    source.rfind("expect(subject)").unwrap_or(0)
}

// ============================================================================
// Benchmarks
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn parse_spec(bencher: divan::Bencher, groups: usize) {
    let mut parser = SpecParser::new().unwrap();
    let source = generate_large_spec(groups);

    bencher.bench_local(|| divan::black_box(parser.parse(&source).unwrap()));
}

#[divan::bench(args = [10, 100, 1000])]
fn resolve_at_last_example(bencher: divan::Bencher, groups: usize) {
    let mut parser = SpecParser::new().unwrap();
    let source = generate_large_spec(groups);
    let document = SpecDocument::parse(&mut parser, &source).unwrap();
    let tree = document.tree();
    let offset = document.anchor_offset(deepest_example(&source));

    bencher.bench(|| divan::black_box(resolve(&tree, offset)));
}

#[divan::bench(args = [10, 100, 1000])]
fn resolve_and_build_rows(bencher: divan::Bencher, groups: usize) {
    let mut parser = SpecParser::new().unwrap();
    let source = generate_large_spec(groups);
    let tree = parser.parse(&source).unwrap();
    let offset = deepest_example(&source);

    bencher.bench(|| divan::black_box(to_rows(&resolve(&tree, offset))));
}

#[divan::bench(args = [10, 100])]
fn edit_reparse_resolve(bencher: divan::Bencher, groups: usize) {
    let mut parser = SpecParser::new().unwrap();
    let mut source = generate_large_spec(groups);
    let mut document = SpecDocument::parse(&mut parser, &source).unwrap();
    let offset = deepest_example(&source);

    bencher.bench_local(|| {
        source.push('\n');
        document.set_text(&mut parser, &source).unwrap();
        divan::black_box(resolve(&document.tree(), document.anchor_offset(offset)))
    });
}

#[divan::bench]
fn debounce_burst(bencher: divan::Bencher) {
    let base = std::time::Instant::now();
    bencher.bench_local(|| {
        let mut scheduler = DebounceScheduler::default();
        for i in 0..1000u64 {
            divan::black_box(scheduler.on_cursor_moved(base + std::time::Duration::from_millis(i)));
        }
    });
}
