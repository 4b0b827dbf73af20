//! rspec-context: print the RSpec scope at a cursor position
//!
//! One-shot mode resolves once and prints the panel rows. Watch mode runs
//! the full extension pipeline (lifecycle, debounce, worker) against the file
//! and prints fresh rows after every save.

use std::fs;
use std::io::{self, Write as _};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use rspec_context::cli::{CliArgs, CursorPosition, OutputFormat, StartupConfig};
use rspec_context::fs_watcher::FileWatcher;
use rspec_context::host::{EditorSurface, Host, ListView};
use rspec_context::lifecycle::{ExtensionHost, LifecycleEvent, SpecContextExtension};
use rspec_context::messages::{DocumentMsg, Msg};
use rspec_context::model::{EditorId, EditorInfo, ProjectId};
use rspec_context::panel::{to_rows, DisplayRow, PANEL_TITLE};
use rspec_context::runtime::Runtime;
use rspec_context::syntax::{is_spec_path, SpecDocument, SpecParser};
use rspec_context::{resolve, ContextConfig};

const PROJECT: ProjectId = ProjectId(1);
const EDITOR: EditorId = EditorId(1);

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let startup = args.into_config().map_err(anyhow::Error::msg)?;

    rspec_context::tracing::init();
    let config = ContextConfig::load();

    if !is_spec_path(&startup.file, &config.spec_suffixes) {
        tracing::warn!("{} does not look like a spec file", startup.file.display());
    }

    if startup.watch {
        run_watch(&startup, config)
    } else {
        run_once(&startup)
    }
}

fn run_once(startup: &StartupConfig) -> Result<()> {
    let mut parser = SpecParser::new()?;
    let document = SpecDocument::from_file(&mut parser, &startup.file)
        .with_context(|| format!("Failed to load {}", startup.file.display()))?;

    let offset = document.anchor_offset(caret_offset(&document, startup.position));
    let context = resolve(&document.tree(), offset);
    print_rows(&to_rows(&context), startup.format)
}

fn run_watch(startup: &StartupConfig, mut config: ContextConfig) -> Result<()> {
    // The CLI watches the file even when its name has no spec suffix
    if let Some(name) = startup.file.file_name().and_then(|n| n.to_str()) {
        if !is_spec_path(&startup.file, &config.spec_suffixes) {
            config.spec_suffixes.push(name.to_string());
        }
    }

    let text = fs::read_to_string(&startup.file)
        .with_context(|| format!("Failed to read {}", startup.file.display()))?;

    // Resolve the starting caret against the initial text
    let mut parser = SpecParser::new()?;
    let caret = caret_offset(&SpecDocument::parse(&mut parser, &text)?, startup.position);

    let mut runtime = Runtime::new(config)?;
    let mut extensions = ExtensionHost::new();
    extensions.install(Box::new(SpecContextExtension::new(runtime.sender())));

    let mut host = CliHost {
        editor: CliEditor { caret },
        view: StdoutView {
            format: startup.format,
        },
    };

    extensions.dispatch(LifecycleEvent::ProjectOpened(PROJECT));
    extensions.dispatch(LifecycleEvent::EditorCreated(EditorInfo {
        id: EDITOR,
        project: PROJECT,
        path: startup.file.clone(),
        text,
    }));
    runtime.process_async_messages(&mut host);
    runtime.cursor_moved(EDITOR, &mut host);

    let watcher = FileWatcher::new(&startup.file)?;
    loop {
        runtime.wait_for_messages(Duration::from_millis(50), &mut host);
        if !watcher.poll_changed() {
            continue;
        }
        match fs::read_to_string(watcher.path()) {
            Ok(text) => {
                let msg = Msg::Document(DocumentMsg::Changed {
                    editor: EDITOR,
                    text,
                    at: Instant::now(),
                });
                runtime.dispatch(msg, &mut host);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("{} was removed, stopping", watcher.path().display());
                break;
            }
            Err(e) => tracing::warn!("Failed to read {}: {}", watcher.path().display(), e),
        }
    }

    extensions.uninstall_all();
    runtime.process_async_messages(&mut host);
    Ok(())
}

fn caret_offset(document: &SpecDocument, position: CursorPosition) -> usize {
    match position {
        CursorPosition::Offset(offset) => offset.min(document.len_bytes()),
        CursorPosition::LineColumn(line, column) => document.line_col_to_offset(line, column),
    }
}

fn print_rows(rows: &[DisplayRow], format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for row in rows {
                match row {
                    DisplayRow::Divider => writeln!(out, "{}", "-".repeat(40))?,
                    row => writeln!(out, "{}", row.label())?,
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// The CLI's stand-in for an editor: just a caret
struct CliEditor {
    caret: usize,
}

impl EditorSurface for CliEditor {
    fn caret_offset(&self) -> usize {
        self.caret
    }

    fn move_caret_to(&mut self, offset: usize) {
        self.caret = offset;
    }

    fn scroll_caret_into_view(&mut self) {}
}

struct StdoutView {
    format: OutputFormat,
}

impl ListView for StdoutView {
    fn set_rows(&mut self, rows: &[DisplayRow]) {
        if rows.is_empty() {
            return;
        }
        if self.format == OutputFormat::Text {
            println!("== {} ==", PANEL_TITLE);
        }
        if let Err(e) = print_rows(rows, self.format) {
            tracing::warn!("Failed to print rows: {:#}", e);
        }
        println!();
    }
}

struct CliHost {
    editor: CliEditor,
    view: StdoutView,
}

impl Host for CliHost {
    fn editor(&mut self, id: EditorId) -> Option<&mut dyn EditorSurface> {
        (id == EDITOR).then_some(&mut self.editor as &mut dyn EditorSurface)
    }

    fn list_view(&mut self, project: ProjectId) -> Option<&mut dyn ListView> {
        (project == PROJECT).then_some(&mut self.view as &mut dyn ListView)
    }
}
