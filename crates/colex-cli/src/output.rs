//! Output handling for the CLI.
//!
//! `OutputHandler` prints results to stdout and diagnostics to stderr.

use colex_core::{ColexEvent, OutputSink};

/// CLI output handler: text to stdout, diagnostics to stderr.
#[derive(Default)]
pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    /// Create a new output handler.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Emit a result (the primary output of a command).
    pub fn emit_result(&self, content: &str) {
        println!("{}", content);
    }
}

impl OutputSink for OutputHandler {
    fn emit_event(&self, event: ColexEvent) {
        if event.is_verbose() && !self.verbose {
            return;
        }
        eprintln!("{}", event);
    }
}
