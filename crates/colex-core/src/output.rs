use std::fmt;
use std::path::PathBuf;

/// Diagnostic events emitted by a search.
///
/// Core emits all variants unconditionally; clients decide which to display
/// and how to format them. Verbose-tier events are shown only when the client
/// has verbose mode enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColexEvent {
    /// No reference gloss matched the concept name.
    ConceptNotFound { concept: String },
    /// Results written to a file. `query` is the concept name or ID searched for.
    ResultsSaved { query: String, path: PathBuf },
    /// Lookup indexes created while opening the database (verbose-tier).
    IndexesCreated { count: usize },
    /// Row counts at each stage of a finished search (verbose-tier).
    SearchSummary {
        locations: usize,
        forms: usize,
        rows: usize,
    },
}

impl ColexEvent {
    /// Whether clients should only show this event in verbose mode.
    pub fn is_verbose(&self) -> bool {
        matches!(
            self,
            ColexEvent::IndexesCreated { .. } | ColexEvent::SearchSummary { .. }
        )
    }
}

impl fmt::Display for ColexEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColexEvent::ConceptNotFound { concept } => write!(
                f,
                "No ID number found for the concept \"{}\". Perhaps try another?",
                concept
            ),
            ColexEvent::ResultsSaved { query, path } => write!(
                f,
                "Colexification data for {} saved at {}",
                query,
                path.display()
            ),
            ColexEvent::IndexesCreated { count } => {
                write!(f, "[Created {} lookup index(es)]", count)
            }
            ColexEvent::SearchSummary {
                locations,
                forms,
                rows,
            } => write!(
                f,
                "[{} concept row(s), {} form(s), {} colexification row(s)]",
                locations, forms, rows
            ),
        }
    }
}

/// Abstraction over where search diagnostics go.
///
/// colex-cli implements this with a handler that prints to stderr.
pub trait OutputSink {
    /// Emit a typed diagnostic event. Clients filter and format as appropriate.
    fn emit_event(&self, event: ColexEvent);
}

/// A sink that discards every event, for callers that only want the results.
pub struct NoopSink;

impl OutputSink for NoopSink {
    fn emit_event(&self, _: ColexEvent) {}
}

/// A capturing output sink for tests. Collects events for assertions.
#[cfg(test)]
pub(crate) struct CaptureSink {
    pub events: std::cell::RefCell<Vec<ColexEvent>>,
}

#[cfg(test)]
impl CaptureSink {
    pub fn new() -> Self {
        Self {
            events: std::cell::RefCell::new(vec![]),
        }
    }

    /// Non-verbose events only, the ones a user always sees.
    pub fn visible(&self) -> Vec<ColexEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| !e.is_verbose())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
impl OutputSink for CaptureSink {
    fn emit_event(&self, event: ColexEvent) {
        self.events.borrow_mut().push(event);
    }
}
