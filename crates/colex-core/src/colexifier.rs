//! High-level facade: one open database, two search entry points.
//!
//! # Example
//!
//! ```no_run
//! use colex_core::{Colexifier, NoopSink, SearchOutcome};
//! use std::path::Path;
//!
//! fn main() -> colex_core::Result<()> {
//!     let colex = Colexifier::open(Path::new("clics.sqlite"), &NoopSink)?;
//!
//!     match colex.search_with_concept("hand", None, &NoopSink)? {
//!         SearchOutcome::Resolved(report) => print!("{}", report.table),
//!         SearchOutcome::Unresolved { concept } => eprintln!("unknown concept {concept}"),
//!     }
//!     colex.close()
//! }
//! ```

use std::path::Path;

use rusqlite::Connection;

use crate::db::{self, ConceptId};
use crate::error::Result;
use crate::output::{ColexEvent, OutputSink};
use crate::table::ColexTable;

/// Colexifications found for one Concepticon ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColexReport {
    pub concepticon_id: ConceptId,
    /// May be empty: the concept exists but shares no form with another.
    pub table: ColexTable,
}

/// Result of a search by concept name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No reference gloss matched the name.
    Unresolved { concept: String },
    Resolved(ColexReport),
}

impl SearchOutcome {
    /// The report, if the name resolved.
    pub fn report(&self) -> Option<&ColexReport> {
        match self {
            SearchOutcome::Resolved(report) => Some(report),
            SearchOutcome::Unresolved { .. } => None,
        }
    }
}

/// Owns the database connection for its whole lifetime.
///
/// Opening verifies the schema and adds the lookup indexes; after that every
/// operation is read-only. Use [`Colexifier::close`] to surface close errors,
/// or drop it to release the connection silently.
pub struct Colexifier {
    conn: Connection,
}

impl Colexifier {
    /// Open the database at `path`, check its tables, and ensure the lookup indexes exist.
    pub fn open(path: &Path, output: &dyn OutputSink) -> Result<Self> {
        let conn = db::open_db(path)?;
        db::verify_schema(&conn)?;
        let created = db::ensure_indexes(&conn)?;
        output.emit_event(ColexEvent::IndexesCreated { count: created });
        Ok(Self { conn })
    }

    /// The underlying connection, for ad hoc read-only queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Resolve a concept gloss to its Concepticon ID (case-insensitive, exact).
    pub fn get_concepticon_id(&self, concept: &str) -> Result<Option<ConceptId>> {
        db::resolve_concept(&self.conn, concept)
    }

    /// Search by concept name, optionally saving the table as CSV to `out`.
    ///
    /// An unknown name emits [`ColexEvent::ConceptNotFound`] and returns
    /// [`SearchOutcome::Unresolved`]; the later stages are skipped.
    pub fn search_with_concept(
        &self,
        concept: &str,
        out: Option<&Path>,
        output: &dyn OutputSink,
    ) -> Result<SearchOutcome> {
        let Some(concepticon_id) = self.get_concepticon_id(concept)? else {
            output.emit_event(ColexEvent::ConceptNotFound {
                concept: concept.to_string(),
            });
            return Ok(SearchOutcome::Unresolved {
                concept: concept.to_string(),
            });
        };
        log::debug!("resolved {:?} to Concepticon ID {}", concept, concepticon_id);

        let table = self.colexify(&concepticon_id, output)?;
        if let Some(path) = out {
            self.save(&table, concept, path, output)?;
        }
        Ok(SearchOutcome::Resolved(ColexReport {
            concepticon_id,
            table,
        }))
    }

    /// Search by Concepticon ID, optionally saving the table as CSV to `out`.
    ///
    /// An unknown or malformed ID is not an error; it yields an empty table.
    pub fn search_with_id(
        &self,
        concepticon_id: &ConceptId,
        out: Option<&Path>,
        output: &dyn OutputSink,
    ) -> Result<ColexReport> {
        let table = self.colexify(concepticon_id, output)?;
        if let Some(path) = out {
            self.save(&table, concepticon_id.as_str(), path, output)?;
        }
        Ok(ColexReport {
            concepticon_id: concepticon_id.clone(),
            table,
        })
    }

    /// Release the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }

    /// Concept rows → forms → shared-form matches.
    fn colexify(&self, concepticon_id: &ConceptId, output: &dyn OutputSink) -> Result<ColexTable> {
        let locations = db::find_concepts(&self.conn, concepticon_id)?;
        let forms = db::find_forms(&self.conn, &locations)?;
        let table = db::find_colexes(&self.conn, &forms)?;

        output.emit_event(ColexEvent::SearchSummary {
            locations: locations.len(),
            forms: forms.len(),
            rows: table.len(),
        });
        Ok(table)
    }

    fn save(&self, table: &ColexTable, query: &str, path: &Path, output: &dyn OutputSink) -> Result<()> {
        table.write_csv(path)?;
        output.emit_event(ColexEvent::ResultsSaved {
            query: query.to_string(),
            path: path.to_path_buf(),
        });
        Ok(())
    }
}
