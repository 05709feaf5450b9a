//! colex-core: colexification search over a CLICS SQLite database.
//!
//! A colexification is one word form expressing several distinct concepts in
//! the same language. Given a concept gloss or a Concepticon ID, colex-core
//! finds every form realizing that concept in every source dataset, then every
//! other concept the same language expresses with the same normalized form in
//! the same dataset.
//!
//! # Quick Start
//!
//! ```no_run
//! use colex_core::{Colexifier, NoopSink};
//! use std::path::Path;
//!
//! fn main() -> colex_core::Result<()> {
//!     let colex = Colexifier::open(Path::new("clics.sqlite"), &NoopSink)?;
//!     if let Some(report) = colex.search_with_concept("hand", None, &NoopSink)?.report() {
//!         println!("{} rows for Concepticon ID {}", report.table.len(), report.concepticon_id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! For lower-level access, use the [`db`] stage functions directly.

mod colexifier;
pub mod config;
pub mod db;
mod error;
pub mod output;
pub mod table;

pub use colexifier::{ColexReport, Colexifier, SearchOutcome};
pub use config::Config;
pub use db::ConceptId;
pub use error::{ColexError, Result};
pub use output::{ColexEvent, NoopSink, OutputSink};
pub use table::{ColexRow, ColexTable};
