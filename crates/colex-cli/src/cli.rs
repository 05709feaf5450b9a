//! CLI argument parsing with clap.
//!
//! This module handles parsing command-line arguments and converting them
//! to a single `Query` for main to run.

use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use colex_core::ConceptId;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

const CLI_AFTER_HELP: &str = "\
EXAMPLES:
  colex hand                      Colexifications of the concept HAND
  colex big toe -o toe.csv        Multi-word gloss, saved as CSV
  colex --id 1277                 Search by Concepticon ID
  colex --db clics3.sqlite --status

The database defaults to `database` in $COLEX_HOME/config.toml (or ~/.colex),
then ./clics.sqlite.";

/// colex - find colexifications in a CLICS database
#[derive(Parser, Debug)]
#[command(
    name = "colex",
    version,
    about = "Find colexifications in a CLICS database",
    after_help = CLI_AFTER_HELP
)]
pub struct Cli {
    /// Concept gloss to search for (case-insensitive, exact)
    #[arg(value_name = "CONCEPT", conflicts_with = "id")]
    pub concept: Vec<String>,

    /// Search by Concepticon ID instead of gloss
    #[arg(short = 'i', long = "id", value_name = "ID")]
    pub id: Option<String>,

    /// Save the results as CSV
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// CLICS SQLite database (overrides config)
    #[arg(long = "db", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Override the colex home directory (default: $COLEX_HOME or ~/.colex)
    #[arg(long = "home", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Show which lookup indexes the database has, then exit
    #[arg(long = "status")]
    pub status: bool,

    /// Show verbose diagnostics
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// What a single invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Concept(String),
    Id(ConceptId),
    Status,
}

impl Cli {
    /// Parse CLI arguments from the process environment.
    pub fn parse_args() -> io::Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        Self::parse_from_args(&args)
    }

    /// Parse CLI arguments from a slice (testable version)
    pub fn parse_from_args(args: &[String]) -> io::Result<Self> {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e) => match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => e.exit(),
                _ => Err(io::Error::new(ErrorKind::InvalidInput, e.to_string())),
            },
        }
    }

    /// Decide what to run. Words of a multi-word gloss are joined with single
    /// spaces; the gloss is otherwise passed through untouched.
    pub fn to_query(&self) -> io::Result<Query> {
        if self.status {
            return Ok(Query::Status);
        }
        if let Some(ref id) = self.id {
            let id = id.trim();
            if id.is_empty() {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    "--id needs a non-empty Concepticon ID",
                ));
            }
            return Ok(Query::Id(ConceptId::new(id)));
        }

        let concept = self.concept.join(" ");
        if concept.trim().is_empty() {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                "Nothing to search for: give a CONCEPT or --id (see colex --help)",
            ));
        }
        Ok(Query::Concept(concept))
    }
}
