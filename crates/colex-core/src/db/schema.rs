//! Schema checks and read-performance indexes for a CLICS database.
//!
//! The database is an existing CLDF-style SQLite export; nothing here creates
//! tables or touches rows. `open_db` refuses to create a missing file,
//! `verify_schema` checks the three tables the pipeline reads, and
//! `ensure_indexes` adds the lookup indexes if they are not already there.
//! The index list is append-only: never edit existing entries, only add new
//! ones at the end.

use crate::error::{ColexError, Result};
use rusqlite::{Connection, OptionalExtension};
use std::fmt;
use std::path::Path;

/// A table the pipeline reads, with the columns it relies on.
struct RequiredTable {
    name: &'static str,
    columns: &'static [&'static str],
}

const REQUIRED_TABLES: &[RequiredTable] = &[
    RequiredTable {
        name: "ParameterTable",
        columns: &["ID", "Dataset_ID", "Concepticon_ID", "Concepticon_Gloss"],
    },
    RequiredTable {
        name: "FormTable",
        columns: &["Language_ID", "Parameter_ID", "Form", "clics_form", "Dataset_ID"],
    },
    RequiredTable {
        name: "LanguageTable",
        columns: &["ID", "Dataset_ID", "Name"],
    },
];

/// A named lookup index. `sql` must be a single `CREATE INDEX IF NOT EXISTS`.
struct IndexDef {
    name: &'static str,
    sql: &'static str,
}

const INDEXES: &[IndexDef] = &[
    // Concept resolver: gloss lookup, case-insensitive.
    IndexDef {
        name: "concepticon_id_index",
        sql: "CREATE INDEX IF NOT EXISTS concepticon_id_index
              ON ParameterTable (Concepticon_ID, Concepticon_Gloss COLLATE NOCASE)",
    },
    // Concept locator: every (ID, Dataset_ID) for one Concepticon_ID.
    IndexDef {
        name: "all_concepts_index",
        sql: "CREATE INDEX IF NOT EXISTS all_concepts_index
              ON ParameterTable (Concepticon_ID, ID, Dataset_ID)",
    },
    // Colex matcher: same form in the same language and dataset.
    IndexDef {
        name: "clics_form_index",
        sql: "CREATE INDEX IF NOT EXISTS clics_form_index
              ON FormTable (Language_ID, clics_form, Dataset_ID)",
    },
];

/// Presence of one named lookup index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStatus {
    pub name: &'static str,
    pub present: bool,
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.name,
            if self.present { "present" } else { "missing" }
        )
    }
}

/// Open an existing database at `path`. A missing file is an error; it is never created.
pub fn open_db(path: &Path) -> Result<Connection> {
    if !path.is_file() {
        return Err(ColexError::DatabaseNotFound(path.to_path_buf()));
    }
    let conn = Connection::open(path)?;
    log::debug!("opened database {}", path.display());
    Ok(conn)
}

/// Check that every required table exists and carries the columns the pipeline reads.
pub fn verify_schema(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;

    for table in REQUIRED_TABLES {
        let columns: Vec<String> = stmt
            .query_map([table.name], |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;

        if columns.is_empty() {
            return Err(ColexError::MissingTable(table.name));
        }
        // SQLite column names are case-insensitive.
        if let Some(missing) = table
            .columns
            .iter()
            .find(|want| !columns.iter().any(|have| have.eq_ignore_ascii_case(want)))
        {
            return Err(ColexError::MissingColumn {
                table: table.name,
                column: *missing,
            });
        }
    }
    Ok(())
}

/// Create any lookup index that does not exist yet. Returns how many were created.
pub fn ensure_indexes(conn: &Connection) -> Result<usize> {
    let mut created = 0;
    for index in INDEXES {
        if index_exists(conn, index.name)? {
            continue;
        }
        conn.execute_batch(index.sql)?;
        log::debug!("created index {}", index.name);
        created += 1;
    }
    Ok(created)
}

/// Report which of the lookup indexes are present, in declaration order.
pub fn index_status(conn: &Connection) -> Result<Vec<IndexStatus>> {
    INDEXES
        .iter()
        .map(|index| {
            Ok(IndexStatus {
                name: index.name,
                present: index_exists(conn, index.name)?,
            })
        })
        .collect()
}

fn index_exists(conn: &Connection, name: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}
