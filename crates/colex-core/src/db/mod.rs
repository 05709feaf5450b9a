//! CLICS database access: schema checks, lookup indexes, and the search queries.
//!
//! Uses rusqlite against an existing CLICS SQLite export. The tables are never
//! modified; the only writes are the idempotent `CREATE INDEX IF NOT EXISTS`
//! statements run when a database is opened.

pub mod query;
pub mod schema;

pub use query::{
    ConceptId, ConceptLocation, FormRecord, find_colexes, find_concepts, find_forms,
    resolve_concept,
};
pub use schema::{IndexStatus, ensure_indexes, index_status, open_db, verify_schema};
