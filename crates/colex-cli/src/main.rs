// colex-cli: CLI frontend for colex
// Argument parsing, config resolution, result printing

mod cli;
mod output;

use cli::{Cli, Query};
use colex_core::{ColexReport, Colexifier, Config, SearchOutcome, db};
use output::OutputHandler;
use std::io;
use std::path::Path;

/// Print the result table, or say plainly that there is none.
fn print_report(output: &OutputHandler, report: &ColexReport) {
    if report.table.is_empty() {
        output.emit_result(&format!(
            "No colexifications found for Concepticon ID {}",
            report.concepticon_id
        ));
    } else {
        output.emit_result(report.table.to_string().trim_end());
    }
}

/// List the lookup indexes without creating any.
fn print_status(output: &OutputHandler, db_path: &Path) -> io::Result<()> {
    let conn = db::open_db(db_path)?;
    db::verify_schema(&conn)?;
    output.emit_result(&format!("Database: {}", db_path.display()));
    for status in db::index_status(&conn)? {
        output.emit_result(&format!("  {}", status));
    }
    Ok(())
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_args()?;
    let query = cli.to_query()?;

    let config = Config::load(cli.home.clone())?;
    let output = OutputHandler::new(cli.verbose || config.verbose);
    let db_path = cli.db.clone().unwrap_or_else(|| config.database_path());
    log::debug!("using database {}", db_path.display());

    let out = cli.output.as_deref();
    let open = || Colexifier::open(&db_path, &output);

    match query {
        Query::Status => print_status(&output, &db_path),
        Query::Concept(concept) => {
            let colex = open()?;
            // Unresolved names were already reported through the sink.
            if let SearchOutcome::Resolved(report) =
                colex.search_with_concept(&concept, out, &output)?
            {
                print_report(&output, &report);
            }
            Ok(colex.close()?)
        }
        Query::Id(id) => {
            let colex = open()?;
            let report = colex.search_with_id(&id, out, &output)?;
            print_report(&output, &report);
            Ok(colex.close()?)
        }
    }
}
