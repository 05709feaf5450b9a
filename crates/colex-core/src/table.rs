//! The colexification result table and its delimited-text export.

use crate::error::Result;
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Column names, in output order.
pub const COLUMNS: [&str; 6] = [
    "lang_id",
    "lang_name",
    "word",
    "clics_form",
    "concepticon_id",
    "concepticon_gloss",
];

/// One FormTable row that shares its form with at least one other concept.
///
/// Optional fields are blank when the outer join found no language or concept row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColexRow {
    pub lang_id: String,
    pub lang_name: Option<String>,
    pub word: Option<String>,
    pub clics_form: String,
    pub concepticon_id: Option<String>,
    pub concepticon_gloss: Option<String>,
}

impl ColexRow {
    /// Cell values in [`COLUMNS`] order; NULLs become empty strings.
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.lang_id,
            self.lang_name.as_deref().unwrap_or(""),
            self.word.as_deref().unwrap_or(""),
            &self.clics_form,
            self.concepticon_id.as_deref().unwrap_or(""),
            self.concepticon_gloss.as_deref().unwrap_or(""),
        ]
    }
}

/// Ordered colexification rows. Each qualifying match set is contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColexTable {
    rows: Vec<ColexRow>,
}

impl ColexTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ColexRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a whole match set.
    pub(crate) fn extend(&mut self, rows: impl IntoIterator<Item = ColexRow>) {
        self.rows.extend(rows);
    }

    /// Write the table as CSV to `path`, replacing any existing file.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv_to(file)
    }

    /// Write the table as CSV: a header, then one record per row, each led by
    /// its 0-based row number under an unnamed column.
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec![""];
        header.extend(COLUMNS);
        wtr.write_record(&header)?;

        for (i, row) in self.rows.iter().enumerate() {
            let index = i.to_string();
            let mut record = vec![index.as_str()];
            record.extend(row.cells());
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl fmt::Display for ColexTable {
    /// Left-aligned columns separated by two spaces, header first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths = COLUMNS.map(|c| c.chars().count());
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row.cells()) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let line = |f: &mut fmt::Formatter<'_>, cells: [&str; 6]| -> fmt::Result {
            let padded: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(cell, w)| format!("{:<w$}", cell, w = w))
                .collect();
            writeln!(f, "{}", padded.join("  ").trim_end())
        };

        line(f, COLUMNS)?;
        for row in &self.rows {
            line(f, row.cells())?;
        }
        Ok(())
    }
}
