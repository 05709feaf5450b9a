//! The four lookup stages of a colexification search.
//!
//! Each stage is a read-only query against the CLICS tables and consumes the
//! previous stage's output: gloss → Concepticon ID → concept rows → word forms
//! → rows sharing a form. Every join and match is scoped to one dataset.
//! Identifiers are read back as text so integer- and text-typed ID columns
//! behave the same.

use crate::error::Result;
use crate::table::{ColexRow, ColexTable};
use rusqlite::{Connection, OptionalExtension, params};
use std::fmt;

/// A Concepticon identifier, shared by equivalent concepts across datasets.
///
/// Compared for exact equality; it is never case-folded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConceptId(String);

impl ConceptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConceptId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Where one dataset lists a concept: its ParameterTable primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptLocation {
    pub id: String,
    pub dataset_id: String,
}

/// A word form realizing a concept, keyed the way colexification matching needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    /// NULL in the source never matches anything, like a NULL form.
    pub language_id: Option<String>,
    /// Normalized form; NULL in the source never matches anything.
    pub clics_form: Option<String>,
    pub dataset_id: String,
}

impl fmt::Display for FormRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}: {}",
            self.dataset_id,
            self.language_id.as_deref().unwrap_or(""),
            self.clics_form.as_deref().unwrap_or("")
        )
    }
}

/// Resolve a concept gloss to its Concepticon ID.
///
/// Exact match under `COLLATE NOCASE` (ASCII case folding). When several glosses
/// collide, whichever row SQLite returns first wins; no tie-break is applied.
/// A matching row with a NULL or empty ID counts as not found.
pub fn resolve_concept(conn: &Connection, concept: &str) -> Result<Option<ConceptId>> {
    let id: Option<Option<String>> = conn
        .query_row(
            "SELECT CAST(p.Concepticon_ID AS TEXT)
             FROM ParameterTable AS p
             WHERE p.Concepticon_Gloss = ?1 COLLATE NOCASE
             LIMIT 1",
            [concept],
            |row| row.get(0),
        )
        .optional()?;

    Ok(id.flatten().filter(|id| !id.is_empty()).map(ConceptId))
}

/// Every ParameterTable row, across all datasets, carrying `concepticon_id`.
///
/// Compared byte for byte, whatever collation the column declares.
pub fn find_concepts(conn: &Connection, concepticon_id: &ConceptId) -> Result<Vec<ConceptLocation>> {
    let mut stmt = conn.prepare_cached(
        "SELECT CAST(p.ID AS TEXT), CAST(p.Dataset_ID AS TEXT)
         FROM ParameterTable AS p
         WHERE p.Concepticon_ID = ?1 COLLATE BINARY",
    )?;

    let rows = stmt.query_map([concepticon_id.as_str()], |row| {
        Ok(ConceptLocation {
            id: row.get(0)?,
            dataset_id: row.get(1)?,
        })
    })?;

    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

/// All word forms for each location, concatenated in location order.
///
/// Duplicates across locations are kept.
pub fn find_forms(conn: &Connection, locations: &[ConceptLocation]) -> Result<Vec<FormRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT CAST(f.Language_ID AS TEXT), CAST(f.clics_form AS TEXT), CAST(f.Dataset_ID AS TEXT)
         FROM FormTable AS f
         WHERE f.Parameter_ID = ?1 AND f.Dataset_ID = ?2",
    )?;

    let mut forms = Vec::new();
    for location in locations {
        let rows = stmt.query_map(params![location.id, location.dataset_id], |row| {
            Ok(FormRecord {
                language_id: row.get(0)?,
                clics_form: row.get(1)?,
                dataset_id: row.get(2)?,
            })
        })?;
        for form in rows {
            forms.push(form?);
        }
    }
    Ok(forms)
}

/// For each form, every row with the same language, normalized form and dataset.
///
/// A match set is a colexification only when it holds more than one row; those
/// sets are appended whole, in input order. Sets of one row are dropped.
/// Nothing is deduplicated across sets.
pub fn find_colexes(conn: &Connection, forms: &[FormRecord]) -> Result<ColexTable> {
    let mut stmt = conn.prepare_cached(
        "SELECT CAST(f.Language_ID AS TEXT), l.Name, CAST(f.Form AS TEXT), CAST(f.clics_form AS TEXT),
                CAST(p.Concepticon_ID AS TEXT), p.Concepticon_Gloss
         FROM FormTable AS f
         LEFT JOIN ParameterTable AS p
             ON f.Parameter_ID = p.ID AND f.Dataset_ID = p.Dataset_ID
         LEFT JOIN LanguageTable AS l
             ON f.Language_ID = l.ID AND f.Dataset_ID = l.Dataset_ID
         WHERE f.Language_ID = ?1 AND f.clics_form = ?2 AND f.Dataset_ID = ?3",
    )?;

    let mut table = ColexTable::new();
    for form in forms {
        let matches: Vec<ColexRow> = stmt
            .query_map(
                params![form.language_id, form.clics_form, form.dataset_id],
                |row| {
                    Ok(ColexRow {
                        lang_id: row.get(0)?,
                        lang_name: row.get(1)?,
                        word: row.get(2)?,
                        clics_form: row.get(3)?,
                        concepticon_id: row.get(4)?,
                        concepticon_gloss: row.get(5)?,
                    })
                },
            )?
            .collect::<rusqlite::Result<_>>()?;

        if matches.len() > 1 {
            log::debug!("{}: {} concepts share the form", form, matches.len());
            table.extend(matches);
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_form, insert_language, insert_parameter, open_fixture};

    #[test]
    fn resolve_concept_ignores_case() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "Dog");

        for name in ["Dog", "dog", "DOG"] {
            assert_eq!(
                resolve_concept(&conn, name).unwrap(),
                Some(ConceptId::from("100")),
                "resolving {name:?}"
            );
        }
    }

    #[test]
    fn resolve_concept_requires_exact_match() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "dog");

        assert_eq!(resolve_concept(&conn, "do").unwrap(), None);
        assert_eq!(resolve_concept(&conn, "dogs").unwrap(), None);
    }

    #[test]
    fn resolve_concept_not_found() {
        let (_dir, conn) = open_fixture();
        assert_eq!(resolve_concept(&conn, "hand").unwrap(), None);
    }

    #[test]
    fn resolve_concept_null_id_is_not_found() {
        let (_dir, conn) = open_fixture();
        conn.execute(
            "INSERT INTO ParameterTable (ID, Dataset_ID, Concepticon_ID, Concepticon_Gloss)
             VALUES ('1', 'A', NULL, 'ghost')",
            [],
        )
        .unwrap();
        assert_eq!(resolve_concept(&conn, "ghost").unwrap(), None);
    }

    #[test]
    fn resolve_concept_reads_integer_ids_as_text() {
        let (_dir, conn) = open_fixture();
        conn.execute(
            "INSERT INTO ParameterTable (ID, Dataset_ID, Concepticon_ID, Concepticon_Gloss)
             VALUES (1, 'A', 1277, 'tree')",
            [],
        )
        .unwrap();
        assert_eq!(
            resolve_concept(&conn, "tree").unwrap(),
            Some(ConceptId::from("1277"))
        );
    }

    #[test]
    fn find_concepts_spans_datasets() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "hand");
        insert_parameter(&conn, "7", "B", "100", "hand");
        insert_parameter(&conn, "2", "A", "200", "arm");

        let locations = find_concepts(&conn, &ConceptId::from("100")).unwrap();
        assert_eq!(
            locations,
            vec![
                ConceptLocation {
                    id: "1".into(),
                    dataset_id: "A".into()
                },
                ConceptLocation {
                    id: "7".into(),
                    dataset_id: "B".into()
                },
            ]
        );
    }

    #[test]
    fn find_concepts_unknown_id_is_empty() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "hand");

        assert!(find_concepts(&conn, &ConceptId::from("999")).unwrap().is_empty());
        assert!(find_concepts(&conn, &ConceptId::from("not-an-id")).unwrap().is_empty());
    }

    #[test]
    fn find_forms_scopes_to_dataset() {
        let (_dir, conn) = open_fixture();
        insert_form(&conn, "L1", "mano", "mano", "A", "1");
        // Same Parameter_ID in another dataset refers to a different concept.
        insert_form(&conn, "L1", "casa", "kasa", "B", "1");

        let forms = find_forms(
            &conn,
            &[ConceptLocation {
                id: "1".into(),
                dataset_id: "A".into(),
            }],
        )
        .unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].clics_form.as_deref(), Some("mano"));
        assert_eq!(forms[0].dataset_id, "A");
    }

    #[test]
    fn find_forms_keeps_location_order_and_duplicates() {
        let (_dir, conn) = open_fixture();
        insert_form(&conn, "L2", "hand", "hand", "B", "9");
        insert_form(&conn, "L1", "mano", "mano", "A", "1");
        insert_form(&conn, "L1", "mão", "mao", "A", "1");

        let loc_a = ConceptLocation {
            id: "1".into(),
            dataset_id: "A".into(),
        };
        let loc_b = ConceptLocation {
            id: "9".into(),
            dataset_id: "B".into(),
        };
        let forms = find_forms(&conn, &[loc_a.clone(), loc_b, loc_a]).unwrap();

        let keys: Vec<_> = forms.iter().map(|f| f.clics_form.as_deref().unwrap()).collect();
        assert_eq!(keys, vec!["mano", "mao", "hand", "mano", "mao"]);
    }

    #[test]
    fn find_forms_empty_input() {
        let (_dir, conn) = open_fixture();
        assert!(find_forms(&conn, &[]).unwrap().is_empty());
    }

    #[test]
    fn find_colexes_single_match_is_not_a_colexification() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "hand");
        insert_language(&conn, "L1", "A", "Spanish");
        insert_form(&conn, "L1", "mano", "mano", "A", "1");

        let forms = vec![FormRecord {
            language_id: Some("L1".into()),
            clics_form: Some("mano".into()),
            dataset_id: "A".into(),
        }];
        assert!(find_colexes(&conn, &forms).unwrap().is_empty());
    }

    #[test]
    fn find_colexes_two_matches_emit_both_rows() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "hand");
        insert_parameter(&conn, "2", "A", "200", "arm");
        insert_language(&conn, "L1", "A", "Spanish");
        insert_form(&conn, "L1", "mano", "mano", "A", "1");
        insert_form(&conn, "L1", "mano", "mano", "A", "2");

        let forms = vec![FormRecord {
            language_id: Some("L1".into()),
            clics_form: Some("mano".into()),
            dataset_id: "A".into(),
        }];
        let table = find_colexes(&conn, &forms).unwrap();
        assert_eq!(table.len(), 2);
        let glosses: Vec<_> = table
            .rows()
            .iter()
            .map(|r| r.concepticon_gloss.as_deref().unwrap())
            .collect();
        assert_eq!(glosses, vec!["hand", "arm"]);
    }

    #[test]
    fn find_colexes_matches_normalized_not_raw_form() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "hand");
        insert_parameter(&conn, "2", "A", "200", "arm");
        insert_parameter(&conn, "3", "A", "300", "five");
        insert_language(&conn, "L1", "A", "Spanish");
        insert_form(&conn, "L1", "Mano", "mano", "A", "1");
        insert_form(&conn, "L1", "máno", "mano", "A", "2");
        // Same raw spelling, different normalization: not the same word.
        insert_form(&conn, "L1", "Mano", "manu", "A", "3");

        let forms = vec![FormRecord {
            language_id: Some("L1".into()),
            clics_form: Some("mano".into()),
            dataset_id: "A".into(),
        }];
        let table = find_colexes(&conn, &forms).unwrap();
        let words: Vec<_> = table.rows().iter().map(|r| r.word.as_deref().unwrap()).collect();
        assert_eq!(words, vec!["Mano", "máno"]);
    }

    #[test]
    fn find_colexes_outer_join_leaves_blanks() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "hand");
        // Parameter 2 and language L1 are absent from their tables.
        insert_form(&conn, "L1", "mano", "mano", "A", "1");
        insert_form(&conn, "L1", "mano", "mano", "A", "2");

        let forms = vec![FormRecord {
            language_id: Some("L1".into()),
            clics_form: Some("mano".into()),
            dataset_id: "A".into(),
        }];
        let table = find_colexes(&conn, &forms).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.rows().iter().all(|r| r.lang_name.is_none()));
        assert_eq!(table.rows()[1].concepticon_id, None);
        assert_eq!(table.rows()[1].concepticon_gloss, None);
    }

    #[test]
    fn find_colexes_null_form_matches_nothing() {
        let (_dir, conn) = open_fixture();
        let forms = vec![FormRecord {
            language_id: Some("L1".into()),
            clics_form: None,
            dataset_id: "A".into(),
        }];
        assert!(find_colexes(&conn, &forms).unwrap().is_empty());
    }

    #[test]
    fn find_colexes_repeats_overlapping_sets() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "hand");
        insert_parameter(&conn, "2", "A", "200", "arm");
        insert_form(&conn, "L1", "mano", "mano", "A", "1");
        insert_form(&conn, "L1", "mano", "mano", "A", "2");

        let form = FormRecord {
            language_id: Some("L1".into()),
            clics_form: Some("mano".into()),
            dataset_id: "A".into(),
        };
        let table = find_colexes(&conn, &[form.clone(), form]).unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn find_colexes_requires_same_language() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "hand");
        insert_parameter(&conn, "2", "A", "200", "arm");
        insert_language(&conn, "L1", "A", "Spanish");
        insert_language(&conn, "L2", "A", "Italian");
        // Same form and dataset, different languages.
        insert_form(&conn, "L1", "mano", "mano", "A", "1");
        insert_form(&conn, "L2", "mano", "mano", "A", "2");

        let locations = find_concepts(&conn, &ConceptId::from("100")).unwrap();
        let forms = find_forms(&conn, &locations).unwrap();
        assert_eq!(forms.len(), 1);
        assert!(find_colexes(&conn, &forms).unwrap().is_empty());
    }

    #[test]
    fn find_concepts_ignores_declared_collation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE ParameterTable (
                 ID TEXT, Dataset_ID TEXT,
                 Concepticon_ID TEXT COLLATE NOCASE, Concepticon_Gloss TEXT
             );
             INSERT INTO ParameterTable VALUES ('1', 'A', 'abc', 'thing');",
        )
        .unwrap();

        assert!(find_concepts(&conn, &ConceptId::from("ABC")).unwrap().is_empty());
        assert_eq!(find_concepts(&conn, &ConceptId::from("abc")).unwrap().len(), 1);
    }

    #[test]
    fn null_language_matches_nothing() {
        let (_dir, conn) = open_fixture();
        insert_parameter(&conn, "1", "A", "100", "hand");
        insert_parameter(&conn, "2", "A", "200", "arm");
        conn.execute(
            "INSERT INTO FormTable (Language_ID, Form, clics_form, Dataset_ID, Parameter_ID)
             VALUES (NULL, 'mano', 'mano', 'A', '1'), (NULL, 'mano', 'mano', 'A', '2')",
            [],
        )
        .unwrap();

        let locations = find_concepts(&conn, &ConceptId::from("100")).unwrap();
        let forms = find_forms(&conn, &locations).unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].language_id, None);
        assert!(find_colexes(&conn, &forms).unwrap().is_empty());
    }

    #[test]
    fn form_record_display() {
        let form = FormRecord {
            language_id: Some("L1".into()),
            clics_form: Some("mano".into()),
            dataset_id: "A".into(),
        };
        assert_eq!(form.to_string(), "A/L1: mano");
    }
}
