//! Vocabulary CSV loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::LoadError;
use crate::model::row::{VocabRow, VocabTable, EXPLANATION_COLUMN, WORD_COLUMN};
use crate::services::encoding;

/// Reads the whole file at `path` into memory and parses it.
pub fn load_rows(path: &Path) -> Result<VocabTable, LoadError> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let text = encoding::decode_utf8(path, &bytes)?;
    let table = parse_rows(path, &text)?;

    debug!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "loaded vocabulary file"
    );

    for column in [WORD_COLUMN, EXPLANATION_COLUMN] {
        if !table.has_column(column) {
            warn!(path = %path.display(), column, "column missing from header");
        }
    }

    Ok(table)
}

/// Parses CSV text whose first record is the header.
///
/// Lines holding only spaces or tabs are skipped and take no row index.
/// Short rows leave the trailing columns absent; a row wider than the header
/// fails the whole load. `path` is only used for error messages.
pub fn parse_rows(path: &Path, text: &str) -> Result<VocabTable, LoadError> {
    let parse_err = |e: ::csv::Error| LoadError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err(LoadError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_err)?;
        if is_whitespace_line(text, &record) {
            continue;
        }

        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(LoadError::CsvParse {
                path: path.to_path_buf(),
                message: format!(
                    "expected {} fields in line {line}, saw {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        rows.push(VocabRow::new(rows.len(), cells));
    }

    Ok(VocabTable { headers, rows })
}

/// True when the record's source line is nothing but unquoted spaces/tabs.
fn is_whitespace_line(text: &str, record: &::csv::StringRecord) -> bool {
    if record.len() != 1 {
        return false;
    }
    let Some(start) = record
        .position()
        .and_then(|p| usize::try_from(p.byte()).ok())
    else {
        return false;
    };
    let line = text
        .get(start..)
        .unwrap_or_default()
        .trim_start_matches(['\r', '\n'])
        .split(['\r', '\n'])
        .next()
        .unwrap_or_default();

    !line.is_empty() && line.chars().all(|c| c == ' ' || c == '\t')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_load_rows_keeps_order_and_columns() {
        let file = create_temp_csv(
            b"English word,Korean,English explanation\nstroke,\xEB\x87\x8C\xEC\xA1\xB8\xEC\xA4\x91,brain attack\nangina,,chest pain\n",
        );
        let table = load_rows(file.path()).unwrap();

        assert_eq!(table.headers, vec![WORD_COLUMN, "Korean", EXPLANATION_COLUMN]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].index, 0);
        assert_eq!(table.rows[0].value(WORD_COLUMN), Some("stroke"));
        assert_eq!(table.rows[0].value("Korean"), Some("뇌졸중"));
        assert_eq!(table.rows[1].value(WORD_COLUMN), Some("angina"));
        assert_eq!(table.rows[1].value("Korean"), None);
        assert_eq!(table.rows[1].value(EXPLANATION_COLUMN), Some("chest pain"));
    }

    #[test]
    fn test_load_rows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let result = load_rows(&path);

        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_rows_strips_bom() {
        let file = create_temp_csv(b"\xEF\xBB\xBFEnglish word,English explanation\nrash,skin redness\n");
        let table = load_rows(file.path()).unwrap();

        assert!(table.has_column(WORD_COLUMN));
        assert_eq!(table.rows[0].value(WORD_COLUMN), Some("rash"));
    }

    #[test]
    fn test_parse_rows_quoted_fields() {
        let text = "English word,English explanation\n\"edema, pitting\",\"fluid \"\"pit\"\" on press\"\n";
        let table = parse_rows(Path::new("q.csv"), text).unwrap();

        assert_eq!(table.rows[0].value(WORD_COLUMN), Some("edema, pitting"));
        assert_eq!(
            table.rows[0].value(EXPLANATION_COLUMN),
            Some("fluid \"pit\" on press")
        );
    }

    #[test]
    fn test_parse_rows_short_rows_leave_cells_absent() {
        let text = "English word,English explanation\nfever\nchill,shivering\n";
        let table = parse_rows(Path::new("r.csv"), text).unwrap();

        assert_eq!(table.rows[0].raw(EXPLANATION_COLUMN), None);
        assert_eq!(table.rows[1].value(EXPLANATION_COLUMN), Some("shivering"));
    }

    #[test]
    fn test_parse_rows_wide_row_fails() {
        let text = "English word,English explanation\nfever,hot\nMI,heart attack, acute\n";
        let result = parse_rows(Path::new("wide.csv"), text);

        match result {
            Err(LoadError::CsvParse { message, .. }) => {
                assert_eq!(message, "expected 2 fields in line 3, saw 3");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rows_skips_whitespace_lines() {
        let text = "English word,English explanation\nfever,hot\n   \n\t \n,x\n";
        let table = parse_rows(Path::new("ws.csv"), text).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].index, 1);
        assert_eq!(table.rows[1].value(WORD_COLUMN), None);
        assert_eq!(table.rows[1].display_row(), 3);
    }

    #[test]
    fn test_parse_rows_keeps_quoted_whitespace() {
        let text = "English word,English explanation\n\"   \"\n";
        let table = parse_rows(Path::new("qws.csv"), text).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].value(WORD_COLUMN), Some("   "));
    }

    #[test]
    fn test_parse_rows_keeps_whitespace() {
        let text = "English word,English explanation\n   ,x\n";
        let table = parse_rows(Path::new("w.csv"), text).unwrap();

        assert_eq!(table.rows[0].value(WORD_COLUMN), Some("   "));
    }

    #[test]
    fn test_parse_rows_empty_input() {
        let result = parse_rows(Path::new("e.csv"), "");

        assert!(matches!(result, Err(LoadError::EmptyCsv { .. })));
    }

    #[test]
    fn test_parse_rows_header_only() {
        let table = parse_rows(Path::new("h.csv"), "English word,English explanation\n").unwrap();

        assert_eq!(table.headers.len(), 2);
        assert!(table.rows.is_empty());
    }
}
