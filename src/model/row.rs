/// Column holding the term; rows without it are skipped.
pub const WORD_COLUMN: &str = "English word";

/// Column holding the optional explanation.
pub const EXPLANATION_COLUMN: &str = "English explanation";

/// Cell texts read as missing values, in addition to the empty cell.
/// Matches the default `na_values` of pandas `read_csv`.
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true when a raw cell stands for a missing value.
///
/// No trimming: a cell of spaces is a value.
pub fn is_null_cell(raw: &str) -> bool {
    raw.is_empty() || NULL_TOKENS.contains(&raw)
}

#[derive(Debug, Clone, Default)]
pub struct VocabTable {
    pub headers: Vec<String>,
    pub rows: Vec<VocabRow>,
}

impl VocabTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabRow {
    /// 0-based position among data rows (header excluded).
    pub index: usize,

    /// Cells in file order, keyed by header name.
    pub cells: Vec<(String, String)>,
}

impl VocabRow {
    pub fn new(index: usize, cells: Vec<(String, String)>) -> Self {
        Self { index, cells }
    }

    /// Raw text of `column`, or None if the row has no such cell.
    ///
    /// When a header repeats, the first occurrence wins.
    pub fn raw(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of `column`, with absent and null cells both mapped to None.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.raw(column).filter(|v| !is_null_cell(v))
    }

    /// Row number as it reads in the file: header line plus 1-based count.
    pub fn display_row(&self) -> usize {
        self.index + 2
    }
}
