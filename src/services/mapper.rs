use crate::model::document::{DocumentId, VocabDocument};
use crate::model::row::{VocabRow, EXPLANATION_COLUMN, WORD_COLUMN};

/// What to do with one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Upload {
        id: DocumentId,
        document: VocabDocument,
    },
    /// The word cell is absent or null.
    Skip { display_row: usize },
}

pub fn map_row(row: &VocabRow) -> RowOutcome {
    let Some(word) = row.value(WORD_COLUMN) else {
        return RowOutcome::Skip {
            display_row: row.display_row(),
        };
    };

    let definition = row.value(EXPLANATION_COLUMN).unwrap_or_default();

    RowOutcome::Upload {
        id: DocumentId::from_word(word),
        document: VocabDocument {
            word: word.to_string(),
            definition: definition.to_string(),
        },
    }
}
