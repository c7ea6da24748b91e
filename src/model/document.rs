use std::fmt;

/// Key of a document inside the collection.
///
/// Firestore ids cannot contain `/`, so every slash in the word becomes `-`.
/// Distinct words may collapse to the same id ("A/B" and "A-B").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn from_word(word: &str) -> Self {
        DocumentId(word.replace('/', "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabDocument {
    pub word: String,
    pub definition: String,
}
