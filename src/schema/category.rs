/// Element categories: lexical, phrasal and document-level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word classes known to the lexicon and to morphology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexicalCategory {
    /// Wildcard used for lookups; matches every category.
    Any,
    Symbol,
    Noun,
    Adjective,
    Adverb,
    Verb,
    Determiner,
    Pronoun,
    Conjunction,
    Preposition,
    Complementiser,
    Modal,
    Auxiliary,
}

impl LexicalCategory {
    /// Whether a word of category `other` satisfies a lookup for `self`.
    pub fn matches(self, other: LexicalCategory) -> bool {
        self == LexicalCategory::Any || self == other
    }
}

/// Phrase categories. Each phrase element carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseCategory {
    Clause,
    AdjectivePhrase,
    AdverbPhrase,
    NounPhrase,
    PrepositionalPhrase,
    VerbPhrase,
    CannedText,
}

/// Structural categories for document trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentCategory {
    Document,
    Section,
    Paragraph,
    Sentence,
    List,
    EnumeratedList,
    ListItem,
}

impl DocumentCategory {
    /// Whether a component of category `child` may be placed directly
    /// inside an element of this category. `None` stands for any
    /// non-document element (phrases, words, canned text).
    pub fn has_subpart(self, child: Option<DocumentCategory>) -> bool {
        match child {
            None => matches!(self, DocumentCategory::Sentence | DocumentCategory::ListItem),
            Some(child) => match self {
                DocumentCategory::Document => true,
                DocumentCategory::Section => matches!(
                    child,
                    DocumentCategory::Paragraph | DocumentCategory::Section
                ),
                DocumentCategory::Paragraph => matches!(
                    child,
                    DocumentCategory::Sentence | DocumentCategory::List
                ),
                DocumentCategory::List | DocumentCategory::EnumeratedList => {
                    matches!(child, DocumentCategory::ListItem)
                }
                DocumentCategory::Sentence | DocumentCategory::ListItem => false,
            },
        }
    }
}

/// The category of any element in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Lexical(LexicalCategory),
    Phrase(PhraseCategory),
    Document(DocumentCategory),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Lexical(c) => write!(f, "{:?}", c),
            Category::Phrase(c) => write!(f, "{:?}", c),
            Category::Document(c) => write!(f, "{:?}", c),
        }
    }
}

impl From<LexicalCategory> for Category {
    fn from(c: LexicalCategory) -> Self {
        Category::Lexical(c)
    }
}

impl From<PhraseCategory> for Category {
    fn from(c: PhraseCategory) -> Self {
        Category::Phrase(c)
    }
}

impl From<DocumentCategory> for Category {
    fn from(c: DocumentCategory) -> Self {
        Category::Document(c)
    }
}
