/// Lexicon: word entries, variant indexing, RON loading, chained lookup.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::schema::category::LexicalCategory;
use crate::schema::element::WordElement;
use crate::schema::feature::{Feature, Inflection};

const DEFAULT_LEXICON: &str = include_str!("../../data/default_lexicon.ron");

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("duplicate lexicon id: {0}")]
    DuplicateId(String),
    #[error("lexicon entry {0} has an empty base form")]
    EmptyBaseForm(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Source of word entries.
///
/// Implementors provide the three index queries; the remaining methods
/// choose a single entry from their results.
pub trait Lexicon: Send + Sync {
    /// All entries with this base form and category.
    fn words(&self, base_form: &str, category: LexicalCategory) -> Vec<Arc<WordElement>>;

    fn words_by_id(&self, id: &str) -> Vec<Arc<WordElement>>;

    /// All entries having `variant` as base form or inflected form.
    fn words_from_variant(&self, variant: &str, category: LexicalCategory)
        -> Vec<Arc<WordElement>>;

    fn has_word(&self, base_form: &str, category: LexicalCategory) -> bool {
        !self.words(base_form, category).is_empty()
    }

    fn has_word_by_id(&self, id: &str) -> bool {
        !self.words_by_id(id).is_empty()
    }

    fn has_word_from_variant(&self, variant: &str, category: LexicalCategory) -> bool {
        !self.words_from_variant(variant, category).is_empty()
    }

    /// The best entry for a base form, or a fresh regular word.
    fn word(&self, base_form: &str, category: LexicalCategory) -> Arc<WordElement> {
        select_matching_word(self.words(base_form, category), base_form, category)
    }

    fn word_by_id(&self, id: &str) -> Option<Arc<WordElement>> {
        self.words_by_id(id).into_iter().next()
    }

    fn word_from_variant(&self, variant: &str, category: LexicalCategory) -> Arc<WordElement> {
        select_matching_word(self.words_from_variant(variant, category), variant, category)
    }

    /// Base form, then variant, then id; otherwise a synthesised regular
    /// entry that is not added to the lexicon.
    fn lookup_word(&self, base_form: &str, category: LexicalCategory) -> Arc<WordElement> {
        if self.has_word(base_form, category) {
            return self.word(base_form, category);
        }
        if self.has_word_from_variant(base_form, category) {
            return self.word_from_variant(base_form, category);
        }
        if let Some(word) = self.word_by_id(base_form) {
            return word;
        }
        log::debug!(
            "no lexicon entry for {:?} ({:?}); using a regular word",
            base_form,
            category
        );
        Arc::new(WordElement::new(base_form, category))
    }
}

/// Prefer an exact base-form match. A candidate differing only in case is
/// not returned; a fresh word is created instead.
fn select_matching_word(
    candidates: Vec<Arc<WordElement>>,
    base_form: &str,
    category: LexicalCategory,
) -> Arc<WordElement> {
    if let Some(exact) = candidates.iter().find(|w| w.base_form == base_form) {
        return Arc::clone(exact);
    }
    match candidates.into_iter().next() {
        Some(first) if !first.base_form.eq_ignore_ascii_case(base_form) => first,
        Some(_) => Arc::new(WordElement::new(base_form, LexicalCategory::Any)),
        None => Arc::new(WordElement::new(base_form, category)),
    }
}

/// Boolean lexical properties a RON entry may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LexicalFlag {
    Proper,
    Qualitative,
    Colour,
    Classifying,
    Predicative,
    SentenceModifier,
    Intransitive,
    Transitive,
    Ditransitive,
}

impl LexicalFlag {
    fn feature(self) -> Feature {
        match self {
            LexicalFlag::Proper => Feature::Proper,
            LexicalFlag::Qualitative => Feature::Qualitative,
            LexicalFlag::Colour => Feature::Colour,
            LexicalFlag::Classifying => Feature::Classifying,
            LexicalFlag::Predicative => Feature::Predicative,
            LexicalFlag::SentenceModifier => Feature::SentenceModifier,
            LexicalFlag::Intransitive => Feature::Intransitive,
            LexicalFlag::Transitive => Feature::Transitive,
            LexicalFlag::Ditransitive => Feature::Ditransitive,
        }
    }
}

// RON entry shape. Stored forms are optional; flags and inflection codes
// default to empty.
#[derive(Debug, Deserialize)]
struct RonWord {
    base: String,
    category: LexicalCategory,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    plural: Option<String>,
    #[serde(default)]
    present3s: Option<String>,
    #[serde(default)]
    past: Option<String>,
    #[serde(default)]
    past_participle: Option<String>,
    #[serde(default)]
    present_participle: Option<String>,
    #[serde(default)]
    comparative: Option<String>,
    #[serde(default)]
    superlative: Option<String>,
    #[serde(default)]
    inflections: Vec<Inflection>,
    #[serde(default)]
    flags: Vec<LexicalFlag>,
}

impl RonWord {
    fn into_word(self) -> WordElement {
        let mut word = WordElement::new(self.base, self.category);
        word.id = self.id;

        let stored = [
            (Feature::Plural, self.plural),
            (Feature::Present3s, self.present3s),
            (Feature::Past, self.past),
            (Feature::PastParticiple, self.past_participle),
            (Feature::PresentParticiple, self.present_participle),
            (Feature::Comparative, self.comparative),
            (Feature::Superlative, self.superlative),
        ];
        for (feature, form) in stored {
            if let Some(form) = form {
                word.features.set(feature, form);
            }
        }
        for flag in self.flags {
            word.features.set(flag.feature(), true);
        }

        let mut inflections = self.inflections;
        if inflections.is_empty() {
            inflections.push(Inflection::Regular);
        }
        let default = if inflections.contains(&Inflection::Regular) {
            Inflection::Regular
        } else {
            inflections[0]
        };
        word.features.set(Feature::DefaultInflection, default);
        word.inflection_variants = inflections;
        word
    }
}

/// An in-memory lexicon indexed by base form, id and variant.
#[derive(Debug, Default)]
pub struct MemoryLexicon {
    words: Vec<Arc<WordElement>>,
    by_base: FxHashMap<String, Vec<Arc<WordElement>>>,
    by_id: FxHashMap<String, Arc<WordElement>>,
    by_variant: FxHashMap<String, Vec<Arc<WordElement>>>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// The English lexicon bundled with the crate.
    pub fn default_lexicon() -> Result<MemoryLexicon, LexiconError> {
        Self::parse_ron(DEFAULT_LEXICON)
    }

    /// Load a lexicon from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<MemoryLexicon, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a lexicon from a RON string holding a list of entries.
    pub fn parse_ron(input: &str) -> Result<MemoryLexicon, LexiconError> {
        let raw: Vec<RonWord> = ron::from_str(input)?;
        let mut lexicon = MemoryLexicon::new();
        for (index, entry) in raw.into_iter().enumerate() {
            if entry.base.trim().is_empty() {
                return Err(LexiconError::EmptyBaseForm(index));
            }
            let word = entry.into_word();
            let missing = missing_stored_forms(&word);
            if !missing.is_empty() {
                log::warn!(
                    "irregular {:?} {:?} has no stored {:?}; regular rules will be used",
                    word.category,
                    word.base_form,
                    missing
                );
            }
            lexicon.add_word(word)?;
        }
        lexicon.add_special_cases();
        Ok(lexicon)
    }

    /// Add and index a word. Ids must be unique.
    pub fn add_word(&mut self, word: WordElement) -> Result<(), LexiconError> {
        if let Some(id) = &word.id {
            if self.by_id.contains_key(id) {
                return Err(LexiconError::DuplicateId(id.clone()));
            }
        }
        let word = Arc::new(word);
        self.by_base
            .entry(word.base_form.clone())
            .or_default()
            .push(Arc::clone(&word));
        if let Some(id) = &word.id {
            self.by_id.insert(id.clone(), Arc::clone(&word));
        }
        for variant in variants(&word) {
            self.index_variant(&word, variant);
        }
        self.words.push(word);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<WordElement>> {
        self.words.iter()
    }

    fn index_variant(&mut self, word: &Arc<WordElement>, variant: String) {
        let entries = self.by_variant.entry(variant).or_default();
        if !entries.iter().any(|w| Arc::ptr_eq(w, word)) {
            entries.push(Arc::clone(word));
        }
    }

    // Irregular forms of "be" that the variant derivation cannot produce.
    fn add_special_cases(&mut self) {
        let Some(be) = self
            .by_base
            .get("be")
            .and_then(|ws| ws.iter().find(|w| w.category == LexicalCategory::Verb))
            .cloned()
        else {
            return;
        };
        for form in ["is", "am", "are", "was", "were"] {
            self.index_variant(&be, form.to_string());
        }
    }
}

fn from_index(
    index: &FxHashMap<String, Vec<Arc<WordElement>>>,
    key: &str,
    category: LexicalCategory,
) -> Vec<Arc<WordElement>> {
    index
        .get(key)
        .map(|words| {
            words
                .iter()
                .filter(|w| category.matches(w.category))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

impl Lexicon for MemoryLexicon {
    fn words(&self, base_form: &str, category: LexicalCategory) -> Vec<Arc<WordElement>> {
        from_index(&self.by_base, base_form, category)
    }

    fn words_by_id(&self, id: &str) -> Vec<Arc<WordElement>> {
        self.by_id.get(id).cloned().into_iter().collect()
    }

    fn words_from_variant(
        &self,
        variant: &str,
        category: LexicalCategory,
    ) -> Vec<Arc<WordElement>> {
        from_index(&self.by_variant, variant, category)
    }
}

/// Forms an irregular entry must store because no rule derives them. Empty
/// for every other entry.
pub fn missing_stored_forms(word: &WordElement) -> Vec<Feature> {
    if word.default_inflection() != Inflection::Irregular {
        return Vec::new();
    }
    let required: &[Feature] = match word.category {
        LexicalCategory::Noun => &[Feature::Plural],
        LexicalCategory::Verb => &[Feature::Past, Feature::PastParticiple],
        LexicalCategory::Adjective | LexicalCategory::Adverb => {
            &[Feature::Comparative, Feature::Superlative]
        }
        _ => &[],
    };
    required
        .iter()
        .copied()
        .filter(|feature| word.stored_form(*feature).is_none())
        .collect()
}

/// The base form plus each stored or regularly derived inflection.
fn variants(word: &WordElement) -> Vec<String> {
    let mut out = vec![word.base_form.clone()];
    let derived: &[(Feature, &str)] = match word.category {
        LexicalCategory::Noun => &[(Feature::Plural, "s")],
        LexicalCategory::Adjective => {
            &[(Feature::Comparative, "er"), (Feature::Superlative, "est")]
        }
        LexicalCategory::Verb => &[
            (Feature::Present3s, "s"),
            (Feature::Past, "ed"),
            (Feature::PastParticiple, "ed"),
            (Feature::PresentParticiple, "ing"),
        ],
        _ => &[],
    };
    for (feature, suffix) in derived {
        let form = word
            .stored_form(*feature)
            .map(str::to_string)
            .unwrap_or_else(|| with_suffix(&word.base_form, suffix));
        if !out.contains(&form) {
            out.push(form);
        }
    }
    out
}

/// Append a suffix with the common spelling adjustments.
fn with_suffix(base: &str, suffix: &str) -> String {
    let mut stem = base.to_string();
    if stem.ends_with('y') && !suffix.starts_with('i') {
        stem.pop();
        stem.push_str("ie");
    }
    if stem.ends_with('e') && (suffix.starts_with('e') || suffix.starts_with('i')) {
        stem.pop();
    }
    if suffix.starts_with('s') && ["s", "x", "z", "ch", "sh"].iter().any(|e| stem.ends_with(e)) {
        stem.push('e');
    }
    stem.push_str(suffix);
    stem
}

/// Several lexicons searched in order.
#[derive(Default)]
pub struct MultipleLexicon {
    lexicons: Vec<Arc<dyn Lexicon>>,
    /// Union the results of every lexicon instead of stopping at the
    /// first that answers.
    pub always_search_all: bool,
}

impl MultipleLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lexicons(lexicons: impl IntoIterator<Item = Arc<dyn Lexicon>>) -> Self {
        Self {
            lexicons: lexicons.into_iter().collect(),
            always_search_all: false,
        }
    }

    /// Search this lexicon before the others.
    pub fn add_initial_lexicon(&mut self, lexicon: Arc<dyn Lexicon>) {
        self.lexicons.insert(0, lexicon);
    }

    /// Search this lexicon after the others.
    pub fn add_final_lexicon(&mut self, lexicon: Arc<dyn Lexicon>) {
        self.lexicons.push(lexicon);
    }

    fn collect(
        &self,
        query: impl Fn(&dyn Lexicon) -> Vec<Arc<WordElement>>,
    ) -> Vec<Arc<WordElement>> {
        let mut result = Vec::new();
        for lexicon in &self.lexicons {
            let found = query(lexicon.as_ref());
            if !found.is_empty() {
                result.extend(found);
                if !self.always_search_all {
                    break;
                }
            }
        }
        result
    }
}

impl Lexicon for MultipleLexicon {
    fn words(&self, base_form: &str, category: LexicalCategory) -> Vec<Arc<WordElement>> {
        self.collect(|lex| lex.words(base_form, category))
    }

    fn words_by_id(&self, id: &str) -> Vec<Arc<WordElement>> {
        self.collect(|lex| lex.words_by_id(id))
    }

    fn words_from_variant(
        &self,
        variant: &str,
        category: LexicalCategory,
    ) -> Vec<Arc<WordElement>> {
        self.collect(|lex| lex.words_from_variant(variant, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"[
        (base: "child", category: Noun, id: Some("E0016496"), plural: Some("children")),
        (base: "cry", category: Verb),
        (base: "like", category: Verb),
        (base: "watch", category: Verb),
        (base: "be", category: Verb, inflections: [Irregular],
         present3s: Some("is"), past: Some("was"), past_participle: Some("been"),
         present_participle: Some("being")),
        (base: "focus", category: Noun, inflections: [GrecoLatinRegular, Regular]),
        (base: "red", category: Adjective, flags: [Colour, Predicative]),
    ]"#;

    fn small() -> MemoryLexicon {
        MemoryLexicon::parse_ron(SMALL).unwrap()
    }

    #[test]
    fn suffix_spelling_rules() {
        assert_eq!(with_suffix("cry", "s"), "cries");
        assert_eq!(with_suffix("cry", "ing"), "crying");
        assert_eq!(with_suffix("like", "ed"), "liked");
        assert_eq!(with_suffix("watch", "s"), "watches");
        assert_eq!(with_suffix("want", "s"), "wants");
    }

    #[test]
    fn variants_resolve_to_base_word() {
        let lex = small();
        assert_eq!(lex.word_from_variant("children", LexicalCategory::Noun).base_form, "child");
        assert_eq!(lex.word_from_variant("cries", LexicalCategory::Verb).base_form, "cry");
        assert_eq!(lex.word_from_variant("liked", LexicalCategory::Any).base_form, "like");
        for form in ["is", "am", "are", "was", "were", "been"] {
            assert_eq!(
                lex.word_from_variant(form, LexicalCategory::Verb).base_form,
                "be",
                "{form} should map to be"
            );
        }
    }

    #[test]
    fn default_inflection_prefers_regular() {
        let lex = small();
        let focus = lex.word("focus", LexicalCategory::Noun);
        assert_eq!(focus.default_inflection(), Inflection::Regular);
        assert_eq!(focus.inflection_variants.len(), 2);
        let be = lex.word("be", LexicalCategory::Verb);
        assert_eq!(be.default_inflection(), Inflection::Irregular);
    }

    #[test]
    fn flags_become_features() {
        let red = small().word("red", LexicalCategory::Adjective);
        assert!(red.features.flag(Feature::Colour));
        assert!(!red.features.flag(Feature::Qualitative));
    }

    #[test]
    fn lookup_order_and_synthesis() {
        let lex = small();
        assert_eq!(lex.lookup_word("E0016496", LexicalCategory::Any).base_form, "child");
        let unknown = lex.lookup_word("wug", LexicalCategory::Noun);
        assert_eq!(unknown.base_form, "wug");
        assert_eq!(unknown.category, LexicalCategory::Noun);
        assert!(!lex.has_word("wug", LexicalCategory::Noun), "synthesised words are not stored");
    }

    #[test]
    fn case_only_match_creates_new_word() {
        let lex = small();
        let word = select_matching_word(
            lex.words("child", LexicalCategory::Any),
            "Child",
            LexicalCategory::Noun,
        );
        assert_eq!(word.base_form, "Child");
        assert_eq!(word.category, LexicalCategory::Any);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let input = r#"[
            (base: "a", category: Determiner, id: Some("X1")),
            (base: "b", category: Determiner, id: Some("X1")),
        ]"#;
        assert!(matches!(
            MemoryLexicon::parse_ron(input),
            Err(LexiconError::DuplicateId(id)) if id == "X1"
        ));
    }

    #[test]
    fn empty_base_is_rejected() {
        let input = r#"[(base: "dog", category: Noun), (base: " ", category: Noun)]"#;
        assert!(matches!(
            MemoryLexicon::parse_ron(input),
            Err(LexiconError::EmptyBaseForm(1))
        ));
    }

    #[test]
    fn multiple_lexicon_stops_at_first_hit() {
        let first: Arc<dyn Lexicon> = Arc::new(small());
        let second: Arc<dyn Lexicon> =
            Arc::new(MemoryLexicon::parse_ron(r#"[(base: "child", category: Noun)]"#).unwrap());
        let mut multi = MultipleLexicon::with_lexicons(vec![first, second]);
        assert_eq!(multi.words("child", LexicalCategory::Noun).len(), 1);
        multi.always_search_all = true;
        assert_eq!(multi.words("child", LexicalCategory::Noun).len(), 2);
    }

    #[test]
    fn irregular_entries_need_stored_forms() {
        let lex = MemoryLexicon::parse_ron(
            r#"[
                (base: "ox", category: Noun, inflections: [Irregular]),
                (base: "go", category: Verb, inflections: [Irregular], past: Some("went")),
                (base: "dog", category: Noun),
            ]"#,
        )
        .unwrap();
        let missing = |base: &str| missing_stored_forms(&lex.words(base, LexicalCategory::Any)[0]);
        assert_eq!(missing("ox"), vec![Feature::Plural]);
        assert_eq!(missing("go"), vec![Feature::PastParticiple]);
        assert!(missing("dog").is_empty());
    }

    #[test]
    fn bundled_lexicon_loads() {
        let lex = MemoryLexicon::default_lexicon().unwrap();
        assert!(lex.has_word("be", LexicalCategory::Verb));
        assert!(lex.has_word("the", LexicalCategory::Determiner));
        assert_eq!(lex.word_from_variant("dogs", LexicalCategory::Noun).base_form, "dog");
    }
}
