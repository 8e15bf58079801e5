/// The element tree: words, phrases, lists, canned text and documents.
///
/// `Element` is a closed union dispatched by `match`. Lexicon words are
/// shared behind `Arc` and never written to; any per-occurrence feature
/// write promotes the occurrence to an `InflectedWordElement` first.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::schema::category::{Category, DocumentCategory, LexicalCategory, PhraseCategory};
use crate::schema::document::DocumentElement;
use crate::schema::feature::{
    ClauseStatus, DiscourseFunction, Feature, FeatureSet, FeatureValue, Form, Gender, Inflection,
    InterrogativeType, NumberAgreement, Person, Tense,
};
use crate::schema::phrase::{CoordinatedPhraseElement, PhraseElement};

/// A lexicon entry. Immutable once published.
#[derive(Debug, Clone, PartialEq)]
pub struct WordElement {
    pub base_form: String,
    pub category: LexicalCategory,
    pub id: Option<String>,
    /// Intrinsic features: stored inflections, flags, gender, default
    /// inflection pattern.
    pub features: FeatureSet,
    pub inflection_variants: Vec<Inflection>,
}

impl WordElement {
    pub fn new(base_form: impl Into<String>, category: LexicalCategory) -> Self {
        Self {
            base_form: base_form.into(),
            category,
            id: None,
            features: FeatureSet::new(),
            inflection_variants: Vec::new(),
        }
    }

    /// The default inflection pattern; regular when none was recorded.
    pub fn default_inflection(&self) -> Inflection {
        self.features
            .default_inflection()
            .unwrap_or(Inflection::Regular)
    }

    /// A stored inflected form such as `Feature::Plural` or `Feature::Past`.
    pub fn stored_form(&self, feature: Feature) -> Option<&str> {
        self.features.text(feature)
    }
}

/// One occurrence of a word, carrying the features for that occurrence only.
#[derive(Debug, Clone, PartialEq)]
pub struct InflectedWordElement {
    pub base_form: String,
    pub category: LexicalCategory,
    pub base_word: Option<Arc<WordElement>>,
    pub features: FeatureSet,
}

impl InflectedWordElement {
    pub fn new(base_form: impl Into<String>, category: LexicalCategory) -> Self {
        Self {
            base_form: base_form.into(),
            category,
            base_word: None,
            features: FeatureSet::new(),
        }
    }

    /// Wrap a lexicon word, copying its intrinsic features into a private
    /// feature set.
    pub fn from_word(word: Arc<WordElement>) -> Self {
        Self {
            base_form: word.base_form.clone(),
            category: word.category,
            features: word.features.clone(),
            base_word: Some(word),
        }
    }
}

/// Canned text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringElement {
    pub text: String,
    pub features: FeatureSet,
}

impl StringElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            features: FeatureSet::new(),
        }
    }
}

/// An ordered, headless group of elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListElement {
    pub children: Vec<Element>,
    pub features: FeatureSet,
}

impl ListElement {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            children,
            features: FeatureSet::new(),
        }
    }
}

/// Any node of a specification or realisation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Word(Arc<WordElement>),
    Inflected(InflectedWordElement),
    Text(StringElement),
    List(ListElement),
    Phrase(PhraseElement),
    Coordinated(CoordinatedPhraseElement),
    Document(DocumentElement),
}

impl Element {
    /// Canned text element.
    pub fn canned(text: impl Into<String>) -> Element {
        Element::Text(StringElement::new(text))
    }

    pub fn list(children: Vec<Element>) -> Element {
        Element::List(ListElement::new(children))
    }

    pub fn features(&self) -> &FeatureSet {
        match self {
            Element::Word(w) => &w.features,
            Element::Inflected(w) => &w.features,
            Element::Text(s) => &s.features,
            Element::List(l) => &l.features,
            Element::Phrase(p) => &p.features,
            Element::Coordinated(c) => &c.features,
            Element::Document(d) => &d.features,
        }
    }

    /// Mutable access to this occurrence's features. A shared lexicon word
    /// is first replaced by an inflected copy, leaving the entry untouched.
    pub fn features_mut(&mut self) -> &mut FeatureSet {
        match self {
            Element::Word(word) => {
                let occurrence = InflectedWordElement::from_word(Arc::clone(word));
                *self = Element::Inflected(occurrence);
                self.features_mut()
            }
            Element::Inflected(w) => &mut w.features,
            Element::Text(s) => &mut s.features,
            Element::List(l) => &mut l.features,
            Element::Phrase(p) => &mut p.features,
            Element::Coordinated(c) => &mut c.features,
            Element::Document(d) => &mut d.features,
        }
    }

    /// Read a feature. Clauses fall back to their verb phrase for the
    /// features they forward to it.
    pub fn feature(&self, feature: Feature) -> Option<&FeatureValue> {
        match self {
            Element::Phrase(p) => p.feature(feature),
            _ => self.features().get(feature),
        }
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.feature(feature).is_some()
    }

    pub fn set_feature(&mut self, feature: Feature, value: impl Into<FeatureValue>) {
        match self {
            Element::Phrase(p) => p.set_feature(feature, value),
            _ => self.features_mut().set(feature, value),
        }
    }

    pub fn remove_feature(&mut self, feature: Feature) {
        if self.features().has(feature) {
            self.features_mut().remove(feature);
        }
    }

    pub fn flag(&self, feature: Feature) -> bool {
        self.feature(feature)
            .and_then(FeatureValue::as_bool)
            .unwrap_or(false)
    }

    pub fn feature_text(&self, feature: Feature) -> Option<&str> {
        self.feature(feature).and_then(FeatureValue::as_text)
    }

    pub fn feature_element(&self, feature: Feature) -> Option<&Element> {
        self.feature(feature).and_then(FeatureValue::as_element)
    }

    pub fn tense(&self) -> Option<Tense> {
        self.feature(Feature::Tense).and_then(FeatureValue::as_tense)
    }

    pub fn person(&self) -> Option<Person> {
        self.feature(Feature::Person).and_then(FeatureValue::as_person)
    }

    pub fn number(&self) -> Option<NumberAgreement> {
        self.feature(Feature::Number).and_then(FeatureValue::as_number)
    }

    pub fn gender(&self) -> Option<Gender> {
        self.feature(Feature::Gender).and_then(FeatureValue::as_gender)
    }

    pub fn form(&self) -> Option<Form> {
        self.feature(Feature::Form).and_then(FeatureValue::as_form)
    }

    pub fn interrogative_type(&self) -> Option<InterrogativeType> {
        self.feature(Feature::InterrogativeType)
            .and_then(FeatureValue::as_interrogative)
    }

    pub fn discourse_function(&self) -> Option<DiscourseFunction> {
        self.feature(Feature::DiscourseFunction)
            .and_then(FeatureValue::as_function)
    }

    pub fn set_discourse_function(&mut self, function: DiscourseFunction) {
        self.set_feature(Feature::DiscourseFunction, function);
    }

    pub fn clause_status(&self) -> Option<ClauseStatus> {
        self.feature(Feature::ClauseStatus)
            .and_then(FeatureValue::as_clause_status)
    }

    pub fn is_plural(&self) -> bool {
        self.number() == Some(NumberAgreement::Plural)
    }

    pub fn is_elided(&self) -> bool {
        self.flag(Feature::Elided)
    }

    pub fn set_elided(&mut self, elided: bool) {
        self.set_feature(Feature::Elided, elided);
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Element::Word(w) => Some(Category::Lexical(w.category)),
            Element::Inflected(w) => Some(Category::Lexical(w.category)),
            Element::Text(_) => Some(Category::Phrase(PhraseCategory::CannedText)),
            Element::List(_) => None,
            Element::Phrase(p) => Some(Category::Phrase(p.category)),
            Element::Coordinated(_) => None,
            Element::Document(d) => Some(Category::Document(d.category)),
        }
    }

    pub fn lexical_category(&self) -> Option<LexicalCategory> {
        match self {
            Element::Word(w) => Some(w.category),
            Element::Inflected(w) => Some(w.category),
            _ => None,
        }
    }

    pub fn document_category(&self) -> Option<DocumentCategory> {
        match self {
            Element::Document(d) => Some(d.category),
            _ => None,
        }
    }

    /// Whether this is a phrase of the given category.
    pub fn is_phrase(&self, category: PhraseCategory) -> bool {
        matches!(self, Element::Phrase(p) if p.category == category)
    }

    pub fn is_clause(&self) -> bool {
        self.is_phrase(PhraseCategory::Clause)
    }

    pub fn as_phrase(&self) -> Option<&PhraseElement> {
        match self {
            Element::Phrase(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_phrase_mut(&mut self) -> Option<&mut PhraseElement> {
        match self {
            Element::Phrase(p) => Some(p),
            _ => None,
        }
    }

    /// Base form of a word or word occurrence.
    pub fn base_form(&self) -> Option<&str> {
        match self {
            Element::Word(w) => Some(&w.base_form),
            Element::Inflected(w) => Some(&w.base_form),
            _ => None,
        }
    }

    /// The computed surface text, trimmed of surrounding spaces. Elements
    /// that have not been realised yet read as the empty string.
    pub fn realisation(&self) -> &str {
        match self {
            Element::Text(s) => s.text.trim_matches(' '),
            Element::Document(d) => d.realisation.as_deref().unwrap_or("").trim_matches(' '),
            _ => "",
        }
    }

    /// Replace the realisation of canned text or a document. No-op for
    /// structural elements.
    pub fn set_realisation(&mut self, realisation: impl Into<String>) {
        match self {
            Element::Text(s) => s.text = realisation.into(),
            Element::Document(d) => d.realisation = Some(realisation.into()),
            _ => {}
        }
    }

    /// Children in document order.
    pub fn children(&self) -> Vec<&Element> {
        match self {
            Element::Word(_) | Element::Inflected(_) | Element::Text(_) => Vec::new(),
            Element::List(l) => l.children.iter().collect(),
            Element::Phrase(p) => p.children(),
            Element::Coordinated(c) => c.coordinates.iter().collect(),
            Element::Document(d) => d.components.iter().collect(),
        }
    }

    /// Render the tree for debugging, one element per line.
    pub fn print_tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, "");
        out
    }

    fn write_tree(&self, out: &mut String, indent: &str) {
        let _ = match self {
            Element::Word(w) => writeln!(
                out,
                "WordElement: base={}, category={:?}{}",
                w.base_form,
                w.category,
                describe_features(&w.features)
            ),
            Element::Inflected(w) => writeln!(
                out,
                "InflectedWordElement: base={}, category={:?}{}",
                w.base_form,
                w.category,
                describe_features(&w.features)
            ),
            Element::Text(s) => writeln!(out, "StringElement: content=\"{}\"", s.text),
            Element::List(l) => writeln!(out, "ListElement:{}", describe_features(&l.features)),
            Element::Phrase(p) => writeln!(
                out,
                "PhraseElement: category={:?}{}",
                p.category,
                describe_features(&p.features)
            ),
            Element::Coordinated(c) => writeln!(
                out,
                "CoordinatedPhraseElement:{}",
                describe_features(&c.features)
            ),
            Element::Document(d) => writeln!(
                out,
                "DocumentElement: category={:?}{}{}",
                d.category,
                d.title
                    .as_ref()
                    .map(|t| format!(", title=\"{}\"", t))
                    .unwrap_or_default(),
                d.realisation
                    .as_ref()
                    .map(|r| format!(", realisation=\"{}\"", r))
                    .unwrap_or_default()
            ),
        };

        let children = self.children();
        let last = children.len().saturating_sub(1);
        for (i, child) in children.iter().enumerate() {
            if i == last {
                out.push_str(indent);
                out.push_str(" \\-");
                child.write_tree(out, &format!("{}   ", indent));
            } else {
                out.push_str(indent);
                out.push_str(" |-");
                child.write_tree(out, &format!("{} | ", indent));
            }
        }
    }
}

fn describe_features(features: &FeatureSet) -> String {
    let mut entries: Vec<_> = features
        .iter()
        .filter(|(_, v)| !matches!(v, FeatureValue::Element(_) | FeatureValue::Elements(_)))
        .collect();
    if entries.is_empty() {
        return String::new();
    }
    entries.sort_by_key(|(k, _)| **k);
    let body: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| match v {
            FeatureValue::Bool(b) => format!("{:?}={}", k, b),
            FeatureValue::Text(s) => format!("{:?}={}", k, s),
            FeatureValue::Tense(t) => format!("{:?}={:?}", k, t),
            FeatureValue::Person(p) => format!("{:?}={:?}", k, p),
            FeatureValue::Number(n) => format!("{:?}={:?}", k, n),
            FeatureValue::Gender(g) => format!("{:?}={:?}", k, g),
            FeatureValue::Form(f) => format!("{:?}={:?}", k, f),
            FeatureValue::Inflection(i) => format!("{:?}={:?}", k, i),
            FeatureValue::Interrogative(i) => format!("{:?}={:?}", k, i),
            FeatureValue::Function(f) => format!("{:?}={:?}", k, f),
            FeatureValue::ClauseStatus(c) => format!("{:?}={:?}", k, c),
            FeatureValue::Element(_) | FeatureValue::Elements(_) => String::new(),
        })
        .collect();
    format!(", features={{{}}}", body.join(" "))
}

impl From<Arc<WordElement>> for Element {
    fn from(w: Arc<WordElement>) -> Self {
        Element::Word(w)
    }
}

impl From<WordElement> for Element {
    fn from(w: WordElement) -> Self {
        Element::Word(Arc::new(w))
    }
}

impl From<InflectedWordElement> for Element {
    fn from(w: InflectedWordElement) -> Self {
        Element::Inflected(w)
    }
}

impl From<StringElement> for Element {
    fn from(s: StringElement) -> Self {
        Element::Text(s)
    }
}

impl From<ListElement> for Element {
    fn from(l: ListElement) -> Self {
        Element::List(l)
    }
}

impl From<PhraseElement> for Element {
    fn from(p: PhraseElement) -> Self {
        Element::Phrase(p)
    }
}

impl From<CoordinatedPhraseElement> for Element {
    fn from(c: CoordinatedPhraseElement) -> Self {
        Element::Coordinated(c)
    }
}

impl From<DocumentElement> for Element {
    fn from(d: DocumentElement) -> Self {
        Element::Document(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_word(base: &str, category: LexicalCategory) -> Arc<WordElement> {
        let mut word = WordElement::new(base, category);
        word.features.set(Feature::Plural, "mice");
        Arc::new(word)
    }

    #[test]
    fn writing_a_feature_promotes_word_without_touching_entry() {
        let entry = make_word("mouse", LexicalCategory::Noun);
        let mut occurrence = Element::Word(Arc::clone(&entry));

        occurrence.set_feature(Feature::Number, NumberAgreement::Plural);

        assert!(matches!(occurrence, Element::Inflected(_)));
        assert_eq!(occurrence.number(), Some(NumberAgreement::Plural));
        assert_eq!(
            occurrence.feature_text(Feature::Plural),
            Some("mice"),
            "intrinsic features are copied onto the occurrence"
        );
        assert!(!entry.features.has(Feature::Number), "entry must stay untouched");
    }

    #[test]
    fn realisation_is_trimmed_and_empty_for_structure() {
        let text = Element::canned("  the dog ");
        assert_eq!(text.realisation(), "the dog");
        let list = Element::list(vec![text.clone()]);
        assert_eq!(list.realisation(), "");
    }

    #[test]
    fn elided_flag_round_trips() {
        let mut e = Element::canned("x");
        assert!(!e.is_elided());
        e.set_elided(true);
        assert!(e.is_elided());
    }

    #[test]
    fn categories() {
        let w = Element::Word(make_word("mouse", LexicalCategory::Noun));
        assert_eq!(w.category(), Some(Category::Lexical(LexicalCategory::Noun)));
        assert_eq!(
            Element::canned("x").category(),
            Some(Category::Phrase(PhraseCategory::CannedText))
        );
        assert_eq!(Element::list(vec![]).category(), None);
    }

    #[test]
    fn print_tree_shows_nesting() {
        let tree = Element::list(vec![Element::canned("a"), Element::canned("b")]);
        let printed = tree.print_tree();
        assert!(printed.starts_with("ListElement:"));
        assert!(printed.contains(" |-StringElement: content=\"a\""));
        assert!(printed.contains(" \\-StringElement: content=\"b\""));
    }
}
