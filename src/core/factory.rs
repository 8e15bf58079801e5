/// Phrase factory: builds words, phrases, clauses and documents from plain
/// strings or existing elements, consulting a shared lexicon.

use std::sync::Arc;

use crate::core::lexicon::Lexicon;
use crate::schema::category::{DocumentCategory, LexicalCategory, PhraseCategory};
use crate::schema::document::DocumentElement;
use crate::schema::element::{Element, InflectedWordElement, StringElement, WordElement};
use crate::schema::feature::{DiscourseFunction, Feature, Gender, NumberAgreement, Person};
use crate::schema::phrase::{CoordinatedPhraseElement, PhraseElement};

const PRONOUNS: &[&str] = &[
    "I", "you", "he", "she", "it", "me", "him", "her", "myself", "yourself", "himself",
    "herself", "itself", "mine", "yours", "his", "hers", "its", "we", "they", "us", "them",
    "ourselves", "yourselves", "themselves", "ours", "theirs", "there",
];
const FIRST_PERSON: &[&str] = &[
    "I", "me", "myself", "we", "us", "ourselves", "mine", "my", "ours", "our",
];
const SECOND_PERSON: &[&str] = &["you", "yourself", "yourselves", "yours", "your"];
const REFLEXIVE: &[&str] = &[
    "myself", "yourself", "himself", "herself", "itself", "ourselves", "yourselves",
    "themselves",
];
const MASCULINE: &[&str] = &["he", "him", "himself", "his"];
const FEMININE: &[&str] = &["she", "her", "herself", "hers"];
const POSSESSIVE: &[&str] = &[
    "mine", "ours", "yours", "his", "hers", "its", "theirs", "my", "our", "your", "her",
    "their",
];
const PLURAL: &[&str] = &[
    "we", "us", "ourselves", "ours", "our", "they", "them", "theirs", "their",
];
const EXPLETIVE: &[&str] = &["there"];

/// Input accepted wherever the factory takes content: either text to be
/// looked up or wrapped as canned text, or a ready-made element.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Element(Element),
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<Element> for Content {
    fn from(e: Element) -> Self {
        Content::Element(e)
    }
}

macro_rules! content_from_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Content {
                fn from(v: $ty) -> Self {
                    Content::Element(Element::from(v))
                }
            }
        )*
    };
}

content_from_element!(
    Arc<WordElement>,
    WordElement,
    InflectedWordElement,
    StringElement,
    PhraseElement,
    CoordinatedPhraseElement,
    DocumentElement,
);

/// Builds specification trees against a lexicon.
#[derive(Clone)]
pub struct NlgFactory {
    lexicon: Arc<dyn Lexicon>,
}

impl NlgFactory {
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Arc<dyn Lexicon> {
        &self.lexicon
    }

    /// Look a word up, giving pronouns their person, number, gender,
    /// reflexive and possessive features. Pronoun features go on a private
    /// copy so the lexicon entry stays untouched.
    pub fn create_word(&self, word: &str, category: LexicalCategory) -> Arc<WordElement> {
        if !PRONOUNS.contains(&word) {
            return self.lexicon.lookup_word(word, category);
        }
        let entry = self.lexicon.lookup_word(word, LexicalCategory::Pronoun);
        let mut pronoun = WordElement::clone(&entry);
        pronoun.category = LexicalCategory::Pronoun;
        set_pronoun_features(&mut pronoun, word);
        Arc::new(pronoun)
    }

    /// A fresh occurrence of a word, ready to carry its own features.
    pub fn create_inflected_word(
        &self,
        word: impl Into<Content>,
        category: LexicalCategory,
    ) -> Element {
        match word.into() {
            Content::Text(text) => {
                Element::Inflected(InflectedWordElement::from_word(self.create_word(&text, category)))
            }
            Content::Element(Element::Word(w)) => {
                Element::Inflected(InflectedWordElement::from_word(w))
            }
            Content::Element(other) => other,
        }
    }

    /// Turn content into an element: single words are looked up, anything
    /// longer becomes canned text, elements pass through.
    pub fn create_element(&self, content: impl Into<Content>, category: LexicalCategory) -> Element {
        match content.into() {
            Content::Text(text) => self.element_from_text(text, category),
            Content::Element(Element::Inflected(w)) => match w.base_word {
                Some(base) => Element::Word(base),
                None => Element::Inflected(w),
            },
            Content::Element(Element::Text(s)) if s.features.is_empty() => {
                self.element_from_text(s.text, category)
            }
            Content::Element(e) => e,
        }
    }

    fn element_from_text(&self, text: String, category: LexicalCategory) -> Element {
        if self.is_word(&text, category) {
            Element::Word(self.create_word(&text, category))
        } else {
            Element::canned(text)
        }
    }

    fn is_word(&self, text: &str, category: LexicalCategory) -> bool {
        !text.is_empty()
            && (self.lexicon.has_word(text, category)
                || PRONOUNS.contains(&text)
                || text.chars().all(|c| c.is_alphanumeric() || c == '_'))
    }

    pub fn create_string_element(&self, text: impl Into<String>) -> Element {
        Element::canned(text)
    }

    /// A noun phrase with the given head.
    pub fn create_noun_phrase(&self, noun: impl Into<Content>) -> PhraseElement {
        match noun.into() {
            Content::Element(Element::Phrase(np)) if np.category == PhraseCategory::NounPhrase => np,
            other => {
                let mut np = noun_phrase();
                let head = self.create_element(other, LexicalCategory::Noun);
                set_noun_head(&mut np, head);
                np
            }
        }
    }

    /// A noun phrase with a specifier such as a determiner.
    pub fn create_noun_phrase_with_specifier(
        &self,
        specifier: impl Into<Content>,
        noun: impl Into<Content>,
    ) -> PhraseElement {
        let noun = noun.into();
        if let Content::Element(Element::Phrase(np)) = &noun {
            if np.category == PhraseCategory::NounPhrase {
                return np.clone();
            }
        }
        let mut np = self.create_noun_phrase(noun);
        self.set_specifier(&mut np, specifier);
        np
    }

    /// Set the specifier of a noun phrase; text is looked up as a
    /// determiner.
    pub fn set_specifier(&self, np: &mut PhraseElement, specifier: impl Into<Content>) {
        let specifier = match specifier.into() {
            Content::Element(e) => e,
            Content::Text(text) => {
                Element::Word(self.create_word(&text, LexicalCategory::Determiner))
            }
        };
        np.set_specifier(specifier);
    }

    /// Replace the head noun of a noun phrase, refreshing the agreement
    /// features taken from it.
    pub fn set_noun(&self, np: &mut PhraseElement, noun: impl Into<Content>) {
        let head = self.create_element(noun, LexicalCategory::Noun);
        set_noun_head(np, head);
    }

    /// A verb phrase. "kick off" becomes the verb "kick" with particle "off".
    pub fn create_verb_phrase(&self, verb: impl Into<Content>) -> PhraseElement {
        let mut vp = PhraseElement::verb_phrase();
        self.set_verb(&mut vp, verb);
        vp
    }

    /// Set the verb of a verb phrase, or of a clause's verb phrase.
    pub fn set_verb(&self, phrase: &mut PhraseElement, verb: impl Into<Content>) {
        if phrase.is_clause() {
            if let Some(Element::Phrase(vp)) = phrase.verb_phrase_mut() {
                self.set_verb(vp, verb);
            }
            return;
        }
        let head = match verb.into() {
            Content::Text(text) => match text.split_once(' ') {
                Some((verb, particle)) => {
                    phrase.set_feature(Feature::Particle, particle);
                    Element::Word(self.create_word(verb, LexicalCategory::Verb))
                }
                None => Element::Word(self.create_word(&text, LexicalCategory::Verb)),
            },
            Content::Element(e) => self.create_element(e, LexicalCategory::Verb),
        };
        phrase.set_head(head);
    }

    /// An empty clause with a default verb phrase and complementiser.
    pub fn create_clause(&self) -> PhraseElement {
        let mut clause = PhraseElement::clause();
        let complementiser = self.create_word("that", LexicalCategory::Complementiser);
        clause
            .features
            .set(Feature::Complementiser, Element::Word(complementiser));
        clause
    }

    /// A clause from subject and verb.
    pub fn create_clause_sv(
        &self,
        subject: impl Into<Content>,
        verb: impl Into<Content>,
    ) -> PhraseElement {
        let mut clause = self.create_clause();
        self.attach_verb(&mut clause, verb.into());
        self.set_subject(&mut clause, subject);
        clause
    }

    /// A clause from subject, verb and direct object.
    pub fn create_clause_svo(
        &self,
        subject: impl Into<Content>,
        verb: impl Into<Content>,
        object: impl Into<Content>,
    ) -> PhraseElement {
        let mut clause = self.create_clause_sv(subject, verb);
        self.set_object(&mut clause, object);
        clause
    }

    fn attach_verb(&self, clause: &mut PhraseElement, verb: Content) {
        match verb {
            Content::Element(Element::Phrase(vp)) => clause.set_verb_phrase(vp),
            other => self.set_verb(clause, other),
        }
    }

    /// Replace the subjects of a clause. Plain content is wrapped in a noun
    /// phrase.
    pub fn set_subject(&self, clause: &mut PhraseElement, subject: impl Into<Content>) {
        let subject = self.as_phrase(subject.into());
        clause.set_subject(subject);
    }

    /// Set the direct object of a clause or verb phrase.
    pub fn set_object(&self, phrase: &mut PhraseElement, object: impl Into<Content>) {
        let mut object = self.as_phrase(object.into());
        object.set_discourse_function(DiscourseFunction::Object);
        phrase.set_complement(object);
    }

    /// Set the indirect object of a clause or verb phrase.
    pub fn set_indirect_object(&self, phrase: &mut PhraseElement, object: impl Into<Content>) {
        let mut object = self.as_phrase(object.into());
        object.set_discourse_function(DiscourseFunction::IndirectObject);
        phrase.set_complement(object);
    }

    fn as_phrase(&self, content: Content) -> Element {
        match content {
            Content::Element(e @ (Element::Phrase(_) | Element::Coordinated(_))) => e,
            other => Element::Phrase(self.create_noun_phrase(other)),
        }
    }

    /// Add a modifier where it most likely belongs for the phrase category.
    ///
    /// Noun phrases take adjectives before the head. Clauses put adverb
    /// phrases and plain adverbs before the verb, sentence-modifying adverbs
    /// at the front, and anything else at the end. Verb phrases take adverbs
    /// before the verb. Multi-word text is always a postmodifier.
    pub fn add_modifier(&self, phrase: &mut PhraseElement, modifier: impl Into<Content>) {
        let modifier = match modifier.into() {
            Content::Element(e) => e,
            Content::Text(text) => {
                if text.is_empty() || text.contains(' ') {
                    phrase.add_postmodifier(Element::canned(text));
                    return;
                }
                Element::Word(self.create_word(&text, LexicalCategory::Any))
            }
        };

        let word_category = match &modifier {
            Element::Word(w) => Some(w.category),
            Element::Inflected(w) => w.base_word.as_ref().map(|b| b.category),
            _ => None,
        };
        let sentence_modifier = match &modifier {
            Element::Word(w) => w.features.flag(Feature::SentenceModifier),
            Element::Inflected(w) => w
                .base_word
                .as_ref()
                .is_some_and(|b| b.features.flag(Feature::SentenceModifier)),
            _ => false,
        };

        match phrase.category {
            PhraseCategory::NounPhrase => {
                if modifier.is_phrase(PhraseCategory::AdjectivePhrase)
                    || word_category == Some(LexicalCategory::Adjective)
                {
                    phrase.add_premodifier(base_of(modifier));
                } else {
                    phrase.add_postmodifier(modifier);
                }
            }
            PhraseCategory::Clause => {
                if modifier.is_phrase(PhraseCategory::AdverbPhrase) {
                    phrase.add_premodifier(modifier);
                } else if word_category == Some(LexicalCategory::Adverb) {
                    if sentence_modifier {
                        phrase.add_front_modifier(base_of(modifier));
                    } else {
                        phrase.add_premodifier(base_of(modifier));
                    }
                } else {
                    phrase.add_postmodifier(modifier);
                }
            }
            PhraseCategory::VerbPhrase => {
                if word_category == Some(LexicalCategory::Adverb) {
                    phrase.add_premodifier(base_of(modifier));
                } else {
                    phrase.add_postmodifier(modifier);
                }
            }
            _ => phrase.add_postmodifier(modifier),
        }
    }

    /// A prepositional phrase headed by `preposition`.
    pub fn create_preposition_phrase(&self, preposition: impl Into<Content>) -> PhraseElement {
        let mut pp = PhraseElement::new(PhraseCategory::PrepositionalPhrase);
        pp.set_head(self.create_element(preposition, LexicalCategory::Preposition));
        pp
    }

    pub fn create_preposition_phrase_with_complement(
        &self,
        preposition: impl Into<Content>,
        complement: impl Into<Content>,
    ) -> PhraseElement {
        let mut pp = self.create_preposition_phrase(preposition);
        pp.add_complement(self.create_element(complement, LexicalCategory::Any));
        pp
    }

    pub fn create_adjective_phrase(&self, adjective: impl Into<Content>) -> PhraseElement {
        let mut phrase = PhraseElement::new(PhraseCategory::AdjectivePhrase);
        phrase.set_head(self.create_element(adjective, LexicalCategory::Adjective));
        phrase
    }

    pub fn create_adverb_phrase(&self, adverb: impl Into<Content>) -> PhraseElement {
        let mut phrase = PhraseElement::new(PhraseCategory::AdverbPhrase);
        phrase.set_head(self.create_element(adverb, LexicalCategory::Adverb));
        phrase
    }

    /// Two coordinates joined by "and". Text coordinates become canned
    /// text.
    pub fn create_coordinated_phrase(
        &self,
        first: impl Into<Content>,
        second: impl Into<Content>,
    ) -> CoordinatedPhraseElement {
        let mut coordinated = CoordinatedPhraseElement::new();
        self.add_coordinate(&mut coordinated, first);
        self.add_coordinate(&mut coordinated, second);
        coordinated
    }

    pub fn add_coordinate(
        &self,
        coordinated: &mut CoordinatedPhraseElement,
        coordinate: impl Into<Content>,
    ) {
        match coordinate.into() {
            Content::Element(e) => coordinated.add_coordinate(e),
            Content::Text(text) => {
                let mut canned = Element::canned(text);
                canned.set_feature(Feature::SuppressedComplementiser, true);
                coordinated.add_coordinate(canned);
            }
        }
    }

    pub fn create_document(&self, title: Option<&str>) -> DocumentElement {
        DocumentElement::new(DocumentCategory::Document, title.map(str::to_string))
    }

    pub fn create_document_with(
        &self,
        title: Option<&str>,
        components: impl IntoIterator<Item = Element>,
    ) -> DocumentElement {
        let mut document = self.create_document(title);
        document.add_components(components);
        document
    }

    pub fn create_section(&self, title: Option<&str>) -> DocumentElement {
        DocumentElement::new(DocumentCategory::Section, title.map(str::to_string))
    }

    pub fn create_section_with(
        &self,
        title: Option<&str>,
        components: impl IntoIterator<Item = Element>,
    ) -> DocumentElement {
        let mut section = self.create_section(title);
        section.add_components(components);
        section
    }

    pub fn create_paragraph(&self, components: impl IntoIterator<Item = Element>) -> DocumentElement {
        let mut paragraph = DocumentElement::new(DocumentCategory::Paragraph, None);
        paragraph.add_components(components);
        paragraph
    }

    pub fn create_empty_sentence(&self) -> DocumentElement {
        DocumentElement::new(DocumentCategory::Sentence, None)
    }

    /// A sentence around canned text or an existing element.
    pub fn create_sentence(&self, content: impl Into<Content>) -> DocumentElement {
        let mut sentence = self.create_empty_sentence();
        match content.into() {
            Content::Text(text) => sentence.add_component(Element::canned(text)),
            Content::Element(e) => sentence.add_component(e),
        }
        sentence
    }

    pub fn create_sentence_with(
        &self,
        components: impl IntoIterator<Item = Element>,
    ) -> DocumentElement {
        let mut sentence = self.create_empty_sentence();
        sentence.add_components(components);
        sentence
    }

    pub fn create_list(&self, items: impl IntoIterator<Item = Element>) -> DocumentElement {
        let mut list = DocumentElement::new(DocumentCategory::List, None);
        list.add_components(items);
        list
    }

    pub fn create_enumerated_list(&self, items: impl IntoIterator<Item = Element>) -> DocumentElement {
        let mut list = DocumentElement::new(DocumentCategory::EnumeratedList, None);
        list.add_components(items);
        list
    }

    pub fn create_list_item(&self, component: impl Into<Content>) -> DocumentElement {
        let mut item = DocumentElement::new(DocumentCategory::ListItem, None);
        match component.into() {
            Content::Text(text) => item.add_component(Element::canned(text)),
            Content::Element(e) => item.add_component(e),
        }
        item
    }
}

/// Lexicon words drop any per-occurrence features when used as modifiers.
fn base_of(element: Element) -> Element {
    match element {
        Element::Inflected(InflectedWordElement {
            base_word: Some(base),
            ..
        }) => Element::Word(base),
        other => other,
    }
}

fn noun_phrase() -> PhraseElement {
    let mut np = PhraseElement::new(PhraseCategory::NounPhrase);
    np.features.set(Feature::Elided, false);
    np
}

/// Install a head noun and copy its agreement features onto the phrase.
fn set_noun_head(np: &mut PhraseElement, head: Element) {
    let possessive = head.flag(Feature::Possessive);
    np.features.set(Feature::Possessive, possessive);
    np.features.set(Feature::Raised, false);
    np.features.set(Feature::Acronym, false);
    np.features
        .set(Feature::Number, head.number().unwrap_or(NumberAgreement::Singular));
    np.features
        .set(Feature::Person, head.person().unwrap_or(Person::Third));
    np.features
        .set(Feature::Gender, head.gender().unwrap_or(Gender::Neuter));
    if let Some(expletive) = head.feature(Feature::ExpletiveSubject).cloned() {
        np.features.set(Feature::ExpletiveSubject, expletive);
    }
    np.features.set(Feature::AdjectiveOrdering, true);
    np.set_head(head);
}

fn set_pronoun_features(word: &mut WordElement, base: &str) {
    let features = &mut word.features;
    if FIRST_PERSON.contains(&base) {
        features.set(Feature::Person, Person::First);
    } else if SECOND_PERSON.contains(&base) {
        features.set(Feature::Person, Person::Second);
        match base {
            "yourself" => features.set(Feature::Number, NumberAgreement::Singular),
            "yourselves" => features.set(Feature::Number, NumberAgreement::Plural),
            _ => features.set(Feature::Number, NumberAgreement::Both),
        }
    } else {
        features.set(Feature::Person, Person::Third);
    }

    features.set(Feature::Reflexive, REFLEXIVE.contains(&base));

    let gender = if MASCULINE.contains(&base) {
        Gender::Masculine
    } else if FEMININE.contains(&base) {
        Gender::Feminine
    } else {
        Gender::Neuter
    };
    features.set(Feature::Gender, gender);

    features.set(Feature::Possessive, POSSESSIVE.contains(&base));

    if PLURAL.contains(&base) && !SECOND_PERSON.contains(&base) {
        features.set(Feature::Number, NumberAgreement::Plural);
    } else if !EXPLETIVE.contains(&base) && !SECOND_PERSON.contains(&base) {
        features.set(Feature::Number, NumberAgreement::Singular);
    }

    if EXPLETIVE.contains(&base) {
        features.set(Feature::NonMorph, true);
        features.set(Feature::ExpletiveSubject, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::MemoryLexicon;

    fn factory() -> NlgFactory {
        NlgFactory::new(Arc::new(MemoryLexicon::default_lexicon().unwrap()))
    }

    #[test]
    fn pronouns_get_features_without_touching_lexicon() {
        let f = factory();
        let they = f.create_word("they", LexicalCategory::Noun);
        assert_eq!(they.category, LexicalCategory::Pronoun);
        assert_eq!(they.features.number(), Some(NumberAgreement::Plural));
        assert_eq!(they.features.person(), Some(Person::Third));

        let entry = f.lexicon().word("they", LexicalCategory::Pronoun);
        assert!(!entry.features.has(Feature::Number), "lexicon entry must stay bare");
    }

    #[test]
    fn second_person_number() {
        let f = factory();
        let you = f.create_word("you", LexicalCategory::Any);
        assert_eq!(you.features.number(), Some(NumberAgreement::Both));
        let yourselves = f.create_word("yourselves", LexicalCategory::Any);
        assert_eq!(yourselves.features.number(), Some(NumberAgreement::Plural));
        assert!(yourselves.features.flag(Feature::Reflexive));
    }

    #[test]
    fn expletive_there() {
        let there = factory().create_word("there", LexicalCategory::Any);
        assert!(there.features.flag(Feature::NonMorph));
        assert!(there.features.flag(Feature::ExpletiveSubject));
        assert!(!there.features.has(Feature::Number));
    }

    #[test]
    fn multi_word_text_is_canned() {
        let f = factory();
        assert!(matches!(
            f.create_element("the monkey", LexicalCategory::Noun),
            Element::Text(_)
        ));
        assert!(matches!(
            f.create_element("monkey", LexicalCategory::Noun),
            Element::Word(_)
        ));
    }

    #[test]
    fn noun_phrase_takes_head_agreement() {
        let f = factory();
        let np = f.create_noun_phrase("we");
        assert_eq!(np.features.number(), Some(NumberAgreement::Plural));
        assert_eq!(np.features.person(), Some(Person::First));
        assert!(np.features.flag(Feature::AdjectiveOrdering));

        let np = f.create_noun_phrase_with_specifier("the", "dog");
        assert_eq!(
            np.specifier().and_then(Element::discourse_function),
            Some(DiscourseFunction::Specifier)
        );
    }

    #[test]
    fn verb_particle_is_split() {
        let vp = factory().create_verb_phrase("wake up");
        assert_eq!(vp.head().and_then(Element::base_form), Some("wake"));
        assert_eq!(vp.features.text(Feature::Particle), Some("up"));
    }

    #[test]
    fn clause_slots() {
        let f = factory();
        let mut clause = f.create_clause_svo("Mary", "chase", "the monkey");
        f.set_indirect_object(&mut clause, "John");
        assert_eq!(clause.subjects.len(), 1);
        assert!(clause.complement(DiscourseFunction::Object).is_some());
        assert!(clause.complement(DiscourseFunction::IndirectObject).is_some());
        assert!(matches!(
            clause.features.element(Feature::Complementiser),
            Some(Element::Word(_))
        ));

        f.set_object(&mut clause, "George");
        let vp = clause.verb_phrase_element().and_then(Element::as_phrase).unwrap();
        assert_eq!(vp.complements.len(), 2, "object replaced, not added");
    }

    #[test]
    fn modifier_placement() {
        let f = factory();
        let mut np = f.create_noun_phrase_with_specifier("the", "park");
        f.add_modifier(&mut np, "leafy");
        assert_eq!(np.premodifiers.len(), 1);

        let mut clause = f.create_clause_sv("Mary", "chase");
        f.add_modifier(&mut clause, "quickly");
        f.add_modifier(&mut clause, "however");
        f.add_modifier(&mut clause, "in the park");
        let vp = clause.verb_phrase_element().and_then(Element::as_phrase).unwrap();
        assert_eq!(vp.premodifiers.len(), 1);
        assert_eq!(clause.front_modifiers.len(), 1);
        assert_eq!(clause.postmodifiers.len(), 1);
    }

    #[test]
    fn coordinated_text_suppresses_complementiser() {
        let c = factory().create_coordinated_phrase("Mary", "John");
        assert!(c.coordinates.iter().all(|e| e.flag(Feature::SuppressedComplementiser)));
    }
}
