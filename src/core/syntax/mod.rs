/// Syntax stage: expands phrase specifications into ordered lists of
/// word occurrences.
///
/// Each phrase category has its own helper module. Helpers never mutate
/// the input tree; they work on clones and return fresh `ListElement`s
/// whose children carry the discourse function they play in the parent.

mod clause;
mod coordinated;
mod noun_phrase;
mod phrase;
mod verb_phrase;

use std::sync::Arc;

use crate::core::factory::NlgFactory;
use crate::schema::category::PhraseCategory;
use crate::schema::element::{Element, InflectedWordElement};
use crate::schema::feature::Feature;
use crate::schema::phrase::PhraseElement;

/// Realises the syntactic structure of element trees.
#[derive(Clone)]
pub struct SyntaxProcessor {
    factory: NlgFactory,
}

impl SyntaxProcessor {
    pub fn new(factory: NlgFactory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &NlgFactory {
        &self.factory
    }

    /// Realise one element. Elided elements yield `None`; a resulting list
    /// with a single child is replaced by that child.
    pub fn realise(&self, element: &Element) -> Option<Element> {
        self.realise_in(element, None)
    }

    /// Realise a sequence, splicing realised lists into the output.
    pub fn realise_all(&self, elements: &[Element]) -> Vec<Element> {
        let mut realised = Vec::with_capacity(elements.len());
        for element in elements {
            match self.realise(element) {
                Some(Element::List(list)) => realised.extend(list.children),
                Some(other) => realised.push(other),
                None => {}
            }
        }
        realised
    }

    /// Realise with knowledge of the enclosing clause, which verb phrases
    /// need for copular agreement.
    pub(crate) fn realise_in(
        &self,
        element: &Element,
        parent: Option<&PhraseElement>,
    ) -> Option<Element> {
        if element.is_elided() {
            return None;
        }
        let realised = match element {
            Element::Document(doc) => {
                let mut doc = doc.clone();
                let mut components = Vec::with_capacity(doc.components.len());
                for component in &doc.components {
                    match self.realise(component) {
                        Some(Element::List(list)) => {
                            if list.features.flag(Feature::Interrogative) {
                                doc.features.set(Feature::Interrogative, true);
                            }
                            components.extend(list.children);
                        }
                        Some(other) => components.push(other),
                        None => {}
                    }
                }
                doc.components = components;
                Element::Document(doc)
            }
            Element::Phrase(phrase) => self.realise_phrase(phrase, parent),
            Element::List(list) => Element::list(self.realise_all(&list.children)),
            Element::Inflected(word) => {
                let mut word = word.clone();
                if word.base_word.is_none() {
                    word.base_word = Some(
                        self.factory
                            .lexicon()
                            .lookup_word(&word.base_form, word.category),
                    );
                }
                Element::Inflected(word)
            }
            Element::Word(word) => {
                let occurrence = InflectedWordElement::from_word(Arc::clone(word));
                return self.realise_in(&Element::Inflected(occurrence), parent);
            }
            Element::Coordinated(coordinated) => coordinated::realise(self, coordinated),
            Element::Text(_) => element.clone(),
        };
        Some(unwrap_single(realised))
    }

    fn realise_phrase(&self, phrase: &PhraseElement, parent: Option<&PhraseElement>) -> Element {
        match phrase.category {
            PhraseCategory::Clause => clause::realise(self, phrase),
            PhraseCategory::NounPhrase => noun_phrase::realise(self, phrase),
            PhraseCategory::VerbPhrase => verb_phrase::realise(self, phrase, parent),
            PhraseCategory::PrepositionalPhrase
            | PhraseCategory::AdjectivePhrase
            | PhraseCategory::AdverbPhrase => phrase::realise(self, phrase),
            PhraseCategory::CannedText => Element::Phrase(phrase.clone()),
        }
    }
}

fn unwrap_single(element: Element) -> Element {
    match element {
        Element::List(mut list) if list.children.len() == 1 => list.children.remove(0),
        other => other,
    }
}

/// Whether a word, or the verb of a phrase, is a form of "be".
pub(crate) fn is_copular(element: &Element) -> bool {
    match element {
        Element::Word(_) | Element::Inflected(_) => element
            .base_form()
            .map(|base| base.eq_ignore_ascii_case("be"))
            .unwrap_or(false),
        Element::Phrase(phrase) => has_copular_verb(phrase),
        _ => false,
    }
}

/// Whether the verb of a clause, or the head of a phrase, is "be".
pub(crate) fn has_copular_verb(phrase: &PhraseElement) -> bool {
    phrase
        .verb()
        .and_then(Element::base_form)
        .map(|base| base == "be")
        .unwrap_or(false)
}

/// A clause whose single subject is "there".
pub(crate) fn is_expletive_subject(clause: &PhraseElement) -> bool {
    match clause.subjects.as_slice() {
        [Element::Phrase(np)] if np.category == PhraseCategory::NounPhrase => {
            np.flag(Feature::ExpletiveSubject)
        }
        [subject @ Element::Text(_)] => subject.realisation().eq_ignore_ascii_case("there"),
        _ => false,
    }
}
