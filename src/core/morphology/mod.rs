/// Morphology stage: turns word occurrences into inflected strings and
/// makes determiners agree with what follows them.

pub mod determiner;
mod rules;

use std::sync::Arc;

use crate::core::lexicon::Lexicon;
use crate::schema::category::LexicalCategory;
use crate::schema::element::{Element, InflectedWordElement, ListElement, StringElement};
use crate::schema::feature::{DiscourseFunction, Feature};

/// Inflects the leaves of a syntax-realised tree.
#[derive(Clone)]
pub struct MorphologyProcessor {
    lexicon: Arc<dyn Lexicon>,
}

impl MorphologyProcessor {
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Realise one element. Word occurrences become strings; structural
    /// elements are rebuilt around their realised children.
    pub fn realise(&self, element: &Element) -> Element {
        match element {
            Element::Inflected(word) => self.inflect(word),
            Element::Text(_) => element.clone(),
            Element::Word(word) => Element::Text(StringElement::new(word.base_form.clone())),
            Element::Document(document) => {
                let mut document = document.clone();
                document.components = self.realise_all(&document.components);
                Element::Document(document)
            }
            Element::List(list) => Element::List(ListElement {
                children: self.realise_all(&list.children),
                features: list.features.clone(),
            }),
            Element::Coordinated(coordinated) => {
                let mut coordinated = coordinated.clone();
                for coordinate in &mut coordinated.coordinates {
                    *coordinate = self.realise(coordinate);
                }
                Element::Coordinated(coordinated)
            }
            Element::Phrase(_) => element.clone(),
        }
    }

    /// Realise a sequence of siblings. Determiners agree with the word that
    /// follows them, and canned text ending in "a" is corrected before a
    /// noun that needs "an".
    pub fn realise_all(&self, elements: &[Element]) -> Vec<Element> {
        let mut realised: Vec<Element> = Vec::with_capacity(elements.len());
        let mut determiner: Option<usize> = None;
        for (index, element) in elements.iter().enumerate() {
            let mut current = self.realise(element);
            match element.feature(Feature::Appositive) {
                Some(appositive) => current.set_feature(Feature::Appositive, appositive.clone()),
                None => current.remove_feature(Feature::Appositive),
            }
            if let Some(function) = element.discourse_function() {
                current.set_discourse_function(function);
            }

            let follows_text = index > 0 && matches!(elements[index - 1], Element::Text(_));
            if follows_text && is_noun_occurrence(element) {
                if let Some(Element::Text(previous)) = realised.last_mut() {
                    previous.text = determiner::check_ends_with_indefinite_article(
                        &previous.text,
                        current.realisation(),
                    );
                }
            }

            let position = realised.len();
            realised.push(current);
            match determiner {
                None if realised[position].discourse_function()
                    == Some(DiscourseFunction::Specifier) =>
                {
                    match element.feature(Feature::Number) {
                        Some(number) => realised[position].set_feature(Feature::Number, number.clone()),
                        None => realised[position].remove_feature(Feature::Number),
                    }
                    determiner = Some(position);
                }
                None => {}
                Some(at) => {
                    let (before, after) = realised.split_at_mut(position);
                    if let Some(following) = leading_realisation(&after[0]) {
                        determiner::agree(&mut before[at], following);
                    }
                    determiner = None;
                }
            }
        }
        realised
    }

    fn inflect(&self, word: &InflectedWordElement) -> Element {
        if word.features.flag(Feature::NonMorph) {
            let mut text = StringElement::new(word.base_form.clone());
            if let Some(function) = word.features.discourse_function() {
                text.features.set(Feature::DiscourseFunction, function);
            }
            return Element::Text(text);
        }
        let looked_up;
        let base_word = match &word.base_word {
            Some(base) => Some(base.as_ref()),
            None => {
                looked_up = self.lexicon.lookup_word(&word.base_form, word.category);
                Some(looked_up.as_ref())
            }
        };
        match word.category {
            LexicalCategory::Pronoun => rules::pronoun(word),
            LexicalCategory::Noun => rules::noun(word, base_word),
            LexicalCategory::Verb => rules::verb(word, base_word),
            LexicalCategory::Adjective => rules::adjective(word, base_word),
            LexicalCategory::Adverb => rules::adverb(word, base_word),
            _ => rules::uninflected(word),
        }
    }
}

fn is_noun_occurrence(element: &Element) -> bool {
    matches!(element, Element::Inflected(word) if word.category == LexicalCategory::Noun)
}

/// The text a determiner must agree with: the element itself, or the first
/// leaf of a list or coordination.
fn leading_realisation(element: &Element) -> Option<&str> {
    match element {
        Element::Text(text) => Some(text.text.trim_matches(' ')),
        Element::List(list) => list.children.first().and_then(leading_realisation),
        Element::Coordinated(coordinated) => {
            coordinated.coordinates.first().and_then(leading_realisation)
        }
        _ => None,
    }
}
