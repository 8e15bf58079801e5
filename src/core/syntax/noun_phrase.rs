/// Noun phrases: pronominalisation, specifier agreement and premodifier
/// ordering.

use crate::core::syntax::phrase::realise_list;
use crate::core::syntax::SyntaxProcessor;
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::{Element, WordElement};
use crate::schema::feature::{DiscourseFunction, Feature, Gender, Person};
use crate::schema::phrase::PhraseElement;

const QUALITATIVE_POSITION: u8 = 1;
const COLOUR_POSITION: u8 = 2;
const CLASSIFYING_POSITION: u8 = 3;
const NOUN_POSITION: u8 = 4;

pub(super) fn realise(syntax: &SyntaxProcessor, phrase: &PhraseElement) -> Element {
    let mut realised = Vec::new();
    if phrase.flag(Feature::Elided) {
        return Element::list(realised);
    }
    if phrase.flag(Feature::Pronominal) {
        realised.push(create_pronoun(syntax, phrase));
        return Element::list(realised);
    }

    realise_specifier(syntax, phrase, &mut realised);

    let premodifiers = if phrase.flag(Feature::AdjectiveOrdering) {
        sort_premodifiers(&phrase.premodifiers)
    } else {
        phrase.premodifiers.clone()
    };
    realise_list(
        syntax,
        &mut realised,
        &premodifiers,
        DiscourseFunction::PreModifier,
    );

    realise_head(syntax, phrase, &mut realised);
    realise_list(
        syntax,
        &mut realised,
        &phrase.complements,
        DiscourseFunction::Complement,
    );
    realise_list(
        syntax,
        &mut realised,
        &phrase.postmodifiers,
        DiscourseFunction::PostModifier,
    );
    Element::list(realised)
}

fn realise_specifier(syntax: &SyntaxProcessor, phrase: &PhraseElement, realised: &mut Vec<Element>) {
    let Some(specifier) = phrase.specifier() else {
        return;
    };
    if phrase.flag(Feature::Raised) || phrase.flag(Feature::Elided) {
        return;
    }
    let mut specifier = specifier.clone();
    let is_pronoun = specifier.lexical_category() == Some(LexicalCategory::Pronoun);
    if !is_pronoun && !specifier.is_phrase(PhraseCategory::NounPhrase) {
        copy_or_clear(&mut specifier, phrase, Feature::Number);
    }
    if let Some(mut current) = syntax.realise(&specifier) {
        current.set_discourse_function(DiscourseFunction::Specifier);
        realised.push(current);
    }
}

/// The head takes the phrase's agreement features. Features unset on the
/// phrase are cleared from the head.
fn realise_head(syntax: &SyntaxProcessor, phrase: &PhraseElement, realised: &mut Vec<Element>) {
    let Some(head) = phrase.head() else {
        return;
    };
    let mut head = head.clone();
    for feature in [
        Feature::Elided,
        Feature::Gender,
        Feature::Acronym,
        Feature::Number,
        Feature::Person,
        Feature::Possessive,
        Feature::Passive,
    ] {
        copy_or_clear(&mut head, phrase, feature);
    }
    if let Some(mut current) = syntax.realise(&head) {
        current.set_discourse_function(DiscourseFunction::Subject);
        realised.push(current);
    }
}

fn copy_or_clear(target: &mut Element, phrase: &PhraseElement, feature: Feature) {
    match phrase.feature(feature) {
        Some(value) => target.set_feature(feature, value.clone()),
        None => target.remove_feature(feature),
    }
}

/// A personal pronoun standing in for the whole phrase.
fn create_pronoun(syntax: &SyntaxProcessor, phrase: &PhraseElement) -> Element {
    let pronoun = match phrase.features.person() {
        Some(Person::First) => "I",
        Some(Person::Second) => "you",
        _ => match phrase.features.gender() {
            Some(Gender::Feminine) => "she",
            Some(Gender::Masculine) => "he",
            _ => "it",
        },
    };
    let mut element = syntax
        .factory()
        .create_inflected_word(pronoun, LexicalCategory::Pronoun);
    element.set_discourse_function(DiscourseFunction::Specifier);
    copy_or_clear(&mut element, phrase, Feature::Possessive);
    copy_or_clear(&mut element, phrase, Feature::Number);
    if let Some(function) = phrase.features.discourse_function() {
        element.set_discourse_function(function);
    }
    element
}

/// Bubble premodifiers into qualitative, colour, classifying, noun order.
/// Modifiers already in an acceptable order keep their relative order.
fn sort_premodifiers(modifiers: &[Element]) -> Vec<Element> {
    let mut ordered = modifiers.to_vec();
    if ordered.len() <= 1 {
        return ordered;
    }
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..ordered.len() - 1 {
            if min_position(&ordered[i]) > max_position(&ordered[i + 1]) {
                ordered.swap(i, i + 1);
                changed = true;
            }
        }
    }
    ordered
}

fn is_adjective(modifier: &Element) -> bool {
    modifier.lexical_category() == Some(LexicalCategory::Adjective)
        || modifier.is_phrase(PhraseCategory::AdjectivePhrase)
}

fn adjective_flag(modifier: &Element, feature: Feature) -> bool {
    head_word(modifier)
        .map(|word| word.features.flag(feature))
        .unwrap_or(false)
}

fn min_position(modifier: &Element) -> u8 {
    if modifier.lexical_category() == Some(LexicalCategory::Noun)
        || modifier.is_phrase(PhraseCategory::NounPhrase)
    {
        NOUN_POSITION
    } else if is_adjective(modifier) {
        if adjective_flag(modifier, Feature::Qualitative) {
            QUALITATIVE_POSITION
        } else if adjective_flag(modifier, Feature::Colour) {
            COLOUR_POSITION
        } else if adjective_flag(modifier, Feature::Classifying) {
            CLASSIFYING_POSITION
        } else {
            QUALITATIVE_POSITION
        }
    } else {
        QUALITATIVE_POSITION
    }
}

fn max_position(modifier: &Element) -> u8 {
    if !is_adjective(modifier) {
        return NOUN_POSITION;
    }
    if adjective_flag(modifier, Feature::Classifying) {
        CLASSIFYING_POSITION
    } else if adjective_flag(modifier, Feature::Colour) {
        COLOUR_POSITION
    } else if adjective_flag(modifier, Feature::Qualitative) {
        QUALITATIVE_POSITION
    } else {
        CLASSIFYING_POSITION
    }
}

fn head_word(element: &Element) -> Option<&WordElement> {
    match element {
        Element::Word(word) => Some(word),
        Element::Inflected(word) => word.base_word.as_deref(),
        Element::Phrase(phrase) => phrase.head().and_then(head_word),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::tests::{leaves, processor};
    use crate::schema::feature::NumberAgreement;

    #[test]
    fn specifier_and_head() {
        let syntax = processor();
        let np = syntax.factory().create_noun_phrase_with_specifier("the", "dog");
        let realised = syntax.realise(&Element::Phrase(np)).unwrap();
        assert_eq!(leaves(&realised), vec!["the", "dog"]);
    }

    #[test]
    fn head_takes_phrase_number() {
        let syntax = processor();
        let mut np = syntax.factory().create_noun_phrase_with_specifier("a", "dog");
        np.set_feature(Feature::Number, NumberAgreement::Plural);
        let Some(Element::List(list)) = syntax.realise(&Element::Phrase(np)) else {
            panic!("expected a list");
        };
        assert!(list.children.iter().all(Element::is_plural));
        assert_eq!(
            list.children[1].discourse_function(),
            Some(DiscourseFunction::Subject)
        );
    }

    #[test]
    fn raised_specifier_is_skipped() {
        let syntax = processor();
        let mut np = syntax.factory().create_noun_phrase_with_specifier("the", "dog");
        np.set_feature(Feature::Raised, true);
        let realised = syntax.realise(&Element::Phrase(np)).unwrap();
        assert_eq!(leaves(&realised), vec!["dog"]);
    }

    #[test]
    fn pronominal_phrase_becomes_pronoun() {
        let syntax = processor();
        let mut np = syntax.factory().create_noun_phrase("Mary");
        np.set_feature(Feature::Gender, Gender::Feminine);
        np.set_feature(Feature::Pronominal, true);
        let realised = syntax.realise(&Element::Phrase(np)).unwrap();
        assert_eq!(leaves(&realised), vec!["she"]);
        assert_eq!(realised.lexical_category(), Some(LexicalCategory::Pronoun));
    }

    #[test]
    fn adjectives_are_ordered() {
        let syntax = processor();
        let f = syntax.factory();
        let mut np = f.create_noun_phrase_with_specifier("the", "car");
        f.add_modifier(&mut np, "electric");
        f.add_modifier(&mut np, "red");
        f.add_modifier(&mut np, "big");
        let realised = syntax.realise(&Element::Phrase(np)).unwrap();
        assert_eq!(leaves(&realised), vec!["the", "big", "red", "electric", "car"]);
    }

    #[test]
    fn ordering_can_be_disabled() {
        let syntax = processor();
        let f = syntax.factory();
        let mut np = f.create_noun_phrase("car");
        f.add_modifier(&mut np, "electric");
        f.add_modifier(&mut np, "big");
        np.set_feature(Feature::AdjectiveOrdering, false);
        let realised = syntax.realise(&Element::Phrase(np)).unwrap();
        assert_eq!(leaves(&realised), vec!["electric", "big", "car"]);
    }
}
