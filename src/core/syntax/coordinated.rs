/// Coordinated phrases: shared features flow down to each coordinate and
/// the conjunction is placed between them.

use crate::core::syntax::phrase::realise_list;
use crate::core::syntax::SyntaxProcessor;
use crate::schema::category::LexicalCategory;
use crate::schema::element::{Element, InflectedWordElement};
use crate::schema::feature::{DiscourseFunction, Feature};
use crate::schema::phrase::CoordinatedPhraseElement;

/// Features a coordination hands to every coordinate when set on it.
const SHARED_FEATURES: [Feature; 11] = [
    Feature::Progressive,
    Feature::Perfect,
    Feature::Gender,
    Feature::Number,
    Feature::Tense,
    Feature::Person,
    Feature::Negated,
    Feature::Modal,
    Feature::DiscourseFunction,
    Feature::Form,
    Feature::ClauseStatus,
];

pub(super) fn realise(syntax: &SyntaxProcessor, phrase: &CoordinatedPhraseElement) -> Element {
    let mut realised = Vec::new();
    realise_list(
        syntax,
        &mut realised,
        &phrase.premodifiers,
        DiscourseFunction::PreModifier,
    );

    let conjunction = phrase.conjunction().to_string();
    let mut coordinated = CoordinatedPhraseElement::new();
    coordinated.set_conjunction(conjunction.clone());
    coordinated
        .features
        .copy_from(&phrase.features, Feature::ConjunctionType);

    if !phrase.coordinates.is_empty() {
        let mut children = phrase.coordinates.clone();
        if phrase.features.flag(Feature::RaiseSpecifier) {
            raise_specifier(&mut children);
        }
        if let Some(last) = children.last_mut() {
            match phrase.features.get(Feature::Possessive) {
                Some(possessive) => last.set_feature(Feature::Possessive, possessive.clone()),
                None => last.remove_feature(Feature::Possessive),
            }
        }

        for (index, mut child) in children.into_iter().enumerate() {
            set_child_features(phrase, &mut child);
            if index > 0 {
                if phrase.features.flag(Feature::AggregateAuxiliary) {
                    child.set_feature(Feature::RealiseAuxiliary, false);
                }
                if child.is_clause() {
                    if let Some(value) = phrase.features.get(Feature::SuppressedComplementiser) {
                        child.set_feature(Feature::SuppressedComplementiser, value.clone());
                    }
                }
                if !conjunction.is_empty() {
                    let mut word =
                        Element::Inflected(InflectedWordElement::new(&conjunction, LexicalCategory::Conjunction));
                    word.set_discourse_function(DiscourseFunction::Conjunction);
                    coordinated.coordinates.push(word);
                }
            }
            if let Some(current) = syntax.realise(&child) {
                coordinated.coordinates.push(current);
            }
        }
        realised.push(Element::Coordinated(coordinated));
    }

    realise_list(
        syntax,
        &mut realised,
        &phrase.postmodifiers,
        DiscourseFunction::PostModifier,
    );
    realise_list(
        syntax,
        &mut realised,
        &phrase.complements,
        DiscourseFunction::Complement,
    );
    Element::list(realised)
}

fn set_child_features(phrase: &CoordinatedPhraseElement, child: &mut Element) {
    for feature in SHARED_FEATURES {
        if let Some(value) = phrase.features.get(feature) {
            child.set_feature(feature, value.clone());
        }
    }
    if phrase.features.has(Feature::InterrogativeType) {
        child.set_feature(Feature::IgnoreModal, true);
    }
}

/// When every coordinate has the same specifier ("the dog and the cat"),
/// only the first keeps it ("the dog and cat").
fn raise_specifier(children: &mut [Element]) {
    let specifier_base = |child: &Element| {
        child
            .as_phrase()
            .and_then(|p| p.specifier())
            .and_then(Element::base_form)
            .map(str::to_string)
    };
    let Some(first) = children.first().and_then(specifier_base) else {
        return;
    };
    let all_match = children[1..]
        .iter()
        .all(|child| specifier_base(child).as_deref() == Some(first.as_str()));
    if all_match {
        for child in &mut children[1..] {
            child.set_feature(Feature::Raised, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::tests::{leaves, processor};
    use crate::schema::feature::Tense;

    #[test]
    fn conjunction_between_coordinates() {
        let syntax = processor();
        let f = syntax.factory();
        let mut c = f.create_coordinated_phrase(
            f.create_noun_phrase("Mary"),
            f.create_noun_phrase("John"),
        );
        f.add_coordinate(&mut c, f.create_noun_phrase("George"));
        let realised = syntax.realise(&Element::Coordinated(c)).unwrap();
        assert_eq!(
            leaves(&realised),
            vec!["Mary", "and", "John", "and", "George"]
        );
        let Element::Coordinated(result) = realised else {
            panic!("expected a coordination");
        };
        assert_eq!(
            result.coordinates[1].discourse_function(),
            Some(DiscourseFunction::Conjunction)
        );
    }

    #[test]
    fn shared_specifier_is_raised() {
        let syntax = processor();
        let f = syntax.factory();
        let mut c = f.create_coordinated_phrase(
            f.create_noun_phrase_with_specifier("the", "dog"),
            f.create_noun_phrase_with_specifier("the", "cat"),
        );
        c.features.set(Feature::RaiseSpecifier, true);
        let realised = syntax.realise(&Element::Coordinated(c)).unwrap();
        assert_eq!(leaves(&realised), vec!["the", "dog", "and", "cat"]);
    }

    #[test]
    fn different_specifiers_stay() {
        let syntax = processor();
        let f = syntax.factory();
        let mut c = f.create_coordinated_phrase(
            f.create_noun_phrase_with_specifier("the", "dog"),
            f.create_noun_phrase_with_specifier("a", "cat"),
        );
        c.features.set(Feature::RaiseSpecifier, true);
        let realised = syntax.realise(&Element::Coordinated(c)).unwrap();
        assert_eq!(leaves(&realised), vec!["the", "dog", "and", "a", "cat"]);
    }

    #[test]
    fn tense_flows_to_coordinated_verbs() {
        let syntax = processor();
        let f = syntax.factory();
        let mut c = f.create_coordinated_phrase(
            f.create_verb_phrase("kick"),
            f.create_verb_phrase("walk"),
        );
        c.features.set(Feature::Tense, Tense::Future);
        c.features.set(Feature::AggregateAuxiliary, true);
        let realised = syntax.realise(&Element::Coordinated(c)).unwrap();
        assert_eq!(leaves(&realised), vec!["will", "kick", "and", "walk"]);
    }

    #[test]
    fn empty_conjunction_is_omitted() {
        let syntax = processor();
        let f = syntax.factory();
        let mut c = f.create_coordinated_phrase("big", "red");
        c.set_conjunction("");
        let realised = syntax.realise(&Element::Coordinated(c)).unwrap();
        assert_eq!(leaves(&realised), vec!["big", "red"]);
    }
}
