/// Prepositional, adjective and adverb phrases, plus the slot-list helper
/// shared by every phrase helper.

use crate::core::syntax::SyntaxProcessor;
use crate::schema::category::LexicalCategory;
use crate::schema::element::{Element, InflectedWordElement};
use crate::schema::feature::{DiscourseFunction, Feature};
use crate::schema::phrase::PhraseElement;

pub(super) fn realise(syntax: &SyntaxProcessor, phrase: &PhraseElement) -> Element {
    let mut realised = Vec::new();
    realise_list(
        syntax,
        &mut realised,
        &phrase.premodifiers,
        DiscourseFunction::PreModifier,
    );
    realise_head(syntax, phrase, &mut realised);
    realise_complements(syntax, phrase, &mut realised);
    realise_list(
        syntax,
        &mut realised,
        &phrase.postmodifiers,
        DiscourseFunction::PostModifier,
    );
    Element::list(realised)
}

fn realise_head(syntax: &SyntaxProcessor, phrase: &PhraseElement, realised: &mut Vec<Element>) {
    let Some(head) = phrase.head() else {
        return;
    };
    let mut head = head.clone();
    if let Some(comparative) = phrase.features.get(Feature::IsComparative) {
        head.set_feature(Feature::IsComparative, comparative.clone());
    } else if let Some(superlative) = phrase.features.get(Feature::IsSuperlative) {
        head.set_feature(Feature::IsSuperlative, superlative.clone());
    }
    if let Some(mut head) = syntax.realise(&head) {
        head.set_discourse_function(DiscourseFunction::Head);
        realised.push(head);
    }
}

/// Complements joined by "and".
fn realise_complements(
    syntax: &SyntaxProcessor,
    phrase: &PhraseElement,
    realised: &mut Vec<Element>,
) {
    let mut first = true;
    for complement in &phrase.complements {
        let Some(mut current) = syntax.realise(complement) else {
            continue;
        };
        current.set_discourse_function(DiscourseFunction::Complement);
        if !first {
            realised.push(Element::Inflected(InflectedWordElement::new(
                "and",
                LexicalCategory::Conjunction,
            )));
        }
        first = false;
        realised.push(current);
    }
}

/// Realise a slot into its own sub-list, tagging every member with
/// `function`. Empty slots add nothing.
pub(super) fn realise_list(
    syntax: &SyntaxProcessor,
    realised: &mut Vec<Element>,
    elements: &[Element],
    function: DiscourseFunction,
) {
    let mut slot = Vec::new();
    for element in elements {
        let Some(mut current) = syntax.realise(element) else {
            continue;
        };
        current.set_discourse_function(function);
        if element.flag(Feature::Appositive) {
            current.set_feature(Feature::Appositive, true);
        }
        slot.push(current);
    }
    if !slot.is_empty() {
        realised.push(Element::list(slot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::tests::{leaves, processor};

    #[test]
    fn preposition_phrase_orders_head_then_complement() {
        let syntax = processor();
        let f = syntax.factory();
        let np = f.create_noun_phrase_with_specifier("the", "park");
        let pp = f.create_preposition_phrase_with_complement("in", Element::Phrase(np));
        let realised = syntax.realise(&Element::Phrase(pp)).unwrap();
        assert_eq!(leaves(&realised), vec!["in", "the", "park"]);
    }

    #[test]
    fn second_complement_gets_and() {
        let syntax = processor();
        let f = syntax.factory();
        let mut pp = f.create_preposition_phrase("with");
        pp.add_complement(Element::Phrase(f.create_noun_phrase("John")));
        pp.add_complement(Element::Phrase(f.create_noun_phrase("Mary")));
        let realised = syntax.realise(&Element::Phrase(pp)).unwrap();
        assert_eq!(leaves(&realised), vec!["with", "John", "and", "Mary"]);
    }

    #[test]
    fn comparative_goes_to_head() {
        let syntax = processor();
        let mut adj = syntax.factory().create_adjective_phrase("big");
        adj.set_feature(Feature::IsComparative, true);
        let realised = syntax.realise(&Element::Phrase(adj)).unwrap();
        assert!(realised.flag(Feature::IsComparative));
        assert_eq!(realised.discourse_function(), Some(DiscourseFunction::Head));
    }

    #[test]
    fn modifier_slots_are_wrapped() {
        let syntax = processor();
        let f = syntax.factory();
        let mut adv = f.create_adverb_phrase("quickly");
        adv.premodifiers.push(Element::Word(f.create_word("very", LexicalCategory::Adverb)));
        let Some(Element::List(list)) = syntax.realise(&Element::Phrase(adv)) else {
            panic!("expected a list");
        };
        let Element::List(premodifiers) = &list.children[0] else {
            panic!("premodifiers should keep their own sub-list");
        };
        assert_eq!(
            premodifiers.children[0].discourse_function(),
            Some(DiscourseFunction::PreModifier)
        );
        assert_eq!(list.children[1].discourse_function(), Some(DiscourseFunction::Head));
    }
}
