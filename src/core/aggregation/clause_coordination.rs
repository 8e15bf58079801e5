/// Coordination of clauses that differ in one constituent only.

use crate::core::aggregation::AggregationRule;
use crate::core::factory::NlgFactory;
use crate::core::syntax::is_expletive_subject;
use crate::schema::element::Element;
use crate::schema::feature::Feature;
use crate::schema::phrase::{CoordinatedPhraseElement, PhraseElement};

/// Merges two clauses into one when they are identical, share everything
/// but the verb phrase ("John eats and drinks"), or share everything but
/// the subject ("John and Mary eat").
///
/// Passive clauses and clauses with an expletive "there" subject are left
/// alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseCoordinationRule;

impl AggregationRule for ClauseCoordinationRule {
    fn name(&self) -> &'static str {
        "clause-coordination"
    }

    fn apply_pair(&self, factory: &NlgFactory, previous: &Element, next: &Element) -> Option<Element> {
        let (Element::Phrase(first), Element::Phrase(second)) = (previous, next) else {
            return None;
        };
        if !first.is_clause() || !second.is_clause() {
            return None;
        }
        if first.flag(Feature::Passive) || second.flag(Feature::Passive) {
            return None;
        }
        if is_expletive_subject(first) || is_expletive_subject(second) {
            return None;
        }

        if first == second {
            return Some(previous.clone());
        }

        let same_front = same_front_modifiers(first, second);
        let same_post = first.postmodifiers == second.postmodifiers;
        if !same_front || !same_post {
            return None;
        }

        if first.subjects == second.subjects {
            let (Some(vp1), Some(vp2)) = (first.verb_phrase_element(), second.verb_phrase_element())
            else {
                return None;
            };
            let mut merged = first.clone();
            let vp = match merge_complements(factory, vp1, vp2) {
                Some(vp) => vp,
                None => Element::Coordinated(factory.create_coordinated_phrase(vp1.clone(), vp2.clone())),
            };
            merged.set_verb_phrase(vp);
            return Some(Element::Phrase(merged));
        }

        if first.verb_phrase == second.verb_phrase {
            let subjects = first.subjects.iter().chain(&second.subjects).cloned();
            let mut merged = first.clone();
            merged.subjects = vec![Element::Coordinated(CoordinatedPhraseElement::with_coordinates(subjects))];
            return Some(Element::Phrase(merged));
        }

        None
    }
}

/// Front modifiers and cue phrases both match.
fn same_front_modifiers(first: &PhraseElement, second: &PhraseElement) -> bool {
    first.front_modifiers == second.front_modifiers
        && first.features.get(Feature::CuePhrase) == second.features.get(Feature::CuePhrase)
}

/// Two verb phrases with the same verb, modifiers and features whose
/// complements differ become one verb phrase with coordinated complements:
/// "John eats fish and chips". Complements must line up by function.
fn merge_complements(factory: &NlgFactory, vp1: &Element, vp2: &Element) -> Option<Element> {
    let (Element::Phrase(first), Element::Phrase(second)) = (vp1, vp2) else {
        return None;
    };
    if first.head != second.head
        || first.features != second.features
        || first.premodifiers != second.premodifiers
        || first.postmodifiers != second.postmodifiers
        || first.front_modifiers != second.front_modifiers
        || first.complements.len() != second.complements.len()
        || first.complements.is_empty()
    {
        return None;
    }
    let aligned = first
        .complements
        .iter()
        .zip(&second.complements)
        .all(|(a, b)| a.discourse_function() == b.discourse_function());
    if !aligned {
        return None;
    }

    let mut merged = first.clone();
    for (slot, other) in merged.complements.iter_mut().zip(&second.complements) {
        if slot != other {
            let function = slot.discourse_function();
            let mut coordinated = Element::Coordinated(factory.create_coordinated_phrase(slot.clone(), other.clone()));
            if let Some(function) = function {
                coordinated.set_discourse_function(function);
            }
            *slot = coordinated;
        }
    }
    Some(Element::Phrase(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregation::tests::factory;

    fn clause(f: &NlgFactory, subject: &str, verb: &str, object: &str) -> Element {
        let mut clause = f.create_clause();
        f.set_subject(&mut clause, f.create_noun_phrase_with_specifier("the", subject));
        f.set_verb(&mut clause, verb);
        f.set_object(&mut clause, f.create_noun_phrase_with_specifier("the", object));
        Element::Phrase(clause)
    }

    #[test]
    fn identical_clauses_collapse() {
        let f = factory();
        let a = clause(&f, "woman", "kick", "dog");
        assert_eq!(ClauseCoordinationRule.apply_pair(&f, &a, &a.clone()), Some(a));
    }

    #[test]
    fn shared_verb_phrase_coordinates_subjects() {
        let f = factory();
        let a = clause(&f, "woman", "kick", "dog");
        let b = clause(&f, "man", "kick", "dog");
        let merged = ClauseCoordinationRule.apply_pair(&f, &a, &b).unwrap();
        let merged = merged.as_phrase().unwrap();
        assert!(matches!(merged.subjects.as_slice(), [Element::Coordinated(c)] if c.coordinates.len() == 2));
    }

    #[test]
    fn shared_subject_coordinates_verb_phrases() {
        let f = factory();
        let a = clause(&f, "woman", "kick", "dog");
        let b = clause(&f, "woman", "kiss", "man");
        let merged = ClauseCoordinationRule.apply_pair(&f, &a, &b).unwrap();
        let merged = merged.as_phrase().unwrap();
        assert!(matches!(merged.verb_phrase_element(), Some(Element::Coordinated(_))));
    }

    #[test]
    fn same_verb_merges_complements() {
        let f = factory();
        let a = clause(&f, "woman", "kick", "dog");
        let b = clause(&f, "woman", "kick", "ball");
        let merged = ClauseCoordinationRule.apply_pair(&f, &a, &b).unwrap();
        let vp = merged.as_phrase().unwrap().verb_phrase_element().unwrap();
        let vp = vp.as_phrase().unwrap();
        assert_eq!(vp.complements.len(), 1);
        assert!(matches!(vp.complements[0], Element::Coordinated(_)));
    }

    #[test]
    fn passive_and_mismatched_clauses_stay_apart() {
        let f = factory();
        let mut a = clause(&f, "woman", "kick", "dog");
        let b = clause(&f, "man", "kick", "dog");
        a.set_feature(Feature::Passive, true);
        assert_eq!(ClauseCoordinationRule.apply_pair(&f, &a, &b), None);

        let c = clause(&f, "woman", "kick", "dog");
        let d = clause(&f, "man", "kiss", "cat");
        assert_eq!(ClauseCoordinationRule.apply_pair(&f, &c, &d), None);
    }

    #[test]
    fn different_postmodifiers_block_merge() {
        let f = factory();
        let a = clause(&f, "woman", "kick", "dog");
        let mut b = clause(&f, "woman", "kiss", "man");
        if let Element::Phrase(clause) = &mut b {
            clause.add_postmodifier(f.create_preposition_phrase_with_complement(
                "behind",
                f.create_noun_phrase_with_specifier("the", "curtain"),
            ));
        }
        assert_eq!(ClauseCoordinationRule.apply_pair(&f, &a, &b), None);
    }
}
