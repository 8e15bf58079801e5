/// Aggregation rules realised end to end.

use nlg_realiser::core::aggregation::{
    AggregationRule, Aggregator, BackwardConjunctionReductionRule, ClauseCoordinationRule,
    ElisionAggregator, ForwardConjunctionReductionRule,
};
use nlg_realiser::core::factory::NlgFactory;
use nlg_realiser::core::realiser::Realiser;
use nlg_realiser::schema::element::Element;
use nlg_realiser::schema::feature::Feature;
use nlg_realiser::schema::phrase::PhraseElement;

fn realiser() -> Realiser {
    Realiser::builder().build().unwrap()
}

/// "the <subject> <verb>s the <object> <preposition> the <noun>"
fn clause(
    f: &NlgFactory,
    subject: &str,
    verb: &str,
    object: &str,
    preposition: &str,
    noun: &str,
) -> PhraseElement {
    let mut clause = f.create_clause();
    f.set_subject(&mut clause, f.create_noun_phrase_with_specifier("the", subject));
    clause.set_verb_phrase(f.create_verb_phrase(verb));
    f.set_object(&mut clause, f.create_noun_phrase_with_specifier("the", object));
    clause.add_postmodifier(f.create_preposition_phrase_with_complement(
        preposition,
        f.create_noun_phrase_with_specifier("the", noun),
    ));
    clause
}

fn text(realiser: &Realiser, element: &Element) -> String {
    realiser.realise(element).realisation().to_string()
}

#[test]
fn shared_verb_phrase_coordinates_subjects() {
    let realiser = realiser();
    let f = realiser.factory();
    let woman = clause(f, "woman", "kick", "dog", "behind", "curtain");
    let man = clause(f, "man", "kick", "dog", "behind", "curtain");

    let aggregator = Aggregator::new(f.clone()).with_rule(ClauseCoordinationRule);
    let merged = aggregator.realise_all(&[Element::Phrase(woman), Element::Phrase(man)]);
    assert_eq!(merged.len(), 1);
    assert_eq!(
        text(&realiser, &merged[0]),
        "the woman and the man kick the dog behind the curtain"
    );
}

#[test]
fn front_modifiers_survive_coordination() {
    let realiser = realiser();
    let f = realiser.factory();
    let mut woman = clause(f, "woman", "kick", "dog", "behind", "curtain");
    let mut man = clause(f, "man", "kick", "dog", "behind", "curtain");
    woman.add_front_modifier(f.create_adverb_phrase("however"));
    man.add_front_modifier(f.create_adverb_phrase("however"));

    let merged = ClauseCoordinationRule
        .apply_all(f, &[Element::Phrase(woman), Element::Phrase(man)]);
    assert_eq!(merged.len(), 1);
    assert_eq!(
        text(&realiser, &merged[0]),
        "however the woman and the man kick the dog behind the curtain"
    );
}

#[test]
fn three_subjects_nest() {
    let realiser = realiser();
    let f = realiser.factory();
    let clauses: Vec<Element> = ["woman", "man", "girl"]
        .into_iter()
        .map(|subject| Element::Phrase(clause(f, subject, "kick", "dog", "behind", "curtain")))
        .collect();

    let merged = ClauseCoordinationRule.apply_all(f, &clauses);
    assert_eq!(merged.len(), 1);
    assert_eq!(
        text(&realiser, &merged[0]),
        "the woman and the man and the girl kick the dog behind the curtain"
    );
}

#[test]
fn passive_clauses_are_not_coordinated() {
    let realiser = realiser();
    let f = realiser.factory();
    let mut first = clause(f, "woman", "kiss", "man", "behind", "curtain");
    first.set_feature(Feature::Passive, true);
    let second = clause(f, "woman", "kick", "dog", "on", "rock");
    let merged = ClauseCoordinationRule.apply_all(f, &[Element::Phrase(first), Element::Phrase(second)]);
    assert_eq!(merged.len(), 2);
}

#[test]
fn forward_reduction_drops_the_repeated_subject() {
    let realiser = realiser();
    let f = realiser.factory();
    let rock = Element::Phrase(clause(f, "woman", "kick", "dog", "on", "rock"));
    let curtain = Element::Phrase(clause(f, "woman", "kick", "dog", "behind", "curtain"));

    let merged = ForwardConjunctionReductionRule.apply_pair(f, &rock, &curtain).unwrap();
    assert_eq!(
        text(&realiser, &merged),
        "the woman kicks the dog on the rock and kicks the dog behind the curtain"
    );
}

#[test]
fn backward_reduction_keeps_the_last_object() {
    let realiser = realiser();
    let f = realiser.factory();
    let kicks = Element::Phrase(clause(f, "woman", "kick", "dog", "behind", "curtain"));
    let kisses = Element::Phrase(clause(f, "woman", "kiss", "dog", "behind", "curtain"));

    let merged = BackwardConjunctionReductionRule.apply_pair(f, &kicks, &kisses).unwrap();
    assert_eq!(
        text(&realiser, &merged),
        "the woman kicks and the woman kisses the dog behind the curtain"
    );
}

#[test]
fn elision_in_a_sentence() {
    let realiser = realiser();
    let f = realiser.factory();
    let elision = ElisionAggregator::new(f.clone());
    let eats = Element::Phrase(f.create_clause_svo("John", "eat", "fish"));
    let drinks = Element::Phrase(f.create_clause_svo("John", "drink", "beer"));

    let merged = elision.aggregate(&eats, &drinks).unwrap();
    assert_eq!(realiser.realise_sentence(&merged), "John eats fish and drinks beer.");
}

#[test]
fn aggregator_leaves_unrelated_clauses() {
    let realiser = realiser();
    let f = realiser.factory();
    let aggregator = Aggregator::new(f.clone())
        .with_rule(ClauseCoordinationRule)
        .with_rule(ForwardConjunctionReductionRule);
    let clauses = vec![
        Element::Phrase(f.create_clause_svo("Mary", "chase", "the monkey")),
        Element::Phrase(f.create_clause_sv("John", "sleep")),
    ];
    let merged = aggregator.realise_all(&clauses);
    assert_eq!(merged, clauses);
}
