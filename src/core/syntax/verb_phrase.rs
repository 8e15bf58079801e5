/// Verb phrases: the auxiliary chain and complement ordering.
///
/// The verb group is built bottom-up as a stack. The head verb goes in
/// first, and each aspect, voice or polarity feature pushes the current
/// front verb and replaces it with a new auxiliary ("be", "have", "do").
/// The modal, if any, ends up on top. The bottom entry is realised last
/// as the main verb; everything above it is realised top-down as
/// auxiliaries.

use crate::core::syntax::phrase::realise_list;
use crate::core::syntax::{is_copular, is_expletive_subject, SyntaxProcessor};
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::{Element, InflectedWordElement};
use crate::schema::feature::{
    DiscourseFunction, Feature, FeatureValue, Form, InterrogativeType, NumberAgreement, Tense,
};
use crate::schema::phrase::PhraseElement;

pub(super) fn realise(
    syntax: &SyntaxProcessor,
    phrase: &PhraseElement,
    parent: Option<&PhraseElement>,
) -> Element {
    let group = create_verb_group(syntax, phrase, parent);
    let (main_verb, auxiliaries) = split_verb_group(group);
    let mut realised = Vec::new();

    let realise_auxiliary = !phrase.features.has(Feature::RealiseAuxiliary)
        || phrase.features.flag(Feature::RealiseAuxiliary);
    if realise_auxiliary {
        realise_auxiliaries(syntax, &mut realised, auxiliaries);
        realise_list(
            syntax,
            &mut realised,
            &phrase.premodifiers,
            DiscourseFunction::PreModifier,
        );
        realise_main_verb(syntax, phrase, main_verb, &mut realised);
    } else if phrase.head().is_some_and(is_copular) {
        realise_main_verb(syntax, phrase, main_verb, &mut realised);
        realise_list(
            syntax,
            &mut realised,
            &phrase.premodifiers,
            DiscourseFunction::PreModifier,
        );
    } else {
        realise_list(
            syntax,
            &mut realised,
            &phrase.premodifiers,
            DiscourseFunction::PreModifier,
        );
        realise_main_verb(syntax, phrase, main_verb, &mut realised);
    }

    realise_complements(syntax, phrase, &mut realised);
    realise_list(
        syntax,
        &mut realised,
        &phrase.postmodifiers,
        DiscourseFunction::PostModifier,
    );
    Element::list(realised)
}

/// The bottom of the stack is the main verb; the rest, top first, are
/// auxiliaries.
fn split_verb_group(mut group: Vec<Element>) -> (Option<Element>, Vec<Element>) {
    if group.is_empty() {
        return (None, Vec::new());
    }
    let main_verb = group.remove(0);
    group.reverse();
    (Some(main_verb), group)
}

fn realise_auxiliaries(
    syntax: &SyntaxProcessor,
    realised: &mut Vec<Element>,
    auxiliaries: Vec<Element>,
) {
    for auxiliary in auxiliaries {
        if let Some(mut current) = syntax.realise(&auxiliary) {
            current.set_discourse_function(DiscourseFunction::Auxiliary);
            realised.push(current);
        }
    }
}

fn realise_main_verb(
    syntax: &SyntaxProcessor,
    phrase: &PhraseElement,
    main_verb: Option<Element>,
    realised: &mut Vec<Element>,
) {
    let Some(mut main_verb) = main_verb else {
        return;
    };
    match phrase.features.interrogative_type() {
        Some(kind) => main_verb.set_feature(Feature::InterrogativeType, kind),
        None => main_verb.remove_feature(Feature::InterrogativeType),
    }
    if let Some(current) = syntax.realise(&main_verb) {
        realised.push(current);
    }
}

/// Indirect objects, then direct objects, then other complements. A
/// passive phrase drops its objects, which the clause raises to subject.
fn realise_complements(
    syntax: &SyntaxProcessor,
    phrase: &PhraseElement,
    realised: &mut Vec<Element>,
) {
    let mut indirects = Vec::new();
    let mut directs = Vec::new();
    let mut unknowns = Vec::new();
    for complement in &phrase.complements {
        let function = complement.discourse_function();
        let Some(mut current) = syntax.realise(complement) else {
            continue;
        };
        current.set_discourse_function(DiscourseFunction::Complement);
        match function {
            Some(DiscourseFunction::IndirectObject) => indirects.push(current),
            Some(DiscourseFunction::Object) => directs.push(current),
            _ => unknowns.push(current),
        }
    }

    let question = phrase.features.interrogative_type();
    if question != Some(InterrogativeType::WhoIndirectObject) {
        realised.extend(indirects);
    }
    if !phrase.features.flag(Feature::Passive) {
        if !question.is_some_and(InterrogativeType::is_object) {
            realised.extend(directs);
        }
        realised.extend(unknowns);
    }
}

fn create_verb_group(
    syntax: &SyntaxProcessor,
    phrase: &PhraseElement,
    parent: Option<&PhraseElement>,
) -> Vec<Element> {
    let features = &phrase.features;
    let form = features.form();
    let modal = features.text(Feature::Modal).map(str::to_string);
    let interrogative = features.has(Feature::InterrogativeType);
    let mut tense = features.tense().unwrap_or(Tense::Present);
    let mut modal_past = false;
    let mut actual_modal: Option<String> = None;

    if matches!(form, Some(Form::Gerund | Form::Infinitive)) {
        tense = Tense::Present;
    }
    if form == Some(Form::Infinitive) {
        actual_modal = Some("to".to_string());
    } else if matches!(form, None | Some(Form::Normal)) {
        let coordinated_head = matches!(phrase.head(), Some(Element::Coordinated(_)));
        if tense == Tense::Future && modal.is_none() && (!coordinated_head || interrogative) {
            actual_modal = Some("will".to_string());
        } else if let Some(modal) = &modal {
            actual_modal = Some(modal.clone());
            modal_past = tense == Tense::Past;
        }
    }

    let mut group = Vec::new();
    push_particles(syntax, phrase, &mut group);
    let mut front = grab_head_verb(phrase, tense, modal.is_some());
    if matches!(
        form,
        Some(Form::Imperative | Form::Infinitive | Form::BareInfinitive)
    ) {
        if let Some(front) = front.as_mut() {
            front.set_feature(Feature::NonMorph, true);
        }
    }

    if features.flag(Feature::Passive) {
        front = add_be(front, &mut group, Form::PastParticiple);
    }
    if features.flag(Feature::Progressive) {
        front = add_be(front, &mut group, Form::PresentParticiple);
    }
    if features.flag(Feature::Perfect) || modal_past {
        front = add_have(front, &mut group, modal.is_some(), tense);
    }
    front = push_if_modal(actual_modal.is_some(), phrase, front, &mut group);
    front = create_not(syntax, phrase, &mut group, front, modal.is_some());
    if let Some(front) = front {
        push_front_verb(phrase, parent, &mut group, front, form, interrogative);
    }
    if let Some(modal) = actual_modal {
        if !features.flag(Feature::IgnoreModal) {
            group.push(word(&modal, LexicalCategory::Modal));
        }
    }
    group
}

fn word(base: &str, category: LexicalCategory) -> Element {
    Element::Inflected(InflectedWordElement::new(base, category))
}

fn push_particles(syntax: &SyntaxProcessor, phrase: &PhraseElement, group: &mut Vec<Element>) {
    match phrase.features.get(Feature::Particle) {
        Some(FeatureValue::Text(particle)) => group.push(Element::canned(particle.clone())),
        Some(FeatureValue::Element(particle)) => {
            if let Some(realised) = syntax.realise(particle) {
                group.push(realised);
            }
        }
        _ => {}
    }
}

fn grab_head_verb(phrase: &PhraseElement, tense: Tense, has_modal: bool) -> Option<Element> {
    let mut front = phrase.head()?.clone();
    front.set_feature(Feature::Tense, tense);
    if has_modal {
        front.set_feature(Feature::Negated, false);
    }
    Some(front)
}

fn add_be(front: Option<Element>, group: &mut Vec<Element>, front_form: Form) -> Option<Element> {
    if let Some(mut front) = front {
        front.set_feature(Feature::Form, front_form);
        group.push(front);
    }
    Some(word("be", LexicalCategory::Verb))
}

fn add_have(
    front: Option<Element>,
    group: &mut Vec<Element>,
    has_modal: bool,
    tense: Tense,
) -> Option<Element> {
    if let Some(mut front) = front {
        front.set_feature(Feature::Form, Form::PastParticiple);
        group.push(front);
    }
    let mut have = word("have", LexicalCategory::Verb);
    have.set_feature(Feature::Tense, tense);
    if has_modal {
        have.set_feature(Feature::NonMorph, true);
    }
    Some(have)
}

/// A modal takes the finite slot: the front verb goes in uninflected.
fn push_if_modal(
    has_modal: bool,
    phrase: &PhraseElement,
    front: Option<Element>,
    group: &mut Vec<Element>,
) -> Option<Element> {
    if !has_modal || phrase.features.flag(Feature::IgnoreModal) {
        return front;
    }
    if let Some(mut front) = front {
        front.set_feature(Feature::NonMorph, true);
        group.push(front);
    }
    None
}

/// Insert "not". With nothing above the head verb, "do" becomes the new
/// front so that negation has an auxiliary to attach to.
fn create_not(
    syntax: &SyntaxProcessor,
    phrase: &PhraseElement,
    group: &mut Vec<Element>,
    front: Option<Element>,
    has_modal: bool,
) -> Option<Element> {
    if !phrase.features.flag(Feature::Negated) {
        return front;
    }
    let add_do = !phrase
        .features
        .interrogative_type()
        .is_some_and(InterrogativeType::is_object);

    if !group.is_empty() || front.as_ref().is_some_and(is_copular) {
        group.push(word("not", LexicalCategory::Adverb));
        return front;
    }

    let front = front.map(|mut front| {
        if !has_modal {
            front.set_feature(Feature::Negated, true);
            group.push(front.clone());
        }
        front
    });
    group.push(word("not", LexicalCategory::Adverb));
    if add_do {
        Some(
            syntax
                .factory()
                .create_inflected_word("do", LexicalCategory::Verb),
        )
    } else {
        front
    }
}

fn push_front_verb(
    phrase: &PhraseElement,
    parent: Option<&PhraseElement>,
    group: &mut Vec<Element>,
    mut front: Element,
    form: Option<Form>,
    interrogative: bool,
) {
    let question = phrase.features.interrogative_type();
    match form {
        Some(Form::Gerund) | Some(Form::PresentParticiple) => {
            front.set_feature(Feature::Form, Form::PresentParticiple);
            group.push(front);
        }
        Some(Form::PastParticiple) => {
            front.set_feature(Feature::Form, Form::PastParticiple);
            group.push(front);
        }
        _ if (!matches!(form, None | Some(Form::Normal)) || interrogative)
            && !phrase.head().is_some_and(is_copular)
            && group.is_empty() =>
        {
            if !question.is_some_and(InterrogativeType::is_subject) {
                front.set_feature(Feature::NonMorph, true);
            }
            group.push(front);
        }
        _ => {
            let number = determine_number(parent, phrase);
            match phrase.features.tense() {
                Some(tense) => front.set_feature(Feature::Tense, tense),
                None => front.remove_feature(Feature::Tense),
            }
            match phrase.features.person() {
                Some(person) => front.set_feature(Feature::Person, person),
                None => front.remove_feature(Feature::Person),
            }
            front.set_feature(Feature::Number, number);
            let suppressed = phrase.features.flag(Feature::Negated)
                && question.is_some_and(InterrogativeType::is_object);
            if !suppressed {
                group.push(front);
            }
        }
    }
}

/// Number agreement for the finite verb. "There is a dog" and "there are
/// dogs", like "what is it" and "what are they", agree with the copula's
/// complement rather than the subject.
fn determine_number(parent: Option<&PhraseElement>, phrase: &PhraseElement) -> NumberAgreement {
    let number = phrase.features.number().unwrap_or(NumberAgreement::Singular);
    let Some(clause) = parent.filter(|p| p.is_clause()) else {
        return number;
    };
    let wh_subject = clause
        .feature(Feature::InterrogativeType)
        .and_then(FeatureValue::as_interrogative)
        .is_some_and(InterrogativeType::is_subject);
    if (is_expletive_subject(clause) || wh_subject) && phrase.head().is_some_and(is_copular) {
        if has_plural_complement(&phrase.complements) {
            NumberAgreement::Plural
        } else {
            NumberAgreement::Singular
        }
    } else {
        number
    }
}

fn has_plural_complement(complements: &[Element]) -> bool {
    complements
        .iter()
        .any(|c| c.is_phrase(PhraseCategory::NounPhrase) && c.is_plural())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::tests::{leaves, processor};
    use rstest::rstest;

    fn kick() -> PhraseElement {
        processor().factory().create_verb_phrase("kick")
    }

    fn group_of(vp: &PhraseElement) -> Vec<String> {
        let syntax = processor();
        let realised = syntax.realise(&Element::Phrase(vp.clone())).unwrap();
        leaves(&realised)
    }

    #[rstest]
    #[case::simple(Tense::Present, false, false, false, None, vec!["kick"])]
    #[case::future(Tense::Future, false, false, false, None, vec!["will", "kick"])]
    #[case::future_perfect_passive(Tense::Future, true, false, true, None, vec!["will", "have", "be", "kick"])]
    #[case::progressive_perfect_passive(Tense::Future, true, true, true, None, vec!["will", "have", "be", "be", "kick"])]
    #[case::modal_past(Tense::Past, false, false, false, Some("could"), vec!["could", "have", "kick"])]
    fn auxiliary_chain(
        #[case] tense: Tense,
        #[case] perfect: bool,
        #[case] progressive: bool,
        #[case] passive: bool,
        #[case] modal: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let mut vp = kick();
        vp.set_feature(Feature::Tense, tense);
        vp.set_feature(Feature::Perfect, perfect);
        vp.set_feature(Feature::Progressive, progressive);
        vp.set_feature(Feature::Passive, passive);
        if let Some(modal) = modal {
            vp.set_feature(Feature::Modal, modal);
        }
        assert_eq!(group_of(&vp), expected);
    }

    #[test]
    fn negation_adds_do_and_not() {
        let mut vp = kick();
        vp.set_feature(Feature::Negated, true);
        assert_eq!(group_of(&vp), vec!["do", "not", "kick"]);
    }

    #[test]
    fn negated_future_chain() {
        let mut vp = kick();
        vp.set_feature(Feature::Tense, Tense::Future);
        vp.set_feature(Feature::Negated, true);
        vp.set_feature(Feature::Perfect, true);
        vp.set_feature(Feature::Progressive, true);
        vp.set_feature(Feature::Passive, true);
        assert_eq!(
            group_of(&vp),
            vec!["will", "not", "have", "be", "be", "kick"]
        );
    }

    #[test]
    fn copula_takes_not_directly() {
        let mut vp = processor().factory().create_verb_phrase("be");
        vp.set_feature(Feature::Negated, true);
        assert_eq!(group_of(&vp), vec!["be", "not"]);
    }

    #[test]
    fn modal_verbs_are_not_inflected() {
        let syntax = processor();
        let mut vp = kick();
        vp.set_feature(Feature::Modal, "can");
        let Some(Element::List(list)) = syntax.realise(&Element::Phrase(vp)) else {
            panic!("expected a list");
        };
        assert_eq!(
            list.children[0].discourse_function(),
            Some(DiscourseFunction::Auxiliary)
        );
        assert!(list.children[1].flag(Feature::NonMorph));
    }

    #[test]
    fn particle_follows_the_verb() {
        let vp = processor().factory().create_verb_phrase("wake up");
        assert_eq!(group_of(&vp), vec!["wake", "up"]);
    }

    #[test]
    fn indirect_object_precedes_direct_object() {
        let syntax = processor();
        let f = syntax.factory();
        let mut vp = f.create_verb_phrase("give");
        f.set_object(&mut vp, f.create_noun_phrase_with_specifier("a", "bone"));
        f.set_indirect_object(&mut vp, f.create_noun_phrase_with_specifier("the", "dog"));
        assert_eq!(group_of(&vp), vec!["give", "the", "dog", "a", "bone"]);
    }

    #[test]
    fn passive_drops_direct_object() {
        let syntax = processor();
        let f = syntax.factory();
        let mut vp = f.create_verb_phrase("kick");
        f.set_object(&mut vp, f.create_noun_phrase_with_specifier("the", "ball"));
        vp.set_feature(Feature::Passive, true);
        assert_eq!(group_of(&vp), vec!["be", "kick"]);
    }

    #[test]
    fn expletive_copula_agrees_with_complement() {
        let syntax = processor();
        let f = syntax.factory();
        let mut dogs = f.create_noun_phrase("dog");
        dogs.set_feature(Feature::Number, NumberAgreement::Plural);
        let clause = f.create_clause_svo("there", "be", Element::Phrase(dogs));
        let vp = clause.verb_phrase_element().and_then(Element::as_phrase).unwrap();
        assert_eq!(determine_number(Some(&clause), vp), NumberAgreement::Plural);
        assert_eq!(determine_number(None, vp), NumberAgreement::Singular);
    }
}
