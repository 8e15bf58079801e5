/// Clauses: agreement, complementisers, questions and passive voice.

use crate::core::syntax::phrase::realise_list;
use crate::core::syntax::{has_copular_verb, SyntaxProcessor};
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::{Element, ListElement};
use crate::schema::feature::{
    ClauseStatus, DiscourseFunction, Feature, FeatureValue, Form, InterrogativeType,
    NumberAgreement, Person, Tense,
};
use crate::schema::phrase::PhraseElement;

pub(super) fn realise(syntax: &SyntaxProcessor, phrase: &PhraseElement) -> Element {
    let mut clause = phrase.clone();
    let mut realised = Vec::new();
    let mut split_verb = None;
    let mut wh_object = false;

    check_subject_number_person(&mut clause);
    check_discourse_function(&mut clause);
    copy_front_modifiers(&mut clause);
    add_complementiser(syntax, &clause, &mut realised);
    add_cue_phrase(syntax, &clause, &mut realised);

    let question = interrogative_type(&clause);
    match question {
        Some(kind) => {
            wh_object = matches!(
                kind,
                InterrogativeType::WhatObject
                    | InterrogativeType::WhoObject
                    | InterrogativeType::HowPredicate
                    | InterrogativeType::How
                    | InterrogativeType::Why
                    | InterrogativeType::Where
            );
            split_verb = realise_interrogative(syntax, &mut clause, kind, &mut realised);
        }
        None => realise_list(
            syntax,
            &mut realised,
            &clause.front_modifiers,
            DiscourseFunction::FrontModifier,
        ),
    }

    add_subjects_to_front(syntax, &mut clause, &mut realised, split_verb.is_some());
    if let Some(raised) = add_passive_complements_number_person(syntax, &mut clause, &mut realised) {
        split_verb = Some(raised);
    }
    realise_verb(syntax, &clause, &mut realised, split_verb, wh_object);
    add_passive_subjects(syntax, &mut clause, &mut realised);
    add_interrogative_front_modifiers(syntax, &clause, &mut realised);
    if question == Some(InterrogativeType::WhoIndirectObject) {
        let to = syntax.factory().create_word("to", LexicalCategory::Preposition);
        realised.extend(syntax.realise(&Element::Word(to)));
    }

    let mut list = ListElement::new(realised);
    if question.is_some() {
        list.features.set(Feature::Interrogative, true);
    }
    Element::List(list)
}

fn interrogative_type(clause: &PhraseElement) -> Option<InterrogativeType> {
    clause
        .feature(Feature::InterrogativeType)
        .and_then(FeatureValue::as_interrogative)
}

fn clause_form(clause: &PhraseElement) -> Option<Form> {
    clause.feature(Feature::Form).and_then(FeatureValue::as_form)
}

fn clause_tense(clause: &PhraseElement) -> Option<Tense> {
    clause.feature(Feature::Tense).and_then(FeatureValue::as_tense)
}

/// The verb phrase, or the head when a clause was built without one.
fn verb_element(clause: &PhraseElement) -> Option<&Element> {
    clause.verb_phrase.as_deref().or(clause.head.as_deref())
}

fn verb_element_mut(clause: &mut PhraseElement) -> Option<&mut Element> {
    if clause.verb_phrase.is_some() {
        clause.verb_phrase.as_deref_mut()
    } else {
        clause.head.as_deref_mut()
    }
}

/// Copy the subject's number and person onto the verb.
fn check_subject_number_person(clause: &mut PhraseElement) {
    let (plural, person) = match clause.subjects.as_slice() {
        [] => (false, None),
        [Element::Coordinated(subject)] if subject.is_plural() => (true, None),
        [subject] if subject.is_plural() && !subject.is_clause() => (true, None),
        [Element::Phrase(np)] if np.category == PhraseCategory::NounPhrase => {
            let plural = match np.head() {
                Some(Element::List(_)) => true,
                Some(head) => head.is_plural(),
                None => false,
            };
            (plural, np.features.person())
        }
        [_] => (false, None),
        _ => (true, None),
    };

    let number = if plural {
        Some(NumberAgreement::Plural)
    } else {
        clause
            .feature(Feature::Number)
            .and_then(FeatureValue::as_number)
    };
    if let Some(verb) = verb_element_mut(clause) {
        match number {
            Some(number) => verb.set_feature(Feature::Number, number),
            None => verb.remove_feature(Feature::Number),
        }
        if let Some(person) = person {
            verb.set_feature(Feature::Person, person);
        }
    }
}

/// Object clauses in the imperative become infinitives ("tell him to
/// go"); subject clauses become gerunds ("leaving early was rude").
fn check_discourse_function(clause: &mut PhraseElement) {
    let form = clause_form(clause);
    match clause.features.discourse_function() {
        Some(DiscourseFunction::Object | DiscourseFunction::IndirectObject) => {
            if form == Some(Form::Imperative) {
                clause.set_feature(Feature::SuppressedComplementiser, true);
                clause.set_feature(Feature::Form, Form::Infinitive);
            } else if form == Some(Form::Gerund) && clause.subjects.is_empty() {
                clause.set_feature(Feature::SuppressedComplementiser, true);
            }
        }
        Some(DiscourseFunction::Subject) => {
            clause.set_feature(Feature::Form, Form::Gerund);
            clause.set_feature(Feature::SuppressedComplementiser, true);
        }
        _ => {}
    }
}

/// Clause postmodifiers are realised with the verb phrase. In an
/// infinitive clause the front modifiers follow the verb too.
fn copy_front_modifiers(clause: &mut PhraseElement) {
    let postmodifiers = clause.postmodifiers.clone();
    if let Some(Element::Phrase(verb)) = verb_element_mut(clause) {
        for modifier in postmodifiers {
            if !verb.postmodifiers.contains(&modifier) {
                verb.add_postmodifier(modifier);
            }
        }
    }

    if clause_form(clause) != Some(Form::Infinitive) {
        return;
    }
    clause.set_feature(Feature::SuppressedComplementiser, true);
    let front_modifiers = std::mem::take(&mut clause.front_modifiers);
    if let Some(verb) = verb_element_mut(clause) {
        if let Element::Phrase(verb) = verb {
            for modifier in front_modifiers {
                verb.add_postmodifier(modifier);
            }
        }
        verb.set_feature(Feature::NonMorph, true);
    }
}

fn add_complementiser(syntax: &SyntaxProcessor, clause: &PhraseElement, realised: &mut Vec<Element>) {
    if clause.features.clause_status() != Some(ClauseStatus::Subordinate)
        || clause.flag(Feature::SuppressedComplementiser)
    {
        return;
    }
    if let Some(complementiser) = clause.features.element(Feature::Complementiser) {
        realised.extend(syntax.realise(complementiser));
    }
}

fn add_cue_phrase(syntax: &SyntaxProcessor, clause: &PhraseElement, realised: &mut Vec<Element>) {
    let Some(cue) = clause.features.element(Feature::CuePhrase) else {
        return;
    };
    // Wrapped so that only the cue phrase, not the whole clause, reads as
    // a cue phrase to orthography.
    if let Some(mut current) = syntax.realise(cue) {
        current.set_discourse_function(DiscourseFunction::CuePhrase);
        realised.push(Element::list(vec![current]));
    }
}

fn question_word(kind: InterrogativeType) -> &'static str {
    match kind {
        InterrogativeType::How | InterrogativeType::HowPredicate | InterrogativeType::HowMany => "how",
        InterrogativeType::WhatObject | InterrogativeType::WhatSubject => "what",
        InterrogativeType::Where => "where",
        InterrogativeType::WhoIndirectObject
        | InterrogativeType::WhoObject
        | InterrogativeType::WhoSubject => "who",
        InterrogativeType::Why => "why",
        InterrogativeType::YesNo => "",
    }
}

/// Front the question word and choose between "do"-support and
/// subject-auxiliary inversion. Returns the subjects when they must be
/// placed inside the verb group.
fn realise_interrogative(
    syntax: &SyntaxProcessor,
    clause: &mut PhraseElement,
    kind: InterrogativeType,
    realised: &mut Vec<Element>,
) -> Option<Element> {
    match kind {
        InterrogativeType::YesNo => realise_yes_no(syntax, clause, realised),
        InterrogativeType::WhoSubject | InterrogativeType::WhatSubject => {
            realise_keyword(syntax, question_word(kind), LexicalCategory::Pronoun, realised);
            clause.subjects.clear();
            None
        }
        InterrogativeType::HowMany => {
            realise_keyword(syntax, "how", LexicalCategory::Pronoun, realised);
            realise_keyword(syntax, "many", LexicalCategory::Adverb, realised);
            None
        }
        InterrogativeType::How
        | InterrogativeType::HowPredicate
        | InterrogativeType::Why
        | InterrogativeType::Where
        | InterrogativeType::WhoObject
        | InterrogativeType::WhoIndirectObject
        | InterrogativeType::WhatObject => {
            realise_object_wh(syntax, clause, question_word(kind), realised)
        }
    }
}

fn realise_keyword(
    syntax: &SyntaxProcessor,
    keyword: &str,
    category: LexicalCategory,
    realised: &mut Vec<Element>,
) {
    let word = syntax.factory().create_word(keyword, category);
    realised.extend(syntax.realise(&Element::Word(word)));
}

fn has_auxiliary(clause: &PhraseElement) -> bool {
    clause.feature(Feature::Modal).is_some()
        || clause.flag(Feature::Perfect)
        || clause.flag(Feature::Progressive)
        || clause_tense(clause) == Some(Tense::Future)
}

fn realise_object_wh(
    syntax: &SyntaxProcessor,
    clause: &mut PhraseElement,
    keyword: &str,
    realised: &mut Vec<Element>,
) -> Option<Element> {
    realise_keyword(syntax, keyword, LexicalCategory::Pronoun, realised);
    if !has_auxiliary(clause) && !has_copular_verb(clause) {
        add_do_auxiliary(syntax, clause, realised);
        None
    } else if !clause.flag(Feature::Passive) {
        Some(realise_subjects(syntax, clause))
    } else {
        None
    }
}

fn realise_yes_no(
    syntax: &SyntaxProcessor,
    clause: &mut PhraseElement,
    realised: &mut Vec<Element>,
) -> Option<Element> {
    let copular = matches!(
        verb_element(clause),
        Some(Element::Phrase(vp)) if vp.category == PhraseCategory::VerbPhrase && has_copular_verb(vp)
    );
    let needs_do = !copular
        && !clause.flag(Feature::Progressive)
        && clause.feature(Feature::Modal).is_none()
        && clause_tense(clause) != Some(Tense::Future)
        && !clause.flag(Feature::Negated)
        && !clause.flag(Feature::Passive);
    if needs_do {
        add_do_auxiliary(syntax, clause, realised);
        None
    } else {
        Some(realise_subjects(syntax, clause))
    }
}

/// "do" carrying the clause's tense and agreement.
fn add_do_auxiliary(syntax: &SyntaxProcessor, clause: &PhraseElement, realised: &mut Vec<Element>) {
    let mut do_phrase = syntax.factory().create_verb_phrase("do");
    for feature in [Feature::Tense, Feature::Person, Feature::Number] {
        match clause.feature(feature) {
            Some(value) => do_phrase.set_feature(feature, value.clone()),
            None => {
                do_phrase.features.remove(feature);
            }
        }
    }
    realised.extend(syntax.realise(&Element::Phrase(do_phrase)));
}

fn realise_subjects(syntax: &SyntaxProcessor, clause: &mut PhraseElement) -> Element {
    let possessive = clause_form(clause) == Some(Form::Gerund)
        && !clause.flag(Feature::SuppressGenitiveInGerund);
    let mut realised = Vec::new();
    for subject in clause.subjects.iter_mut() {
        subject.set_discourse_function(DiscourseFunction::Subject);
        if possessive {
            subject.set_feature(Feature::Possessive, true);
        }
        realised.extend(syntax.realise(subject));
    }
    Element::list(realised)
}

fn add_subjects_to_front(
    syntax: &SyntaxProcessor,
    clause: &mut PhraseElement,
    realised: &mut Vec<Element>,
    has_split_verb: bool,
) {
    let form = clause_form(clause);
    if matches!(form, Some(Form::Infinitive | Form::Imperative))
        || clause.flag(Feature::Passive)
        || has_split_verb
    {
        return;
    }
    if let Element::List(subjects) = realise_subjects(syntax, clause) {
        realised.extend(subjects.children);
    }
}

/// Raise the objects of a passive clause to subject position and make
/// the verb agree with them.
fn add_passive_complements_number_person(
    syntax: &SyntaxProcessor,
    clause: &mut PhraseElement,
    realised: &mut Vec<Element>,
) -> Option<Element> {
    let question = interrogative_type(clause);
    let possessive = clause_form(clause) == Some(Form::Gerund)
        && !clause.flag(Feature::SuppressGenitiveInGerund);
    let applies = clause.flag(Feature::Passive)
        && clause.verb_phrase.is_some()
        && question != Some(InterrogativeType::WhatObject);

    let mut split_verb = None;
    let mut passive_number: Option<NumberAgreement> = None;
    let mut passive_person: Option<Person> = None;
    let mut raised = 0;
    let mut coordinated_subject = false;

    if applies {
        let complements = match clause.verb_phrase.as_deref_mut() {
            Some(Element::Phrase(vp)) => Some(&mut vp.complements),
            Some(Element::Coordinated(vp)) => Some(&mut vp.complements),
            _ => None,
        };
        for object in complements.into_iter().flatten() {
            if object.discourse_function() != Some(DiscourseFunction::Object) {
                continue;
            }
            object.set_feature(Feature::Passive, true);
            raised += 1;
            if let Some(mut current) = syntax.realise(object) {
                current.set_discourse_function(DiscourseFunction::Object);
                if question.is_some() {
                    split_verb = Some(current);
                } else {
                    realised.push(current);
                }
            }
            if let Element::Coordinated(coordinated) = object {
                coordinated_subject |= coordinated.conjunction() == "and";
            }
            passive_number = match passive_number {
                None => object.number(),
                Some(_) => Some(NumberAgreement::Plural),
            };
            passive_person = match object.person() {
                Some(Person::First) => Some(Person::First),
                Some(Person::Second) if passive_person != Some(Person::First) => {
                    Some(Person::Second)
                }
                _ => passive_person.or(Some(Person::Third)),
            };
            if possessive {
                object.set_feature(Feature::Possessive, true);
            }
        }
    }

    if let Some(verb) = verb_element_mut(clause) {
        if let Some(person) = passive_person {
            verb.set_feature(Feature::Person, person);
        }
        if raised > 1 || coordinated_subject {
            verb.set_feature(Feature::Number, NumberAgreement::Plural);
        } else if let Some(number) = passive_number {
            verb.set_feature(Feature::Number, number);
        }
    }
    split_verb
}

/// Place the verb group, splicing `split_verb` after its first element
/// for inverted questions.
fn realise_verb(
    syntax: &SyntaxProcessor,
    clause: &PhraseElement,
    realised: &mut Vec<Element>,
    split_verb: Option<Element>,
    wh_object: bool,
) {
    let Some(verb) = verb_element(clause) else {
        return;
    };
    let Some(mut current) = syntax.realise_in(verb, Some(clause)) else {
        return;
    };
    let Some(split_verb) = split_verb else {
        current.set_discourse_function(DiscourseFunction::VerbPhrase);
        realised.push(current);
        return;
    };
    match current {
        Element::List(list) => {
            let mut children = list.children.into_iter();
            if let Some(mut first) = children.next() {
                first.set_discourse_function(DiscourseFunction::VerbPhrase);
                realised.push(first);
            }
            realised.push(split_verb);
            for mut child in children {
                child.set_discourse_function(DiscourseFunction::VerbPhrase);
                realised.push(child);
            }
        }
        mut single => {
            single.set_discourse_function(DiscourseFunction::VerbPhrase);
            if wh_object {
                realised.push(single);
                realised.push(split_verb);
            } else {
                realised.push(split_verb);
                realised.push(single);
            }
        }
    }
}

/// The agent of a passive clause, introduced by "by".
fn add_passive_subjects(
    syntax: &SyntaxProcessor,
    clause: &mut PhraseElement,
    realised: &mut Vec<Element>,
) {
    if !clause.flag(Feature::Passive) {
        return;
    }
    if !clause.subjects.is_empty() || interrogative_type(clause).is_some() {
        let by = syntax.factory().create_preposition_phrase("by");
        realised.extend(syntax.realise(&Element::Phrase(by)));
    }
    for subject in clause.subjects.iter_mut() {
        subject.set_feature(Feature::Passive, true);
        if subject.is_phrase(PhraseCategory::NounPhrase) || matches!(subject, Element::Coordinated(_)) {
            if let Some(mut current) = syntax.realise(subject) {
                current.set_discourse_function(DiscourseFunction::Subject);
                realised.push(current);
            }
        }
    }
}

fn add_interrogative_front_modifiers(
    syntax: &SyntaxProcessor,
    clause: &PhraseElement,
    realised: &mut Vec<Element>,
) {
    if interrogative_type(clause).is_none() {
        return;
    }
    for modifier in &clause.front_modifiers {
        if let Some(mut current) = syntax.realise(modifier) {
            current.set_discourse_function(DiscourseFunction::FrontModifier);
            realised.push(current);
        }
    }
}
