/// Peripheral phrase sets: the constituents that several clauses place in
/// the same position, collected so they can be compared and elided
/// together.

use crate::schema::element::Element;
use crate::schema::feature::{DiscourseFunction, Feature};
use crate::schema::phrase::PhraseElement;

/// Where in a clause a member of a set lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    CuePhrase,
    FrontModifier,
    Subject,
    Complement,
    VerbPostModifier,
    PostModifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Member {
    clause: usize,
    slot: Slot,
    index: usize,
}

/// Phrases sharing one discourse function across a group of clauses. The
/// set stores positions, not copies, so elision lands in the clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSet {
    function: DiscourseFunction,
    members: Vec<Member>,
}

impl PhraseSet {
    fn new(function: DiscourseFunction) -> Self {
        Self {
            function,
            members: Vec::new(),
        }
    }

    /// Cue phrases, front modifiers and subjects.
    pub fn left_periphery(clauses: &[PhraseElement]) -> Vec<PhraseSet> {
        let mut cue = PhraseSet::new(DiscourseFunction::CuePhrase);
        let mut front = PhraseSet::new(DiscourseFunction::FrontModifier);
        let mut subjects = PhraseSet::new(DiscourseFunction::Subject);
        for (clause, phrase) in clauses.iter().enumerate() {
            if phrase.features.element(Feature::CuePhrase).is_some() {
                cue.push(clause, Slot::CuePhrase, 0);
            }
            for index in 0..phrase.front_modifiers.len() {
                front.push(clause, Slot::FrontModifier, index);
            }
            for index in 0..phrase.subjects.len() {
                subjects.push(clause, Slot::Subject, index);
            }
        }
        vec![cue, front, subjects]
    }

    /// Verb phrase complements, and postmodifiers of the verb phrase and
    /// of the clause.
    pub fn right_periphery(clauses: &[PhraseElement]) -> Vec<PhraseSet> {
        let mut complements = PhraseSet::new(DiscourseFunction::Object);
        let mut postmodifiers = PhraseSet::new(DiscourseFunction::PostModifier);
        for (clause, phrase) in clauses.iter().enumerate() {
            if let Some(vp) = verb_phrase(phrase) {
                for index in 0..vp.complements.len() {
                    complements.push(clause, Slot::Complement, index);
                }
                for index in 0..vp.postmodifiers.len() {
                    postmodifiers.push(clause, Slot::VerbPostModifier, index);
                }
            }
            for index in 0..phrase.postmodifiers.len() {
                postmodifiers.push(clause, Slot::PostModifier, index);
            }
        }
        vec![complements, postmodifiers]
    }

    pub fn function(&self) -> DiscourseFunction {
        self.function
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The phrases of the set, in clause order.
    pub fn phrases<'a>(&self, clauses: &'a [PhraseElement]) -> Vec<&'a Element> {
        self.members
            .iter()
            .filter_map(|member| phrase(clauses, member))
            .collect()
    }

    /// Every consecutive pair of phrases shares its head word. A set needs
    /// at least two phrases to count as identical.
    pub fn lemma_identical(&self, clauses: &[PhraseElement]) -> bool {
        let phrases = self.phrases(clauses);
        phrases.len() >= 2
            && phrases.windows(2).all(|pair| match (lemma(pair[0]), lemma(pair[1])) {
                (Some(left), Some(right)) => left == right,
                _ => false,
            })
    }

    /// Every consecutive pair of phrases is structurally equal.
    pub fn form_identical(&self, clauses: &[PhraseElement]) -> bool {
        let phrases = self.phrases(clauses);
        phrases.len() >= 2 && phrases.windows(2).all(|pair| pair[0] == pair[1])
    }

    /// Elide every phrase but the first.
    pub fn elide_rightmost(&self, clauses: &mut [PhraseElement]) {
        for member in self.members.iter().skip(1) {
            elide(clauses, member);
        }
    }

    /// Elide every phrase but the last.
    pub fn elide_leftmost(&self, clauses: &mut [PhraseElement]) {
        let keep = self.members.len().saturating_sub(1);
        for member in &self.members[..keep] {
            elide(clauses, member);
        }
    }

    fn push(&mut self, clause: usize, slot: Slot, index: usize) {
        self.members.push(Member {
            clause,
            slot,
            index,
        });
    }
}

fn verb_phrase(clause: &PhraseElement) -> Option<&PhraseElement> {
    clause.verb_phrase_element().and_then(Element::as_phrase)
}

fn phrase<'a>(clauses: &'a [PhraseElement], member: &Member) -> Option<&'a Element> {
    let clause = clauses.get(member.clause)?;
    match member.slot {
        Slot::CuePhrase => clause.features.element(Feature::CuePhrase),
        Slot::FrontModifier => clause.front_modifiers.get(member.index),
        Slot::Subject => clause.subjects.get(member.index),
        Slot::Complement => verb_phrase(clause)?.complements.get(member.index),
        Slot::VerbPostModifier => verb_phrase(clause)?.postmodifiers.get(member.index),
        Slot::PostModifier => clause.postmodifiers.get(member.index),
    }
}

fn elide(clauses: &mut [PhraseElement], member: &Member) {
    let Some(clause) = clauses.get_mut(member.clause) else {
        return;
    };
    let target = match member.slot {
        Slot::CuePhrase => {
            if let Some(cue) = clause.features.element(Feature::CuePhrase) {
                let mut cue = cue.clone();
                cue.set_elided(true);
                clause.features.set(Feature::CuePhrase, cue);
            }
            return;
        }
        Slot::FrontModifier => clause.front_modifiers.get_mut(member.index),
        Slot::Subject => clause.subjects.get_mut(member.index),
        Slot::Complement => clause
            .verb_phrase_mut()
            .and_then(Element::as_phrase_mut)
            .and_then(|vp| vp.complements.get_mut(member.index)),
        Slot::VerbPostModifier => clause
            .verb_phrase_mut()
            .and_then(Element::as_phrase_mut)
            .and_then(|vp| vp.postmodifiers.get_mut(member.index)),
        Slot::PostModifier => clause.postmodifiers.get_mut(member.index),
    };
    if let Some(target) = target {
        target.set_elided(true);
    }
}

/// The word a phrase is about: its head, or the element itself when it
/// has no head.
fn lemma(element: &Element) -> Option<&Element> {
    match element {
        Element::Phrase(phrase) => phrase.head(),
        Element::Coordinated(_) => None,
        other => Some(other),
    }
}
