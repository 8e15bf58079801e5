/// Phrase and coordinated-phrase elements.

use crate::schema::category::PhraseCategory;
use crate::schema::element::Element;
use crate::schema::feature::{
    ClauseStatus, DiscourseFunction, Feature, FeatureSet, FeatureValue, Form, NumberAgreement,
    Person, Tense,
};

/// A phrase specification: category, features and constituent slots.
///
/// Clauses use `subjects` and `verb_phrase`; the remaining slots are shared
/// by every category. Complements carry their discourse function.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseElement {
    pub category: PhraseCategory,
    pub features: FeatureSet,
    pub head: Option<Box<Element>>,
    pub specifier: Option<Box<Element>>,
    pub front_modifiers: Vec<Element>,
    pub premodifiers: Vec<Element>,
    pub complements: Vec<Element>,
    pub postmodifiers: Vec<Element>,
    pub subjects: Vec<Element>,
    pub verb_phrase: Option<Box<Element>>,
}

impl PhraseElement {
    /// An empty phrase with no default features.
    pub fn new(category: PhraseCategory) -> Self {
        Self {
            category,
            features: FeatureSet::new(),
            head: None,
            specifier: None,
            front_modifiers: Vec::new(),
            premodifiers: Vec::new(),
            complements: Vec::new(),
            postmodifiers: Vec::new(),
            subjects: Vec::new(),
            verb_phrase: None,
        }
    }

    /// A verb phrase with the defaults every verb phrase starts from:
    /// present tense, third person singular, normal form, affirmative,
    /// active, simple aspect.
    pub fn verb_phrase() -> Self {
        let mut vp = Self::new(PhraseCategory::VerbPhrase);
        vp.features.set(Feature::Perfect, false);
        vp.features.set(Feature::Progressive, false);
        vp.features.set(Feature::Passive, false);
        vp.features.set(Feature::Negated, false);
        vp.features.set(Feature::Tense, Tense::Present);
        vp.features.set(Feature::Person, Person::Third);
        vp.features.set(Feature::Number, NumberAgreement::Singular);
        vp.features.set(Feature::Form, Form::Normal);
        vp.features.set(Feature::RealiseAuxiliary, true);
        vp
    }

    /// A clause with an empty default verb phrase. The complementiser is
    /// left for the caller, which may look it up in a lexicon.
    pub fn clause() -> Self {
        let mut clause = Self::new(PhraseCategory::Clause);
        clause.verb_phrase = Some(Box::new(Element::Phrase(Self::verb_phrase())));
        clause.features.set(Feature::Elided, false);
        clause.features.set(Feature::ClauseStatus, ClauseStatus::Matrix);
        clause.features.set(Feature::SuppressedComplementiser, false);
        clause.features.set(Feature::ExpletiveSubject, false);
        clause
    }

    pub fn is_clause(&self) -> bool {
        self.category == PhraseCategory::Clause
    }

    /// Read a feature; a clause falls back to its verb phrase for the
    /// features it forwards.
    pub fn feature(&self, feature: Feature) -> Option<&FeatureValue> {
        if let Some(v) = self.features.get(feature) {
            return Some(v);
        }
        if self.is_clause() && feature.is_verb_phrase_feature() {
            return self.verb_phrase.as_deref().and_then(|vp| vp.feature(feature));
        }
        None
    }

    /// Write a feature; a clause also writes forwarded features onto its
    /// verb phrase.
    pub fn set_feature(&mut self, feature: Feature, value: impl Into<FeatureValue>) {
        let value = value.into();
        if self.is_clause() && feature.is_verb_phrase_feature() {
            if let Some(vp) = self.verb_phrase.as_deref_mut() {
                vp.set_feature(feature, value.clone());
            }
        }
        self.features.set(feature, value);
    }

    pub fn flag(&self, feature: Feature) -> bool {
        self.feature(feature)
            .and_then(FeatureValue::as_bool)
            .unwrap_or(false)
    }

    pub fn head(&self) -> Option<&Element> {
        self.head.as_deref()
    }

    pub fn set_head(&mut self, head: impl Into<Element>) {
        self.head = Some(Box::new(head.into()));
    }

    pub fn specifier(&self) -> Option<&Element> {
        self.specifier.as_deref()
    }

    /// Set the specifier (determiner, possessive, quantifier).
    pub fn set_specifier(&mut self, specifier: impl Into<Element>) {
        let mut specifier = specifier.into();
        specifier.set_discourse_function(DiscourseFunction::Specifier);
        self.specifier = Some(Box::new(specifier));
    }

    pub fn verb_phrase_element(&self) -> Option<&Element> {
        self.verb_phrase.as_deref()
    }

    pub fn verb_phrase_mut(&mut self) -> Option<&mut Element> {
        self.verb_phrase.as_deref_mut()
    }

    pub fn set_verb_phrase(&mut self, vp: impl Into<Element>) {
        self.verb_phrase = Some(Box::new(vp.into()));
    }

    /// The verb: the head of the verb phrase for clauses, else the head.
    pub fn verb(&self) -> Option<&Element> {
        if self.is_clause() {
            self.verb_phrase
                .as_deref()
                .and_then(Element::as_phrase)
                .and_then(PhraseElement::head)
        } else {
            self.head()
        }
    }

    pub fn subject(&self) -> Option<&Element> {
        self.subjects.first()
    }

    /// Replace the subject list with a single subject.
    pub fn set_subject(&mut self, subject: impl Into<Element>) {
        self.subjects = vec![subject.into()];
    }

    pub fn add_subject(&mut self, subject: impl Into<Element>) {
        self.subjects.push(subject.into());
    }

    /// Add a complement. Complements without a discourse function become
    /// objects; clause complements become subordinate. On a clause the
    /// complement goes to the verb phrase.
    pub fn add_complement(&mut self, complement: impl Into<Element>) {
        let mut complement = complement.into();
        if self.is_clause() {
            if let Some(Element::Phrase(vp)) = self.verb_phrase.as_deref_mut() {
                vp.add_complement(complement);
                return;
            }
            if let Some(Element::Coordinated(vp)) = self.verb_phrase.as_deref_mut() {
                vp.complements.push(complement);
                return;
            }
        }
        if complement.discourse_function().is_none() {
            complement.set_discourse_function(DiscourseFunction::Object);
        }
        if complement.is_clause() || matches!(complement, Element::Coordinated(_)) {
            complement.set_feature(Feature::ClauseStatus, ClauseStatus::Subordinate);
        }
        self.complements.push(complement);
    }

    /// Replace any complements sharing the new complement's discourse
    /// function, then add it.
    pub fn set_complement(&mut self, complement: impl Into<Element>) {
        let complement = complement.into();
        if self.is_clause() {
            if let Some(Element::Phrase(vp)) = self.verb_phrase.as_deref_mut() {
                vp.set_complement(complement);
                return;
            }
        }
        if let Some(function) = complement.discourse_function() {
            self.remove_complements(function);
        }
        self.add_complement(complement);
    }

    pub fn remove_complements(&mut self, function: DiscourseFunction) {
        self.complements
            .retain(|c| c.discourse_function() != Some(function));
    }

    /// The first complement with the given discourse function.
    pub fn complement(&self, function: DiscourseFunction) -> Option<&Element> {
        let complements = match self.verb_phrase.as_deref() {
            Some(Element::Phrase(vp)) if self.is_clause() => &vp.complements,
            _ => &self.complements,
        };
        complements
            .iter()
            .find(|c| c.discourse_function() == Some(function))
    }

    /// Premodifiers of a clause live on its verb phrase.
    pub fn add_premodifier(&mut self, modifier: impl Into<Element>) {
        let modifier = modifier.into();
        if self.is_clause() {
            match self.verb_phrase.as_deref_mut() {
                Some(Element::Phrase(vp)) => {
                    vp.premodifiers.push(modifier);
                    return;
                }
                Some(Element::Coordinated(vp)) => {
                    vp.premodifiers.push(modifier);
                    return;
                }
                _ => {}
            }
        }
        self.premodifiers.push(modifier);
    }

    pub fn add_postmodifier(&mut self, modifier: impl Into<Element>) {
        let mut modifier = modifier.into();
        modifier.set_discourse_function(DiscourseFunction::PostModifier);
        self.postmodifiers.push(modifier);
    }

    pub fn add_front_modifier(&mut self, modifier: impl Into<Element>) {
        self.front_modifiers.push(modifier.into());
    }

    /// Constituents in document order for this phrase category.
    pub fn children(&self) -> Vec<&Element> {
        let mut children = Vec::new();
        match self.category {
            PhraseCategory::Clause => {
                if let Some(cue) = self.features.element(Feature::CuePhrase) {
                    children.push(cue);
                }
                children.extend(self.front_modifiers.iter());
                children.extend(self.premodifiers.iter());
                children.extend(self.subjects.iter());
                children.extend(self.verb_phrase.as_deref());
                children.extend(self.complements.iter());
            }
            PhraseCategory::NounPhrase => {
                children.extend(self.specifier.as_deref());
                children.extend(self.premodifiers.iter());
                children.extend(self.head.as_deref());
                children.extend(self.complements.iter());
                children.extend(self.postmodifiers.iter());
            }
            PhraseCategory::CannedText => {}
            _ => {
                children.extend(self.premodifiers.iter());
                children.extend(self.head.as_deref());
                children.extend(self.complements.iter());
                children.extend(self.postmodifiers.iter());
            }
        }
        children
    }
}

/// Conjunctions that make a coordination plural.
const PLURAL_COORDINATORS: [&str; 1] = ["and"];

/// Coordinates joined by a conjunction, with shared modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatedPhraseElement {
    pub coordinates: Vec<Element>,
    pub premodifiers: Vec<Element>,
    pub complements: Vec<Element>,
    pub postmodifiers: Vec<Element>,
    pub features: FeatureSet,
}

impl Default for CoordinatedPhraseElement {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinatedPhraseElement {
    /// An empty coordination joined by "and".
    pub fn new() -> Self {
        let mut features = FeatureSet::new();
        features.set(Feature::Conjunction, "and");
        Self {
            coordinates: Vec::new(),
            premodifiers: Vec::new(),
            complements: Vec::new(),
            postmodifiers: Vec::new(),
            features,
        }
    }

    pub fn with_coordinates(coordinates: impl IntoIterator<Item = Element>) -> Self {
        let mut coordinated = Self::new();
        for c in coordinates {
            coordinated.add_coordinate(c);
        }
        coordinated
    }

    /// Append a coordinate. Clauses after the first lose their
    /// complementiser.
    pub fn add_coordinate(&mut self, coordinate: impl Into<Element>) {
        let mut coordinate = coordinate.into();
        if coordinate.is_clause() && !self.coordinates.is_empty() {
            coordinate.set_feature(Feature::SuppressedComplementiser, true);
        }
        self.coordinates.push(coordinate);
    }

    pub fn last_coordinate(&self) -> Option<&Element> {
        self.coordinates.last()
    }

    pub fn conjunction(&self) -> &str {
        self.features.text(Feature::Conjunction).unwrap_or("")
    }

    pub fn set_conjunction(&mut self, conjunction: impl Into<String>) {
        self.features.set(Feature::Conjunction, conjunction.into());
    }

    /// A single plural coordinate, or two or more joined by "and".
    pub fn is_plural(&self) -> bool {
        if self.coordinates.len() == 1 {
            self.coordinates
                .last()
                .map(Element::is_plural)
                .unwrap_or(false)
        } else {
            PLURAL_COORDINATORS.contains(&self.conjunction())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_forwards_verb_features() {
        let mut clause = PhraseElement::clause();
        assert_eq!(
            clause.feature(Feature::Tense),
            Some(&FeatureValue::Tense(Tense::Present)),
            "unset tense falls back to the verb phrase default"
        );

        clause.set_feature(Feature::Tense, Tense::Past);
        let vp = clause.verb_phrase_element().unwrap();
        assert_eq!(vp.tense(), Some(Tense::Past));

        clause.set_feature(Feature::Elided, true);
        assert!(!vp_flag(&clause, Feature::Elided), "elision stays on the clause");
    }

    fn vp_flag(clause: &PhraseElement, feature: Feature) -> bool {
        clause
            .verb_phrase_element()
            .map(|vp| vp.flag(feature))
            .unwrap_or(false)
    }

    #[test]
    fn clause_complements_go_to_verb_phrase() {
        let mut clause = PhraseElement::clause();
        clause.add_complement(Element::Phrase(PhraseElement::new(PhraseCategory::NounPhrase)));
        assert!(clause.complements.is_empty());
        let vp = clause.verb_phrase_element().and_then(Element::as_phrase).unwrap();
        assert_eq!(vp.complements.len(), 1);
        assert_eq!(
            vp.complements[0].discourse_function(),
            Some(DiscourseFunction::Object)
        );
    }

    #[test]
    fn subordinate_clause_complement() {
        let mut vp = PhraseElement::verb_phrase();
        vp.add_complement(PhraseElement::clause());
        assert_eq!(vp.complements[0].clause_status(), Some(ClauseStatus::Subordinate));
    }

    #[test]
    fn set_complement_replaces_same_function() {
        let mut vp = PhraseElement::verb_phrase();
        let mut first = Element::Phrase(PhraseElement::new(PhraseCategory::NounPhrase));
        first.set_discourse_function(DiscourseFunction::Object);
        let mut second = Element::canned("George");
        second.set_discourse_function(DiscourseFunction::Object);
        vp.set_complement(first);
        vp.set_complement(second.clone());
        assert_eq!(vp.complements, vec![second]);
    }

    #[test]
    fn coordination_plurality() {
        let mut c = CoordinatedPhraseElement::new();
        c.add_coordinate(Element::canned("Mary"));
        assert!(!c.is_plural());
        c.add_coordinate(Element::canned("John"));
        assert!(c.is_plural());
        c.set_conjunction("or");
        assert!(!c.is_plural());
    }

    #[test]
    fn later_clause_coordinates_suppress_complementiser() {
        let c = CoordinatedPhraseElement::with_coordinates(vec![
            PhraseElement::clause().into(),
            PhraseElement::clause().into(),
        ]);
        assert!(!c.coordinates[0].flag(Feature::SuppressedComplementiser));
        assert!(c.coordinates[1].flag(Feature::SuppressedComplementiser));
    }
}
