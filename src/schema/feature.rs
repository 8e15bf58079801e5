/// Feature vocabulary and the per-element feature set.
///
/// Keys form a closed enum so that misspelled feature names are compile
/// errors. Values are a small closed union; typed accessors read them back
/// without casts. An unset feature is absent, which is distinct from
/// `false`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::schema::element::Element;

/// Every feature an element may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    // Grammatical features set by callers.
    AdjectiveOrdering,
    AggregateAuxiliary,
    Appositive,
    Complementiser,
    Conjunction,
    ConjunctionType,
    CuePhrase,
    Elided,
    Form,
    InterrogativeType,
    IsComparative,
    IsSuperlative,
    Modal,
    Negated,
    Number,
    Particle,
    Passive,
    Perfect,
    Person,
    Possessive,
    Pronominal,
    Progressive,
    RaiseSpecifier,
    SuppressGenitiveInGerund,
    SuppressedComplementiser,
    Tense,

    // Set and consumed by the pipeline itself.
    Acronym,
    ClauseStatus,
    DiscourseFunction,
    IgnoreModal,
    Interrogative,
    NonMorph,
    Raised,
    RealiseAuxiliary,

    // Intrinsic lexical features.
    Gender,
    Proper,
    Reflexive,
    ExpletiveSubject,
    DefaultInflection,
    Plural,
    Past,
    PastParticiple,
    PresentParticiple,
    Present3s,
    Comparative,
    Superlative,
    Qualitative,
    Colour,
    Classifying,
    Predicative,
    SentenceModifier,
    Intransitive,
    Transitive,
    Ditransitive,
}

impl Feature {
    /// Features a clause forwards to its verb phrase on write and reads
    /// back from it when unset on the clause itself.
    pub const VERB_PHRASE_FEATURES: [Feature; 12] = [
        Feature::Modal,
        Feature::Tense,
        Feature::Negated,
        Feature::Number,
        Feature::Passive,
        Feature::Perfect,
        Feature::Particle,
        Feature::Person,
        Feature::Progressive,
        Feature::RealiseAuxiliary,
        Feature::Form,
        Feature::InterrogativeType,
    ];

    pub fn is_verb_phrase_feature(self) -> bool {
        Self::VERB_PHRASE_FEATURES.contains(&self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    Past,
    Present,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Person {
    First,
    Second,
    Third,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberAgreement {
    Singular,
    Plural,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

/// Verb form, orthogonal to tense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    BareInfinitive,
    Gerund,
    Imperative,
    Infinitive,
    Normal,
    PastParticiple,
    PresentParticiple,
}

/// The rule family governing how a word's surface forms are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Inflection {
    GrecoLatinRegular,
    Irregular,
    Regular,
    RegularDouble,
    Uncount,
    Invariant,
}

impl Inflection {
    /// Map a persisted inflection code (`reg`, `irreg`, `regd`, `glreg`,
    /// `uncount`, `inv`) to its pattern.
    pub fn from_code(code: &str) -> Option<Inflection> {
        match code {
            "reg" => Some(Inflection::Regular),
            "irreg" => Some(Inflection::Irregular),
            "regd" => Some(Inflection::RegularDouble),
            "glreg" => Some(Inflection::GrecoLatinRegular),
            "uncount" | "noncount" | "groupuncount" => Some(Inflection::Uncount),
            "inv" => Some(Inflection::Invariant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterrogativeType {
    How,
    HowPredicate,
    WhatObject,
    WhatSubject,
    Where,
    WhoIndirectObject,
    WhoObject,
    WhoSubject,
    Why,
    YesNo,
    HowMany,
}

impl InterrogativeType {
    /// Question types whose wh-word stands in for an object or predicate.
    pub fn is_object(self) -> bool {
        matches!(
            self,
            InterrogativeType::WhoObject | InterrogativeType::WhatObject
        )
    }

    /// Question types whose wh-word stands in for the subject.
    pub fn is_subject(self) -> bool {
        matches!(
            self,
            InterrogativeType::WhoSubject | InterrogativeType::WhatSubject
        )
    }
}

/// The role a constituent plays in its immediate parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscourseFunction {
    Auxiliary,
    Complement,
    Conjunction,
    CuePhrase,
    FrontModifier,
    Head,
    IndirectObject,
    Object,
    PreModifier,
    PostModifier,
    Specifier,
    Subject,
    VerbPhrase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseStatus {
    Matrix,
    Subordinate,
}

/// A feature value.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Bool(bool),
    Text(String),
    Tense(Tense),
    Person(Person),
    Number(NumberAgreement),
    Gender(Gender),
    Form(Form),
    Inflection(Inflection),
    Interrogative(InterrogativeType),
    Function(DiscourseFunction),
    ClauseStatus(ClauseStatus),
    Element(Box<Element>),
    Elements(Vec<Element>),
}

impl FeatureValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FeatureValue::Bool(b) => Some(*b),
            FeatureValue::Text(s) => Some(s.eq_ignore_ascii_case("true")),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tense(&self) -> Option<Tense> {
        match self {
            FeatureValue::Tense(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_person(&self) -> Option<Person> {
        match self {
            FeatureValue::Person(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<NumberAgreement> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_gender(&self) -> Option<Gender> {
        match self {
            FeatureValue::Gender(g) => Some(*g),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<Form> {
        match self {
            FeatureValue::Form(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_inflection(&self) -> Option<Inflection> {
        match self {
            FeatureValue::Inflection(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_interrogative(&self) -> Option<InterrogativeType> {
        match self {
            FeatureValue::Interrogative(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<DiscourseFunction> {
        match self {
            FeatureValue::Function(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_clause_status(&self) -> Option<ClauseStatus> {
        match self {
            FeatureValue::ClauseStatus(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            FeatureValue::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_elements(&self) -> Option<&[Element]> {
        match self {
            FeatureValue::Elements(e) => Some(e),
            _ => None,
        }
    }
}

macro_rules! feature_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FeatureValue {
                fn from(v: $ty) -> Self {
                    FeatureValue::$variant(v)
                }
            }
        )*
    };
}

feature_value_from! {
    bool => Bool,
    String => Text,
    Tense => Tense,
    Person => Person,
    NumberAgreement => Number,
    Gender => Gender,
    Form => Form,
    Inflection => Inflection,
    InterrogativeType => Interrogative,
    DiscourseFunction => Function,
    ClauseStatus => ClauseStatus,
    Vec<Element> => Elements,
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

impl From<Element> for FeatureValue {
    fn from(v: Element) -> Self {
        FeatureValue::Element(Box::new(v))
    }
}

/// The feature map carried by every element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    values: FxHashMap<Feature, FeatureValue>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, feature: Feature) -> Option<&FeatureValue> {
        self.values.get(&feature)
    }

    pub fn set(&mut self, feature: Feature, value: impl Into<FeatureValue>) {
        self.values.insert(feature, value.into());
    }

    pub fn remove(&mut self, feature: Feature) -> Option<FeatureValue> {
        self.values.remove(&feature)
    }

    pub fn has(&self, feature: Feature) -> bool {
        self.values.contains_key(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Feature, &FeatureValue)> {
        self.values.iter()
    }

    /// Copy every feature of `other` over this set.
    pub fn extend_from(&mut self, other: &FeatureSet) {
        for (k, v) in &other.values {
            self.values.insert(*k, v.clone());
        }
    }

    /// Copy a single feature from `other` if it is set there.
    pub fn copy_from(&mut self, other: &FeatureSet, feature: Feature) {
        if let Some(v) = other.get(feature) {
            self.values.insert(feature, v.clone());
        }
    }

    /// `true` only when the feature is set to a true value.
    pub fn flag(&self, feature: Feature) -> bool {
        self.get(feature)
            .and_then(FeatureValue::as_bool)
            .unwrap_or(false)
    }

    pub fn text(&self, feature: Feature) -> Option<&str> {
        self.get(feature).and_then(FeatureValue::as_text)
    }

    pub fn tense(&self) -> Option<Tense> {
        self.get(Feature::Tense).and_then(FeatureValue::as_tense)
    }

    pub fn person(&self) -> Option<Person> {
        self.get(Feature::Person).and_then(FeatureValue::as_person)
    }

    pub fn number(&self) -> Option<NumberAgreement> {
        self.get(Feature::Number).and_then(FeatureValue::as_number)
    }

    pub fn gender(&self) -> Option<Gender> {
        self.get(Feature::Gender).and_then(FeatureValue::as_gender)
    }

    pub fn form(&self) -> Option<Form> {
        self.get(Feature::Form).and_then(FeatureValue::as_form)
    }

    pub fn default_inflection(&self) -> Option<Inflection> {
        self.get(Feature::DefaultInflection)
            .and_then(FeatureValue::as_inflection)
    }

    pub fn interrogative_type(&self) -> Option<InterrogativeType> {
        self.get(Feature::InterrogativeType)
            .and_then(FeatureValue::as_interrogative)
    }

    pub fn discourse_function(&self) -> Option<DiscourseFunction> {
        self.get(Feature::DiscourseFunction)
            .and_then(FeatureValue::as_function)
    }

    pub fn clause_status(&self) -> Option<ClauseStatus> {
        self.get(Feature::ClauseStatus)
            .and_then(FeatureValue::as_clause_status)
    }

    pub fn element(&self, feature: Feature) -> Option<&Element> {
        self.get(feature).and_then(FeatureValue::as_element)
    }
}
