/// Inflection rules for nouns, verbs, adjectives, adverbs and pronouns.
///
/// Every rule resolves a form in the same order: a form set on the
/// occurrence itself, then the form stored in the lexicon entry, then the
/// regular spelling rule for the word's inflection pattern.

use crate::schema::category::LexicalCategory;
use crate::schema::element::{Element, InflectedWordElement, StringElement, WordElement};
use crate::schema::feature::{
    DiscourseFunction, Feature, Form, Gender, Inflection, NumberAgreement, Person, Tense,
};

const WH_PRONOUNS: [&str; 7] = ["who", "what", "which", "where", "why", "how", "how many"];

/// Pronouns indexed by number, case, then person (third person split by
/// gender).
const PRONOUNS: [[[&str; 5]; 5]; 2] = [
    [
        ["I", "you", "he", "she", "it"],
        ["me", "you", "him", "her", "it"],
        ["myself", "yourself", "himself", "herself", "itself"],
        ["mine", "yours", "his", "hers", "its"],
        ["my", "your", "his", "her", "its"],
    ],
    [
        ["we", "you", "they", "they", "they"],
        ["us", "you", "them", "them", "them"],
        ["ourselves", "yourselves", "themselves", "themselves", "themselves"],
        ["ours", "yours", "theirs", "theirs", "theirs"],
        ["our", "your", "their", "their", "their"],
    ],
];

const SUBJECTIVE: usize = 0;
const OBJECTIVE: usize = 1;
const REFLEXIVE: usize = 2;
const POSSESSIVE: usize = 3;
const POSSESSIVE_DETERMINER: usize = 4;

pub(super) fn noun(element: &InflectedWordElement, base_word: Option<&WordElement>) -> Element {
    let base = base_form(element, base_word);
    let mut realised = if is_plural(element) && !element.features.flag(Feature::Proper) {
        plural_noun(element, base_word, &base)
    } else {
        base
    };
    if element.features.flag(Feature::Possessive) {
        if realised.ends_with('s') {
            realised.push('\'');
        } else {
            realised.push_str("'s");
        }
    }
    text(realised, element)
}

fn plural_noun(element: &InflectedWordElement, base_word: Option<&WordElement>, base: &str) -> String {
    let pattern = element.features.default_inflection();
    if pattern == Some(Inflection::Uncount) {
        return base.to_string();
    }
    if let Some(plural) = element.features.text(Feature::Plural) {
        return plural.to_string();
    }
    if let Some(word) = base_word {
        if word.default_inflection() == Inflection::Uncount {
            return base.to_string();
        }
        if let Some(plural) = word.stored_form(Feature::Plural) {
            return plural.to_string();
        }
    }
    match pattern {
        Some(Inflection::GrecoLatinRegular) => greco_latin_plural(base),
        Some(Inflection::Invariant) => base.to_string(),
        _ => regular_plural(base),
    }
}

fn regular_plural(base: &str) -> String {
    if ends_with_consonant_y(base) {
        format!("{}ies", &base[..base.len() - 1])
    } else if ends_with_sibilant(base) {
        format!("{base}es")
    } else {
        format!("{base}s")
    }
}

fn greco_latin_plural(base: &str) -> String {
    if let Some(stem) = base.strip_suffix("us") {
        format!("{stem}i")
    } else if base.ends_with("ma") {
        format!("{base}ta")
    } else if base.ends_with('a') {
        format!("{base}e")
    } else if let Some(stem) = base.strip_suffix("um").or_else(|| base.strip_suffix("on")) {
        format!("{stem}a")
    } else if let Some(stem) = base.strip_suffix("sis") {
        format!("{stem}ses")
    } else if let Some(stem) = base.strip_suffix("is") {
        format!("{stem}ides")
    } else if let Some(stem) = base.strip_suffix("men") {
        format!("{stem}mina")
    } else if let Some(stem) = base.strip_suffix("ex") {
        format!("{stem}ices")
    } else if let Some(stem) = base.strip_suffix('x') {
        format!("{stem}ces")
    } else {
        base.to_string()
    }
}

pub(super) fn verb(element: &InflectedWordElement, base_word: Option<&WordElement>) -> Element {
    let features = &element.features;
    let number = features.number();
    let person = features.person();
    let tense = features.tense();
    let form = features.form();
    let pattern = features.default_inflection();
    let base = base_form(element, base_word);
    let is_be = base.eq_ignore_ascii_case("be");

    let realised = if features.flag(Feature::Negated) || form == Some(Form::BareInfinitive) {
        base
    } else if form == Some(Form::PresentParticiple) {
        stored(element, base_word, Feature::PresentParticiple).unwrap_or_else(|| {
            if pattern == Some(Inflection::RegularDouble) {
                doubled(&base, "ing")
            } else {
                regular_present_participle(&base)
            }
        })
    } else if form == Some(Form::PastParticiple) {
        stored(element, base_word, Feature::PastParticiple).unwrap_or_else(|| {
            if is_be {
                "been".to_string()
            } else if pattern == Some(Inflection::RegularDouble) {
                doubled(&base, "ed")
            } else {
                regular_past(&base, number, person)
            }
        })
    } else if tense == Some(Tense::Past) {
        // The stored past of "be" cannot agree in number.
        if is_be {
            regular_past(&base, number, person)
        } else {
            stored(element, base_word, Feature::Past).unwrap_or_else(|| {
                if pattern == Some(Inflection::RegularDouble) {
                    doubled(&base, "ed")
                } else {
                    regular_past(&base, number, person)
                }
            })
        }
    } else if matches!(number, None | Some(NumberAgreement::Singular))
        && matches!(person, None | Some(Person::Third))
        && tense == Some(Tense::Present)
    {
        let stored_form = features.text(Feature::Present3s).map(str::to_string).or_else(|| {
            base_word
                .filter(|_| !is_be)
                .and_then(|w| w.stored_form(Feature::Present3s))
                .map(str::to_string)
        });
        stored_form.unwrap_or_else(|| present_third_singular(&base))
    } else if is_be {
        if person == Some(Person::First) && matches!(number, None | Some(NumberAgreement::Singular)) {
            "am".to_string()
        } else {
            "are".to_string()
        }
    } else {
        base
    };
    text(realised, element)
}

fn present_third_singular(base: &str) -> String {
    if base.eq_ignore_ascii_case("be") {
        "is".to_string()
    } else if ends_with_sibilant(base) {
        format!("{base}es")
    } else if ends_with_consonant_y(base) {
        format!("{}ies", &base[..base.len() - 1])
    } else {
        format!("{base}s")
    }
}

fn regular_past(base: &str, number: Option<NumberAgreement>, person: Option<Person>) -> String {
    if base.eq_ignore_ascii_case("be") {
        if number == Some(NumberAgreement::Plural) || person == Some(Person::Second) {
            "were".to_string()
        } else {
            "was".to_string()
        }
    } else if base.ends_with('e') {
        format!("{base}d")
    } else if ends_with_consonant_y(base) {
        format!("{}ied", &base[..base.len() - 1])
    } else {
        format!("{base}ed")
    }
}

fn regular_present_participle(base: &str) -> String {
    if base.eq_ignore_ascii_case("be") {
        return "being".to_string();
    }
    if let Some(stem) = base.strip_suffix("ie") {
        return format!("{stem}ying");
    }
    if let Some(stem) = base.strip_suffix('e') {
        let keeps_e = stem
            .chars()
            .last()
            .map(|c| matches!(c, 'i' | 'y' | 'e' | 'o'))
            .unwrap_or(true);
        if !keeps_e {
            return format!("{stem}ing");
        }
    }
    format!("{base}ing")
}

pub(super) fn adjective(element: &InflectedWordElement, base_word: Option<&WordElement>) -> Element {
    graded(element, base_word, true)
}

pub(super) fn adverb(element: &InflectedWordElement, base_word: Option<&WordElement>) -> Element {
    graded(element, base_word, false)
}

// Comparative and superlative forms. Only adjectives double their final
// consonant ("big", "bigger").
fn graded(element: &InflectedWordElement, base_word: Option<&WordElement>, may_double: bool) -> Element {
    let base = base_form(element, base_word);
    let double = may_double && element.features.default_inflection() == Some(Inflection::RegularDouble);
    let realised = if element.features.flag(Feature::IsComparative) {
        stored(element, base_word, Feature::Comparative).unwrap_or_else(|| {
            if double {
                doubled(&base, "er")
            } else {
                regular_grade(&base, "er")
            }
        })
    } else if element.features.flag(Feature::IsSuperlative) {
        stored(element, base_word, Feature::Superlative).unwrap_or_else(|| {
            if double {
                doubled(&base, "est")
            } else {
                regular_grade(&base, "est")
            }
        })
    } else {
        base
    };
    text(realised, element)
}

fn regular_grade(base: &str, suffix: &str) -> String {
    if ends_with_consonant_y(base) {
        format!("{}i{suffix}", &base[..base.len() - 1])
    } else if base.ends_with('e') {
        format!("{base}{}", &suffix[1..])
    } else {
        format!("{base}{suffix}")
    }
}

/// Pick the pronoun for the occurrence's number, person, gender and case.
/// Wh-pronouns and fixed words keep their base form.
pub(super) fn pronoun(element: &InflectedWordElement) -> Element {
    let features = &element.features;
    if features.flag(Feature::NonMorph) || WH_PRONOUNS.contains(&element.base_form.as_str()) {
        return text(element.base_form.clone(), element);
    }

    let number = usize::from(is_plural(element));
    let mut person = match features.person() {
        Some(Person::First) => 0,
        Some(Person::Second) => 1,
        Some(Person::Third) | None => 2,
    };
    if person == 2 {
        person += match features.gender() {
            Some(Gender::Masculine) => 0,
            Some(Gender::Feminine) => 1,
            Some(Gender::Neuter) | None => 2,
        };
    }

    let function = features.discourse_function();
    let passive = features.flag(Feature::Passive);
    let case = if features.flag(Feature::Reflexive) {
        REFLEXIVE
    } else if features.flag(Feature::Possessive) {
        if function == Some(DiscourseFunction::Specifier) {
            POSSESSIVE_DETERMINER
        } else {
            POSSESSIVE
        }
    } else {
        let subjective = match function {
            Some(DiscourseFunction::Subject) => !passive,
            Some(DiscourseFunction::Object) | Some(DiscourseFunction::Complement) => passive,
            Some(DiscourseFunction::Specifier) => true,
            _ => false,
        };
        if subjective {
            SUBJECTIVE
        } else {
            OBJECTIVE
        }
    };
    text(PRONOUNS[number][case][person].to_string(), element)
}

/// Words of other categories are realised as their base form.
pub(super) fn uninflected(element: &InflectedWordElement) -> Element {
    text(element.base_form.clone(), element)
}

// Verbs spell from the lexicon entry; other words keep the occurrence's
// base form.
fn base_form(element: &InflectedWordElement, base_word: Option<&WordElement>) -> String {
    match base_word {
        Some(word) if element.category == LexicalCategory::Verb => word.base_form.clone(),
        _ => element.base_form.clone(),
    }
}

fn stored(
    element: &InflectedWordElement,
    base_word: Option<&WordElement>,
    feature: Feature,
) -> Option<String> {
    element
        .features
        .text(feature)
        .or_else(|| base_word.and_then(|w| w.stored_form(feature)))
        .map(str::to_string)
}

fn is_plural(element: &InflectedWordElement) -> bool {
    element.features.number() == Some(NumberAgreement::Plural)
}

fn doubled(base: &str, suffix: &str) -> String {
    match base.chars().last() {
        Some(last) => format!("{base}{last}{suffix}"),
        None => suffix.to_string(),
    }
}

fn ends_with_consonant_y(word: &str) -> bool {
    let mut chars = word.chars().rev();
    match (chars.next(), chars.next()) {
        (Some('y'), Some(before)) => {
            matches!(before, 'b'..='z') && !matches!(before, 'e' | 'i' | 'o' | 'u')
        }
        _ => false,
    }
}

fn ends_with_sibilant(word: &str) -> bool {
    word.ends_with(&['s', 'x', 'z'][..]) || word.ends_with("ch") || word.ends_with("sh")
}

// The realised string keeps the occurrence's discourse function.
fn text(realised: String, element: &InflectedWordElement) -> Element {
    let mut string = StringElement::new(realised);
    if let Some(function) = element.features.discourse_function() {
        string
            .features
            .set(Feature::DiscourseFunction, function);
    }
    Element::Text(string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn word(base: &str, category: LexicalCategory) -> InflectedWordElement {
        InflectedWordElement::new(base, category)
    }

    #[rstest]
    #[case::consonant_y("fly", "flies")]
    #[case::vowel_y("day", "days")]
    #[case::sibilant("box", "boxes")]
    #[case::ch("church", "churches")]
    #[case::plain("dog", "dogs")]
    fn regular_plurals(#[case] base: &str, #[case] plural: &str) {
        assert_eq!(regular_plural(base), plural);
    }

    #[rstest]
    #[case::us("focus", "foci")]
    #[case::ma("stigma", "stigmata")]
    #[case::a("alga", "algae")]
    #[case::um("datum", "data")]
    #[case::on("taxon", "taxa")]
    #[case::sis("analysis", "analyses")]
    #[case::is("iris", "irides")]
    #[case::men("foramen", "foramina")]
    #[case::ex("index", "indices")]
    #[case::x("matrix", "matrices")]
    fn greco_latin_plurals(#[case] base: &str, #[case] plural: &str) {
        assert_eq!(greco_latin_plural(base), plural);
    }

    #[test]
    fn uncountable_and_proper_nouns_stay() {
        let mut rice = word("rice", LexicalCategory::Noun);
        rice.features.set(Feature::DefaultInflection, Inflection::Uncount);
        rice.features.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(noun(&rice, None).realisation(), "rice");

        let mut mary = word("Mary", LexicalCategory::Noun);
        mary.features.set(Feature::Proper, true);
        mary.features.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(noun(&mary, None).realisation(), "Mary");
    }

    #[test]
    fn stored_plural_wins() {
        let mut entry = WordElement::new("child", LexicalCategory::Noun);
        entry.features.set(Feature::Plural, "children");
        let mut child = word("child", LexicalCategory::Noun);
        child.features.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(noun(&child, Some(&entry)).realisation(), "children");
    }

    #[test]
    fn possessive_follows_plural() {
        let mut dog = word("dog", LexicalCategory::Noun);
        dog.features.set(Feature::Possessive, true);
        assert_eq!(noun(&dog, None).realisation(), "dog's");
        dog.features.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(noun(&dog, None).realisation(), "dogs'");
    }

    #[rstest]
    #[case::third_singular(Tense::Present, None, "kicks")]
    #[case::past(Tense::Past, None, "kicked")]
    #[case::participle(Tense::Present, Some(Form::PresentParticiple), "kicking")]
    #[case::past_participle(Tense::Present, Some(Form::PastParticiple), "kicked")]
    #[case::bare(Tense::Present, Some(Form::BareInfinitive), "kick")]
    fn kick_forms(#[case] tense: Tense, #[case] form: Option<Form>, #[case] expected: &str) {
        let mut kick = word("kick", LexicalCategory::Verb);
        kick.features.set(Feature::Tense, tense);
        if let Some(form) = form {
            kick.features.set(Feature::Form, form);
        }
        assert_eq!(verb(&kick, None).realisation(), expected);
    }

    #[rstest]
    #[case::first(Person::First, NumberAgreement::Singular, Tense::Present, "am")]
    #[case::second(Person::Second, NumberAgreement::Singular, Tense::Present, "are")]
    #[case::third(Person::Third, NumberAgreement::Singular, Tense::Present, "is")]
    #[case::plural(Person::Third, NumberAgreement::Plural, Tense::Present, "are")]
    #[case::past_singular(Person::First, NumberAgreement::Singular, Tense::Past, "was")]
    #[case::past_plural(Person::Third, NumberAgreement::Plural, Tense::Past, "were")]
    fn be_agrees(
        #[case] person: Person,
        #[case] number: NumberAgreement,
        #[case] tense: Tense,
        #[case] expected: &str,
    ) {
        let mut be = word("be", LexicalCategory::Verb);
        be.features.set(Feature::Person, person);
        be.features.set(Feature::Number, number);
        be.features.set(Feature::Tense, tense);
        assert_eq!(verb(&be, None).realisation(), expected);
    }

    #[rstest]
    #[case::silent_e("like", "liking")]
    #[case::ie("lie", "lying")]
    #[case::ee("see", "seeing")]
    #[case::plain("walk", "walking")]
    fn present_participles(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(regular_present_participle(base), expected);
    }

    #[test]
    fn regular_past_spelling() {
        assert_eq!(regular_past("like", None, None), "liked");
        assert_eq!(regular_past("carry", None, None), "carried");
        assert_eq!(regular_past("play", None, None), "played");
    }

    #[test]
    fn doubling_pattern() {
        let mut stop = word("stop", LexicalCategory::Verb);
        stop.features.set(Feature::DefaultInflection, Inflection::RegularDouble);
        stop.features.set(Feature::Tense, Tense::Past);
        assert_eq!(verb(&stop, None).realisation(), "stopped");

        let mut big = word("big", LexicalCategory::Adjective);
        big.features.set(Feature::DefaultInflection, Inflection::RegularDouble);
        big.features.set(Feature::IsSuperlative, true);
        assert_eq!(adjective(&big, None).realisation(), "biggest");
    }

    #[test]
    fn negated_verb_keeps_base() {
        let mut kick = word("kick", LexicalCategory::Verb);
        kick.features.set(Feature::Negated, true);
        assert_eq!(verb(&kick, None).realisation(), "kick");
    }

    #[rstest]
    #[case::happy("happy", true, "happier")]
    #[case::nice("nice", true, "nicer")]
    #[case::tall("tall", true, "taller")]
    #[case::happiest("happy", false, "happiest")]
    #[case::nicest("nice", false, "nicest")]
    fn grades(#[case] base: &str, #[case] comparative: bool, #[case] expected: &str) {
        let mut adj = word(base, LexicalCategory::Adjective);
        let feature = if comparative {
            Feature::IsComparative
        } else {
            Feature::IsSuperlative
        };
        adj.features.set(feature, true);
        assert_eq!(adjective(&adj, None).realisation(), expected);
    }

    #[rstest]
    #[case::subject(DiscourseFunction::Subject, false, false, "she")]
    #[case::object(DiscourseFunction::Object, false, false, "her")]
    #[case::passive_object(DiscourseFunction::Object, false, true, "she")]
    #[case::possessive(DiscourseFunction::Subject, true, false, "hers")]
    #[case::determiner(DiscourseFunction::Specifier, true, false, "her")]
    fn pronoun_case(
        #[case] function: DiscourseFunction,
        #[case] possessive: bool,
        #[case] passive: bool,
        #[case] expected: &str,
    ) {
        let mut she = word("she", LexicalCategory::Pronoun);
        she.features.set(Feature::Person, Person::Third);
        she.features.set(Feature::Gender, Gender::Feminine);
        she.features.set(Feature::DiscourseFunction, function);
        she.features.set(Feature::Possessive, possessive);
        she.features.set(Feature::Passive, passive);
        assert_eq!(pronoun(&she).realisation(), expected);
    }

    #[test]
    fn plural_and_reflexive_pronouns() {
        let mut we = word("I", LexicalCategory::Pronoun);
        we.features.set(Feature::Person, Person::First);
        we.features.set(Feature::Number, NumberAgreement::Plural);
        we.features.set(Feature::DiscourseFunction, DiscourseFunction::Subject);
        assert_eq!(pronoun(&we).realisation(), "we");

        we.features.set(Feature::Reflexive, true);
        assert_eq!(pronoun(&we).realisation(), "ourselves");
    }

    #[test]
    fn wh_pronoun_passes_through() {
        let who = word("who", LexicalCategory::Pronoun);
        assert_eq!(pronoun(&who).realisation(), "who");
    }
}
