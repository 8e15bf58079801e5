/// Determiner agreement: "a" versus "an", and number agreement for
/// demonstratives.

use crate::schema::element::Element;

/// Words that start with a vowel letter but not a vowel sound.
const AN_EXCEPTIONS: [&str; 3] = ["one", "180", "110"];

/// Whether the indefinite article before `text` should be "an".
pub fn requires_an(text: &str) -> bool {
    let lower = text.to_lowercase();
    let starts_with_vowel = lower
        .chars()
        .next()
        .map(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
        .unwrap_or(false);
    if starts_with_vowel && !AN_EXCEPTIONS.iter().any(|ex| lower.starts_with(ex)) {
        return true;
    }
    match numeric_prefix(&lower) {
        Some(prefix)
            if prefix.starts_with('8') || prefix.starts_with("11") || prefix.starts_with("18") =>
        {
            prefix.parse::<u64>().map(check_number).unwrap_or(false)
        }
        _ => false,
    }
}

// Numbers read aloud with a leading vowel sound: eight, eleven, eighteen,
// eighty-something, and the same in thousands.
fn check_number(number: u64) -> bool {
    if number == 8 || number == 11 || number == 18 || (80..90).contains(&number) {
        true
    } else if number > 1000 {
        check_number(number / 1000)
    } else {
        false
    }
}

/// Leading digits of `text`, ignoring thousands separators.
fn numeric_prefix(text: &str) -> Option<String> {
    let text = text.trim();
    let mut chars = text.chars();
    let first = chars.next().filter(char::is_ascii_digit)?;
    let mut digits = String::from(first);
    for c in chars {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c != ',' {
            break;
        }
    }
    Some(digits)
}

/// Canned text ending in "a" followed by a noun needing "an" gets its last
/// token rewritten.
pub fn check_ends_with_indefinite_article(text: &str, noun: &str) -> String {
    let mut tokens: Vec<&str> = text.split(' ').collect();
    match tokens.last_mut() {
        Some(last) if last.eq_ignore_ascii_case("a") && requires_an(noun) => {
            *last = "an";
            tokens.join(" ")
        }
        _ => text.to_string(),
    }
}

/// Make a realised determiner agree with the number of its phrase and the
/// sound of the word that follows it.
pub fn agree(determiner: &mut Element, following: &str) {
    let plural = determiner.is_plural();
    let replacement = match determiner.realisation() {
        "that" if plural => Some("those"),
        "this" if plural => Some("these"),
        "those" if !plural => Some("that"),
        "these" if !plural => Some("this"),
        "a" if plural => Some("some"),
        "a" if requires_an(following) => Some("an"),
        _ => None,
    };
    if let Some(replacement) = replacement {
        determiner.set_realisation(replacement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::feature::{Feature, NumberAgreement};
    use rstest::rstest;

    #[rstest]
    #[case::vowel("elephant", true)]
    #[case::consonant("cow", false)]
    #[case::exception("one", false)]
    #[case::eighteen("18-year old", true)]
    #[case::eleven("11", true)]
    #[case::hundred("100", false)]
    #[case::eighty_six("86", true)]
    #[case::thousands("8,000", true)]
    #[case::one_eighty("180", false)]
    #[case::capitalised("Apple", true)]
    fn indefinite_article(#[case] word: &str, #[case] an: bool) {
        assert_eq!(requires_an(word), an, "{word}");
    }

    #[test]
    fn canned_article_is_rewritten() {
        assert_eq!(check_ends_with_indefinite_article("there is a", "elephant"), "there is an");
        assert_eq!(check_ends_with_indefinite_article("there is a", "cow"), "there is a");
        assert_eq!(check_ends_with_indefinite_article("a lot", "elephant"), "a lot");
    }

    #[test]
    fn demonstratives_follow_number() {
        let mut this = Element::canned("this");
        this.set_feature(Feature::Number, NumberAgreement::Plural);
        agree(&mut this, "dogs");
        assert_eq!(this.realisation(), "these");

        let mut those = Element::canned("those");
        agree(&mut those, "dog");
        assert_eq!(those.realisation(), "that");
    }

    #[test]
    fn plural_indefinite_becomes_some() {
        let mut a = Element::canned("a");
        a.set_feature(Feature::Number, NumberAgreement::Plural);
        agree(&mut a, "apples");
        assert_eq!(a.realisation(), "some");

        let mut a = Element::canned("a");
        agree(&mut a, "apple");
        assert_eq!(a.realisation(), "an");
    }
}
