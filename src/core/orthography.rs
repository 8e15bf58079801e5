/// Orthography stage: joins realised words into strings, punctuates
/// sentences and places commas in lists, coordinations and appositives.

use crate::schema::category::DocumentCategory;
use crate::schema::document::DocumentElement;
use crate::schema::element::{Element, StringElement};
use crate::schema::feature::{DiscourseFunction, Feature};

/// Joins and punctuates morphology output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrthographyProcessor {
    comma_sep_premodifiers: bool,
    comma_sep_cuephrase: bool,
}

impl Default for OrthographyProcessor {
    fn default() -> Self {
        Self {
            comma_sep_premodifiers: true,
            comma_sep_cuephrase: false,
        }
    }
}

impl OrthographyProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Separate stacked premodifiers with commas ("the big, red car").
    pub fn with_comma_sep_premodifiers(mut self, enabled: bool) -> Self {
        self.comma_sep_premodifiers = enabled;
        self
    }

    /// Follow cue phrases and front modifiers with a comma.
    pub fn with_comma_sep_cuephrase(mut self, enabled: bool) -> Self {
        self.comma_sep_cuephrase = enabled;
        self
    }

    pub fn comma_sep_premodifiers(&self) -> bool {
        self.comma_sep_premodifiers
    }

    pub fn comma_sep_cuephrase(&self) -> bool {
        self.comma_sep_cuephrase
    }

    pub fn realise(&self, element: &Element) -> Element {
        // Lists take the function of their first member.
        let function = match element {
            Element::List(list) => list.children.first().and_then(Element::discourse_function),
            other => other.discourse_function(),
        };

        let mut realised = match element {
            Element::Document(document) => self.realise_document(document),
            Element::List(list) => {
                let text = match function {
                    Some(DiscourseFunction::PreModifier) => self.premodifiers(&list.children),
                    Some(DiscourseFunction::PostModifier) => self.postmodifiers(&list.children),
                    Some(DiscourseFunction::CuePhrase | DiscourseFunction::FrontModifier)
                        if self.comma_sep_cuephrase =>
                    {
                        self.join(&list.children, ",")
                    }
                    _ => self.join(&list.children, ""),
                };
                Element::canned(text)
            }
            Element::Coordinated(coordinated) => {
                Element::canned(self.coordination(&coordinated.coordinates))
            }
            other => other.clone(),
        };

        if self.comma_sep_cuephrase
            && matches!(
                function,
                Some(DiscourseFunction::CuePhrase | DiscourseFunction::FrontModifier)
            )
        {
            let text = realised.realisation();
            if !text.ends_with(',') {
                let text = format!("{text},");
                realised.set_realisation(text);
            }
        }
        remove_punctuation_space(&mut realised);
        realised
    }

    /// Realise the document elements of a sequence; anything else is
    /// passed through untouched.
    pub fn realise_all(&self, elements: &[Element]) -> Vec<Element> {
        elements
            .iter()
            .map(|element| match element {
                Element::Document(_) => self.realise(element),
                other => other.clone(),
            })
            .collect()
    }

    fn realise_document(&self, document: &DocumentElement) -> Element {
        let mut document = document.clone();
        match document.category {
            DocumentCategory::Sentence => {
                if !document.components.is_empty() {
                    let interrogative = document.features.flag(Feature::Interrogative);
                    let mut text = self.join(&document.components, "");
                    if !text.is_empty() {
                        text = punctuate_sentence(&text, interrogative);
                    }
                    document.components.clear();
                    document.realisation = Some(text);
                }
            }
            _ => {
                document.components = self.realise_all(&document.components);
            }
        }
        Element::Document(document)
    }

    /// Join the non-blank realisations of `components`, placing `separator`
    /// between consecutive members.
    fn join(&self, components: &[Element], separator: &str) -> String {
        let parts: Vec<String> = components
            .iter()
            .map(|component| self.realise(component).realisation().to_string())
            .collect();
        let mut text = String::new();
        let count = components.len();
        for (index, part) in parts.iter().enumerate() {
            if part.is_empty() || part.chars().all(char::is_whitespace) {
                continue;
            }
            text.push_str(part);
            if count > 1 && index < count - 1 {
                text.push_str(separator);
            }
            text.push(' ');
        }
        text.pop();
        text
    }

    // Premodifiers that are all appositive are bracketed in commas.
    fn premodifiers(&self, children: &[Element]) -> String {
        let separator = if self.comma_sep_premodifiers { "," } else { "" };
        let all_appositive = children.iter().all(|c| c.flag(Feature::Appositive));
        let joined = self.join(children, separator);
        if all_appositive {
            format!(", {joined}, ")
        } else {
            joined
        }
    }

    fn postmodifiers(&self, children: &[Element]) -> String {
        let mut text = String::new();
        let count = children.len();
        for (index, postmodifier) in children.iter().enumerate() {
            let realised = self.realise(postmodifier);
            if postmodifier.flag(Feature::Appositive) {
                text.push_str(", ");
                text.push_str(realised.realisation());
                if index < count - 1 {
                    text.push_str(", ");
                }
            } else {
                text.push_str(realised.realisation());
                if matches!(postmodifier, Element::List(_)) || !postmodifier.realisation().is_empty() {
                    text.push(' ');
                }
            }
        }
        text
    }

    /// With more than two coordinates every conjunction but the last
    /// becomes a comma: "a, b and c".
    fn coordination(&self, coordinates: &[Element]) -> String {
        let mut text = String::new();
        let count = coordinates.len();
        for (index, coordinate) in coordinates.iter().enumerate() {
            if index + 2 < count
                && coordinate.discourse_function() == Some(DiscourseFunction::Conjunction)
            {
                text.push_str(", ");
            } else {
                text.push_str(self.realise(coordinate).realisation());
                text.push(' ');
            }
        }
        text.pop();
        text.replace(" ,", ",")
    }
}

fn punctuate_sentence(text: &str, interrogative: bool) -> String {
    let mut sentence: String = text.trim_start_matches(&[' ', ','][..]).to_string();
    if let Some(first) = sentence.chars().next() {
        if first.is_ascii_lowercase() {
            sentence.replace_range(..1, &first.to_ascii_uppercase().to_string());
        }
    }
    if !sentence.ends_with(&['.', '?'][..]) {
        sentence.push(if interrogative { '?' } else { '.' });
    }
    sentence
}

/// Collapse " ," into "," and runs of commas into one.
fn remove_punctuation_space(element: &mut Element) {
    let text = match element {
        Element::Text(StringElement { text, .. }) => text.clone(),
        Element::Document(DocumentElement {
            realisation: Some(text),
            ..
        }) => text.clone(),
        _ => return,
    };
    let spaced = text.replace(" ,", ",");
    let mut cleaned = String::with_capacity(spaced.len());
    for c in spaced.chars() {
        if c == ',' && cleaned.ends_with(',') {
            continue;
        }
        cleaned.push(c);
    }
    if cleaned != text {
        element.set_realisation(cleaned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::phrase::CoordinatedPhraseElement;

    fn word(text: &str, function: DiscourseFunction) -> Element {
        let mut element = Element::canned(text);
        element.set_discourse_function(function);
        element
    }

    fn sentence(components: Vec<Element>) -> Element {
        let mut sentence = DocumentElement::new(DocumentCategory::Sentence, None);
        sentence.components = components;
        Element::Document(sentence)
    }

    #[test]
    fn sentence_is_capitalised_and_terminated() {
        let ortho = OrthographyProcessor::new();
        let s = sentence(vec![
            Element::canned("the"),
            Element::canned("dog"),
            Element::canned("barks"),
        ]);
        assert_eq!(ortho.realise(&s).realisation(), "The dog barks.");
    }

    #[test]
    fn question_gets_question_mark() {
        let ortho = OrthographyProcessor::new();
        let mut s = sentence(vec![Element::canned("does it bark")]);
        s.set_feature(Feature::Interrogative, true);
        assert_eq!(ortho.realise(&s).realisation(), "Does it bark?");
    }

    #[test]
    fn terminator_is_not_doubled() {
        let ortho = OrthographyProcessor::new();
        let s = sentence(vec![Element::canned("it barks.")]);
        assert_eq!(ortho.realise(&s).realisation(), "It barks.");
    }

    #[test]
    fn leading_commas_are_stripped() {
        assert_eq!(punctuate_sentence(", , well", false), "Well.");
    }

    #[test]
    fn premodifiers_take_commas() {
        let ortho = OrthographyProcessor::new();
        let list = Element::list(vec![
            word("big", DiscourseFunction::PreModifier),
            word("red", DiscourseFunction::PreModifier),
        ]);
        assert_eq!(ortho.realise(&list).realisation(), "big, red");

        let plain = OrthographyProcessor::new().with_comma_sep_premodifiers(false);
        assert_eq!(plain.realise(&list).realisation(), "big red");
    }

    #[test]
    fn appositive_postmodifier_is_bracketed() {
        let ortho = OrthographyProcessor::new();
        let mut apposition = word("my friend", DiscourseFunction::PostModifier);
        apposition.set_feature(Feature::Appositive, true);
        let np = Element::list(vec![
            word("John", DiscourseFunction::Subject),
            Element::list(vec![apposition]),
            word("left", DiscourseFunction::VerbPhrase),
        ]);
        assert_eq!(ortho.realise(&np).realisation(), "John, my friend left");
    }

    #[test]
    fn coordination_uses_serial_commas() {
        let ortho = OrthographyProcessor::new();
        let c = CoordinatedPhraseElement::with_coordinates(vec![
            Element::canned("Mary"),
            word("and", DiscourseFunction::Conjunction),
            Element::canned("John"),
            word("and", DiscourseFunction::Conjunction),
            Element::canned("George"),
        ]);
        assert_eq!(
            ortho.realise(&Element::Coordinated(c)).realisation(),
            "Mary, John and George"
        );
    }

    #[test]
    fn cue_phrase_comma_is_optional() {
        let cue = Element::list(vec![word("however", DiscourseFunction::CuePhrase)]);
        let s = sentence(vec![cue, Element::canned("it rained")]);
        assert_eq!(
            OrthographyProcessor::new().realise(&s).realisation(),
            "However it rained."
        );
        assert_eq!(
            OrthographyProcessor::new()
                .with_comma_sep_cuephrase(true)
                .realise(&s)
                .realisation(),
            "However, it rained."
        );
    }

    #[test]
    fn cleanup_collapses_commas() {
        let mut e = Element::canned("a ,, b");
        remove_punctuation_space(&mut e);
        assert_eq!(e.realisation(), "a, b");

        let mut clean = Element::canned("a, b");
        remove_punctuation_space(&mut clean);
        assert_eq!(clean.realisation(), "a, b");
    }

    #[test]
    fn paragraph_realises_its_sentences() {
        let ortho = OrthographyProcessor::new();
        let mut paragraph = DocumentElement::new(DocumentCategory::Paragraph, None);
        paragraph.components.push(sentence(vec![Element::canned("one")]));
        paragraph.components.push(sentence(vec![Element::canned("two")]));
        let Element::Document(realised) = ortho.realise(&Element::Document(paragraph)) else {
            panic!("expected a document");
        };
        let texts: Vec<&str> = realised.components.iter().map(Element::realisation).collect();
        assert_eq!(texts, vec!["One.", "Two."]);
    }
}
