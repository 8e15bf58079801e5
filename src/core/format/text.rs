/// Plain-text formatting.

use crate::core::format::{Formatter, NumberedPrefix};
use crate::schema::category::DocumentCategory;
use crate::schema::document::DocumentElement;
use crate::schema::element::Element;

/// Plain text: a document title is followed by a blank line, a section
/// title by a newline, paragraphs end in a blank line, and list items go
/// on their own lines as " * item" or "1.2 - item".
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, element: &Element) -> String {
        let mut out = String::new();
        write(element, None, &mut NumberedPrefix::new(), &mut out);
        out
    }
}

fn write(
    element: &Element,
    parent: Option<DocumentCategory>,
    prefix: &mut NumberedPrefix,
    out: &mut String,
) {
    match element {
        Element::Text(text) => out.push_str(&text.text),
        Element::List(list) => {
            for child in &list.children {
                write(child, None, prefix, out);
                out.push(' ');
            }
        }
        Element::Coordinated(coordinated) => {
            for child in &coordinated.coordinates {
                write(child, None, prefix, out);
                out.push(' ');
            }
        }
        Element::Document(document) => write_document(document, parent, prefix, out),
        Element::Word(_) | Element::Inflected(_) | Element::Phrase(_) => {}
    }
}

fn write_document(
    document: &DocumentElement,
    parent: Option<DocumentCategory>,
    prefix: &mut NumberedPrefix,
    out: &mut String,
) {
    let category = document.category;
    match category {
        DocumentCategory::Document | DocumentCategory::Section => {
            if let Some(title) = document.title.as_deref().filter(|t| !t.is_empty()) {
                out.push_str(title);
                out.push_str(if category == DocumentCategory::Document { "\n\n" } else { "\n" });
            }
            for component in &document.components {
                write(component, Some(category), prefix, out);
            }
        }
        DocumentCategory::List => {
            for component in &document.components {
                write(component, Some(category), prefix, out);
            }
        }
        DocumentCategory::EnumeratedList => {
            prefix.up_a_level();
            if let Some(title) = &document.title {
                out.push_str(title);
                out.push('\n');
            }
            let mut previous = String::new();
            for (index, component) in document.components.iter().enumerate() {
                if index > 0 {
                    if !previous.ends_with('\n') {
                        out.push(' ');
                    }
                    prefix.increment();
                }
                previous.clear();
                write(component, Some(category), prefix, &mut previous);
                out.push_str(&previous);
            }
            prefix.down_a_level();
        }
        DocumentCategory::Paragraph => {
            let parts: Vec<String> = document
                .components
                .iter()
                .map(|component| {
                    let mut part = String::new();
                    write(component, Some(category), prefix, &mut part);
                    part
                })
                .collect();
            out.push_str(&parts.join(" "));
            out.push_str("\n\n");
        }
        DocumentCategory::Sentence => out.push_str(element_realisation(document)),
        DocumentCategory::ListItem => {
            match parent {
                Some(DocumentCategory::List) => out.push_str(" * "),
                Some(DocumentCategory::EnumeratedList) => {
                    out.push_str(prefix.prefix());
                    out.push_str(" - ");
                }
                _ => {}
            }
            let parts: Vec<String> = document
                .components
                .iter()
                .map(|component| {
                    let mut part = String::new();
                    write(component, Some(category), prefix, &mut part);
                    part
                })
                .collect();
            out.push_str(&parts.join(" "));
            out.push('\n');
        }
    }
}

fn element_realisation(document: &DocumentElement) -> &str {
    document.realisation.as_deref().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str) -> Element {
        let mut sentence = DocumentElement::new(DocumentCategory::Sentence, None);
        sentence.realisation = Some(text.to_string());
        Element::Document(sentence)
    }

    fn document(category: DocumentCategory, title: Option<&str>, components: Vec<Element>) -> Element {
        let mut document = DocumentElement::new(category, title.map(str::to_string));
        document.components = components;
        Element::Document(document)
    }

    fn item(text: &str) -> Element {
        document(DocumentCategory::ListItem, None, vec![sentence(text)])
    }

    #[test]
    fn titles_and_paragraphs() {
        let paragraph = document(
            DocumentCategory::Paragraph,
            None,
            vec![sentence("One."), sentence("Two.")],
        );
        let section = document(DocumentCategory::Section, Some("Intro"), vec![paragraph]);
        let doc = document(DocumentCategory::Document, Some("Title"), vec![section]);
        assert_eq!(TextFormatter.format(&doc), "Title\n\nIntro\nOne. Two.\n\n");
    }

    #[test]
    fn bullet_list() {
        let list = document(DocumentCategory::List, None, vec![item("A."), item("B.")]);
        assert_eq!(TextFormatter.format(&list), " * A.\n * B.\n");
    }

    #[test]
    fn nested_enumerated_lists() {
        let sub = document(
            DocumentCategory::EnumeratedList,
            None,
            vec![item("This is sub-list sentence 1."), item("This is sub-list sentence 2.")],
        );
        let list = document(
            DocumentCategory::EnumeratedList,
            None,
            vec![sub, item("This is the first sentence."), item("This is the second sentence.")],
        );
        let paragraph = document(DocumentCategory::Paragraph, None, vec![list]);
        let doc = document(DocumentCategory::Document, Some("Document"), vec![paragraph]);
        assert_eq!(
            TextFormatter.format(&doc),
            "Document\n\n\
             1.1 - This is sub-list sentence 1.\n\
             1.2 - This is sub-list sentence 2.\n\
             2 - This is the first sentence.\n\
             3 - This is the second sentence.\n\
             \n\n"
        );
    }

    #[test]
    fn each_call_numbers_from_one() {
        let list = document(DocumentCategory::EnumeratedList, None, vec![item("A."), item("B.")]);
        assert_eq!(TextFormatter.format(&list), "1 - A.\n2 - B.\n");
        assert_eq!(TextFormatter.format(&list), "1 - A.\n2 - B.\n");
    }

    #[test]
    fn canned_text_and_lists() {
        let list = Element::list(vec![Element::canned("in"), Element::canned("the room")]);
        assert_eq!(TextFormatter.format(&list), "in the room ");
    }
}
