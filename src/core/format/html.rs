/// HTML formatting.

use crate::core::format::Formatter;
use crate::schema::category::DocumentCategory;
use crate::schema::document::DocumentElement;
use crate::schema::element::Element;

/// Minimal HTML: `<h1>` and `<h2>` titles, `<p>` paragraphs, `<ul>` and
/// `<ol>` lists of `<li>` items. Text is emitted as realised, without
/// escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn format(&self, element: &Element) -> String {
        let mut out = String::new();
        write(element, &mut out);
        out
    }
}

fn write(element: &Element, out: &mut String) {
    match element {
        Element::Text(text) => out.push_str(&text.text),
        Element::List(list) => {
            for child in &list.children {
                write(child, out);
                out.push(' ');
            }
        }
        Element::Coordinated(coordinated) => {
            for child in &coordinated.coordinates {
                write(child, out);
                out.push(' ');
            }
        }
        Element::Document(document) => write_document(document, out),
        Element::Word(_) | Element::Inflected(_) | Element::Phrase(_) => {}
    }
}

fn write_document(document: &DocumentElement, out: &mut String) {
    let components = |out: &mut String| {
        for component in &document.components {
            write(component, out);
        }
    };
    let joined = |separator: &str| {
        document
            .components
            .iter()
            .map(|component| {
                let mut part = String::new();
                write(component, &mut part);
                part
            })
            .collect::<Vec<_>>()
            .join(separator)
    };

    match document.category {
        DocumentCategory::Document => {
            if let Some(title) = &document.title {
                out.push_str(&format!("<h1>{title}</h1>"));
            }
            components(out);
        }
        DocumentCategory::Section => {
            if let Some(title) = &document.title {
                out.push_str(&format!("<h2>{title}</h2>"));
            }
            components(out);
        }
        DocumentCategory::List => {
            out.push_str("<ul>");
            components(out);
            out.push_str("</ul>");
        }
        DocumentCategory::EnumeratedList => {
            out.push_str("<ol>");
            components(out);
            out.push_str("</ol>");
        }
        DocumentCategory::Paragraph => {
            if !document.components.is_empty() {
                out.push_str("<p>");
                out.push_str(&joined(" "));
                out.push_str("</p>");
            }
        }
        DocumentCategory::Sentence => out.push_str(document.realisation.as_deref().unwrap_or("")),
        DocumentCategory::ListItem => {
            out.push_str("<li>");
            out.push_str(&joined(" "));
            out.push_str("</li>");
        }
    }
}
