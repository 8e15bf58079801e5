/// Formatters: the last, optional stage, turning a realised document tree
/// into a single string of plain text or HTML.

mod html;
mod numbered_prefix;
mod text;

pub use html::HtmlFormatter;
pub use numbered_prefix::NumberedPrefix;
pub use text::TextFormatter;

use serde::{Deserialize, Serialize};

use crate::schema::element::Element;

/// Renders a realised tree. Implementations dispatch on the document
/// category of each node; canned text renders as itself and lists and
/// coordinations render their children.
pub trait Formatter: Send + Sync {
    fn format(&self, element: &Element) -> String;
}

/// Which formatter a realiser finishes with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatterKind {
    /// Return the orthography output unformatted.
    None,
    #[default]
    Text,
    Html,
}

impl FormatterKind {
    pub fn build(self) -> Option<Box<dyn Formatter>> {
        match self {
            FormatterKind::None => None,
            FormatterKind::Text => Some(Box::new(TextFormatter)),
            FormatterKind::Html => Some(Box::new(HtmlFormatter)),
        }
    }
}
