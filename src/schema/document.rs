/// Document structure: documents, sections, paragraphs, sentences, lists.

use crate::schema::category::DocumentCategory;
use crate::schema::element::Element;
use crate::schema::feature::FeatureSet;

/// A structural element of a text.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentElement {
    pub category: DocumentCategory,
    pub title: Option<String>,
    pub components: Vec<Element>,
    pub features: FeatureSet,
    /// Set by orthography and formatting once the element is realised.
    pub realisation: Option<String>,
}

impl DocumentElement {
    pub fn new(category: DocumentCategory, title: Option<String>) -> Self {
        Self {
            category,
            title,
            components: Vec::new(),
            features: FeatureSet::new(),
            realisation: None,
        }
    }

    /// Add a component, wrapping it in the intermediate structure this
    /// category requires: a phrase placed in a paragraph becomes a
    /// sentence, a sentence placed in a section becomes a paragraph. A
    /// component no wrapping can fit is added as it is.
    pub fn add_component(&mut self, component: impl Into<Element>) {
        let mut component = component.into();
        if let Some(wrappers) = self.promotion(component.document_category()) {
            for category in wrappers {
                let mut wrapper = DocumentElement::new(category, None);
                wrapper.components.push(component);
                component = Element::Document(wrapper);
            }
        }
        self.components.push(component);
    }

    /// The wrappers, innermost first, that make a child of `category`
    /// acceptable here.
    fn promotion(&self, category: Option<DocumentCategory>) -> Option<Vec<DocumentCategory>> {
        let mut wrappers = Vec::new();
        let mut current = category;
        while !self.category.has_subpart(current) {
            let wrapper = match current {
                None => DocumentCategory::Sentence,
                Some(DocumentCategory::Sentence) => DocumentCategory::Paragraph,
                Some(_) => return None,
            };
            wrappers.push(wrapper);
            current = Some(wrapper);
        }
        Some(wrappers)
    }

    pub fn add_components(&mut self, components: impl IntoIterator<Item = Element>) {
        for c in components {
            self.add_component(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_in_paragraph_becomes_sentence() {
        let mut paragraph = DocumentElement::new(DocumentCategory::Paragraph, None);
        paragraph.add_component(Element::canned("the dog barks"));
        assert_eq!(paragraph.components.len(), 1);
        assert_eq!(
            paragraph.components[0].document_category(),
            Some(DocumentCategory::Sentence)
        );
    }

    #[test]
    fn phrase_in_section_is_wrapped_twice() {
        let mut section = DocumentElement::new(DocumentCategory::Section, Some("Intro".into()));
        section.add_component(Element::canned("hello"));
        let Element::Document(paragraph) = &section.components[0] else {
            panic!("expected a paragraph, got {:?}", section.components[0]);
        };
        assert_eq!(paragraph.category, DocumentCategory::Paragraph);
        assert_eq!(
            paragraph.components[0].document_category(),
            Some(DocumentCategory::Sentence)
        );
    }

    #[test]
    fn list_items_stay_direct() {
        let mut list = DocumentElement::new(DocumentCategory::List, None);
        list.add_component(DocumentElement::new(DocumentCategory::ListItem, None));
        assert_eq!(list.components.len(), 1);
        assert_eq!(
            list.components[0].document_category(),
            Some(DocumentCategory::ListItem)
        );
    }

    #[test]
    fn sentence_in_list_item_is_not_wrapped() {
        let mut item = DocumentElement::new(DocumentCategory::ListItem, None);
        item.add_component(DocumentElement::new(DocumentCategory::Sentence, None));
        assert_eq!(
            item.components[0].document_category(),
            Some(DocumentCategory::Sentence)
        );
    }
}
