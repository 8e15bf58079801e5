pub mod category;
pub mod document;
pub mod element;
pub mod feature;
pub mod phrase;
