//! NLG Realiser: rule-based English surface realisation.
//!
//! Turns feature-tagged phrase specifications (clauses, noun phrases,
//! coordinations, documents) into inflected, ordered and punctuated text,
//! using a lexicon of words and their irregular forms and a pipeline of
//! syntax, morphology and orthography stages.

pub mod core;
pub mod schema;
