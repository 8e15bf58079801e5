pub mod aggregation;
pub mod factory;
pub mod format;
pub mod lexicon;
pub mod morphology;
pub mod orthography;
pub mod realiser;
pub mod syntax;
