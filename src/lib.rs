//! Genus: Grammatical Gender Correlation Library
//!
//! Loads a bilingual dictionary export, extracts the gender tag of each noun
//! on both sides, cross-tabulates the two gender systems and tests them for
//! independence.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
