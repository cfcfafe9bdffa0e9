//! Pipeline module - load, filter, extract, group, cross-tabulate, test

pub mod analysis;
pub mod crosstab;
pub mod error;
pub mod extract;
pub mod filter;
pub mod grouping;
pub mod loader;
pub mod stats;

pub use analysis::*;
pub use crosstab::*;
pub use error::*;
pub use extract::*;
pub use filter::*;
pub use grouping::*;
pub use loader::*;
pub use stats::*;
