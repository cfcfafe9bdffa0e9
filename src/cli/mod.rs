//! CLI module - argument parsing and analysis configuration

mod args;
mod config;

pub use args::Cli;
pub use config::AnalysisConfig;
