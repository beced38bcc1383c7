//! Command line, console report and file export

pub mod cli;
pub mod export;
pub mod report;
