//! Small shared utilities

pub mod helpers;
