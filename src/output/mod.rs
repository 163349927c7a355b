//! Output module
//! Renders match results for the console and as JSON

pub mod formatter;
