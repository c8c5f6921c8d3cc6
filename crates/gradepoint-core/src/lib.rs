//! Grade mapping, term aggregation and cumulative GPA.
//!
//! This crate holds the calculation engine and the data model that the
//! report renderers and the CLI build on. The engine is a set of pure free
//! functions; nothing here keeps state between calls.

pub mod config;
pub mod cumulative;
pub mod engine;
pub mod error;
pub mod grade;
pub mod model;
pub mod parser;
pub mod report;
pub mod term;
pub mod validation;

pub use cumulative::combine_cumulative;
pub use engine::calculate;
pub use grade::{letter_to_grade_point, point_to_letter, score_to_grade};
pub use term::aggregate_term;
