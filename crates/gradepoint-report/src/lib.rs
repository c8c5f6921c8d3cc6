//! Renderers for grade reports.
//!
//! The engine hands over full-precision decimals; every renderer here rounds
//! for display at a caller-chosen precision.

pub mod csv_export;
pub mod html;

pub use crate::csv_export::{courses_csv_string, write_csv_report};
pub use crate::html::{generate_html, write_html_report};
