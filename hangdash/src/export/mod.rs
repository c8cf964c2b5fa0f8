//! Date graph export and display
//!
//! - [`json`]: write a date graph as a JSON document for external tools
//! - [`display`]: headless text rendering (bars and tooltip texts)

pub mod display;
pub mod json;

pub use display::{count_tooltip, range_maxima, render_children, render_date_graph, time_tooltip, DateRange, GraphMaxima};
pub use json::{export_date_graph, DateGraphReport};
