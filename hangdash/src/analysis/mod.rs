//! Analysis logic for normalized profiles
//!
//! This module contains pure computation over the canonical profile,
//! separated from retrieval and presentation.

pub mod date_graph;
pub mod one_to_many;

pub use date_graph::{build_date_graph, DateGraph, StackSelection};
pub use one_to_many::OneToManyIndex;
