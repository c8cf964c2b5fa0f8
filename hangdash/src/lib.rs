//! # hangdash - Hang Profile Aggregation
//!
//! hangdash turns published hang aggregates (call-stack samples annotated with
//! per-day hang time and hang count) into the data a date graph is drawn
//! from: a canonical, densely indexed profile, and per-day totals for any
//! subtree of a thread's call tree.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Fragment host / local mirror                    │
//! │        hang_profile_{duration}[_historical][_thread].json       │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ JSON fragments (concurrent when split)
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    hangdash (This Crate)                        │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │  │  Retrieval   │──▶│  Normalizer  │──▶│   Profile    │         │
//! │  │   (tokio)    │   │ (union, fill)│   │  (columnar)  │         │
//! │  └──────────────┘   └──────────────┘   └──────┬───────┘         │
//! │                                               │ Arc<Thread>     │
//! │                                               ▼                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │  │    Export    │◀──│  Date Graph  │◀──│    Worker    │         │
//! │  │ (json, text) │   │ (subtree sum)│   │  (channels)  │         │
//! │  └──────────────┘   └──────────────┘   └──────────────┘         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`profile`]: raw wire format, canonical profile types, string table,
//!   and the normalizer that merges fragments onto one date axis
//! - [`analysis`]: one-to-many index over the call tree and the date graph builder
//! - [`retrieval`]: fragment URLs, fragment sources, and split-aware retrieval
//! - [`worker`]: background date-graph worker behind a typed request/response channel
//! - [`export`]: JSON export and headless text rendering of a date graph
//! - [`cli`]: command-line argument parsing and configuration
//! - [`domain`]: core domain types (`DayId`, `WorkerInfo`) and errors
//!
//! ## Key Concepts
//!
//! - **Fragment**: one fetched profile document; split profiles use one per thread
//! - **Date axis**: the ascending union of every thread's days; threads
//!   missing a day get a zero-filled entry
//! - **Subtree**: a stack node and all of its descendants, found through the
//!   `prefix` column
//! - **Hang time / count**: per-sample totals, normalized per usage hour by the producer

pub mod analysis;
pub mod cli;
pub mod domain;
pub mod export;
pub mod profile;
pub mod retrieval;
pub mod worker;
