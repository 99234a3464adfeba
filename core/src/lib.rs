//! Batch data preparation for offer analytics.
//!
//! Loads three record-oriented JSON-lines datasets — the offer portfolio,
//! the user profile table, and the event transcript — cleans them, joins
//! them into one denormalized table, and derives a categorical age segment
//! for downstream analysis and modeling.
//!
//! Two entry points:
//!   - [`load::load`] reads the three tables from a configured directory.
//!   - [`pipeline::preprocess`] runs clean, merge, segment over loaded tables.
//!
//! Everything in between is a linear sequence of in-memory transforms.
//! No table is mutated in place; each stage consumes its inputs and
//! returns new tables.

pub mod clean;
pub mod config;
pub mod error;
pub mod load;
pub mod merge;
pub mod pipeline;
pub mod segment;
pub mod types;
