//! Data layer for the zipf tools.
//!
//! Responsible for counting words in text, discovering, validating and
//! reading word-count CSV files, collating them into cumulative tallies,
//! writing results back out as CSV, and fitting a power law to the counts.

pub mod analysis;
pub mod collate;
pub mod counter;
pub mod reader;
pub mod writer;

pub use zipf_core as core;
