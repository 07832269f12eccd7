//! Data layer for the movie analyzer.
//!
//! Loads the movie CSV into typed records, aggregates per-star statistics
//! and answers the analytical queries over the in-memory collection.

pub mod aggregator;
pub mod analysis;
pub mod analyzer;
pub mod reader;

pub use movie_core as core;
