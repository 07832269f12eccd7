//! Shared record model, error type and CLI settings for the movie analyzer.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
