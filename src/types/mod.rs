//! Data types for the listing pipeline.

pub mod config;
pub mod document;
pub mod listing;
pub mod record;
