//! quizlens-core — Core aggregation engine, data model, and traits.
//!
//! This crate defines the fundamental data model, the submission-to-question
//! transform, and the rendering traits that the entire quizlens system
//! builds on.

pub mod aggregate;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod traits;
