//! Core conversation modules
//!
//! Contains the rule table, pronoun reflection, input normalization
//! and the pattern/response matcher built on top of them.

pub mod reflections;
pub mod responder;
pub mod rules;
pub mod text_normalizer;

pub use responder::Responder;
pub use rules::Rule;
