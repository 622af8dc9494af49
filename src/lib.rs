//! Candidate Matcher - fuzzy record matching service
//!
//! This library provides the matching engine used to reconcile two lists of
//! person records. Names are compared by normalized edit distance (tolerating
//! accents and swapped first/last names), birth dates by exact equality, and
//! the two are combined into a weighted score that is either reported for
//! every qualifying pair or used for a greedy one-to-one assignment.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{Matcher, find_matches, find_best_matches, levenshtein, normalize, string_similarity};
pub use crate::error::ApiError;
pub use crate::models::{Candidate, CandidateId, MatchingOptions, MatchingOptionsPatch, MatchResult, FindMatchesRequest, FindMatchesResponse};
