// Core algorithm exports
pub mod levenshtein;
pub mod matcher;
pub mod normalize;
pub mod scoring;

pub use levenshtein::levenshtein;
pub use matcher::{Matcher, find_matches, find_best_matches};
pub use normalize::normalize;
pub use scoring::{string_similarity, compare_names, compare_dates, parse_date, score_pair, PairScore};
