// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, CandidateId, MatchingOptions, MatchingOptionsPatch, MatchResult};
pub use requests::{FindMatchesRequest, CandidatePayload, MatchingOptionsRequest};
pub use responses::{FindMatchesResponse, HealthResponse, ErrorResponse};
