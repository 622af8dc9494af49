use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for both matching endpoints
#[derive(Debug, Clone, Serialize)]
pub struct FindMatchesResponse<'a> {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub matches: Vec<MatchResult<'a>>,
    #[serde(rename = "totalPairs")]
    pub total_pairs: usize,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
