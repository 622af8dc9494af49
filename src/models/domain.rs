use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque candidate identifier
///
/// Record sources hand out either numeric or string keys; the value is
/// serialized back in the same shape it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Int(i64),
    Text(String),
}

impl CandidateId {
    /// An identifier is usable when it is numeric or a non-blank string
    pub fn is_blank(&self) -> bool {
        match self {
            CandidateId::Int(_) => false,
            CandidateId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Int(id) => write!(f, "{}", id),
            CandidateId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for CandidateId {
    fn from(id: i64) -> Self {
        CandidateId::Int(id)
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        CandidateId::Text(id.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(id: String) -> Self {
        CandidateId::Text(id)
    }
}

/// Person record from either the source or the target list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(rename = "dateOfBirth", default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl Candidate {
    pub fn new(
        id: impl Into<CandidateId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: None,
        }
    }

    pub fn with_date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.date_of_birth = Some(date_of_birth.into());
        self
    }

    /// Birth date, with empty strings treated as absent
    pub fn birth_date(&self) -> Option<&str> {
        self.date_of_birth.as_deref().filter(|d| !d.is_empty())
    }
}

/// Effective matching configuration for a single call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingOptions {
    pub threshold: f64,
    pub name_weight: f64,
    pub date_weight: f64,
    /// Accepted for compatibility; date comparison is always exact.
    pub fuzzy_date_matching: bool,
}

impl Default for MatchingOptions {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            name_weight: 0.5,
            date_weight: 0.5,
            fuzzy_date_matching: true,
        }
    }
}

impl MatchingOptions {
    /// Shallow-merge caller overrides over these options, producing a fresh value
    pub fn merge(&self, patch: &MatchingOptionsPatch) -> Self {
        Self {
            threshold: patch.threshold.unwrap_or(self.threshold),
            name_weight: patch.name_weight.unwrap_or(self.name_weight),
            date_weight: patch.date_weight.unwrap_or(self.date_weight),
            fuzzy_date_matching: patch.fuzzy_date_matching.unwrap_or(self.fuzzy_date_matching),
        }
    }
}

/// Caller-supplied partial options; absent fields fall back to the defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingOptionsPatch {
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(rename = "nameWeight", default)]
    pub name_weight: Option<f64>,
    #[serde(rename = "dateWeight", default)]
    pub date_weight: Option<f64>,
    #[serde(rename = "fuzzyDateMatching", default)]
    pub fuzzy_date_matching: Option<bool>,
}

/// Scored pairing of a source candidate with a target candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub source: &'a Candidate,
    pub target: &'a Candidate,
    pub score: f64,
    #[serde(rename = "nameScore")]
    pub name_score: f64,
    #[serde(rename = "dateScore", skip_serializing_if = "Option::is_none")]
    pub date_score: Option<f64>,
}
