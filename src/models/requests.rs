use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Candidate, CandidateId, MatchingOptionsPatch};

/// Request to match a source list against a target list
///
/// Shared by the exhaustive and the best-match endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(nested)]
    #[serde(alias = "sourceCandidates")]
    pub sources: Vec<CandidatePayload>,
    #[validate(nested)]
    #[serde(alias = "targetCandidates")]
    pub targets: Vec<CandidatePayload>,
    #[validate(nested)]
    #[serde(default)]
    pub options: Option<MatchingOptionsRequest>,
}

/// Candidate as received on the wire, before contract checks
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidatePayload {
    #[validate(custom(function = "validate_candidate_id"))]
    pub id: CandidateId,
    #[validate(required)]
    #[serde(alias = "first_name", rename = "firstName")]
    pub first_name: Option<String>,
    #[validate(required)]
    #[serde(alias = "last_name", rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(alias = "date_of_birth", rename = "dateOfBirth", default)]
    pub date_of_birth: Option<String>,
}

impl From<CandidatePayload> for Candidate {
    fn from(payload: CandidatePayload) -> Self {
        Candidate {
            id: payload.id,
            first_name: payload.first_name.unwrap_or_default(),
            last_name: payload.last_name.unwrap_or_default(),
            date_of_birth: payload.date_of_birth,
        }
    }
}

/// Matching option overrides supplied with a request
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Validate)]
pub struct MatchingOptionsRequest {
    #[validate(range(min = 0.0, max = 1.0))]
    pub threshold: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "name_weight", rename = "nameWeight")]
    pub name_weight: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "date_weight", rename = "dateWeight")]
    pub date_weight: Option<f64>,
    #[serde(alias = "fuzzy_date_matching", rename = "fuzzyDateMatching")]
    pub fuzzy_date_matching: Option<bool>,
}

impl From<MatchingOptionsRequest> for MatchingOptionsPatch {
    fn from(req: MatchingOptionsRequest) -> Self {
        MatchingOptionsPatch {
            threshold: req.threshold,
            name_weight: req.name_weight,
            date_weight: req.date_weight,
            fuzzy_date_matching: req.fuzzy_date_matching,
        }
    }
}

fn validate_candidate_id(id: &CandidateId) -> Result<(), ValidationError> {
    if id.is_blank() {
        let mut err = ValidationError::new("blank_id");
        err.message = Some("candidate id must not be empty".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> FindMatchesRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let req = parse(
            r#"{
                "sources": [{"id": 1, "firstName": "Jean", "lastName": "Dupont", "dateOfBirth": "1990-01-01"}],
                "targets": [{"id": "a", "firstName": "Jean", "lastName": "Dupont"}],
                "options": {"threshold": 0.8}
            }"#,
        );
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_accepts_candidate_list_aliases() {
        let req = parse(
            r#"{
                "sourceCandidates": [{"id": 1, "firstName": "Jean", "lastName": "Dupont"}],
                "targetCandidates": []
            }"#,
        );
        assert_eq!(req.sources.len(), 1);
        assert!(req.targets.is_empty());
        assert!(req.options.is_none());
    }

    #[test]
    fn test_blank_id_rejected() {
        let req = parse(
            r#"{
                "sources": [{"id": "  ", "firstName": "Jean", "lastName": "Dupont"}],
                "targets": []
            }"#,
        );
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_name_rejected() {
        let req = parse(
            r#"{
                "sources": [],
                "targets": [{"id": 2, "firstName": "Jean"}]
            }"#,
        );
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_name_allowed() {
        let req = parse(
            r#"{
                "sources": [{"id": 2, "firstName": "", "lastName": "Dupont"}],
                "targets": []
            }"#,
        );
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_option_rejected() {
        let req = parse(
            r#"{
                "sources": [],
                "targets": [],
                "options": {"nameWeight": 1.5}
            }"#,
        );
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_payload_into_candidate() {
        let req = parse(
            r#"{
                "sources": [{"id": 7, "first_name": "Éloïse", "last_name": "Martin", "date_of_birth": "2001-02-03"}],
                "targets": []
            }"#,
        );
        let candidate: Candidate = req.sources[0].clone().into();
        assert_eq!(candidate.id, CandidateId::Int(7));
        assert_eq!(candidate.first_name, "Éloïse");
        assert_eq!(candidate.birth_date(), Some("2001-02-03"));
    }
}
