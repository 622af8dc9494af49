use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Matcher;
use crate::error::ApiError;
use crate::models::{Candidate, FindMatchesRequest, FindMatchesResponse, HealthResponse, MatchingOptionsPatch};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub max_candidates: usize,
}

/// Resolution strategy requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// All pairs at or above the threshold
    Exhaustive,
    /// Greedy one-to-one assignment of targets
    Best,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/best", web::post().to(find_best_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "sources": [{"id": 1, "firstName": "Jean", "lastName": "Dupont", "dateOfBirth": "1990-01-15"}],
///   "targets": [{"id": "a", "firstName": "Jean", "lastName": "Dupond"}],
///   "options": {"threshold": 0.7, "nameWeight": 0.5, "dateWeight": 0.5}
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    run_matching(&state, req.into_inner(), MatchMode::Exhaustive).await
}

/// Best matches endpoint
///
/// POST /api/v1/matches/best
///
/// Same request body as `/matches/find`; each target is assigned to at most
/// one source.
async fn find_best_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    run_matching(&state, req.into_inner(), MatchMode::Best).await
}

async fn run_matching(
    state: &AppState,
    req: FindMatchesRequest,
    mode: MatchMode,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for {:?} matching request: {}", mode, errors);
        return Err(errors.into());
    }

    check_limit("sources", req.sources.len(), state.max_candidates)?;
    check_limit("targets", req.targets.len(), state.max_candidates)?;

    let request_id = uuid::Uuid::new_v4().to_string();
    let sources: Vec<Candidate> = req.sources.into_iter().map(Candidate::from).collect();
    let targets: Vec<Candidate> = req.targets.into_iter().map(Candidate::from).collect();
    let patch = req.options.map(MatchingOptionsPatch::from);

    tracing::info!(
        "Matching request {} ({:?}): {} sources, {} targets",
        request_id,
        mode,
        sources.len(),
        targets.len()
    );

    let matcher = state.matcher;
    let id = request_id.clone();

    // Scoring is CPU-bound; keep it off the async workers
    let (body, total_matches) = web::block(move || {
        let matches = match mode {
            MatchMode::Exhaustive => matcher.find_matches(&sources, &targets, patch.as_ref()),
            MatchMode::Best => matcher.find_best_matches(&sources, &targets, patch.as_ref()),
        };
        let total_matches = matches.len();
        let response = FindMatchesResponse {
            request_id: id,
            matches,
            total_pairs: sources.len() * targets.len(),
            total_matches,
        };
        serde_json::to_vec(&response).map(|body| (body, total_matches))
    })
    .await?
    .map_err(|e| ApiError::Blocking(e.to_string()))?;

    tracing::info!("Returning {} matches for request {}", total_matches, request_id);

    Ok(HttpResponse::Ok().content_type(ContentType::json()).body(body))
}

fn check_limit(list: &'static str, len: usize, max: usize) -> Result<(), ApiError> {
    if len > max {
        tracing::info!("Rejecting request: {} list has {} candidates (limit {})", list, len, max);
        return Err(ApiError::TooManyCandidates { list, len, max });
    }
    Ok(())
}
