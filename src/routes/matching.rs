use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{Matcher, SelectionStrategy};
use crate::models::{
    ErrorResponse, HealthResponse, PreferenceReport, Roster, RunCsvQuery, RunMatchingRequest,
    RunMatchingResponse, SeniorityScale, UnknownSeniorityPolicy,
};
use crate::services::load_roster;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub scale: Arc<SeniorityScale>,
    pub unknown_seniority_policy: UnknownSeniorityPolicy,
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching/run", web::post().to(run_matching))
        .route("/matching/run-csv", web::post().to(run_matching_csv));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Run a matching over a JSON roster
///
/// POST /api/v1/matching/run
///
/// Request body:
/// ```json
/// {
///   "participants": [
///     { "name": "Ada", "city": "boston", "state": "ma", "region": "northeast",
///       "seniority": "fellow", "isMentor": true, "isMentee": false }
///   ],
///   "unknownSeniorityPolicy": "skip_and_report",
///   "selectionStrategy": "input_order",
///   "includePreferences": false
/// }
/// ```
async fn run_matching(
    state: web::Data<AppState>,
    req: web::Json<RunMatchingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for run_matching request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let policy = req.unknown_seniority_policy.unwrap_or(state.unknown_seniority_policy);

    let roster = match Roster::from_records(req.participants, &state.scale, policy) {
        Ok(roster) => roster,
        Err(e) => {
            tracing::info!("Rejected roster: {}", e);
            return bad_request("Invalid roster", e.to_string());
        }
    };

    respond(&state, &roster, req.selection_strategy, req.include_preferences)
}

/// Run a matching over a CSV roster
///
/// POST /api/v1/matching/run-csv?unknownSeniorityPolicy=skip_and_report&includePreferences=true
///
/// The body is the CSV file, header row first.
async fn run_matching_csv(
    state: web::Data<AppState>,
    query: web::Query<RunCsvQuery>,
    body: web::Bytes,
) -> impl Responder {
    let policy = query.unknown_seniority_policy.unwrap_or(state.unknown_seniority_policy);

    let roster = match load_roster(body.as_ref(), &state.scale, policy) {
        Ok(roster) => roster,
        Err(e) => {
            tracing::info!("Rejected CSV roster: {}", e);
            return bad_request("Invalid roster", e.to_string());
        }
    };

    respond(&state, &roster, query.selection_strategy, query.include_preferences)
}

fn respond(
    state: &AppState,
    roster: &Roster,
    selection: Option<SelectionStrategy>,
    include_preferences: bool,
) -> HttpResponse {
    let matcher = match selection {
        Some(strategy) => state.matcher.with_selection(strategy),
        None => state.matcher.clone(),
    };

    let outcome = matcher.run(roster);
    let preferences = include_preferences.then(|| PreferenceReport::resolve(roster, &outcome));

    HttpResponse::Ok().json(RunMatchingResponse {
        pairs: outcome.pairs,
        summary: outcome.summary,
        rejected: roster.rejected().to_vec(),
        preferences,
        completed_at: chrono::Utc::now(),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}
