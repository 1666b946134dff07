//! Handler for the aggregated metadata endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::Utc;

use crate::api::dto::metadata::{MetadataQuery, MetadataResponse};
use crate::domain::TimeRange;
use crate::error::AppError;
use crate::state::AppState;

/// Returns now-playing metadata for each requested source.
///
/// # Endpoint
///
/// `GET /api/metadata`
///
/// # Query Parameters
///
/// - `start` (optional): epoch seconds (default: one hour before now)
/// - `stop` (optional): epoch seconds (default: now)
/// - `sources` (optional): comma-separated source ids (default: all configured)
///
/// # Request Flow
///
/// 1. Resolve and validate the time window
/// 2. Resolve source ids against the catalog
/// 3. Fetch all sources concurrently; each failure stays in its own slot
/// 4. Parse every entry's metadata string
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "stations": {
///     "WQXR": { "success": true, "metadataList": [ { "...": "...", "parsed": { "title": "..." } } ] },
///     "WNYC": { "success": false, "error": "timeout" }
///   },
///   "metadata": { "start": 1700000000, "stop": 1700003600, "count": 1,
///                 "duration_hours": 1.0, "timestamp": "2023-11-14T23:13:20.000Z" }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an undecodable query string, an invalid time
/// window or an unknown source.
/// Returns 500 Internal Server Error when the upstream credential is missing.
pub async fn metadata_handler(
    State(state): State<AppState>,
    query: Result<Query<MetadataQuery>, QueryRejection>,
) -> Result<Json<MetadataResponse>, AppError> {
    let Query(params) = query.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let now = Utc::now().timestamp();
    let range = TimeRange::resolve(params.start.as_deref(), params.stop.as_deref(), now)?;

    let requested = params.source_ids();
    let sources = state.catalog.select(requested.as_deref())?;

    let aggregate = state.metadata_service.aggregate(range, &sources).await?;

    Ok(Json(aggregate.into()))
}

/// Rejects methods other than GET (OPTIONS is answered by the CORS layer).
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}
