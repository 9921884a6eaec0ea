use axum::{body::Bytes, extract::State, Json};
use tracing::debug;

use crate::errors::AppError;
use crate::scholarships::filter::{find_eligible, validate_query, EligibilityError};
use crate::scholarships::models::{ScholarshipRecord, StudentQuery};
use crate::state::AppState;

/// POST /scholarships
///
/// The body is read as JSON whatever its `Content-Type`, so plain form posts
/// without the header are still served.
pub async fn handle_find_scholarships(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<ScholarshipRecord>>, AppError> {
    let query = parse_query(&body)?;
    validate_query(&query)?;

    let matches = find_eligible(&state.dataset, &query).inspect_err(|e| {
        if *e == EligibilityError::NoMatch {
            debug!("No scholarships for gpa={} major={:?}", query.gpa, query.major);
        }
    })?;

    debug!(
        "Matched {} scholarships for gpa={} major={:?}",
        matches.len(),
        query.gpa,
        query.major
    );
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// An empty body is the all-defaults query; anything else must be a JSON object.
fn parse_query(body: &[u8]) -> Result<StudentQuery, EligibilityError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StudentQuery::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        EligibilityError::InvalidInput(format!("Request body must be a JSON object: {e}"))
    })
}
