use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::database::entities::research_claims;
use crate::server::app::AppState;
use crate::server::errors::ApiError;
use crate::services::ClaimForm;

pub async fn create_claim(
    State(state): State<AppState>,
    Path(research_id): Path<i32>,
    Json(form): Json<ClaimForm>,
) -> Result<(StatusCode, Json<research_claims::Model>), ApiError> {
    let claim = state.submissions.submit_claim(research_id, &form).await?;
    Ok((StatusCode::CREATED, Json(claim)))
}
