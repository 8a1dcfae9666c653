use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::database::entities::pledges;
use crate::server::app::AppState;
use crate::server::errors::ApiError;
use crate::services::PledgeForm;

pub async fn create_pledge(
    State(state): State<AppState>,
    Path(research_id): Path<i32>,
    Json(form): Json<PledgeForm>,
) -> Result<(StatusCode, Json<pledges::Model>), ApiError> {
    let pledge = state.submissions.submit_pledge(research_id, &form).await?;
    Ok((StatusCode::CREATED, Json(pledge)))
}
