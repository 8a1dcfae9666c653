use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::database::entities::research;
use crate::server::app::AppState;
use crate::server::errors::ApiError;
use crate::services::{NewResearchForm, Page, ResearchDetail, ResearchQuery, ResearchQueryParams};

pub async fn list_research(
    State(state): State<AppState>,
    Query(params): Query<ResearchQueryParams>,
) -> Result<Json<Page<research::Model>>, ApiError> {
    let query = ResearchQuery::from_params(&params, state.default_page_size)?;
    let page = state.research.search(&query).await?;
    Ok(Json(page))
}

pub async fn get_research(
    State(state): State<AppState>,
    Path(award_number): Path<String>,
) -> Result<Json<ResearchDetail>, ApiError> {
    let detail = state.research.find_by_award_number(&award_number).await?;
    Ok(Json(detail))
}

pub async fn create_research(
    State(state): State<AppState>,
    Json(form): Json<NewResearchForm>,
) -> Result<(StatusCode, Json<research::Model>), ApiError> {
    let created = state.research.create(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
