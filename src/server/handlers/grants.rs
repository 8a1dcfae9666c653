use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::database::entities::grants;
use crate::server::app::AppState;
use crate::server::errors::ApiError;
use crate::services::{Page, PageSize};

#[derive(Debug, Default, Deserialize)]
pub struct GrantListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

pub async fn list_grants(
    State(state): State<AppState>,
    Query(params): Query<GrantListParams>,
) -> Result<Json<Page<grants::Model>>, ApiError> {
    let page_size = match params.page_size {
        Some(size) => PageSize::new(size)?,
        None => state.default_page_size,
    };
    let page = state.grants.list(params.page.unwrap_or(1), page_size).await?;
    Ok(Json(page))
}
