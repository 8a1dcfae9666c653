use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Form,
};
use tracing::warn;

use crate::pages::detail::Feedback;
use crate::pages::{add_research as add_research_page, detail, home as home_page, BrowseParams, BrowseState};
use crate::server::app::AppState;
use crate::server::errors::ApiError;
use crate::services::{ClaimForm, NewResearchForm, PledgeForm};

type PageResponse = Result<(StatusCode, Html<String>), ApiError>;

pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> PageResponse {
    let mut browse = BrowseState::from_params(&params.research_params(), state.default_page_size);
    let mut query = match browse.to_query(state.default_page_size) {
        Ok(query) => query,
        Err(err) => {
            warn!("Rejected research table query: {}", err);
            let html = home_page::render(&browse, None, Some(&err.to_string()))?;
            return Ok((StatusCode::BAD_REQUEST, Html(html)));
        }
    };

    if let Some(input) = params.goto.as_deref() {
        let total_count = state.research.count(&query).await?;
        if browse.go_to(input, browse.total_pages(total_count)) {
            query.page = browse.page;
        }
    }

    let page = state.research.search(&query).await?;
    Ok((StatusCode::OK, Html(home_page::render(&browse, Some(&page), None)?)))
}

pub async fn research_detail(
    State(state): State<AppState>,
    Path(award_number): Path<String>,
) -> PageResponse {
    let detail = state.research.find_by_award_number(&award_number).await?;
    let html = detail::render(
        &detail,
        &Feedback::default(),
        &ClaimForm::default(),
        &PledgeForm::default(),
    )?;
    Ok((StatusCode::OK, Html(html)))
}

pub async fn submit_claim(
    State(state): State<AppState>,
    Path(award_number): Path<String>,
    Form(form): Form<ClaimForm>,
) -> PageResponse {
    let detail = state.research.find_by_award_number(&award_number).await?;

    match state.submissions.submit_claim(detail.research.id, &form).await {
        Ok(_) => {
            // Reload so the new claim shows in the list
            let detail = state.research.find_by_award_number(&award_number).await?;
            let html = detail::render(
                &detail,
                &Feedback::notice("Thank you, your claim has been submitted."),
                &ClaimForm::default(),
                &PledgeForm::default(),
            )?;
            Ok((StatusCode::OK, Html(html)))
        }
        Err(err) if err.is_client_error() => {
            let html = detail::render(
                &detail,
                &Feedback::error(err.to_string()),
                &form,
                &PledgeForm::default(),
            )?;
            Ok((StatusCode::BAD_REQUEST, Html(html)))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn submit_pledge(
    State(state): State<AppState>,
    Path(award_number): Path<String>,
    Form(form): Form<PledgeForm>,
) -> PageResponse {
    let detail = state.research.find_by_award_number(&award_number).await?;

    match state.submissions.submit_pledge(detail.research.id, &form).await {
        Ok(_) => {
            let html = detail::render(
                &detail,
                &Feedback::notice("Thank you, your pledge has been submitted."),
                &ClaimForm::default(),
                &PledgeForm::default(),
            )?;
            Ok((StatusCode::OK, Html(html)))
        }
        Err(err) if err.is_client_error() => {
            let html = detail::render(
                &detail,
                &Feedback::error(err.to_string()),
                &ClaimForm::default(),
                &form,
            )?;
            Ok((StatusCode::BAD_REQUEST, Html(html)))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn add_research_form() -> PageResponse {
    let html = add_research_page::render(&NewResearchForm::default(), None, None)?;
    Ok((StatusCode::OK, Html(html)))
}

pub async fn add_research(
    State(state): State<AppState>,
    Form(form): Form<NewResearchForm>,
) -> PageResponse {
    match state.research.create(&form).await {
        Ok(created) => {
            let html = add_research_page::render(&NewResearchForm::default(), None, Some(&created))?;
            Ok((StatusCode::CREATED, Html(html)))
        }
        Err(err) if err.is_client_error() => {
            let status = if err.is_conflict() {
                StatusCode::CONFLICT
            } else {
                StatusCode::BAD_REQUEST
            };
            let html = add_research_page::render(&form, Some(&err.to_string()), None)?;
            Ok((status, Html(html)))
        }
        Err(err) => Err(err.into()),
    }
}
