use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{claims, grants, health, pages, pledges, research};
use crate::services::{GrantService, PageSize, ResearchService, SubmissionService};

#[derive(Clone)]
pub struct AppState {
    pub research: ResearchService,
    pub submissions: SubmissionService,
    pub grants: GrantService,
    pub default_page_size: PageSize,
}

impl AppState {
    pub fn new(db: DatabaseConnection, default_page_size: PageSize) -> Self {
        Self {
            research: ResearchService::new(db.clone()),
            submissions: SubmissionService::new(db.clone()),
            grants: GrantService::new(db),
            default_page_size,
        }
    }
}

pub async fn create_app(
    db: DatabaseConnection,
    cors_origin: Option<&str>,
    default_page_size: PageSize,
) -> Result<Router> {
    let state = AppState::new(db, default_page_size);

    let cors = match cors_origin {
        Some(origin) if origin != "*" => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", origin))?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .merge(page_routes())
        .nest("/api/v1", api_v1_routes())
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/research/:award_number", get(pages::research_detail))
        .route("/research/:award_number/claim", post(pages::submit_claim))
        .route("/research/:award_number/pledge", post(pages::submit_pledge))
        .route("/claims/add", get(pages::add_research_form).post(pages::add_research))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/research", get(research::list_research).post(research::create_research))
        // Lookups use the award number, submissions the numeric id
        .route("/research/:key", get(research::get_research))
        .route("/research/:key/claims", post(claims::create_claim))
        .route("/research/:key/pledges", post(pledges::create_pledge))
        .route("/grants", get(grants::list_grants))
}
