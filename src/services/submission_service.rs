use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, warn};

use super::forms::{ClaimForm, PledgeForm, Validate};
use crate::database::entities::{pledges, research, research_claims};
use crate::errors::{SubmissionError, SubmissionResult};

/// Append-only claim and pledge submissions. Each call validates the form, checks
/// the research record exists, and writes exactly one row.
#[derive(Clone)]
pub struct SubmissionService {
    db: DatabaseConnection,
}

impl SubmissionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn submit_claim(
        &self,
        research_id: i32,
        form: &ClaimForm,
    ) -> SubmissionResult<research_claims::Model> {
        let claim = form.validate().map_err(|err| {
            warn!("Rejected claim for research {}: {}", research_id, err);
            err
        })?;
        self.ensure_research_exists(research_id).await?;

        let claim = research_claims::ActiveModel {
            research_id: Set(research_id),
            first_name: Set(claim.first_name),
            last_name: Set(claim.last_name),
            email: Set(claim.email),
            amended_amount: Set(claim.amended_amount),
            asks: Set(claim.asks),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Recorded claim {} for research {}", claim.id, research_id);
        Ok(claim)
    }

    pub async fn submit_pledge(
        &self,
        research_id: i32,
        form: &PledgeForm,
    ) -> SubmissionResult<pledges::Model> {
        let pledge = form.validate().map_err(|err| {
            warn!("Rejected pledge for research {}: {}", research_id, err);
            err
        })?;
        self.ensure_research_exists(research_id).await?;

        let pledge = pledges::ActiveModel {
            research_id: Set(research_id),
            first_name: Set(pledge.first_name),
            last_name: Set(pledge.last_name),
            email: Set(pledge.email),
            amount: Set(pledge.amount),
            tasks: Set(pledge.tasks),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Recorded pledge {} for research {}", pledge.id, research_id);
        Ok(pledge)
    }

    async fn ensure_research_exists(&self, research_id: i32) -> SubmissionResult<()> {
        research::Entity::find_by_id(research_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(SubmissionError::ResearchNotFound(research_id))
    }
}
