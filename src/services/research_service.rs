use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::forms::{NewResearchForm, Validate};
use super::research_query::{check_page, Page, ResearchQuery};
use crate::common::db_errors::DbErrorKind;
use crate::database::entities::research::{encode_string_list, search_key};
use crate::database::entities::{research, research_claims};
use crate::errors::{ResearchError, ResearchResult, SubmissionError, SubmissionResult};

/// A research record with its list columns decoded and the claims filed against it
#[derive(Debug, Clone, Serialize)]
pub struct ResearchDetail {
    pub research: research::Model,
    pub co_pi_names: Vec<String>,
    pub programs: Vec<String>,
    pub program_element_codes: Vec<String>,
    pub program_reference_codes: Vec<String>,
    pub claims: Vec<research_claims::Model>,
}

#[derive(Clone)]
pub struct ResearchService {
    db: DatabaseConnection,
}

impl ResearchService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Filtered page of research records ordered by award number
    pub async fn search(&self, query: &ResearchQuery) -> ResearchResult<Page<research::Model>> {
        debug!(
            "Searching research: search={:?} instrument={:?} range={:?} page={} size={}",
            query.search,
            query.award_instrument,
            query.amount_range,
            query.page,
            query.page_size.get()
        );

        check_page(query.page, query.page_size)?;

        let paginator = Self::filtered(query)
            .order_by_asc(research::Column::AwardNumber)
            .paginate(&self.db, query.page_size.get());

        let total_count = paginator.num_items().await?;
        let items = paginator.fetch_page(query.page - 1).await?;

        Ok(Page::new(items, total_count, query.page, query.page_size.get()))
    }

    /// Number of records matching the filters, ignoring pagination
    pub async fn count(&self, query: &ResearchQuery) -> ResearchResult<u64> {
        Ok(Self::filtered(query).count(&self.db).await?)
    }

    pub async fn find_by_award_number(&self, award_number: &str) -> ResearchResult<ResearchDetail> {
        let research = research::Entity::find()
            .filter(research::Column::AwardNumber.eq(award_number))
            .one(&self.db)
            .await?
            .ok_or_else(|| ResearchError::NotFound(award_number.to_string()))?;

        let claims = research_claims::Entity::find()
            .filter(research_claims::Column::ResearchId.eq(research.id))
            .order_by_asc(research_claims::Column::Id)
            .all(&self.db)
            .await?;

        Ok(ResearchDetail {
            co_pi_names: research.co_pi_names_list(),
            programs: research.programs_list(),
            program_element_codes: research.program_element_codes_list(),
            program_reference_codes: research.program_reference_codes_list(),
            research,
            claims,
        })
    }

    /// Add a research record from the add-research form
    pub async fn create(&self, form: &NewResearchForm) -> SubmissionResult<research::Model> {
        let valid = form.validate().map_err(|err| {
            warn!("Rejected research submission: {}", err);
            err
        })?;

        let record = research::ActiveModel {
            award_number: Set(valid.award_number.clone()),
            title_search: Set(search_key(&valid.title)),
            title: Set(valid.title),
            abstract_text: Set(Some(valid.abstract_text)),
            principal_investigator: Set(Some(valid.principal_investigator)),
            pi_email_address: Set(Some(valid.pi_email_address)),
            co_pi_names: Set(encode_string_list(&valid.co_pi_names)),
            organization: Set(Some(valid.organization)),
            organization_street: Set(Some(valid.organization_street)),
            organization_city: Set(Some(valid.organization_city)),
            organization_state: Set(Some(valid.organization_state)),
            organization_zip: Set(Some(valid.organization_zip)),
            organization_phone: Set(Some(valid.organization_phone)),
            state: Set(valid.state),
            award_instrument: Set(Some(valid.award_instrument)),
            program_manager: Set(Some(valid.program_manager)),
            awarded_amount_to_date: Set(Some(valid.awarded_amount_to_date)),
            arra_amount: Set(valid.arra_amount),
            start_date: Set(Some(valid.start_date)),
            end_date: Set(Some(valid.end_date)),
            last_amendment_date: Set(valid.last_amendment_date),
            nsf_organization: Set(Some(valid.nsf_organization)),
            nsf_directorate: Set(Some(valid.nsf_directorate)),
            programs: Set(encode_string_list(&valid.programs)),
            program_element_codes: Set(encode_string_list(&valid.program_element_codes)),
            program_reference_codes: Set(encode_string_list(&valid.program_reference_codes)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let research = record.insert(&self.db).await.map_err(|err| {
            if DbErrorKind::from_db_err(&err) == DbErrorKind::UniqueViolation {
                SubmissionError::DuplicateAwardNumber(valid.award_number.clone())
            } else {
                SubmissionError::Database(err)
            }
        })?;

        info!(
            "Added research {} (award {})",
            research.id, research.award_number
        );
        Ok(research)
    }

    fn filtered(query: &ResearchQuery) -> Select<research::Entity> {
        let mut select = research::Entity::find();

        if let Some(term) = &query.search {
            let pattern = format!("%{}%", escape_like(&search_key(term)));
            select = select.filter(
                Expr::col(research::Column::TitleSearch)
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        if let Some(instrument) = &query.award_instrument {
            select = select.filter(research::Column::AwardInstrument.eq(instrument.as_str()));
        }

        if let Some(range) = query.amount_range {
            let (min, max) = range.bounds();
            select = select.filter(research::Column::AwardedAmountToDate.gte(min));
            if let Some(max) = max {
                select = select.filter(research::Column::AwardedAmountToDate.lt(max));
            }
        }

        select
    }
}

/// Escape LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
