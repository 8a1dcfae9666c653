use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Award metadata loaded by the bulk importer. Values are kept as imported.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub release_date: String,
    pub expired_date: String,
    pub activity_code: String,
    pub parent_organization: String,
    pub organization: String,
    pub participating_orgs: String,
    pub document_number: String,
    pub document_type: String,
    pub clinical_trials: String,
    pub url: String,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
