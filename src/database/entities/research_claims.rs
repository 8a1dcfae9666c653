use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "research_claims")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub research_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub amended_amount: Option<i64>,
    pub asks: Option<String>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::research::Entity",
        from = "Column::ResearchId",
        to = "super::research::Column::Id"
    )]
    Research,
}

impl Related<super::research::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Research.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
