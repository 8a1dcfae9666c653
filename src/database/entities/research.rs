use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A grant record. `award_number` is the public lookup key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "research")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub award_number: String,
    pub title: String,
    /// Unicode-lowercased title; SQLite `lower()` only folds ASCII
    #[serde(skip)]
    pub title_search: String,
    #[sea_orm(column_name = "abstract")]
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub principal_investigator: Option<String>,
    pub pi_email_address: Option<String>,
    pub co_pi_names: String, // JSON array of names
    pub organization: Option<String>,
    pub organization_street: Option<String>,
    pub organization_city: Option<String>,
    pub organization_state: Option<String>,
    pub organization_zip: Option<String>,
    pub organization_phone: Option<String>,
    pub state: Option<String>,
    pub award_instrument: Option<String>,
    pub program_manager: Option<String>,
    pub awarded_amount_to_date: Option<f64>,
    pub arra_amount: Option<f64>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub last_amendment_date: Option<Date>,
    pub nsf_organization: Option<String>,
    pub nsf_directorate: Option<String>,
    pub programs: String,                // JSON array
    pub program_element_codes: String,   // JSON array
    pub program_reference_codes: String, // JSON array
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::research_claims::Entity")]
    ResearchClaims,
    #[sea_orm(has_many = "super::pledges::Entity")]
    Pledges,
}

impl Related<super::research_claims::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResearchClaims.def()
    }
}

impl Related<super::pledges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pledges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn co_pi_names_list(&self) -> Vec<String> {
        parse_string_list(&self.co_pi_names)
    }

    pub fn programs_list(&self) -> Vec<String> {
        parse_string_list(&self.programs)
    }

    pub fn program_element_codes_list(&self) -> Vec<String> {
        parse_string_list(&self.program_element_codes)
    }

    pub fn program_reference_codes_list(&self) -> Vec<String> {
        parse_string_list(&self.program_reference_codes)
    }
}

/// Normalised form of a title or search term for case-insensitive matching
pub fn search_key(text: &str) -> String {
    text.to_lowercase()
}

/// Read a stored list column. Anything other than a JSON array of strings reads as empty.
pub fn parse_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_default()
}

pub fn encode_string_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_list_columns_read_as_empty() {
        assert!(parse_string_list("").is_empty());
        assert!(parse_string_list("not json").is_empty());
        assert!(parse_string_list("{\"a\": 1}").is_empty());
        assert!(parse_string_list("[1, 2]").is_empty());
    }

    #[test]
    fn search_key_folds_non_ascii_case() {
        assert_eq!(search_key("École Polytechnique ÉTUDES"), "école polytechnique études");
        assert_eq!(search_key("ÉCOLE"), search_key("école"));
    }

    #[test]
    fn list_columns_round_trip() {
        let names = vec!["Ada Lovelace".to_string(), "Grace Hopper".to_string()];
        assert_eq!(parse_string_list(&encode_string_list(&names)), names);
    }
}
