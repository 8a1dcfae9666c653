use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::Utc;
use csv::ReaderBuilder;
use sea_orm::{DatabaseConnection, EntityTrait, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::database::entities::grants;
use crate::errors::{ImportError, ImportResult};

pub const DEFAULT_GRANTS_FILE: &str = "./data/grants.csv";

const GRANT_BATCH_SIZE: usize = 500;

/// One data row of the grants export, keyed by the export's header names
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GrantRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Release_Date")]
    pub release_date: String,
    #[serde(rename = "Expired_Date")]
    pub expired_date: String,
    #[serde(rename = "Activity_Code")]
    pub activity_code: String,
    #[serde(rename = "Parent_Organization")]
    pub parent_organization: String,
    #[serde(rename = "Organization")]
    pub organization: String,
    #[serde(rename = "Participating_Orgs")]
    pub participating_orgs: String,
    #[serde(rename = "Document_Number")]
    pub document_number: String,
    #[serde(rename = "Document_Type")]
    pub document_type: String,
    #[serde(rename = "Clinical_Trials")]
    pub clinical_trials: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl GrantRecord {
    fn into_active_model(self) -> grants::ActiveModel {
        grants::ActiveModel {
            title: Set(self.title),
            release_date: Set(self.release_date),
            expired_date: Set(self.expired_date),
            activity_code: Set(self.activity_code),
            parent_organization: Set(self.parent_organization),
            organization: Set(self.organization),
            participating_orgs: Set(self.participating_orgs),
            document_number: Set(self.document_number),
            document_type: Set(self.document_type),
            clinical_trials: Set(self.clinical_trials),
            url: Set(self.url),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
    }
}

/// Parse a tab-delimited grants export. Blank lines are skipped; any bad row fails
/// the whole parse.
pub fn parse_grants<R: Read>(reader: R) -> ImportResult<Vec<GrantRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| ImportError::InvalidRow {
            line: err.position().map(|p| p.line()).unwrap_or_default(),
            reason: err.to_string(),
        })?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let grant: GrantRecord = record
            .deserialize(Some(&headers))
            .map_err(|err| ImportError::InvalidRow {
                line,
                reason: err.to_string(),
            })?;
        records.push(grant);
    }

    Ok(records)
}

pub struct ImportService {
    db: DatabaseConnection,
}

impl ImportService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Import every grant in `path`, all-or-nothing. Returns the number of rows written.
    pub async fn import_grants_from_file(&self, path: impl AsRef<Path>) -> ImportResult<usize> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        info!("Importing grants from {}", path.display());
        let records = parse_grants(File::open(path)?)?;
        self.import_grants(records).await
    }

    pub async fn import_grants(&self, records: Vec<GrantRecord>) -> ImportResult<usize> {
        if records.is_empty() {
            warn!("No grant rows to import");
            return Ok(0);
        }

        let total = records.len();
        let mut models: Vec<grants::ActiveModel> = records
            .into_iter()
            .map(GrantRecord::into_active_model)
            .collect();

        // One transaction so a failing batch leaves no partial import behind
        let txn = self.db.begin().await?;
        while !models.is_empty() {
            let batch_size = GRANT_BATCH_SIZE.min(models.len());
            let batch: Vec<_> = models.drain(..batch_size).collect();
            debug!("Inserting batch of {} grants", batch_size);
            grants::Entity::insert_many(batch).exec(&txn).await?;
        }
        txn.commit().await?;

        info!("Successfully imported {} grants", total);
        Ok(total)
    }
}
