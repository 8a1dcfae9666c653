//! Grant import tests
//!
//! Tab-delimited files on disk imported into a temporary database

use std::io::Write;

use anyhow::Result;
use grant_relief::database::entities::grants;
use grant_relief::database::setup_database;
use grant_relief::errors::ImportError;
use grant_relief::services::ImportService;
use sea_orm::{Database, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use tempfile::NamedTempFile;

const HEADER: &str = "Title\tRelease_Date\tExpired_Date\tActivity_Code\tParent_Organization\tOrganization\tParticipating_Orgs\tDocument_Number\tDocument_Type\tClinical_Trials\tURL";

async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

fn write_tsv(lines: &[String]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    file.flush()?;
    Ok(file)
}

fn row(title: &str, number: &str) -> String {
    format!(
        "{}\t2025-02-01\t2025-06-30\tU01\tNIH\tNIAID\tNIAID\t{}\tRFA\tOptional\thttps://grants.nih.gov/grants/guide/rfa-files/{}.html",
        title, number, number
    )
}

#[tokio::test]
async fn test_import_from_file() -> Result<()> {
    let (db, _db_file) = setup_test_db().await?;
    let file = write_tsv(&[
        HEADER.to_string(),
        row("Vaccine Adjuvant Discovery", "RFA-AI-25-001"),
        String::new(),
        row("Antimicrobial Resistance Networks", "RFA-AI-25-002"),
    ])?;

    let imported = ImportService::new(db.clone())
        .import_grants_from_file(file.path())
        .await?;
    assert_eq!(imported, 2);

    let rows = grants::Entity::find()
        .order_by_asc(grants::Column::Id)
        .all(&db)
        .await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Vaccine Adjuvant Discovery");
    assert_eq!(rows[0].activity_code, "U01");
    assert_eq!(rows[1].document_number, "RFA-AI-25-002");
    assert_eq!(rows[1].clinical_trials, "Optional");

    Ok(())
}

#[tokio::test]
async fn test_importing_twice_duplicates_rows() -> Result<()> {
    let (db, _db_file) = setup_test_db().await?;
    let file = write_tsv(&[HEADER.to_string(), row("Vaccine Adjuvant Discovery", "RFA-AI-25-001")])?;
    let service = ImportService::new(db.clone());

    service.import_grants_from_file(file.path()).await?;
    service.import_grants_from_file(file.path()).await?;

    assert_eq!(grants::Entity::find().count(&db).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_bad_row_writes_nothing() -> Result<()> {
    let (db, _db_file) = setup_test_db().await?;
    let file = write_tsv(&[
        HEADER.to_string(),
        row("Vaccine Adjuvant Discovery", "RFA-AI-25-001"),
        "Truncated\t2025-02-01".to_string(),
    ])?;

    let err = ImportService::new(db.clone())
        .import_grants_from_file(file.path())
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::InvalidRow { .. }));
    assert_eq!(grants::Entity::find().count(&db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_missing_file() -> Result<()> {
    let (db, _db_file) = setup_test_db().await?;

    let err = ImportService::new(db)
        .import_grants_from_file("./no/such/grants.csv")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "File not found: ./no/such/grants.csv");

    Ok(())
}
