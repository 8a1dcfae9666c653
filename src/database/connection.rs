use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use super::migrations::Migrator;

pub const DEFAULT_DATABASE_PATH: &str = "grant_relief.db";

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(path) if path == ":memory:" => "sqlite::memory:".to_string(),
        Some(path) => format!("sqlite:{}?mode=rwc", path),
        None => format!("sqlite:{}?mode=rwc", DEFAULT_DATABASE_PATH),
    }
}

/// Apply every pending migration.
pub async fn setup_database(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_path_maps_to_sqlite_memory_url() {
        assert_eq!(get_database_url(Some(":memory:")), "sqlite::memory:");
    }

    #[test]
    fn file_paths_are_created_on_demand() {
        assert_eq!(
            get_database_url(Some("data/grants.db")),
            "sqlite:data/grants.db?mode=rwc"
        );
        assert_eq!(get_database_url(None), "sqlite:grant_relief.db?mode=rwc");
    }
}
