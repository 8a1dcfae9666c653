use sea_orm_migration::prelude::*;

mod m001_create_research;
mod m002_create_submissions;
mod m003_create_grants;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_research::Migration),
            Box::new(m002_create_submissions::Migration),
            Box::new(m003_create_grants::Migration),
        ]
    }
}
