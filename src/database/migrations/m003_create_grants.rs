use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grants::Title).string().not_null())
                    .col(ColumnDef::new(Grants::ReleaseDate).string().not_null())
                    .col(ColumnDef::new(Grants::ExpiredDate).string().not_null())
                    .col(ColumnDef::new(Grants::ActivityCode).string().not_null())
                    .col(ColumnDef::new(Grants::ParentOrganization).string().not_null())
                    .col(ColumnDef::new(Grants::Organization).string().not_null())
                    .col(ColumnDef::new(Grants::ParticipatingOrgs).text().not_null())
                    .col(ColumnDef::new(Grants::DocumentNumber).string().not_null())
                    .col(ColumnDef::new(Grants::DocumentType).string().not_null())
                    .col(ColumnDef::new(Grants::ClinicalTrials).string().not_null())
                    .col(ColumnDef::new(Grants::Url).string().not_null())
                    .col(ColumnDef::new(Grants::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Grants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Grants {
    Table,
    Id,
    Title,
    ReleaseDate,
    ExpiredDate,
    ActivityCode,
    ParentOrganization,
    Organization,
    ParticipatingOrgs,
    DocumentNumber,
    DocumentType,
    ClinicalTrials,
    Url,
    CreatedAt,
}
