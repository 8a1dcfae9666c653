use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResearchClaims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResearchClaims::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResearchClaims::ResearchId).integer().not_null())
                    .col(ColumnDef::new(ResearchClaims::FirstName).string().not_null())
                    .col(ColumnDef::new(ResearchClaims::LastName).string().not_null())
                    .col(ColumnDef::new(ResearchClaims::Email).string().not_null())
                    .col(ColumnDef::new(ResearchClaims::AmendedAmount).big_integer())
                    .col(ColumnDef::new(ResearchClaims::Asks).text())
                    .col(
                        ColumnDef::new(ResearchClaims::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_research_claims_research_id")
                            .from(ResearchClaims::Table, ResearchClaims::ResearchId)
                            .to(Research::Table, Research::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_research_claims_research_id")
                    .table(ResearchClaims::Table)
                    .col(ResearchClaims::ResearchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pledges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pledges::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pledges::ResearchId).integer().not_null())
                    .col(ColumnDef::new(Pledges::FirstName).string().not_null())
                    .col(ColumnDef::new(Pledges::LastName).string().not_null())
                    .col(ColumnDef::new(Pledges::Email).string().not_null())
                    .col(ColumnDef::new(Pledges::Amount).double())
                    .col(ColumnDef::new(Pledges::Tasks).text())
                    .col(ColumnDef::new(Pledges::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pledges_research_id")
                            .from(Pledges::Table, Pledges::ResearchId)
                            .to(Research::Table, Research::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pledges_research_id")
                    .table(Pledges::Table)
                    .col(Pledges::ResearchId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pledges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ResearchClaims::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ResearchClaims {
    Table,
    Id,
    ResearchId,
    FirstName,
    LastName,
    Email,
    AmendedAmount,
    Asks,
    CreatedAt,
}

#[derive(Iden)]
enum Pledges {
    Table,
    Id,
    ResearchId,
    FirstName,
    LastName,
    Email,
    Amount,
    Tasks,
    CreatedAt,
}

#[derive(Iden)]
enum Research {
    Table,
    Id,
}
