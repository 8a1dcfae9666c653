use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Research::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Research::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Research::AwardNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Research::Title).string().not_null())
                    .col(
                        ColumnDef::new(Research::TitleSearch)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Research::Abstract).text())
                    .col(ColumnDef::new(Research::PrincipalInvestigator).string())
                    .col(ColumnDef::new(Research::PiEmailAddress).string())
                    .col(
                        ColumnDef::new(Research::CoPiNames)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Research::Organization).string())
                    .col(ColumnDef::new(Research::OrganizationStreet).string())
                    .col(ColumnDef::new(Research::OrganizationCity).string())
                    .col(ColumnDef::new(Research::OrganizationState).string())
                    .col(ColumnDef::new(Research::OrganizationZip).string())
                    .col(ColumnDef::new(Research::OrganizationPhone).string())
                    .col(ColumnDef::new(Research::State).string())
                    .col(ColumnDef::new(Research::AwardInstrument).string())
                    .col(ColumnDef::new(Research::ProgramManager).string())
                    .col(ColumnDef::new(Research::AwardedAmountToDate).double())
                    .col(ColumnDef::new(Research::ArraAmount).double())
                    .col(ColumnDef::new(Research::StartDate).date())
                    .col(ColumnDef::new(Research::EndDate).date())
                    .col(ColumnDef::new(Research::LastAmendmentDate).date())
                    .col(ColumnDef::new(Research::NsfOrganization).string())
                    .col(ColumnDef::new(Research::NsfDirectorate).string())
                    .col(
                        ColumnDef::new(Research::Programs)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Research::ProgramElementCodes)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Research::ProgramReferenceCodes)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Research::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Filters on instrument and amount run on every table page
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_research_award_instrument")
                    .table(Research::Table)
                    .col(Research::AwardInstrument)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_research_awarded_amount")
                    .table(Research::Table)
                    .col(Research::AwardedAmountToDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Research::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Research {
    Table,
    Id,
    AwardNumber,
    Title,
    TitleSearch,
    Abstract,
    PrincipalInvestigator,
    PiEmailAddress,
    CoPiNames,
    Organization,
    OrganizationStreet,
    OrganizationCity,
    OrganizationState,
    OrganizationZip,
    OrganizationPhone,
    State,
    AwardInstrument,
    ProgramManager,
    AwardedAmountToDate,
    ArraAmount,
    StartDate,
    EndDate,
    LastAmendmentDate,
    NsfOrganization,
    NsfDirectorate,
    Programs,
    ProgramElementCodes,
    ProgramReferenceCodes,
    CreatedAt,
}
