//! Migration: Create the singleton onboarding configuration table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OnboardingConfig::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OnboardingConfig::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OnboardingConfig::Step2).json_binary().not_null())
                    .col(ColumnDef::new(OnboardingConfig::Step3).json_binary().not_null())
                    .col(
                        ColumnDef::new(OnboardingConfig::Version)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(OnboardingConfig::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OnboardingConfig::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OnboardingConfig {
    Table,
    Id,
    #[iden = "step2"]
    Step2,
    #[iden = "step3"]
    Step3,
    Version,
    UpdatedAt,
}
