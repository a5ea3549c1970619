use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Servers
        manager
            .create_table(
                Table::create()
                    .table(Parameters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parameters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parameters::Name).string().not_null())
                    .col(ColumnDef::new(Parameters::Category).integer().not_null())
                    .col(ColumnDef::new(Parameters::Description).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TemplateServers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemplateServers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TemplateServers::Name).string().not_null())
                    .col(ColumnDef::new(TemplateServers::Description).text())
                    .col(ColumnDef::new(TemplateServers::Category).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TemplateServerParameters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemplateServerParameters::TemplateServerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateServerParameters::ParameterId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TemplateServerParameters::TemplateServerId)
                            .col(TemplateServerParameters::ParameterId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServerProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServerProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServerProfiles::Name).string().not_null())
                    .col(ColumnDef::new(ServerProfiles::Description).text())
                    .col(ColumnDef::new(ServerProfiles::TemplateId).integer().not_null())
                    .col(ColumnDef::new(ServerProfiles::Config).json().not_null())
                    .to_owned(),
            )
            .await?;

        // Testing
        manager
            .create_table(
                Table::create()
                    .table(Keywords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Keywords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Keywords::UserId).integer().not_null())
                    .col(ColumnDef::new(Keywords::Name).string().not_null())
                    .col(ColumnDef::new(Keywords::Description).text())
                    .col(ColumnDef::new(Keywords::Script).json().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Collections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Collections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Collections::Name).string().not_null())
                    .col(ColumnDef::new(Collections::Description).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollectionKeywords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectionKeywords::CollectionId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionKeywords::KeywordId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CollectionKeywords::CollectionId)
                            .col(CollectionKeywords::KeywordId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CollectionKeywords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Collections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Keywords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServerProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TemplateServerParameters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TemplateServers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parameters::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Parameters {
    Table,
    Id,
    Name,
    Category,
    Description,
}

#[derive(DeriveIden)]
enum TemplateServers {
    Table,
    Id,
    Name,
    Description,
    Category,
}

#[derive(DeriveIden)]
enum TemplateServerParameters {
    Table,
    TemplateServerId,
    ParameterId,
}

#[derive(DeriveIden)]
enum ServerProfiles {
    Table,
    Id,
    Name,
    Description,
    TemplateId,
    Config,
}

#[derive(DeriveIden)]
enum Keywords {
    Table,
    Id,
    UserId,
    Name,
    Description,
    Script,
}

#[derive(DeriveIden)]
enum Collections {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum CollectionKeywords {
    Table,
    CollectionId,
    KeywordId,
}
