use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sources::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sources::Name).string().not_null())
                    .col(ColumnDef::new(Sources::Description).text())
                    .col(ColumnDef::new(Sources::Category).integer().not_null())
                    .col(ColumnDef::new(Sources::Regex).string())
                    .col(ColumnDef::new(Sources::Path).string())
                    .col(ColumnDef::new(Sources::Host).string())
                    .col(ColumnDef::new(Sources::Port).integer())
                    .col(ColumnDef::new(Sources::Username).string())
                    .col(ColumnDef::new(Sources::Password).string())
                    .col(ColumnDef::new(Sources::ZipFile).string())
                    .col(ColumnDef::new(Sources::Url).string())
                    .col(
                        ColumnDef::new(Sources::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sources::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sources_category")
                    .table(Sources::Table)
                    .col(Sources::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Commands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Commands::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Commands::Name).string().not_null())
                    .col(ColumnDef::new(Commands::Description).text())
                    .col(
                        ColumnDef::new(Commands::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Commands::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommandSources::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CommandSources::CommandId).integer().not_null())
                    .col(ColumnDef::new(CommandSources::SourceId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CommandSources::CommandId)
                            .col(CommandSources::SourceId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_command_sources_source_id")
                    .table(CommandSources::Table)
                    .col(CommandSources::SourceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Arguments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Arguments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Arguments::CommandId).integer().not_null())
                    .col(ColumnDef::new(Arguments::Name).string().not_null())
                    .col(ColumnDef::new(Arguments::Description).text())
                    .col(
                        ColumnDef::new(Arguments::NeedsValue)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_arguments_command_id")
                    .table(Arguments::Table)
                    .col(Arguments::CommandId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Arguments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommandSources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Commands::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sources::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sources {
    Table,
    Id,
    Name,
    Description,
    Category,
    Regex,
    Path,
    Host,
    Port,
    Username,
    Password,
    ZipFile,
    Url,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Commands {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CommandSources {
    Table,
    CommandId,
    SourceId,
}

#[derive(DeriveIden)]
enum Arguments {
    Table,
    Id,
    CommandId,
    Name,
    Description,
    NeedsValue,
}
