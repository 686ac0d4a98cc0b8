use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Places::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Places::Name).string().not_null())
                    .col(ColumnDef::new(Places::Description).text().null())
                    .col(ColumnDef::new(Places::AddressLine).string().null())
                    .col(ColumnDef::new(Places::City).string().null())
                    .col(ColumnDef::new(Places::State).string().null())
                    .col(ColumnDef::new(Places::PostalCode).string().null())
                    .col(ColumnDef::new(Places::Country).string().null())
                    .col(ColumnDef::new(Places::Latitude).double().null())
                    .col(ColumnDef::new(Places::Longitude).double().null())
                    .col(ColumnDef::new(Places::AuthorId).integer().not_null())
                    .col(ColumnDef::new(Places::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Places::UpdatedAt).string().not_null())
                    .col(ColumnDef::new(Places::DeletedAt).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_places_created_at")
                    .table(Places::Table)
                    .col(Places::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_places_author_id")
                    .table(Places::Table)
                    .col(Places::AuthorId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_places_deleted_at")
                    .table(Places::Table)
                    .col(Places::DeletedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Places {
    Table,
    Id,
    Name,
    Description,
    AddressLine,
    City,
    State,
    PostalCode,
    Country,
    Latitude,
    Longitude,
    AuthorId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
