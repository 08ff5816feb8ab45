use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create posts table
        // =====================================================
        // `images` stays NULL until the first image is attached.
        // The attach flow relies on NULL vs NOT NULL as its precondition.
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Posts::Images).json_binary().null())
                    .col(ColumnDef::new(Posts::Image).text().null())
                    .col(ColumnDef::new(Posts::UpdatedDateTime).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // Guard against anything other than a JSON array landing in images
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE posts
                ADD CONSTRAINT chk_posts_images_is_array
                CHECK (images IS NULL OR jsonb_typeof(images) = 'array');
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Images,
    Image,
    UpdatedDateTime,
}
