use async_trait::async_trait;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, Statement};
use std::sync::Arc;

use super::sea_orm_entity::posts::Model as PostModel;
use crate::post_image::application::{
    domain::entities::PostImageRecord,
    ports::outgoing::db::{
        ConditionalUpdateError, ImagesMutation, ImagesPrecondition, PostImageStore,
        PostImageUpdate,
    },
};

// ============================================================================
// Store Implementation (Production)
// ============================================================================

#[derive(Clone)]
pub struct PostImageStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl PostImageStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // =====================================================
    // SQL builders
    // =====================================================

    /// Upsert that only lands while `images` is NULL (or the row is missing).
    /// A conflicting row with images set makes the WHERE false and returns nothing.
    fn create_images_stmt(update: &PostImageUpdate, images: serde_json::Value) -> Statement {
        let sql = format!(
            r#"
            INSERT INTO "{table}" AS t (id, images, image, updated_date_time)
            VALUES ($1, $2::jsonb, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET images = EXCLUDED.images,
                image = COALESCE(EXCLUDED.image, t.image),
                updated_date_time = EXCLUDED.updated_date_time
            WHERE t.images IS NULL
            RETURNING id, images, image, updated_date_time
            "#,
            table = update.table
        );

        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            vec![
                update.post_id.clone().into(),
                images.into(),
                update.display_image.clone().into(),
                update.updated_date_time.into(),
            ],
        )
    }

    /// Guarded update that only lands while `images` is present.
    fn update_images_stmt(
        update: &PostImageUpdate,
        images: serde_json::Value,
        append: bool,
    ) -> Statement {
        let images_expr = if append {
            "images || $2::jsonb"
        } else {
            "$2::jsonb"
        };

        let sql = format!(
            r#"
            UPDATE "{table}"
            SET images = {images_expr},
                image = COALESCE($3, image),
                updated_date_time = $4
            WHERE id = $1
              AND images IS NOT NULL
            RETURNING id, images, image, updated_date_time
            "#,
            table = update.table,
            images_expr = images_expr
        );

        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            vec![
                update.post_id.clone().into(),
                images.into(),
                update.display_image.clone().into(),
                update.updated_date_time.into(),
            ],
        )
    }

    fn build_stmt(update: &PostImageUpdate) -> Statement {
        let (paths, append) = match &update.images {
            ImagesMutation::Initialize(paths) => (paths, false),
            ImagesMutation::Append(paths) => (paths, true),
        };
        let images = serde_json::Value::from(paths.clone());

        match update.precondition {
            // Nothing to append to yet, so both mutations write the list as given.
            ImagesPrecondition::ImagesNotExist => Self::create_images_stmt(update, images),
            ImagesPrecondition::ImagesExist => Self::update_images_stmt(update, images, append),
        }
    }

    // =====================================================
    // Mapping helpers
    // =====================================================

    fn map_db_err(e: DbErr) -> ConditionalUpdateError {
        ConditionalUpdateError::DatabaseError(e.to_string())
    }

    fn to_record(model: PostModel) -> Result<PostImageRecord, ConditionalUpdateError> {
        let images: Vec<String> = match model.images {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                ConditionalUpdateError::DatabaseError(format!("invalid images column: {}", e))
            })?,
            None => Vec::new(),
        };

        Ok(PostImageRecord {
            post_id: model.id,
            images,
            image: model.image,
            updated_date_time: model.updated_date_time.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl PostImageStore for PostImageStorePostgres {
    async fn conditional_update(
        &self,
        update: PostImageUpdate,
    ) -> Result<PostImageRecord, ConditionalUpdateError> {
        let stmt = Self::build_stmt(&update);

        let written = PostModel::find_by_statement(stmt)
            .one(self.db.as_ref())
            .await
            .map_err(Self::map_db_err)?;

        match written {
            Some(model) => Self::to_record(model),
            None => Err(ConditionalUpdateError::ConditionCheckFailed),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
