use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// JSON array of public paths; NULL until the first image is attached.
    pub images: Option<Json>,

    /// Display image (thumbnail path).
    pub image: Option<String>,

    /// Epoch milliseconds of the last image write.
    pub updated_date_time: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
