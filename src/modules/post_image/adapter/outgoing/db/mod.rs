mod post_image_store_postgres;
pub mod sea_orm_entity;

pub use post_image_store_postgres::PostImageStorePostgres;
