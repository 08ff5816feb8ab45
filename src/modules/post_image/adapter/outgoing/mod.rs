pub mod cloud_storage;
pub mod codec;
pub mod db;
pub mod token;
