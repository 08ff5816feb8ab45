pub mod post_image_config;
