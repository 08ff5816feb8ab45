pub mod post_image;
