pub mod post_image_attacher;
