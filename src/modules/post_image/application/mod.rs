pub mod domain;
pub mod ports;
pub mod post_image_use_cases;
pub mod services;
