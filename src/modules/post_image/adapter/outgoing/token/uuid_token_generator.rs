use uuid::Uuid;

use crate::post_image::application::ports::outgoing::token::TokenGenerator;

/// Random v4 UUID in simple (dash-free) form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenGenerator;

impl UuidTokenGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
