/// Source of collision-resistant tokens used in asset keys.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}
