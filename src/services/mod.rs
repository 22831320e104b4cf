pub mod engine;
pub mod extraction;
pub mod metadata;
pub mod model_catalog;
pub mod prompt;
pub mod providers;

pub use engine::{GenerationSettings, RecommendationEngine};
pub use metadata::MetadataResolver;
