//! LexiLoop — quality validation and result caching for vocabulary stories.
//!
//! Scores generated narrative text with a composite heuristic (vocabulary
//! coverage, readability, coherence, grammar) and caches accepted stories
//! under a fingerprint of their generation parameters, so identical
//! requests skip the external generator.

pub mod core;
pub mod schema;

pub use crate::core::cache::{build_cache_key, CacheKey, MemoryCache, ResultCache};
pub use crate::core::pipeline::{PipelineError, StoryPipeline};
pub use crate::core::validator::ContentValidator;
pub use crate::schema::score::{QualityIssue, ScoreBreakdown};
