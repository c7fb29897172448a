/// The story pipeline: Request → cached or freshly generated, validated story.
///
/// Wires together cache probing, prompt building, generation with retries,
/// quality validation, cache write-back, and optional speech synthesis.

use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::core::cache::{build_cache_key, cache_get, cache_set, CacheKey, ResultCache};
use crate::core::config::{ConfigError, PipelineConfig, QualityConfig};
use crate::core::generator::{GeneratorError, TextGenerator};
use crate::core::prompt::PromptBuilder;
use crate::core::speech::SpeechSynthesizer;
use crate::core::validator::ContentValidator;
use crate::schema::score::ScoreBreakdown;
use crate::schema::story::{Story, StoryRequest, StoryResponse};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("vocabulary list cannot be empty")]
    EmptyVocabulary,
    #[error("too many vocabulary words: {count} (max {max})")]
    TooManyWords { count: usize, max: usize },
    #[error("generator error: {0}")]
    Generator(#[from] GeneratorError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("no text generator configured")]
    NoGenerator,
    #[error("generated content quality is insufficient: best score {score:.2} after {attempts} attempts")]
    QualityInsufficient { score: f64, attempts: u32 },
}

/// Story generation orchestrator. Built via `StoryPipeline::builder()`.
///
/// `generate` takes `&self` and may run concurrently. Identical requests
/// racing past an empty cache each generate their own story; the last
/// write-back wins.
pub struct StoryPipeline {
    validator: ContentValidator,
    prompts: PromptBuilder,
    generator: Arc<dyn TextGenerator>,
    cache: Option<Arc<dyn ResultCache>>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    config: PipelineConfig,
}

/// Builder for constructing a `StoryPipeline`.
#[derive(Default)]
pub struct StoryPipelineBuilder {
    quality_config_path: Option<String>,
    pipeline_config_path: Option<String>,
    /// Directly provided configs (for testing without files).
    quality_config: Option<QualityConfig>,
    pipeline_config: Option<PipelineConfig>,
    generator: Option<Arc<dyn TextGenerator>>,
    cache: Option<Arc<dyn ResultCache>>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
}

impl StoryPipeline {
    pub fn builder() -> StoryPipelineBuilder {
        StoryPipelineBuilder::default()
    }

    pub fn validator(&self) -> &ContentValidator {
        &self.validator
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Cache key for a request.
    pub fn cache_key(&self, request: &StoryRequest) -> CacheKey {
        build_cache_key(
            &request.vocabulary,
            request.difficulty.0,
            request.story_type.as_str(),
        )
    }

    /// Serve a story for `request`, from cache when possible.
    pub fn generate(&self, request: &StoryRequest) -> Result<StoryResponse, PipelineError> {
        self.check_request(request)?;
        let key = self.cache_key(request);

        if let Some(story) = self.cached_story(&key) {
            let breakdown = self.validator.score(&story.content, &request.vocabulary);
            if breakdown.is_valid {
                tracing::info!(%key, "story served from cache");
                let audio_url = self.synthesize(&story.content);
                return Ok(StoryResponse {
                    story,
                    quality_score: breakdown.composite,
                    audio_url,
                    cached: true,
                });
            }
            tracing::info!(%key, score = breakdown.composite, "cached story no longer passes validation");
        }

        tracing::info!(vocabulary = ?request.vocabulary, "generating new story");
        let prompt = self.prompts.build(request);
        let max_attempts = self.config.max_attempts.max(1);
        let mut best_score = 0.0f64;

        for attempt in 1..=max_attempts {
            let content = self.generator.generate(&prompt, request)?;
            let content = content.trim().to_string();
            let breakdown = self.validator.score(&content, &request.vocabulary);

            if breakdown.is_valid {
                let story = Story::from_content(content, request, key.to_string(), unix_now());
                self.store(&key, &story);
                let audio_url = self.synthesize(&story.content);
                return Ok(StoryResponse {
                    story,
                    quality_score: breakdown.composite,
                    audio_url,
                    cached: false,
                });
            }

            log_rejection(attempt, max_attempts, &breakdown);
            best_score = best_score.max(breakdown.composite);
        }

        Err(PipelineError::QualityInsufficient {
            score: best_score,
            attempts: max_attempts,
        })
    }

    /// Accept/reject decision and composite score for arbitrary text.
    pub fn validate<S: AsRef<str>>(&self, text: &str, vocabulary: &[S]) -> (bool, f64) {
        self.validator.validate(text, vocabulary)
    }

    fn check_request(&self, request: &StoryRequest) -> Result<(), PipelineError> {
        if request.vocabulary.is_empty() {
            return Err(PipelineError::EmptyVocabulary);
        }
        if request.vocabulary.len() > self.config.max_vocabulary {
            return Err(PipelineError::TooManyWords {
                count: request.vocabulary.len(),
                max: self.config.max_vocabulary,
            });
        }
        Ok(())
    }

    fn cached_story(&self, key: &CacheKey) -> Option<Story> {
        let cache = self.cache.as_deref()?;
        cache_get(cache, key)
    }

    fn store(&self, key: &CacheKey, story: &Story) {
        let Some(cache) = self.cache.as_deref() else {
            return;
        };
        if cache_set(cache, key, story, self.config.cache_ttl()) {
            tracing::debug!(%key, "story cached");
        }
    }

    fn synthesize(&self, text: &str) -> Option<String> {
        let speech = self.speech.as_deref()?;
        match speech.synthesize(text) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("audio generation failed: {}", e);
                None
            }
        }
    }
}

fn log_rejection(attempt: u32, max_attempts: u32, breakdown: &ScoreBreakdown) {
    tracing::info!(
        attempt,
        max_attempts,
        score = breakdown.composite,
        issues = ?breakdown.issue_tags(),
        "generated story rejected"
    );
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl StoryPipelineBuilder {
    pub fn quality_config(mut self, path: &str) -> Self {
        self.quality_config_path = Some(path.to_string());
        self
    }

    pub fn pipeline_config(mut self, path: &str) -> Self {
        self.pipeline_config_path = Some(path.to_string());
        self
    }

    /// Provide the quality config directly (for testing without files).
    pub fn with_quality_config(mut self, config: QualityConfig) -> Self {
        self.quality_config = Some(config);
        self
    }

    /// Provide the pipeline config directly (for testing without files).
    pub fn with_pipeline_config(mut self, config: PipelineConfig) -> Self {
        self.pipeline_config = Some(config);
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn build(self) -> Result<StoryPipeline, PipelineError> {
        let generator = self.generator.ok_or(PipelineError::NoGenerator)?;

        // Files override directly provided configs
        let quality = match self.quality_config_path {
            Some(ref path) => QualityConfig::load_from_ron(Path::new(path))?,
            None => self.quality_config.unwrap_or_default(),
        };
        let config = match self.pipeline_config_path {
            Some(ref path) => PipelineConfig::load_from_ron(Path::new(path))?,
            None => self.pipeline_config.unwrap_or_default(),
        };

        if self.cache.is_none() {
            tracing::info!("no result cache configured, every request will generate");
        }

        Ok(StoryPipeline {
            validator: ContentValidator::new(quality),
            prompts: PromptBuilder::new(),
            generator,
            cache: self.cache,
            speech: self.speech,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::MemoryCache;
    use crate::core::generator::TemplateGenerator;
    use crate::core::prompt::Prompt;
    use crate::schema::story::{Difficulty, StoryType};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FixedGenerator {
        text: String,
        calls: AtomicU32,
    }

    impl FixedGenerator {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                calls: AtomicU32::new(0),
            }
        }
    }

    impl TextGenerator for FixedGenerator {
        fn generate(&self, _prompt: &Prompt, _request: &StoryRequest) -> Result<String, GeneratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    fn build_test_pipeline(generator: Arc<dyn TextGenerator>) -> StoryPipeline {
        StoryPipeline::builder()
            .with_generator(generator)
            .with_cache(Arc::new(MemoryCache::new()))
            .build()
            .unwrap()
    }

    fn adventure_request() -> StoryRequest {
        StoryRequest::new(
            &["adventure", "mysterious", "explore", "discover"],
            Difficulty(2),
            StoryType::Adventure,
        )
    }

    #[test]
    fn builder_requires_generator() {
        assert!(matches!(
            StoryPipeline::builder().build(),
            Err(PipelineError::NoGenerator)
        ));
    }

    #[test]
    fn builder_uses_default_configs() {
        let pipeline = build_test_pipeline(Arc::new(TemplateGenerator::new(1)));
        assert_eq!(pipeline.config().max_attempts, 3);
        assert_eq!(pipeline.validator().config(), &QualityConfig::default());
    }

    #[test]
    fn generate_produces_valid_story() {
        let pipeline = build_test_pipeline(Arc::new(TemplateGenerator::new(42)));
        let response = pipeline.generate(&adventure_request()).unwrap();
        assert!(!response.cached);
        assert!(response.quality_score >= 0.70);
        assert_eq!(response.story.vocabulary_used.len(), 4);
        assert_eq!(response.story.cache_key.len(), 64);
        assert!(response.audio_url.is_none());
    }

    #[test]
    fn second_request_hits_cache() {
        let generator = Arc::new(TemplateGenerator::new(42));
        let pipeline = build_test_pipeline(generator);
        let first = pipeline.generate(&adventure_request()).unwrap();

        let mut shuffled = adventure_request();
        shuffled.vocabulary.reverse();
        let second = pipeline.generate(&shuffled).unwrap();

        assert!(second.cached);
        assert_eq!(first.story, second.story);
    }

    #[test]
    fn rejected_text_retries_then_fails() {
        let generator = Arc::new(FixedGenerator::new("too short"));
        let pipeline = build_test_pipeline(generator.clone());
        let err = pipeline.generate(&adventure_request()).unwrap_err();
        assert!(matches!(err, PipelineError::QualityInsufficient { attempts: 3, .. }));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn empty_vocabulary_rejected() {
        let pipeline = build_test_pipeline(Arc::new(TemplateGenerator::new(1)));
        let request = StoryRequest::new(&[], Difficulty(1), StoryType::General);
        assert!(matches!(
            pipeline.generate(&request),
            Err(PipelineError::EmptyVocabulary)
        ));
    }

    #[test]
    fn oversized_vocabulary_rejected() {
        let pipeline = build_test_pipeline(Arc::new(TemplateGenerator::new(1)));
        let words: Vec<String> = (0..21).map(|i| format!("w{}", i)).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let request = StoryRequest::new(&refs, Difficulty(1), StoryType::General);
        assert!(matches!(
            pipeline.generate(&request),
            Err(PipelineError::TooManyWords { count: 21, max: 20 })
        ));
    }

    #[test]
    fn cache_key_matches_request_fields() {
        let pipeline = build_test_pipeline(Arc::new(TemplateGenerator::new(1)));
        let request = adventure_request();
        assert_eq!(
            pipeline.cache_key(&request),
            build_cache_key(&request.vocabulary, 2, "adventure")
        );
    }
}
