use serde::{Deserialize, Serialize};

/// Learner level on a 1–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Difficulty(pub u8);

impl Difficulty {
    /// Human-readable level used in prompts (e.g., "elementary").
    ///
    /// Levels outside 1–5 fall back to "intermediate".
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "beginner",
            2 => "elementary",
            3 => "intermediate",
            4 => "upper-intermediate",
            5 => "advanced",
            _ => "intermediate",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(1)
    }
}

/// The kind of story requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryType {
    #[default]
    General,
    Adventure,
    DailyLife,
    Science,
    History,
}

impl StoryType {
    pub const ALL: [StoryType; 5] = [
        Self::General,
        Self::Adventure,
        Self::DailyLife,
        Self::Science,
        Self::History,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Adventure => "adventure",
            Self::DailyLife => "daily_life",
            Self::Science => "science",
            Self::History => "history",
        }
    }

    /// Lenient parse; unknown names map to `General`.
    pub fn parse(s: &str) -> StoryType {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .unwrap_or_default()
    }
}

/// A request to generate a story around a vocabulary list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRequest {
    pub vocabulary: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub story_type: StoryType,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

/// Target story length, in words, when a request names none.
pub const DEFAULT_MAX_LENGTH: usize = 800;

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl StoryRequest {
    pub fn new(vocabulary: &[&str], difficulty: Difficulty, story_type: StoryType) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|w| w.to_string()).collect(),
            difficulty,
            story_type,
            max_length: default_max_length(),
        }
    }
}

/// A generated story. This is the payload stored in the result cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub content: String,
    pub vocabulary_used: Vec<String>,
    pub word_count: usize,
    pub difficulty: Difficulty,
    pub story_type: StoryType,
    pub cache_key: String,
    /// Unix timestamp, seconds.
    pub created_at: u64,
}

impl Story {
    /// Build a story record from generated content.
    ///
    /// `vocabulary_used` keeps the requested words found anywhere in the
    /// content, case-insensitively.
    pub fn from_content(
        content: String,
        request: &StoryRequest,
        cache_key: String,
        created_at: u64,
    ) -> Story {
        let lower = content.to_lowercase();
        let vocabulary_used = request
            .vocabulary
            .iter()
            .filter(|w| lower.contains(&w.to_lowercase()))
            .cloned()
            .collect();
        let word_count = content.split_whitespace().count();

        Story {
            content,
            vocabulary_used,
            word_count,
            difficulty: request.difficulty,
            story_type: request.story_type,
            cache_key,
            created_at,
        }
    }
}

/// What the pipeline hands back to its caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryResponse {
    pub story: Story,
    pub quality_score: f64,
    pub audio_url: Option<String>,
    /// True when the story came from the result cache.
    pub cached: bool,
}
