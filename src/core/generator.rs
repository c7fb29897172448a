/// Story text generation — the provider seam and an offline generator.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

use crate::core::prompt::Prompt;
use crate::schema::story::{StoryRequest, StoryType};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("provider timed out")]
    Timeout,
    #[error("provider returned no text")]
    EmptyOutput,
}

/// An external text-generation provider: prompt in, story text out.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &Prompt, request: &StoryRequest) -> Result<String, GeneratorError>;
}

/// Offline generator that stitches the vocabulary into stock sentences.
///
/// Output is deterministic per seed and call order.
#[derive(Debug)]
pub struct TemplateGenerator {
    seed: u64,
    calls: AtomicU64,
}

impl TemplateGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            calls: AtomicU64::new(0),
        }
    }

    /// Compose a story for `request` with the given RNG.
    pub fn compose(&self, request: &StoryRequest, rng: &mut StdRng) -> String {
        let mut sentences: Vec<String> = Vec::new();

        if let Some(opening) = openings(request.story_type).choose(rng) {
            sentences.push(opening.to_string());
        }

        let mut frames: Vec<&str> = WORD_FRAMES.to_vec();
        frames.shuffle(rng);
        for (i, word) in request.vocabulary.iter().enumerate() {
            let frame = frames[i % frames.len()];
            sentences.push(frame.replace("{w}", word.trim()));
        }

        if let Some(closing) = CLOSINGS.choose(rng) {
            sentences.push(closing.to_string());
        }

        sentences.join(" ")
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TextGenerator for TemplateGenerator {
    fn generate(&self, _prompt: &Prompt, request: &StoryRequest) -> Result<String, GeneratorError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        // prime offset per call
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(call.wrapping_mul(7919)));
        let story = self.compose(request, &mut rng);
        if story.trim().is_empty() {
            return Err(GeneratorError::EmptyOutput);
        }
        Ok(story)
    }
}

fn openings(story_type: StoryType) -> &'static [&'static str] {
    match story_type {
        StoryType::General => &[
            "Once upon a time, there was a young student who loved to learn new words.",
            "On a quiet Sunday, a curious girl sat by the window with her notebook.",
        ],
        StoryType::Adventure => &[
            "The small team packed their bags and set out for the mountains at dawn.",
            "A map fell out of an old book, and the two friends decided to follow it.",
        ],
        StoryType::DailyLife => &[
            "Every morning, Mia walked to the bakery at the end of her street.",
            "Sam woke up early because the whole family had a busy day ahead.",
        ],
        StoryType::Science => &[
            "In a quiet laboratory, a careful scientist prepared a new experiment.",
            "The class gathered around the table to watch a simple test with water.",
        ],
        StoryType::History => &[
            "Long ago, a small village stood beside a wide and slow river.",
            "In the old city, a young scribe copied letters for the king every day.",
        ],
    }
}

const WORD_FRAMES: &[&str] = &[
    "First, she thought about {w} while the day slowly began.",
    "Then they talked about {w} and why it mattered so much.",
    "Later, everyone agreed that {w} was the key to the whole plan.",
    "After a short rest, he remembered {w} once again.",
    "Meanwhile, the word {w} kept coming back to her mind.",
    "Before long, this moment with {w} changed how they saw the world.",
    "Next, they wrote {w} on a card and read it out loud together.",
];

const CLOSINGS: &[&str] = &[
    "Finally, they smiled, knowing that tomorrow would bring even more chances to learn and grow.",
    "Finally, the day ended, and they felt proud of everything they had learned.",
];
