/// Prompt construction for the external story generator.

use crate::schema::story::{StoryRequest, StoryType};

const SYSTEM_INSTRUCTION: &str = "You are a creative writing assistant specializing in \
educational content for English language learners. Write engaging, coherent stories \
that naturally incorporate vocabulary words.";

/// A chat-style prompt: a system instruction plus the user request.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Builds generation prompts from story requests.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, request: &StoryRequest) -> Prompt {
        let vocabulary = request.vocabulary.join(", ");
        let level = request.difficulty.label();
        let opening = opening_line(request.story_type, &vocabulary, level);

        let user = format!(
            "{opening}\n\n\
             Requirements:\n\
             1. Use ALL the vocabulary words naturally in the story context\n\
             2. Keep the story between 300-{max} words\n\
             3. Make sure the story is coherent and engaging\n\
             4. Adjust complexity to match {level} reading level\n\
             5. Each vocabulary word should appear at least once\n\
             6. Make the story self-contained with a clear beginning, middle, and end\n\n\
             Vocabulary words to include: {vocabulary}\n\n\
             Please write the story now:",
            max = request.max_length,
        );

        Prompt {
            system: SYSTEM_INSTRUCTION.to_string(),
            user,
        }
    }
}

fn opening_line(story_type: StoryType, vocabulary: &str, level: &str) -> String {
    match story_type {
        StoryType::General => format!(
            "Create an engaging short story that naturally incorporates these vocabulary \
             words: {vocabulary}. The story should be appropriate for {level} level learners."
        ),
        StoryType::Adventure => format!(
            "Write an exciting adventure story using these vocabulary words: {vocabulary}. \
             Make it engaging for {level} level English learners."
        ),
        StoryType::DailyLife => format!(
            "Create a realistic story about daily life that includes these vocabulary \
             words: {vocabulary}. Keep it suitable for {level} level students."
        ),
        StoryType::Science => format!(
            "Write an educational science-themed story incorporating these vocabulary \
             words: {vocabulary}. Make it accessible for {level} level learners."
        ),
        StoryType::History => format!(
            "Create an interesting historical story that uses these vocabulary words: \
             {vocabulary}. Ensure it's appropriate for {level} level students."
        ),
    }
}
