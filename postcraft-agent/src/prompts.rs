//! Personas and task templates for the two stages.
//!
//! The requirements listed here are advisory: nothing checks that the model
//! actually produced 150-200 words or 3-5 hashtags.

use crate::agent::{Agent, Task};

pub const WRITER_ROLE: &str = "LinkedIn Content Strategist";
pub const WRITER_GOAL: &str = "Create engaging, professional LinkedIn posts that drive engagement";
pub const WRITER_BACKSTORY: &str = "\
You are an expert LinkedIn content creator with years of experience crafting viral posts. \
You understand what makes content engaging: storytelling, hooks, personal insights, and \
clear value propositions. You write in a conversational yet professional tone.";

pub const EDITOR_ROLE: &str = "Content Editor";
pub const EDITOR_GOAL: &str = "Polish and optimize the content for maximum LinkedIn engagement";
pub const EDITOR_BACKSTORY: &str = "\
You are a meticulous editor who ensures every post is clear, impactful, and follows LinkedIn \
best practices. You add relevant hashtags, ensure proper formatting, and make the content \
scannable and engaging.";

const DRAFT_REQUIREMENTS: &str = "\
Requirements:
- Start with a strong hook that grabs attention
- Share a personal insight or story if relevant
- Provide 3-4 key takeaways or actionable tips
- Keep it between 150-200 words
- Use short paragraphs for readability
- End with a question to encourage engagement
- Write in a conversational, authentic tone";

const DRAFT_EXPECTED: &str = "A compelling LinkedIn post draft with all required elements";

const EDIT_DESCRIPTION: &str = "\
Review and optimize the LinkedIn post:

- Ensure the hook is attention-grabbing
- Add line breaks for better readability
- Add 3-5 relevant hashtags at the end
- Ensure it's engaging and professional
- Make sure the call-to-action question is clear
- Format it ready to copy-paste into LinkedIn";

const EDIT_EXPECTED: &str = "A polished, formatted LinkedIn post ready to publish";

/// Persona for the draft stage
pub fn writer() -> Agent {
    Agent::new(WRITER_ROLE, WRITER_GOAL, WRITER_BACKSTORY)
}

/// Persona for the edit stage
pub fn editor() -> Agent {
    Agent::new(EDITOR_ROLE, EDITOR_GOAL, EDITOR_BACKSTORY)
}

/// Draft task for a topic
pub fn draft_task(topic: &str) -> Task {
    Task::new(
        format!("Create an engaging LinkedIn post about: {}\n\n{}", topic, DRAFT_REQUIREMENTS),
        DRAFT_EXPECTED,
    )
}

/// Edit task; the draft arrives separately as prior output
pub fn edit_task() -> Task {
    Task::new(EDIT_DESCRIPTION, EDIT_EXPECTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_task_embeds_topic() {
        let task = draft_task("Remote work productivity");
        assert!(task
            .description
            .starts_with("Create an engaging LinkedIn post about: Remote work productivity"));
        assert!(task.description.contains("150-200 words"));
        assert!(task.description.contains("3-4 key takeaways"));
        assert_eq!(task.expected_output, DRAFT_EXPECTED);
    }

    #[test]
    fn test_edit_task_asks_for_hashtags_and_cta() {
        let text = edit_task().instructions();
        assert!(text.contains("3-5 relevant hashtags"));
        assert!(text.contains("call-to-action"));
        assert!(text.contains(EDIT_EXPECTED));
    }

    #[test]
    fn test_personas() {
        assert_eq!(writer().role, WRITER_ROLE);
        assert_eq!(editor().role, EDITOR_ROLE);
        assert!(editor().system_prompt().contains("hashtags"));
    }
}
