// Prompt for the free-form chat assistant. Unlike the advisory prompts this
// asks for plain text, since the reply is shown verbatim in the transcript.

use crate::llm_client::prompts::render_template;
use crate::llm_client::Prompt;

pub const CHAT_PERSONA: &str = "You are a friendly, knowledgeable study-abroad advisor. \
    You help students with university choices, applications, scholarships, visas, \
    and life as an international student. Answer in plain conversational text, \
    at most three short paragraphs. If you are unsure about a rule that changes \
    often (visa policy, fees, deadlines), say so and point the student to the \
    official source.";

/// Replace: {persona}, {message}
pub const CHAT_PROMPT_TEMPLATE: &str = "{persona}\n\nStudent: {message}\nAdvisor:";

pub fn chat_prompt(message: &str) -> Prompt {
    Prompt::new(render_template(
        CHAT_PROMPT_TEMPLATE,
        &[("persona", CHAT_PERSONA), ("message", message.trim())],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_prompt_embeds_message_after_persona() {
        let prompt = chat_prompt("  How do I get an F-1 visa?  ");
        assert!(prompt.as_str().starts_with(CHAT_PERSONA));
        assert!(prompt
            .as_str()
            .ends_with("Student: How do I get an F-1 visa?\nAdvisor:"));
    }
}
