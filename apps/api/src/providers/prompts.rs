// Prompt templates for the interview flows.
// Every tier of the chain receives the same rendered prompt.

use crate::interview::difficulty::{Difficulty, Level};

pub const QUESTION_PROMPT: &str = "\
Generate one {difficulty} level interview question for a {level} {role} candidate. \
Keep it short and clear, and ask about a single concept. \
Return only the question text. Don't mention the prompt in the question.";

pub const FEEDBACK_PROMPT: &str = "\
As an interviewer for a {level} {role} position, \
give short constructive feedback on this answer: '{answer}'. \
If the answer is wrong, say clearly that it is incorrect, \
and also give the correct answer.";

pub const TOPIC_QUESTION_PROMPT: &str = "\
Generate one {difficulty} level {kind} very basic 3rd year engineering student type interview question \
focused on {topic} for a {role} role. \
Keep it short, clear, and beginner-friendly — avoid overly complex,vast or theoretical questions.\
Don't mention the prompt in the question.";

pub const TOPIC_FEEDBACK_PROMPT: &str = "\
As an interviewer for a {role} position, \
give short constructive feedback on this answer: '{answer}' \
and also give the correct answer.";

pub fn question_prompt(role: &str, level: Level, difficulty: Difficulty) -> String {
    QUESTION_PROMPT
        .replace("{difficulty}", difficulty.as_str())
        .replace("{level}", level.as_str())
        .replace("{role}", role)
}

pub fn feedback_prompt(role: &str, level: Level, answer: &str) -> String {
    FEEDBACK_PROMPT
        .replace("{level}", level.as_str())
        .replace("{role}", role)
        .replace("{answer}", answer)
}

pub fn topic_question_prompt(role: &str, kind: &str, topic: &str, difficulty: &str) -> String {
    TOPIC_QUESTION_PROMPT
        .replace("{difficulty}", difficulty)
        .replace("{kind}", kind)
        .replace("{topic}", topic)
        .replace("{role}", role)
}

pub fn topic_feedback_prompt(role: &str, answer: &str) -> String {
    TOPIC_FEEDBACK_PROMPT
        .replace("{role}", role)
        .replace("{answer}", answer)
}
