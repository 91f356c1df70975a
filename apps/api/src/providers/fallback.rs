//! Static last tier. Never fails, never touches the network.

use rand::seq::SliceRandom;

pub const FEEDBACK: &str = "Feedback is unavailable right now. \
    Compare your answer with the core definition of the concept, \
    add a concrete example, and try the next question.";

const INTERN: &[&str] = &[
    "What is the difference between a list and a tuple?",
    "Explain what a variable's scope means.",
    "What does HTTP stand for, and what is it used for?",
    "What is version control and why do teams use it?",
];

const JUNIOR: &[&str] = &[
    "What is the difference between a process and a thread?",
    "Explain what an index does in a relational database.",
    "How would you explain REST to a non-technical colleague?",
    "What is the difference between unit tests and integration tests?",
];

const MID: &[&str] = &[
    "How would you design a rate limiter for a public API?",
    "Explain the trade-offs between SQL and NoSQL databases.",
    "How do you find and fix a memory leak in a long-running service?",
    "What strategies do you use to keep a deployment backward compatible?",
];

const SENIOR: &[&str] = &[
    "How would you design a system that handles one million concurrent users?",
    "Describe how you would migrate a monolith to services without downtime.",
    "How do you decide between strong and eventual consistency?",
    "How would you structure on-call and incident review for a growing team?",
];

/// Question table for a level key. Unknown keys map to the intern table.
pub fn questions_for(level_key: &str) -> &'static [&'static str] {
    match level_key.trim().to_ascii_lowercase().as_str() {
        "junior" => JUNIOR,
        "mid" => MID,
        "senior" => SENIOR,
        _ => INTERN,
    }
}

/// Uniformly random question for the level.
pub fn question(level_key: &str) -> &'static str {
    let table = questions_for(level_key);
    table
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(INTERN[0])
}
