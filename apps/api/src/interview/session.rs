use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::interview::difficulty::{Difficulty, Level};

/// One question and the answer given to it (empty until submitted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

/// In-memory state of an interview in progress. Not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSession {
    pub role: String,
    pub level: Level,
    pub difficulty: Difficulty,
    pub round: u32,
    pub history: Vec<Exchange>,
}

impl InterviewSession {
    pub fn new(role: String, level: Level) -> Self {
        Self {
            role,
            level,
            difficulty: Difficulty::LOWEST,
            round: 1,
            history: Vec::new(),
        }
    }

    pub fn push_question(&mut self, question: String) {
        self.history.push(Exchange {
            question,
            answer: String::new(),
        });
    }

    /// Records the answer on the open exchange. Returns `false` if there is none.
    pub fn answer_current(&mut self, answer: &str) -> bool {
        match self.history.last_mut() {
            Some(exchange) => {
                exchange.answer = answer.to_string();
                true
            }
            None => false,
        }
    }
}

/// Shared handle to one user's session. Holding the lock serializes that user's requests.
pub type SessionHandle = Arc<Mutex<InterviewSession>>;

/// Per-user session storage.
pub trait SessionStore: Send + Sync {
    fn get(&self, user: &str) -> Option<SessionHandle>;

    /// Installs a session, replacing any previous one for the user.
    fn put(&self, user: &str, session: InterviewSession) -> SessionHandle;

    fn delete(&self, user: &str) -> Option<SessionHandle>;
}

/// Process-wide store; sessions live until overwritten or process exit.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionHandle>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user: &str) -> Option<SessionHandle> {
        self.sessions.get(user).map(|entry| Arc::clone(entry.value()))
    }

    fn put(&self, user: &str, session: InterviewSession) -> SessionHandle {
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(user.to_string(), Arc::clone(&handle));
        handle
    }

    fn delete(&self, user: &str) -> Option<SessionHandle> {
        self.sessions.remove(user).map(|(_, handle)| handle)
    }
}
