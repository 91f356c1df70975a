// Adaptive mock interview: difficulty ladder, per-user sessions,
// orchestration, and the fixed-topic practice flow.
// All generation goes through providers::ContentChain.

pub mod difficulty;
pub mod handlers;
pub mod practice;
pub mod service;
pub mod session;

pub use service::InterviewService;
