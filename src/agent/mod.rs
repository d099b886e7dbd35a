//! Session state and the dialogue turn pipeline.

pub mod closing;
pub mod prompts;
pub mod session;
pub mod turn;

pub use closing::ClosingSummarizer;
pub use session::{SEED_SUMMARY, SessionState, Speaker, Turn};
pub use turn::{TurnOrchestrator, TurnOutcome};
