mod progress;
mod runner;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use runner::{FramePhase, QuizEnd, QuizFrame, QuizInput, QuizRunner};
pub use service::{CurrentQuestion, QuizSession, Resolution, ResolutionCause, Step};
pub use workflow::QuizLoopService;
