#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod sessions;
pub mod sources;
pub mod timer;

pub use quiz_core::Clock;

pub use error::{ConfigError, SessionError, SourceError};
pub use sessions::{
    CurrentQuestion, FramePhase, QuizEnd, QuizFrame, QuizInput, QuizLoopService, QuizRunner,
    QuizSession, Resolution, ResolutionCause, SessionProgress, Step,
};
pub use sources::{
    InMemorySource, OpenTdbSource, QuestionProvider, QuestionSource, fallback_questions,
};
pub use timer::{Countdown, QuestionTimer, TimerSignal};
