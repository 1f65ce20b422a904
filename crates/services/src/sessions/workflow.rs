use std::sync::Arc;

use tokio::sync::mpsc;

use quiz_core::Clock;
use quiz_core::model::{Category, QuizSettings};

use super::runner::{QuizEnd, QuizFrame, QuizInput, QuizRunner};
use super::service::QuizSession;
use crate::error::{SessionError, SourceError};
use crate::sources::{OpenTdbSource, QuestionProvider, QuestionSource};

/// Orchestrates question loading, session start and running a session.
#[derive(Clone, Debug)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    provider: QuestionProvider,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, settings: QuizSettings, source: Arc<dyn QuestionSource>) -> Self {
        let count = usize::try_from(settings.question_count()).unwrap_or(usize::MAX);
        let provider = QuestionProvider::new(source, settings.difficulty(), count);
        Self {
            clock,
            settings,
            provider,
        }
    }

    /// Build a service backed by the Open Trivia DB.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the HTTP client cannot be constructed.
    pub fn open_tdb(clock: Clock, settings: QuizSettings) -> Result<Self, SourceError> {
        let source = OpenTdbSource::new(&settings)?;
        Ok(Self::new(clock, settings, Arc::new(source)))
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Start a new session for `category`. Also used for "play again".
    ///
    /// Source failures never surface here: the fallback set is used instead.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionSet` if no questions could be assembled.
    pub async fn start_session(&self, category: &Category) -> Result<QuizSession, SessionError> {
        let questions = self.provider.load(category).await;
        QuizSession::start(category.clone(), questions, self.clock.now())
    }

    /// Wrap a started session in a runner that reports frames to `render`.
    pub fn runner<R>(&self, session: QuizSession, render: R) -> QuizRunner<R>
    where
        R: FnMut(&QuizFrame<'_>),
    {
        QuizRunner::new(session, self.settings.clone(), self.clock, render)
    }

    /// Start and play a full session for `category`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session cannot start.
    pub async fn play<R>(
        &self,
        category: &Category,
        inputs: &mut mpsc::Receiver<QuizInput>,
        render: R,
    ) -> Result<QuizEnd, SessionError>
    where
        R: FnMut(&QuizFrame<'_>),
    {
        let session = self.start_session(category).await?;
        self.runner(session, render).run(inputs).await
    }
}
