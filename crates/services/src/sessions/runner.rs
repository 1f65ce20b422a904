use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info};

use quiz_core::Clock;
use quiz_core::model::{Question, QuizSettings, QuizSummary};

use super::service::{CurrentQuestion, QuizSession, Resolution};
use crate::error::SessionError;
use crate::timer::{QuestionTimer, TimerSignal};

/// Event fed in by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizInput {
    Select(String),
    Exit,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEnd {
    Completed(QuizSummary),
    /// The player left, or the input channel closed, before the last question.
    Exited { score: u32, resolved: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// Question open, countdown running.
    Asking,
    /// Question resolved, correct answer on display.
    Revealing,
    Complete,
}

/// Everything the UI needs to redraw after a transition.
#[derive(Debug, Clone, Copy)]
pub struct QuizFrame<'a> {
    pub phase: FramePhase,
    pub index: usize,
    pub total: usize,
    pub question: Option<&'a Question>,
    /// Answer choices in display order.
    pub choices: &'a [String],
    pub remaining_seconds: u32,
    pub timer_low: bool,
    pub answered: bool,
    pub score: u32,
    pub resolution: Option<&'a Resolution>,
}

enum Flow {
    Continue,
    Exit,
}

/// Drives one session: serializes player picks and timer expiry onto the
/// session's single resolution point and reports every transition to `render`.
pub struct QuizRunner<R> {
    session: QuizSession,
    timer: QuestionTimer,
    settings: QuizSettings,
    clock: Clock,
    choices: Vec<String>,
    render: R,
}

impl<R> QuizRunner<R>
where
    R: FnMut(&QuizFrame<'_>),
{
    #[must_use]
    pub fn new(session: QuizSession, settings: QuizSettings, clock: Clock, render: R) -> Self {
        Self {
            session,
            timer: QuestionTimer::new(),
            settings,
            clock,
            choices: Vec::new(),
            render,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Play the session to the end or until the player exits.
    ///
    /// Selections that arrive after a question is already closed are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` only if the session state machine is driven out of
    /// order, which indicates a bug rather than a player action.
    pub async fn run(
        mut self,
        inputs: &mut mpsc::Receiver<QuizInput>,
    ) -> Result<QuizEnd, SessionError> {
        info!(
            session_id = %self.session.id(),
            category = %self.session.category(),
            total = self.session.total_questions(),
            "quiz started"
        );

        loop {
            let question = match self.session.current() {
                CurrentQuestion::Active { question, .. } => question,
                CurrentQuestion::Complete { .. } => break,
            };
            self.choices = question
                .shuffled_choices(&mut rand::rng())
                .into_iter()
                .map(str::to_owned)
                .collect();

            self.timer.arm(self.settings.time_budget_secs());
            self.emit(FramePhase::Asking);

            if let Flow::Exit = self.await_resolution(inputs).await? {
                return Ok(self.exit());
            }
            self.emit(FramePhase::Revealing);

            if let Flow::Exit = self.reveal_pause(inputs).await? {
                return Ok(self.exit());
            }
            self.session.advance(self.clock.now())?;
        }

        self.timer.cancel();
        let summary = self.session.summary()?;
        self.emit(FramePhase::Complete);
        info!(
            session_id = %summary.session_id(),
            score = summary.score(),
            total = summary.total(),
            tier = ?summary.tier(),
            "quiz completed"
        );
        Ok(QuizEnd::Completed(summary))
    }

    async fn await_resolution(
        &mut self,
        inputs: &mut mpsc::Receiver<QuizInput>,
    ) -> Result<Flow, SessionError> {
        loop {
            tokio::select! {
                biased;

                input = inputs.recv() => match input {
                    Some(QuizInput::Select(answer)) => {
                        if self.try_resolve(Some(&answer))? {
                            return Ok(Flow::Continue);
                        }
                    }
                    Some(QuizInput::Exit) | None => return Ok(Flow::Exit),
                },
                signal = self.timer.next_signal() => match signal {
                    TimerSignal::Tick { .. } => self.emit(FramePhase::Asking),
                    TimerSignal::Expired => {
                        if self.try_resolve(None)? {
                            return Ok(Flow::Continue);
                        }
                    }
                },
            }
        }
    }

    async fn reveal_pause(
        &mut self,
        inputs: &mut mpsc::Receiver<QuizInput>,
    ) -> Result<Flow, SessionError> {
        let pause = time::sleep(self.settings.reveal_delay());
        tokio::pin!(pause);

        loop {
            tokio::select! {
                biased;

                () = &mut pause => return Ok(Flow::Continue),
                input = inputs.recv() => match input {
                    Some(QuizInput::Select(answer)) => {
                        self.try_resolve(Some(&answer))?;
                    }
                    Some(QuizInput::Exit) | None => return Ok(Flow::Exit),
                },
            }
        }
    }

    /// Returns `Ok(false)` when the question was already closed.
    fn try_resolve(&mut self, selected: Option<&str>) -> Result<bool, SessionError> {
        let resolved = match self.session.resolve(selected) {
            Ok(resolution) => {
                debug!(
                    index = resolution.index,
                    cause = ?resolution.cause,
                    correct = resolution.outcome.is_correct,
                    "question resolved"
                );
                true
            }
            Err(SessionError::AlreadyAnswered) => false,
            Err(err) => return Err(err),
        };

        if resolved {
            self.timer.cancel();
        } else {
            debug!(
                index = self.session.current_index(),
                late_pick = selected.is_some(),
                "ignoring resolution of a closed question"
            );
        }
        Ok(resolved)
    }

    fn exit(mut self) -> QuizEnd {
        self.timer.cancel();
        let progress = self.session.progress();
        info!(
            session_id = %self.session.id(),
            score = progress.score,
            resolved = progress.resolved,
            "quiz exited"
        );
        QuizEnd::Exited {
            score: progress.score,
            resolved: progress.resolved,
        }
    }

    fn emit(&mut self, phase: FramePhase) {
        let (index, question) = match self.session.current() {
            CurrentQuestion::Active { index, question } => (index, Some(question)),
            CurrentQuestion::Complete { .. } => (self.session.total_questions(), None),
        };
        let answered = self.session.is_answered();
        let frame = QuizFrame {
            phase,
            index,
            total: self.session.total_questions(),
            question,
            choices: if question.is_some() {
                self.choices.as_slice()
            } else {
                &[]
            },
            remaining_seconds: self.timer.remaining(),
            timer_low: self.timer.is_low(),
            answered,
            score: self.session.score(),
            resolution: if answered || phase == FramePhase::Complete {
                self.session.last_resolution()
            } else {
                None
            },
        };
        (self.render)(&frame);
    }
}
