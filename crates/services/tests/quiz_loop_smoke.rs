use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{Category, Difficulty, Question, QuestionDraft, QuizSettingsDraft};
use quiz_core::scorer::ScoreTier;
use quiz_core::time::fixed_now;
use services::{
    Clock, FramePhase, InMemorySource, QuestionSource, QuizEnd, QuizFrame, QuizInput,
    QuizLoopService, SourceError, fallback_questions,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("QUIZ_LOG").unwrap_or_else(|_| "warn".into()))
        .with_test_writer()
        .try_init();
}

struct OfflineSource;

#[async_trait]
impl QuestionSource for OfflineSource {
    async fn fetch(
        &self,
        _category: &Category,
        _difficulty: Difficulty,
        _count: usize,
    ) -> Result<Vec<Question>, SourceError> {
        Err(SourceError::NoResults(1))
    }
}

fn numbered(n: usize) -> Question {
    QuestionDraft::new(
        format!("Question {n}"),
        format!("right {n}"),
        [format!("wrong {n}a"), format!("wrong {n}b"), format!("wrong {n}c")],
    )
    .validate()
    .unwrap()
}

#[tokio::test]
async fn offline_source_starts_session_with_fallback_set() {
    init_tracing();
    let settings = QuizSettingsDraft::default().validate().unwrap();
    let service = QuizLoopService::new(Clock::fixed(fixed_now()), settings, Arc::new(OfflineSource));
    let category = Category::find("History").unwrap();

    let session = service.start_session(&category).await.unwrap();

    assert_eq!(session.total_questions(), 10);
    assert_eq!(session.score(), 0);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.category(), &category);
    let fallback = fallback_questions(10);
    let services::CurrentQuestion::Active { question, .. } = session.current() else {
        panic!("fresh session has a current question");
    };
    assert!(fallback.contains(question));
}

#[tokio::test(start_paused = true)]
async fn six_of_ten_correct_ends_with_good_tier() {
    init_tracing();
    let settings = QuizSettingsDraft::default().validate().unwrap();
    let source = InMemorySource::new((0..10).map(numbered).collect());
    let service = QuizLoopService::new(Clock::fixed(fixed_now()), settings, Arc::new(source));
    let category = Category::find("General Knowledge").unwrap();

    let (tx, mut rx) = mpsc::channel(4);
    let mut answered = 0_usize;
    let mut completed_frames = 0_usize;
    let render = |frame: &QuizFrame<'_>| match frame.phase {
        FramePhase::Asking if !frame.answered && frame.remaining_seconds == 30 => {
            let question = frame.question.unwrap();
            let pick = if answered < 6 {
                question.correct_answer().to_string()
            } else {
                question.distractors()[0].clone()
            };
            answered += 1;
            tx.try_send(QuizInput::Select(pick)).unwrap();
        }
        FramePhase::Complete => completed_frames += 1,
        _ => {}
    };

    let end = service.play(&category, &mut rx, render).await.unwrap();

    let QuizEnd::Completed(summary) = end else {
        panic!("expected completion, got {end:?}");
    };
    assert_eq!(summary.score(), 6);
    assert_eq!(summary.total(), 10);
    assert!((summary.percentage() - 60.0).abs() < f64::EPSILON);
    assert_eq!(summary.tier(), ScoreTier::Good);
    assert_eq!(summary.category(), &category);
    assert_eq!(answered, 10);
    assert_eq!(completed_frames, 1);
}

#[tokio::test(start_paused = true)]
async fn play_again_starts_fresh_session() {
    init_tracing();
    let settings = QuizSettingsDraft {
        question_count: Some(2),
        time_budget_secs: Some(1),
        ..QuizSettingsDraft::default()
    }
    .validate()
    .unwrap();
    let source = InMemorySource::new((0..2).map(numbered).collect());
    let service = QuizLoopService::new(Clock::fixed(fixed_now()), settings, Arc::new(source));
    let category = Category::find("Sports").unwrap();

    let (_tx, mut rx) = mpsc::channel(1);
    let first = service
        .play(&category, &mut rx, |_: &QuizFrame<'_>| {})
        .await
        .unwrap();
    let QuizEnd::Completed(first) = first else {
        panic!("expected completion, got {first:?}");
    };
    assert_eq!(first.score(), 0);

    let again = service.start_session(&category).await.unwrap();
    assert_ne!(again.id(), first.session_id());
    assert_eq!(again.score(), 0);
    assert_eq!(again.total_questions(), 2);
}
