mod category;
mod ids;
mod question;
mod session;
mod settings;

pub use category::{Category, Difficulty, ParseDifficultyError};
pub use ids::{CategoryId, ParseIdError, SessionId};
pub use question::{CHOICE_COUNT, DISTRACTOR_COUNT, Question, QuestionDraft, QuestionError};
pub use session::{QuizSummary, SummaryError};
pub use settings::{QuizSettings, QuizSettingsDraft, SettingsError};
