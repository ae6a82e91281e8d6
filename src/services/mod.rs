// examGuard Core Services

pub mod text_processor;
pub mod config_store;
pub mod detection;
pub mod answer_loader;
pub mod answer_review;

pub use text_processor::*;
pub use config_store::*;
pub use answer_loader::{load_answer_text, AnswerFormat, LoadError};
pub use answer_review::{review_answer, review_session, summarize, usage_record};

pub use detection::{detect, Detector, DetectorOptions, VerdictThresholds};
