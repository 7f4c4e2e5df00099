mod question;
mod text;

pub use question::{Difficulty, Question, QuestionKind};
pub use text::decode_html;

#[cfg(test)]
pub(crate) use question::sample_questions;
