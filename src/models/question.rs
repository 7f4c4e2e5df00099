use std::fmt;

use serde::{Deserialize, Serialize};

/// Question type filter understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Multiple,
    Boolean,
}

impl QuestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Multiple => "multiple",
            QuestionKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

/// A single trivia item exactly as the provider delivers it.
///
/// `prompt` and the answers keep their HTML escaping; answers are compared in
/// that raw form and only decoded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub difficulty: Difficulty,
    pub category: String,
    #[serde(rename = "question")]
    pub prompt: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl Question {
    /// Every answer option, incorrect ones first, in provider order.
    pub fn options(&self) -> Vec<String> {
        let mut options = self.incorrect_answers.clone();
        options.push(self.correct_answer.clone());
        options
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[cfg(test)]
pub(crate) fn sample_questions(count: usize) -> Vec<Question> {
    (0..count)
        .map(|index| Question {
            kind: QuestionKind::Multiple,
            difficulty: Difficulty::Medium,
            category: "Science: Computers".to_string(),
            prompt: format!("Question number {}?", index + 1),
            correct_answer: format!("right {}", index),
            incorrect_answers: vec![
                format!("wrong a{}", index),
                format!("wrong b{}", index),
                format!("wrong c{}", index),
            ],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_record() {
        let json = r#"{
            "type": "multiple",
            "difficulty": "easy",
            "category": "Science: Computers",
            "question": "What does CPU stand for?",
            "correct_answer": "Central Processing Unit",
            "incorrect_answers": [
                "Central Process Unit",
                "Computer Personal Unit",
                "Central Processor Unit"
            ]
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.kind, QuestionKind::Multiple);
        assert_eq!(question.difficulty, Difficulty::Easy);
        assert_eq!(question.prompt, "What does CPU stand for?");
        assert_eq!(question.options().len(), 4);
        assert_eq!(question.options()[3], "Central Processing Unit");
        assert!(question.is_correct("Central Processing Unit"));
        assert!(!question.is_correct("Central Process Unit"));
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let json = r#"{
            "type": "boolean",
            "difficulty": "impossible",
            "category": "x",
            "question": "y",
            "correct_answer": "True",
            "incorrect_answers": ["False"]
        }"#;

        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
