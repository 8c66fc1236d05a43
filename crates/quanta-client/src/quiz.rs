//! Quiz questions and a single run through them.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty filter for `/quiz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    All,
}

impl QuizLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            QuizLevel::Beginner => "beginner",
            QuizLevel::Intermediate => "intermediate",
            QuizLevel::Advanced => "advanced",
            QuizLevel::All => "all",
        }
    }
}

impl fmt::Display for QuizLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(QuizLevel::Beginner),
            "intermediate" => Ok(QuizLevel::Intermediate),
            "advanced" => Ok(QuizLevel::Advanced),
            "all" => Ok(QuizLevel::All),
            other => Err(format!(
                "unknown level '{other}' (expected beginner, intermediate, advanced or all)"
            )),
        }
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Feedback for a selected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: usize,
}

/// One pass through a shuffled set of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<usize>,
    score: usize,
    finished: bool,
}

impl QuizSession {
    /// Start a run over `questions` in a random order.
    pub fn new<R: Rng + ?Sized>(mut questions: Vec<QuizQuestion>, rng: &mut R) -> Self {
        questions.shuffle(rng);
        Self {
            finished: questions.is_empty(),
            questions,
            current: 0,
            selected: None,
            score: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// 0-based position of the current question.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The question being asked, if the run is not over.
    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.finished {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    /// The answer chosen for the current question.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Answer the current question.
    ///
    /// Only the first selection counts; later calls, out-of-range options
    /// and calls after the run ended return `None`.
    pub fn select_answer(&mut self, option: usize) -> Option<AnswerFeedback> {
        if self.selected.is_some() {
            return None;
        }
        let question = self.current()?;
        if option >= question.options.len() {
            return None;
        }

        let feedback = AnswerFeedback {
            correct: option == question.correct_answer,
            correct_answer: question.correct_answer,
        };
        self.selected = Some(option);
        if feedback.correct {
            self.score += 1;
        }
        Some(feedback)
    }

    /// Move to the next question, or end the run after the last one.
    ///
    /// Returns `true` while there is a question to show.
    pub fn next(&mut self) -> bool {
        if self.finished {
            return false;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            true
        } else {
            self.finished = true;
            false
        }
    }

    /// Reshuffle and start over with a zero score.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
        self.current = 0;
        self.selected = None;
        self.score = 0;
        self.finished = self.questions.is_empty();
    }

    /// Closing remark for the final score.
    pub fn verdict(&self) -> &'static str {
        let total = self.questions.len();
        if self.score == total {
            "Perfect score! You're a quantum master!"
        } else if self.score * 2 > total {
            "Great job! You have a good understanding of quantum concepts."
        } else {
            "Keep learning! Quantum computing takes time to understand."
        }
    }
}
