// Question sequencer. Stateless: the caller carries the question number.

use serde::Serialize;

use crate::errors::AppError;

/// The fixed interview script, in order.
pub const QUESTIONS: [&str; 6] = [
    "What is the purpose of the application or website?",
    "Who is the target audience?",
    "What features are required in the first version?",
    "Are there any key performance metrics to consider?",
    "Are there any technical requirements (e.g., platform, integrations)?",
    "What are the business goals or KPIs for this project?",
];

pub const TOTAL_QUESTIONS: u32 = QUESTIONS.len() as u32;

pub const COMPLETION_MESSAGE: &str = "Interview complete. Thank you!";

/// A question together with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub question: &'static str,
    pub question_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Question(Prompt),
    Complete,
}

pub fn first() -> Prompt {
    Prompt {
        question: QUESTIONS[0],
        question_number: 1,
    }
}

/// The step after question `n` has been answered.
pub fn next(n: u32) -> Step {
    if n < TOTAL_QUESTIONS {
        Step::Question(Prompt {
            question: QUESTIONS[n as usize],
            question_number: n + 1,
        })
    } else {
        Step::Complete
    }
}

/// Rejects question numbers outside `1..=6`.
pub fn validate_number(n: i64) -> Result<u32, AppError> {
    if (1..=TOTAL_QUESTIONS as i64).contains(&n) {
        Ok(n as u32)
    } else {
        Err(AppError::Validation(format!(
            "question_number must be between 1 and {TOTAL_QUESTIONS}, got {n}"
        )))
    }
}
