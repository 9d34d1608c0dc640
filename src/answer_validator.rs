use crate::operations::{Operation, Problem, ProblemId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

pub const EMPTY_ANSWER_MESSAGE: &str = "Please enter an answer";
pub const CORRECT_MESSAGE: &str = "✓ Correct!";

/// Raw user input keyed by problem, not yet parsed
pub type Answers = HashMap<ProblemId, String>;
pub type FeedbackMap = HashMap<ProblemId, Feedback>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("cannot score an empty batch")]
    EmptyBatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub status: FeedbackStatus,
    pub message: String,
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        self.status == FeedbackStatus::Correct
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTally {
    pub correct: usize,
    pub total: usize,
}

impl OperationTally {
    pub fn percentage(&self) -> u32 {
        rounded_percentage(self.correct, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// 0-100, rounded half up
    pub percentage: u32,
    pub breakdown: BTreeMap<Operation, OperationTally>,
}

impl ScoreSummary {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub feedback: FeedbackMap,
    pub summary: ScoreSummary,
}

/// How a single raw answer was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerClass {
    Empty,
    Correct,
    Incorrect,
}

/// Classifies one answer for a problem.
///
/// Only a leading number is read, so `"10.0"` matches 10 and `"12abc"` is a
/// wrong answer rather than a missing one. Input with no leading number counts
/// as empty. Division answers may carry decimals (`"3.00"`); for every other
/// operation a fractional part other than zeros makes the answer wrong.
pub fn classify(problem: &Problem, raw: Option<&str>) -> AnswerClass {
    let raw = raw.map(str::trim).unwrap_or_default();
    let decimal = problem.operation.accepts_decimal_answer();

    let Some((number, rest)) = split_leading_number(raw, decimal) else {
        return AnswerClass::Empty;
    };

    let matches = if decimal {
        rest.is_empty()
            && number
                .parse::<f64>()
                .is_ok_and(|value| value.is_finite() && value == f64::from(problem.expected_answer))
    } else {
        let whole = rest
            .strip_prefix('.')
            .map_or(rest.is_empty(), |zeros| zeros.bytes().all(|b| b == b'0'));
        whole
            && number
                .parse::<i64>()
                .is_ok_and(|value| value == i64::from(problem.expected_answer))
    };

    if matches {
        AnswerClass::Correct
    } else {
        AnswerClass::Incorrect
    }
}

/// Splits `raw` into its leading signed number and the remainder.
/// Returns `None` when no digit leads the input.
fn split_leading_number(raw: &str, decimal: bool) -> Option<(&str, &str)> {
    let bytes = raw.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut digits = 0;

    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
        digits += 1;
    }
    if decimal && bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
            digits += 1;
        }
    }

    (digits > 0).then(|| raw.split_at(end))
}

pub fn feedback_for(problem: &Problem, class: AnswerClass) -> Feedback {
    match class {
        AnswerClass::Empty => Feedback {
            status: FeedbackStatus::Incorrect,
            message: EMPTY_ANSWER_MESSAGE.to_string(),
        },
        AnswerClass::Correct => Feedback {
            status: FeedbackStatus::Correct,
            message: CORRECT_MESSAGE.to_string(),
        },
        AnswerClass::Incorrect => Feedback {
            status: FeedbackStatus::Incorrect,
            message: format!("✗ Incorrect. Answer: {}", problem.expected_answer),
        },
    }
}

/// Scores every problem in the batch against the current answers
pub fn validate(problems: &[Problem], answers: &Answers) -> Result<Validation, ValidationError> {
    if problems.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }

    let mut feedback = FeedbackMap::with_capacity(problems.len());
    let mut breakdown: BTreeMap<Operation, OperationTally> = BTreeMap::new();
    let mut correct = 0;

    for problem in problems {
        let class = classify(problem, answers.get(&problem.id).map(String::as_str));

        let tally = breakdown.entry(problem.operation).or_default();
        tally.total += 1;
        if class == AnswerClass::Correct {
            tally.correct += 1;
            correct += 1;
        }

        feedback.insert(problem.id.clone(), feedback_for(problem, class));
    }

    let total = problems.len();
    let summary = ScoreSummary {
        total,
        correct,
        incorrect: total - correct,
        percentage: rounded_percentage(correct, total),
        breakdown,
    };

    Ok(Validation { feedback, summary })
}

/// `round(100 * part / whole)` with halves rounded up, in exact integer math.
/// A zero `whole` yields 0.
pub fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u32
}
