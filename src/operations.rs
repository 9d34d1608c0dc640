use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// All operations, in the order batches group them.
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }

    /// Short label shown on problem cards and in the score breakdown
    pub fn display_name(&self) -> &'static str {
        match self {
            Operation::Addition => "Add",
            Operation::Subtraction => "Sub",
            Operation::Multiplication => "Mult",
            Operation::Division => "Div",
        }
    }

    /// Parses a storage tag, falling back to Addition for anything unrecognized
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "subtraction" => Operation::Subtraction,
            "multiplication" => Operation::Multiplication,
            "division" => Operation::Division,
            _ => Operation::Addition,
        }
    }

    /// Division answers may be typed with a fractional part ("4.00")
    pub fn accepts_decimal_answer(&self) -> bool {
        matches!(self, Operation::Division)
    }
}

impl Default for Operation {
    fn default() -> Self {
        Operation::Addition
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Opaque problem identifier, unique within a batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemId(String);

impl ProblemId {
    pub fn new(id: impl Into<String>) -> Self {
        ProblemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: ProblemId,
    pub operand1: i32,
    pub operand2: i32,
    pub expected_answer: i32,
    pub operation: Operation,
}

impl Problem {
    /// Builds a problem whose expected answer is derived from the operands.
    ///
    /// Returns `None` on overflow, and for division by zero or a division that
    /// does not come out exact.
    pub fn new(id: ProblemId, operation: Operation, operand1: i32, operand2: i32) -> Option<Self> {
        let expected_answer = match operation {
            Operation::Addition => operand1.checked_add(operand2)?,
            Operation::Subtraction => operand1.checked_sub(operand2)?,
            Operation::Multiplication => operand1.checked_mul(operand2)?,
            Operation::Division => match operand1.checked_rem(operand2)? {
                0 => operand1.checked_div(operand2)?,
                _ => return None,
            },
        };

        Some(Problem {
            id,
            operand1,
            operand2,
            expected_answer,
            operation,
        })
    }

    /// The question without the answer slot, e.g. `12 ÷ 4 =`
    pub fn prompt(&self) -> String {
        format!(
            "{} {} {} =",
            self.operand1,
            self.operation.symbol(),
            self.operand2
        )
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ?", self.prompt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_and_names() {
        assert_eq!(Operation::Addition.symbol(), "+");
        assert_eq!(Operation::Subtraction.symbol(), "-");
        assert_eq!(Operation::Multiplication.symbol(), "×");
        assert_eq!(Operation::Division.symbol(), "÷");

        assert_eq!(Operation::Addition.display_name(), "Add");
        assert_eq!(Operation::Subtraction.display_name(), "Sub");
        assert_eq!(Operation::Multiplication.display_name(), "Mult");
        assert_eq!(Operation::Division.display_name(), "Div");
    }

    #[test]
    fn test_from_tag_round_trips_known_tags() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_tag(op.as_str()), op);
        }
    }

    #[test]
    fn test_from_tag_defaults_to_addition() {
        assert_eq!(Operation::from_tag("modulo"), Operation::Addition);
        assert_eq!(Operation::from_tag(""), Operation::Addition);
        assert_eq!(Operation::from_tag("Division"), Operation::Addition);
        assert_eq!(Operation::default(), Operation::Addition);
    }

    #[test]
    fn test_problem_computes_expected_answer() {
        let id = ProblemId::new("x");
        let answer = |op, a, b| Problem::new(id.clone(), op, a, b).map(|p| p.expected_answer);
        assert_eq!(answer(Operation::Addition, 7, 3), Some(10));
        assert_eq!(answer(Operation::Subtraction, 7, 3), Some(4));
        assert_eq!(answer(Operation::Multiplication, 7, 3), Some(21));
        assert_eq!(answer(Operation::Division, 12, 4), Some(3));
    }

    #[test]
    fn test_problem_rejects_zero_and_inexact_division() {
        let id = ProblemId::new("d");
        assert_eq!(Problem::new(id.clone(), Operation::Division, 12, 0), None);
        assert_eq!(Problem::new(id.clone(), Operation::Division, 13, 4), None);
        assert_eq!(Problem::new(id.clone(), Operation::Division, i32::MIN, -1), None);
        assert_eq!(Problem::new(id, Operation::Addition, i32::MAX, 1), None);
    }

    #[test]
    fn test_problem_display() {
        let problem = Problem::new(ProblemId::new("p"), Operation::Division, 12, 4).unwrap();
        assert_eq!(problem.prompt(), "12 ÷ 4 =");
        assert_eq!(problem.to_string(), "12 ÷ 4 = ?");
    }

    #[test]
    fn test_problem_serializes_camel_case() {
        let problem = Problem::new(ProblemId::new("p"), Operation::Addition, 7, 3).unwrap();
        let json = serde_json::to_string(&problem).unwrap();
        assert!(json.contains("\"expectedAnswer\":10"));
        assert!(!json.contains("expected_answer"));
    }

    #[test]
    fn test_operation_serializes_as_tag() {
        let json = serde_json::to_string(&Operation::Multiplication).unwrap();
        assert_eq!(json, "\"multiplication\"");
    }
}
