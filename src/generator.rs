use crate::date_provider::DateProvider;
use crate::operations::{Operation, Problem, ProblemId};
use crate::random_source::RandomSource;
use log::{debug, info};
use std::sync::Arc;

/// Problems per operation in single-operation and all-types batches
pub const PROBLEMS_PER_OPERATION: usize = 5;
/// Size of a randomly mixed batch
pub const MIXED_BATCH_SIZE: usize = 20;

const ADDITION_RANGE: (i32, i32) = (1, 100);
const SUBTRACTION_MINUEND_RANGE: (i32, i32) = (10, 100);
const SUBTRACTION_SUBTRAHEND_MIN: i32 = 1;
const MULTIPLICATION_RANGE: (i32, i32) = (1, 12);
const DIVISOR_RANGE: (i32, i32) = (2, 12);
const QUOTIENT_RANGE: (i32, i32) = (1, 12);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Five problems of one operation
    Single(Operation),
    /// Five problems of every operation, grouped in `Operation::ALL` order
    AllTypes,
    /// Twenty problems, each with an independently drawn operation
    AllTypesRandom,
}

impl BatchMode {
    pub fn batch_size(&self) -> usize {
        match self {
            BatchMode::Single(_) => PROBLEMS_PER_OPERATION,
            BatchMode::AllTypes => PROBLEMS_PER_OPERATION * Operation::ALL.len(),
            BatchMode::AllTypesRandom => MIXED_BATCH_SIZE,
        }
    }
}

pub struct ProblemGenerator<R: RandomSource> {
    random: R,
    date_provider: Arc<dyn DateProvider>,
    batch_sequence: u64,
}

impl<R: RandomSource> ProblemGenerator<R> {
    pub fn new(random: R, date_provider: Arc<dyn DateProvider>) -> Self {
        Self {
            random,
            date_provider,
            batch_sequence: 0,
        }
    }

    /// Generates one problem outside of any batch; it counts as a batch of one for ids
    pub fn generate_problem(&mut self, operation: Operation) -> Problem {
        self.batch_sequence += 1;
        let millis = self.date_provider.get_current_time().timestamp_millis();
        let id = Self::problem_id(operation, millis, self.batch_sequence, 0);
        self.sample_problem(operation, id)
    }

    pub fn generate_batch(&mut self, mode: BatchMode) -> Vec<Problem> {
        self.batch_sequence += 1;
        let batch = self.batch_sequence;
        let millis = self.date_provider.get_current_time().timestamp_millis();

        let operations: Vec<Operation> = match mode {
            BatchMode::Single(operation) => vec![operation; PROBLEMS_PER_OPERATION],
            BatchMode::AllTypes => Operation::ALL
                .iter()
                .flat_map(|op| std::iter::repeat(*op).take(PROBLEMS_PER_OPERATION))
                .collect(),
            BatchMode::AllTypesRandom => (0..MIXED_BATCH_SIZE)
                .map(|_| self.random_operation())
                .collect(),
        };

        let problems: Vec<Problem> = operations
            .into_iter()
            .enumerate()
            .map(|(slot, operation)| {
                let id = Self::problem_id(operation, millis, batch, slot);
                self.sample_problem(operation, id)
            })
            .collect();

        info!(
            "Generated batch #{} ({:?}) with {} problem(s)",
            batch,
            mode,
            problems.len()
        );
        for problem in &problems {
            debug!("{} -> {}", problem.id, problem);
        }

        problems
    }

    fn random_operation(&mut self) -> Operation {
        let last = Operation::ALL.len() as i32 - 1;
        let index = self.random.sample(0, last) as usize;
        Operation::ALL[index]
    }

    fn problem_id(operation: Operation, millis: i64, batch: u64, slot: usize) -> ProblemId {
        ProblemId::new(format!("{}-{}-{}-{}", operation.as_str(), millis, batch, slot))
    }

    fn sample_problem(&mut self, operation: Operation, id: ProblemId) -> Problem {
        match operation {
            Operation::Addition => {
                let operand1 = self.random.sample(ADDITION_RANGE.0, ADDITION_RANGE.1);
                let operand2 = self.random.sample(ADDITION_RANGE.0, ADDITION_RANGE.1);
                Self::build(id, operation, operand1, operand2, operand1 + operand2)
            }
            Operation::Subtraction => {
                // Minuend first so the subtrahend can be bounded by it
                let operand1 = self
                    .random
                    .sample(SUBTRACTION_MINUEND_RANGE.0, SUBTRACTION_MINUEND_RANGE.1);
                let operand2 = self.random.sample(SUBTRACTION_SUBTRAHEND_MIN, operand1);
                Self::build(id, operation, operand1, operand2, operand1 - operand2)
            }
            Operation::Multiplication => {
                let operand1 = self
                    .random
                    .sample(MULTIPLICATION_RANGE.0, MULTIPLICATION_RANGE.1);
                let operand2 = self
                    .random
                    .sample(MULTIPLICATION_RANGE.0, MULTIPLICATION_RANGE.1);
                Self::build(id, operation, operand1, operand2, operand1 * operand2)
            }
            Operation::Division => {
                let divisor = self.random.sample(DIVISOR_RANGE.0, DIVISOR_RANGE.1);
                let quotient = self.random.sample(QUOTIENT_RANGE.0, QUOTIENT_RANGE.1);
                Self::build(id, operation, divisor * quotient, divisor, quotient)
            }
        }
    }

    // Operands are bounded well inside i32, so the answer is computed unchecked
    fn build(
        id: ProblemId,
        operation: Operation,
        operand1: i32,
        operand2: i32,
        expected_answer: i32,
    ) -> Problem {
        Problem {
            id,
            operand1,
            operand2,
            expected_answer,
            operation,
        }
    }
}
