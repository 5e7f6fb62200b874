use std::future::{self, Future};

use chia_protocol::Program;
use chia_transfer_types::{Condition, MAX_PUZZLE_COST};
use clvm_traits::{FromClvm, ToClvm};
use clvmr::{run_program, Allocator, ChiaDialect, NodePtr};

use crate::DriverError;

/// Runs a puzzle with a solution and returns its output.
pub trait PuzzleEvaluator: Sync {
    fn evaluate(
        &self,
        puzzle: &Program,
        solution: &Program,
    ) -> impl Future<Output = Result<Program, DriverError>> + Send;
}

/// Evaluates puzzles locally with the chia dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClvmEvaluator;

impl PuzzleEvaluator for ClvmEvaluator {
    fn evaluate(
        &self,
        puzzle: &Program,
        solution: &Program,
    ) -> impl Future<Output = Result<Program, DriverError>> + Send {
        future::ready(run_puzzle(puzzle, solution))
    }
}

/// Runs a puzzle in a fresh allocator, with the maximum cost of a block.
pub fn run_puzzle(puzzle: &Program, solution: &Program) -> Result<Program, DriverError> {
    let mut allocator = Allocator::new();
    let output = run_puzzle_node(&mut allocator, puzzle, solution)?;
    Ok(Program::from_clvm(&allocator, output)?)
}

pub(crate) fn run_puzzle_node(
    allocator: &mut Allocator,
    puzzle: &Program,
    solution: &Program,
) -> Result<NodePtr, DriverError> {
    let puzzle = puzzle.to_clvm(allocator)?;
    let solution = solution.to_clvm(allocator)?;

    let reduction = run_program(
        allocator,
        &ChiaDialect::new(0),
        puzzle,
        solution,
        MAX_PUZZLE_COST,
    )
    .map_err(|error| DriverError::Eval(format!("{error:?}")))?;

    Ok(reduction.1)
}

/// Parses the output of a puzzle into its list of conditions.
pub fn parse_conditions(output: &Program) -> Result<Vec<Condition>, DriverError> {
    let mut allocator = Allocator::new();
    let output = output.to_clvm(&mut allocator)?;
    Ok(Condition::parse_list(&allocator, output)?)
}
