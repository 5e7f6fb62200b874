use std::fmt;

use chia_protocol::{Bytes, Bytes32, Program};
use chia_transfer_types::{TransferTarget, CREATE_COIN};
use clvm_tools_rs::classic::clvm_tools::binutils::assemble as assemble_text;
use clvm_traits::FromClvm;
use clvmr::{Allocator, NodePtr};

use crate::DriverError;

/// A single argument of a condition, rendered as CLVM program text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramArg {
    /// Rendered in decimal.
    Number(u64),
    /// Rendered as `0x` prefixed hex, or `()` when empty.
    Bytes(Bytes),
    /// Rendered as a parenthesized list.
    List(Vec<ProgramArg>),
}

impl fmt::Display for ProgramArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Bytes(bytes) if bytes.is_empty() => write!(f, "()"),
            Self::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            Self::List(items) => write!(f, "({})", join(items)),
        }
    }
}

impl From<u64> for ProgramArg {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<Bytes> for ProgramArg {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Bytes32> for ProgramArg {
    fn from(value: Bytes32) -> Self {
        Self::Bytes(Bytes::new(value.to_vec()))
    }
}

fn join(items: &[ProgramArg]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `CREATE_COIN` condition paying the target, with its memos if there are any.
pub fn create_coin(target: &TransferTarget) -> Vec<ProgramArg> {
    let mut condition = vec![
        ProgramArg::Number(CREATE_COIN.into()),
        target.address.into(),
        target.amount.into(),
    ];

    if let Some(memos) = &target.memos {
        condition.push(ProgramArg::List(
            memos.iter().cloned().map(ProgramArg::Bytes).collect(),
        ));
    }

    condition
}

/// Renders a delegated puzzle which quotes the given conditions, in the form
/// `(q (c1 ...) (c2 ...))`.
pub fn delegated_puzzle(conditions: &[Vec<ProgramArg>]) -> String {
    if conditions.is_empty() {
        return "(q)".to_string();
    }

    let conditions = conditions
        .iter()
        .map(|condition| format!("({})", join(condition)))
        .collect::<Vec<_>>()
        .join(" ");

    format!("(q {conditions})")
}

/// Renders the standard puzzle solution `(() <delegated puzzle> ())` that creates a coin
/// for each target.
pub fn solution(targets: &[TransferTarget]) -> String {
    let conditions: Vec<Vec<ProgramArg>> = targets.iter().map(create_coin).collect();
    format!("(() {} ())", delegated_puzzle(&conditions))
}

/// Assembles program text into the allocator.
pub fn assemble_node(allocator: &mut Allocator, text: &str) -> Result<NodePtr, DriverError> {
    assemble_text(allocator, text).map_err(|error| DriverError::Assemble(format!("{error:?}")))
}

/// Assembles program text into a serialized program.
pub fn assemble(text: &str) -> Result<Program, DriverError> {
    let mut allocator = Allocator::new();
    let ptr = assemble_node(&mut allocator, text)?;
    Ok(Program::from_clvm(&allocator, ptr)?)
}
