use std::num::TryFromIntError;

use chia_protocol::Bytes32;
use clvm_traits::{FromClvmError, ToClvmError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("try from int error")]
    TryFromInt(#[from] TryFromIntError),

    #[error("failed to serialize clvm value: {0}")]
    ToClvm(#[from] ToClvmError),

    #[error("failed to deserialize clvm value: {0}")]
    FromClvm(#[from] FromClvmError),

    #[error("clvm eval error: {0}")]
    Eval(String),

    #[error("failed to assemble program: {0}")]
    Assemble(String),

    #[error("no puzzle is owned for puzzle hash {0}")]
    PuzzleNotOwned(Bytes32),

    #[error("parent puzzle of coin with parent {0} could not be found")]
    MissingParent(Bytes32),

    #[error("puzzle of coin {0} is not a cat")]
    NotCat(Bytes32),

    #[error("expected asset id {expected}, found {found}")]
    AssetIdMismatch { expected: Bytes32, found: Bytes32 },
}
