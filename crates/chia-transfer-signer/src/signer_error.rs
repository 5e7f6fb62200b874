use chia_protocol::Bytes32;
use chia_transfer_driver::DriverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("bls context is not initialized")]
    NotInitialized,

    #[error("driver error: {0}")]
    Driver(#[source] DriverError),

    #[error("bls error: {0}")]
    Bls(#[from] chia_bls::Error),

    #[error("no puzzle is owned for puzzle hash {0}")]
    PuzzleNotOwned(Bytes32),

    #[error("unsupported condition with opcode {0}")]
    UnsupportedCondition(u16),

    #[error("unexpected condition shape: {0}")]
    UnexpectedConditionShape(String),

    #[error("a parent lookup is required to spend {0}")]
    MissingParentLookup(String),
}

impl From<DriverError> for SignerError {
    fn from(error: DriverError) -> Self {
        match error {
            DriverError::PuzzleNotOwned(puzzle_hash) => Self::PuzzleNotOwned(puzzle_hash),
            error => Self::Driver(error),
        }
    }
}
