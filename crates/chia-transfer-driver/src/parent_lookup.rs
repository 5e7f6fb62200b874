use std::future::Future;

use chia_protocol::{Bytes32, Program};

use crate::DriverError;

/// The puzzle and coin info of a coin's parent, needed to prove the lineage of a CAT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentPuzzle {
    pub parent_parent_coin_id: Bytes32,
    pub amount: u64,
    pub puzzle_reveal: Program,
}

/// Looks up the puzzle of a spent parent coin, usually from a full node or indexer.
pub trait ParentLookup: Sync {
    /// Returns `None` if the parent coin is unknown.
    fn parent_puzzle(
        &self,
        parent_coin_id: Bytes32,
    ) -> impl Future<Output = Result<Option<ParentPuzzle>, DriverError>> + Send;
}
