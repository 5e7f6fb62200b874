use std::future::{self, Future};

use chia_protocol::{Bytes32, Coin, Program};
use chia_transfer_driver::{DriverError, ParentLookup, ParentPuzzle};
use indexmap::IndexMap;

/// Serves parent puzzles from memory instead of a full node.
#[derive(Debug, Default, Clone)]
pub struct MemoryParentLookup {
    parents: IndexMap<Bytes32, ParentPuzzle>,
}

impl MemoryParentLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parent_coin_id: Bytes32, parent: ParentPuzzle) {
        self.parents.insert(parent_coin_id, parent);
    }

    /// Records a spent parent coin along with its puzzle, and returns its coin id.
    pub fn add_parent(&mut self, parent: Coin, puzzle_reveal: Program) -> Bytes32 {
        let parent_coin_id = parent.coin_id();
        self.insert(
            parent_coin_id,
            ParentPuzzle {
                parent_parent_coin_id: parent.parent_coin_info,
                amount: parent.amount,
                puzzle_reveal,
            },
        );
        parent_coin_id
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl ParentLookup for MemoryParentLookup {
    fn parent_puzzle(
        &self,
        parent_coin_id: Bytes32,
    ) -> impl Future<Output = Result<Option<ParentPuzzle>, DriverError>> + Send {
        future::ready(Ok(self.parents.get(&parent_coin_id).cloned()))
    }
}
