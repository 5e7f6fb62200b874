use std::future::{self, Future};

use chia_bls::PublicKey;
use chia_protocol::{CoinSpend, Program};
use chia_puzzle_types::standard::StandardArgs;
use chia_puzzles::P2_DELEGATED_PUZZLE_OR_HIDDEN_PUZZLE;
use chia_transfer_types::{OwnedPuzzles, TokenSpendPlan};
use clvm_traits::{FromClvm, ToClvm};
use clvm_utils::CurriedProgram;
use clvmr::{serde::node_from_bytes, Allocator};
use tracing::trace;

use crate::{assemble, solution, DriverError, SpendGenerator};

/// Curries the standard puzzle with a synthetic public key.
pub fn standard_puzzle(synthetic_key: PublicKey) -> Result<Program, DriverError> {
    let mut allocator = Allocator::new();
    let mod_ptr = node_from_bytes(&mut allocator, &P2_DELEGATED_PUZZLE_OR_HIDDEN_PUZZLE)?;

    let ptr = CurriedProgram {
        program: mod_ptr,
        args: StandardArgs::new(synthetic_key),
    }
    .to_clvm(&mut allocator)?;

    Ok(Program::from_clvm(&allocator, ptr)?)
}

/// Spends native coins locked with the standard puzzle.
///
/// The first coin creates every output of the plan. The remaining coins are spent with
/// an empty delegated puzzle.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardSpendGenerator;

impl StandardSpendGenerator {
    pub fn coin_spends(
        plan: &TokenSpendPlan,
        puzzles: &OwnedPuzzles,
    ) -> Result<Vec<CoinSpend>, DriverError> {
        let mut coin_spends = Vec::with_capacity(plan.coins.len());

        for (index, coin) in plan.coins.iter().enumerate() {
            let detail = puzzles
                .get(&coin.puzzle_hash)
                .ok_or(DriverError::PuzzleNotOwned(coin.puzzle_hash))?;

            let solution = if index == 0 {
                solution(&plan.targets)
            } else {
                solution(&[])
            };

            trace!(coin_id = %coin.coin_id(), %solution, "standard coin spend");

            coin_spends.push(CoinSpend::new(
                *coin,
                detail.puzzle.clone(),
                assemble(&solution)?,
            ));
        }

        Ok(coin_spends)
    }
}

impl SpendGenerator for StandardSpendGenerator {
    fn generate_coin_spends(
        &self,
        plan: &TokenSpendPlan,
        puzzles: &OwnedPuzzles,
    ) -> impl Future<Output = Result<Vec<CoinSpend>, DriverError>> + Send {
        future::ready(Self::coin_spends(plan, puzzles))
    }
}
