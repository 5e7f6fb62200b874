use std::future::Future;

use chia_protocol::CoinSpend;
use chia_transfer_types::{OwnedPuzzles, TokenSpendPlan};

use crate::DriverError;

/// Builds the coin spends for a single token of a spend plan.
pub trait SpendGenerator: Sync {
    fn generate_coin_spends(
        &self,
        plan: &TokenSpendPlan,
        puzzles: &OwnedPuzzles,
    ) -> impl Future<Output = Result<Vec<CoinSpend>, DriverError>> + Send;
}
