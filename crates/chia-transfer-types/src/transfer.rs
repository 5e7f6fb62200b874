use chia_protocol::{Bytes, Bytes32, Coin};
use indexmap::IndexMap;

/// A single payment of some token to a puzzle hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTarget {
    pub symbol: String,
    pub address: Bytes32,
    pub amount: u64,
    pub memos: Option<Vec<Bytes>>,
}

impl TransferTarget {
    pub fn new(symbol: impl Into<String>, address: Bytes32, amount: u64) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            amount,
            memos: None,
        }
    }

    #[must_use]
    pub fn with_memos(mut self, memos: Vec<Bytes>) -> Self {
        self.memos = Some(memos);
        self
    }
}

/// The coins to spend and the outputs to create for a single token.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenSpendPlan {
    pub coins: Vec<Coin>,
    pub targets: Vec<TransferTarget>,
}

impl TokenSpendPlan {
    pub fn input_total(&self) -> u128 {
        self.coins.iter().map(|coin| u128::from(coin.amount)).sum()
    }

    pub fn output_total(&self) -> u128 {
        self.targets
            .iter()
            .map(|target| u128::from(target.amount))
            .sum()
    }
}

/// Spendable coins grouped by token symbol.
pub type SymbolCoins = IndexMap<String, Vec<Coin>>;

/// A spend plan for each token involved in a transfer, keyed by symbol.
pub type SpendPlan = IndexMap<String, TokenSpendPlan>;
