use chia_protocol::{Bytes32, Coin, CoinSpend};
use chia_transfer_types::{coin_name, serde_hex::hex_bytes32};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CoinLockError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A coin that has been spent by a pending transaction and must not be selected again
/// until the transaction either confirms or is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedCoin {
    #[serde(with = "hex_bytes32")]
    pub coin_name: Bytes32,
    #[serde(with = "hex_bytes32")]
    pub parent_coin_info: Bytes32,
    #[serde(with = "hex_bytes32")]
    pub puzzle_hash: Bytes32,
    pub amount: u64,
    pub transaction_time: u64,
    pub network: String,
    pub symbol: Option<String>,
    pub account_fingerprint: u32,
}

impl LockedCoin {
    pub fn coin(&self) -> Coin {
        Coin::new(self.parent_coin_info, self.puzzle_hash, self.amount)
    }
}

/// The set of locked coins for every account and network.
///
/// Locks are stored in memory. The ledger serializes to a JSON array so that the host
/// can persist it wherever it keeps wallet state.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinLocks {
    coins: Vec<LockedCoin>,
}

impl CoinLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, CoinLockError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoinLockError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn locked(&self) -> &[LockedCoin] {
        &self.coins
    }

    pub fn is_locked(&self, coin: &Coin) -> bool {
        let name = coin_name(coin);
        self.coins.iter().any(|locked| locked.coin_name == name)
    }

    /// Locks the coins spent by a transaction. Only coins whose puzzle hash resolves to
    /// a known token symbol belong to the account and are locked.
    ///
    /// Returns the number of coins that were locked.
    pub fn lock_coins(
        &mut self,
        coin_spends: &[CoinSpend],
        symbol_of: impl Fn(Bytes32) -> Option<String>,
        network: &str,
        account_fingerprint: u32,
        transaction_time: u64,
    ) -> usize {
        let mut count = 0;

        for coin_spend in coin_spends {
            let coin = coin_spend.coin;

            let Some(symbol) = symbol_of(coin.puzzle_hash) else {
                continue;
            };

            self.coins.push(LockedCoin {
                coin_name: coin_name(&coin),
                parent_coin_info: coin.parent_coin_info,
                puzzle_hash: coin.puzzle_hash,
                amount: coin.amount,
                transaction_time,
                network: network.to_string(),
                symbol: Some(symbol),
                account_fingerprint,
            });
            count += 1;
        }

        debug!(count, network, account_fingerprint, "locked coins");

        count
    }

    /// Removes every lock held on the given coins, regardless of network or account.
    pub fn unlock_coins(&mut self, coins: &[Coin]) {
        for coin in coins {
            let name = coin_name(coin);
            self.coins.retain(|locked| locked.coin_name != name);
        }
    }

    /// Returns the coins that are not locked by the account on the network.
    pub fn filter_coins(&self, coins: &[Coin], network: &str, account_fingerprint: u32) -> Vec<Coin> {
        coins
            .iter()
            .filter(|coin| {
                let name = coin_name(coin);
                !self.coins.iter().any(|locked| {
                    locked.network == network
                        && locked.account_fingerprint == account_fingerprint
                        && locked.coin_name == name
                })
            })
            .copied()
            .collect()
    }
}
