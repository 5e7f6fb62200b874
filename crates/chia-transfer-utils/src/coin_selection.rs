use chia_protocol::{Bytes32, Coin};
use chia_transfer_types::{Network, SpendPlan, SymbolCoins, TokenSpendPlan, TransferTarget};
use thiserror::Error;
use tracing::debug;

/// An error that occurs when selecting coins.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoinSelectionError {
    /// The selected coins could not cover the outgoing total for a token.
    #[error("not enough balance to transfer {symbol}, lacking {shortfall}")]
    InsufficientBalance { symbol: String, shortfall: u128 },

    /// The change left over after selection is larger than a single coin can hold.
    #[error("change amount {0} does not fit in a coin")]
    ChangeOverflow(u128),
}

/// Builds a spend plan for each token in `available`.
///
/// The fee is only added to the outgoing total of the native token. Any excess in the
/// selected coins is sent back to `change_address`. Tokens for which no coins were
/// selected are left out of the plan.
pub fn generate_spend_plan(
    available: &SymbolCoins,
    targets: &[TransferTarget],
    change_address: Bytes32,
    fee: u64,
    network: &Network,
) -> Result<SpendPlan, CoinSelectionError> {
    let mut plan = SpendPlan::new();

    for (symbol, coins) in available {
        let is_native = network.is_native(symbol);

        let mut token_targets: Vec<TransferTarget> = targets
            .iter()
            .filter(|target| &target.symbol == symbol)
            .cloned()
            .collect();

        let outgoing_extra = if is_native { u128::from(fee) } else { 0 };
        let outgoing_total = token_targets
            .iter()
            .map(|target| u128::from(target.amount))
            .sum::<u128>()
            + outgoing_extra;

        let selected = if is_native {
            find_coins(coins, outgoing_total)
        } else {
            find_possible_smallest(coins, outgoing_total)
        };

        let selected_total: u128 = selected.iter().map(|coin| u128::from(coin.amount)).sum();

        if selected_total < outgoing_total {
            return Err(CoinSelectionError::InsufficientBalance {
                symbol: symbol.clone(),
                shortfall: outgoing_total - selected_total,
            });
        }

        let change = selected_total - outgoing_total;

        if change > 0 {
            let amount =
                u64::try_from(change).map_err(|_| CoinSelectionError::ChangeOverflow(change))?;
            token_targets.push(TransferTarget::new(symbol.clone(), change_address, amount));
        }

        debug!(
            %symbol,
            coins = selected.len(),
            %outgoing_total,
            %change,
            "selected coins for transfer"
        );

        if !selected.is_empty() {
            plan.insert(
                symbol.clone(),
                TokenSpendPlan {
                    coins: selected,
                    targets: token_targets,
                },
            );
        }
    }

    Ok(plan)
}

/// Greedily selects the smallest coins until the amount is covered, then drops the
/// smallest selected coins that became redundant once a larger coin was added.
///
/// If the coins cannot cover the amount, every coin is returned and the caller is
/// expected to detect the shortfall.
pub fn find_coins(coins: &[Coin], amount: u128) -> Vec<Coin> {
    let mut sorted = coins.to_vec();
    sorted.sort_by_key(|coin| coin.amount);

    let mut remaining = i128::try_from(amount).unwrap_or(i128::MAX);
    let mut selected = Vec::new();

    for coin in sorted {
        if remaining <= 0 {
            break;
        }
        remaining -= i128::from(coin.amount);
        selected.push(coin);
    }

    let mut redundant = 0;
    for coin in &selected {
        if remaining + i128::from(coin.amount) > 0 {
            break;
        }
        remaining += i128::from(coin.amount);
        redundant += 1;
    }
    selected.drain(..redundant);

    selected
}

/// Selects the single smallest coin that covers the amount. Returns nothing if the
/// amount is zero or no single coin is large enough.
pub fn find_possible_smallest(coins: &[Coin], amount: u128) -> Vec<Coin> {
    if amount == 0 {
        return Vec::new();
    }

    let mut sorted = coins.to_vec();
    sorted.sort_by_key(|coin| coin.amount);

    sorted
        .into_iter()
        .find(|coin| u128::from(coin.amount) >= amount)
        .into_iter()
        .collect()
}
