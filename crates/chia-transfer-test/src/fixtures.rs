use chia_protocol::{Bytes32, Coin};
use chia_sha2::Sha256;
use chia_transfer_driver::DriverError;
use chia_transfer_types::{Network, PuzzleDetail, TokenPuzzleDetail};

use crate::{BlsPair, MemoryParentLookup};

fn parent_coin_id(puzzle_hash: Bytes32, index: usize) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update(puzzle_hash);
    hasher.update((index as u64).to_be_bytes());
    hasher.finalize().into()
}

/// Creates a coin for each amount, each with a distinct parent.
pub fn test_coins(puzzle_hash: Bytes32, amounts: &[u64]) -> Vec<Coin> {
    amounts
        .iter()
        .enumerate()
        .map(|(index, &amount)| Coin::new(parent_coin_id(puzzle_hash, index), puzzle_hash, amount))
        .collect()
}

/// Creates a CAT coin for each amount, and records a CAT parent for each of them so
/// that their lineage can be proven.
pub fn test_cat_coins(
    detail: &PuzzleDetail,
    amounts: &[u64],
    parents: &mut MemoryParentLookup,
) -> Vec<Coin> {
    test_coins(detail.puzzle_hash, amounts)
        .into_iter()
        .map(|parent| {
            let parent_coin_id = parents.add_parent(parent, detail.puzzle.clone());
            Coin::new(parent_coin_id, detail.puzzle_hash, parent.amount)
        })
        .collect()
}

/// The standard puzzles of the native token for each key pair.
pub fn native_token(network: &Network, pairs: &[BlsPair]) -> Result<TokenPuzzleDetail, DriverError> {
    Ok(TokenPuzzleDetail {
        symbol: network.symbol.clone(),
        asset_id: None,
        puzzles: pairs
            .iter()
            .map(BlsPair::standard_puzzle_detail)
            .collect::<Result<_, _>>()?,
    })
}

/// The CAT puzzles of an asset for each key pair.
pub fn cat_token(
    symbol: &str,
    asset_id: Bytes32,
    pairs: &[BlsPair],
) -> Result<TokenPuzzleDetail, DriverError> {
    Ok(TokenPuzzleDetail {
        symbol: symbol.to_string(),
        asset_id: Some(asset_id),
        puzzles: pairs
            .iter()
            .map(|pair| pair.cat_puzzle_detail(asset_id))
            .collect::<Result<_, _>>()?,
    })
}
