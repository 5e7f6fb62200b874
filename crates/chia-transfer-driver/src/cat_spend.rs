use std::future::Future;

use chia_protocol::{Bytes, Bytes32, Coin, CoinSpend, Program};
use chia_puzzle_types::{
    cat::{CatArgs, CatSolution},
    CoinProof, LineageProof,
};
use chia_puzzles::{CAT_PUZZLE, CAT_PUZZLE_HASH};
use chia_transfer_types::{OwnedPuzzles, TokenSpendPlan, TransferTarget};
use clvm_traits::{FromClvm, ToClvm};
use clvm_utils::{tree_hash, CurriedProgram, TreeHash};
use clvmr::{serde::node_from_bytes, Allocator, NodePtr};
use tracing::{debug, trace};

use crate::{assemble_node, solution, DriverError, ParentLookup, SpendGenerator};

/// Curries the CAT puzzle around an inner puzzle.
pub fn cat_puzzle(asset_id: Bytes32, inner_puzzle: &Program) -> Result<Program, DriverError> {
    let mut allocator = Allocator::new();
    let mod_ptr = node_from_bytes(&mut allocator, &CAT_PUZZLE)?;
    let inner_puzzle = inner_puzzle.to_clvm(&mut allocator)?;

    let ptr = CurriedProgram {
        program: mod_ptr,
        args: CatArgs::new(asset_id, inner_puzzle),
    }
    .to_clvm(&mut allocator)?;

    Ok(Program::from_clvm(&allocator, ptr)?)
}

/// The asset id and inner puzzle hash of a CAT puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatPuzzleInfo {
    pub asset_id: Bytes32,
    pub inner_puzzle_hash: Bytes32,
}

impl CatPuzzleInfo {
    /// Uncurries a CAT puzzle. Returns `None` if the puzzle is not a CAT.
    pub fn parse(puzzle: &Program) -> Result<Option<Self>, DriverError> {
        let mut allocator = Allocator::new();
        let ptr = puzzle.to_clvm(&mut allocator)?;

        let Ok(curried) = CurriedProgram::<NodePtr, CatArgs<NodePtr>>::from_clvm(&allocator, ptr)
        else {
            return Ok(None);
        };

        if tree_hash(&allocator, curried.program) != TreeHash::new(CAT_PUZZLE_HASH)
            || curried.args.mod_hash != Bytes32::new(CAT_PUZZLE_HASH)
        {
            return Ok(None);
        }

        Ok(Some(Self {
            asset_id: curried.args.asset_id,
            inner_puzzle_hash: tree_hash(&allocator, curried.args.inner_puzzle).into(),
        }))
    }
}

/// Renders the inner solution for the coin creating the outputs of a CAT spend.
/// Targets without memos are hinted with their own puzzle hash.
pub fn cat_inner_solution(targets: &[TransferTarget]) -> String {
    let targets: Vec<TransferTarget> = targets
        .iter()
        .map(|target| match target.memos {
            Some(_) => target.clone(),
            None => target
                .clone()
                .with_memos(vec![Bytes::new(target.address.to_vec())]),
        })
        .collect();

    solution(&targets)
}

#[derive(Debug, Clone)]
struct CatCoin {
    coin: Coin,
    puzzle: Program,
    info: CatPuzzleInfo,
}

/// Spends CAT coins whose inner puzzle is the standard puzzle.
///
/// The coins of a plan are spent together as a ring, where the first coin creates every
/// output. Lineage proofs are built from the parent puzzles returned by the lookup.
#[derive(Debug, Clone, Copy)]
pub struct CatSpendGenerator<'a, L> {
    lookup: &'a L,
    asset_id: Option<Bytes32>,
}

impl<'a, L> CatSpendGenerator<'a, L>
where
    L: ParentLookup,
{
    pub fn new(lookup: &'a L) -> Self {
        Self {
            lookup,
            asset_id: None,
        }
    }

    /// Requires every coin in the plan to be of the given asset.
    #[must_use]
    pub fn with_asset_id(mut self, asset_id: Bytes32) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    fn cat_coins(
        &self,
        plan: &TokenSpendPlan,
        puzzles: &OwnedPuzzles,
    ) -> Result<Vec<CatCoin>, DriverError> {
        let mut expected = self.asset_id;
        let mut cat_coins = Vec::with_capacity(plan.coins.len());

        for coin in &plan.coins {
            let detail = puzzles
                .get(&coin.puzzle_hash)
                .ok_or(DriverError::PuzzleNotOwned(coin.puzzle_hash))?;

            let info = CatPuzzleInfo::parse(&detail.puzzle)?
                .ok_or(DriverError::NotCat(coin.coin_id()))?;

            match expected {
                Some(asset_id) if asset_id != info.asset_id => {
                    return Err(DriverError::AssetIdMismatch {
                        expected: asset_id,
                        found: info.asset_id,
                    });
                }
                Some(_) => {}
                None => expected = Some(info.asset_id),
            }

            cat_coins.push(CatCoin {
                coin: *coin,
                puzzle: detail.puzzle.clone(),
                info,
            });
        }

        Ok(cat_coins)
    }

    async fn lineage_proof(&self, coin: &Coin) -> Result<LineageProof, DriverError> {
        let parent = self
            .lookup
            .parent_puzzle(coin.parent_coin_info)
            .await?
            .ok_or(DriverError::MissingParent(coin.parent_coin_info))?;

        let parent_info = CatPuzzleInfo::parse(&parent.puzzle_reveal)?
            .ok_or(DriverError::NotCat(coin.parent_coin_info))?;

        Ok(LineageProof {
            parent_parent_coin_info: parent.parent_parent_coin_id,
            parent_inner_puzzle_hash: parent_info.inner_puzzle_hash,
            parent_amount: parent.amount,
        })
    }
}

fn spend_cat_coins(
    cat_coins: &[CatCoin],
    lineage_proofs: Vec<LineageProof>,
    targets: &[TransferTarget],
) -> Result<Vec<CoinSpend>, DriverError> {
    let output_total = i128::try_from(
        targets
            .iter()
            .map(|target| u128::from(target.amount))
            .sum::<u128>(),
    )?;

    let mut total_delta: i128 = 0;
    let mut coin_spends = Vec::with_capacity(cat_coins.len());

    for (index, (cat, lineage_proof)) in cat_coins.iter().zip(lineage_proofs).enumerate() {
        let (inner_solution, output) = if index == 0 {
            (cat_inner_solution(targets), output_total)
        } else {
            (solution(&[]), 0)
        };

        let prev_subtotal = i64::try_from(total_delta)?;
        total_delta += i128::from(cat.coin.amount) - output;

        let prev = &cat_coins[(index + cat_coins.len() - 1) % cat_coins.len()];
        let next = &cat_coins[(index + 1) % cat_coins.len()];

        trace!(coin_id = %cat.coin.coin_id(), prev_subtotal, %inner_solution, "cat coin spend");

        let mut allocator = Allocator::new();
        let inner_puzzle_solution = assemble_node(&mut allocator, &inner_solution)?;

        let cat_solution = CatSolution {
            inner_puzzle_solution,
            lineage_proof: Some(lineage_proof),
            prev_coin_id: prev.coin.coin_id(),
            this_coin_info: cat.coin,
            next_coin_proof: CoinProof {
                parent_coin_info: next.coin.parent_coin_info,
                inner_puzzle_hash: next.info.inner_puzzle_hash,
                amount: next.coin.amount,
            },
            prev_subtotal,
            extra_delta: 0,
        }
        .to_clvm(&mut allocator)?;

        coin_spends.push(CoinSpend::new(
            cat.coin,
            cat.puzzle.clone(),
            Program::from_clvm(&allocator, cat_solution)?,
        ));
    }

    Ok(coin_spends)
}

impl<L> SpendGenerator for CatSpendGenerator<'_, L>
where
    L: ParentLookup,
{
    fn generate_coin_spends(
        &self,
        plan: &TokenSpendPlan,
        puzzles: &OwnedPuzzles,
    ) -> impl Future<Output = Result<Vec<CoinSpend>, DriverError>> + Send {
        async move {
            let cat_coins = self.cat_coins(plan, puzzles)?;

            let mut lineage_proofs = Vec::with_capacity(cat_coins.len());
            for cat in &cat_coins {
                lineage_proofs.push(self.lineage_proof(&cat.coin).await?);
            }

            debug!(coins = cat_coins.len(), "spending cat coins");

            spend_cat_coins(&cat_coins, lineage_proofs, &plan.targets)
        }
    }
}

#[cfg(test)]
mod tests {
    use chia_bls::{PublicKey, SecretKey};
    use chia_puzzle_types::{standard::StandardArgs, DeriveSynthetic};
    use chia_transfer_types::{ConditionArg, PuzzleDetail, AGG_SIG_ME, CREATE_COIN};
    use indexmap::IndexMap;

    use crate::{parse_conditions, run_puzzle, standard_puzzle, ParentPuzzle};

    use super::*;

    const ASSET_ID: Bytes32 = Bytes32::new([0xa5; 32]);

    #[derive(Debug, Default)]
    struct Parents(IndexMap<Bytes32, ParentPuzzle>);

    impl ParentLookup for Parents {
        fn parent_puzzle(
            &self,
            parent_coin_id: Bytes32,
        ) -> impl Future<Output = Result<Option<ParentPuzzle>, DriverError>> + Send {
            std::future::ready(Ok(self.0.get(&parent_coin_id).cloned()))
        }
    }

    struct Fixture {
        synthetic_key: PublicKey,
        inner_puzzle_hash: Bytes32,
        puzzle_hash: Bytes32,
        puzzle: Program,
        puzzles: OwnedPuzzles,
    }

    fn fixture(asset_id: Bytes32) -> anyhow::Result<Fixture> {
        let sk = SecretKey::from_seed(&[3; 32]);
        let synthetic_key = sk.public_key().derive_synthetic();
        let inner_puzzle_hash = StandardArgs::curry_tree_hash(synthetic_key);
        let puzzle_hash = CatArgs::curry_tree_hash(asset_id, inner_puzzle_hash).into();
        let puzzle = cat_puzzle(asset_id, &standard_puzzle(synthetic_key)?)?;

        let puzzles = OwnedPuzzles::from_iter([PuzzleDetail {
            puzzle_hash,
            puzzle: puzzle.clone(),
            secret_key: sk,
        }]);

        Ok(Fixture {
            synthetic_key,
            inner_puzzle_hash: inner_puzzle_hash.into(),
            puzzle_hash,
            puzzle,
            puzzles,
        })
    }

    /// Creates a CAT coin for each amount, each the child of a recorded CAT parent of the
    /// same amount whose own parent is `[index + 1; 32]`.
    fn cat_coins(fixture: &Fixture, amounts: &[u64]) -> (Vec<Coin>, Parents) {
        let mut parents = Parents::default();
        let mut coins = Vec::with_capacity(amounts.len());

        for (index, &amount) in amounts.iter().enumerate() {
            let parent = Coin::new(
                Bytes32::new([index as u8 + 1; 32]),
                fixture.puzzle_hash,
                amount,
            );

            parents.0.insert(
                parent.coin_id(),
                ParentPuzzle {
                    parent_parent_coin_id: parent.parent_coin_info,
                    amount: parent.amount,
                    puzzle_reveal: fixture.puzzle.clone(),
                },
            );

            coins.push(Coin::new(parent.coin_id(), fixture.puzzle_hash, amount));
        }

        (coins, parents)
    }

    #[test]
    fn test_parse_cat_puzzle() -> anyhow::Result<()> {
        let fixture = fixture(ASSET_ID)?;

        assert_eq!(
            CatPuzzleInfo::parse(&fixture.puzzle)?,
            Some(CatPuzzleInfo {
                asset_id: ASSET_ID,
                inner_puzzle_hash: fixture.inner_puzzle_hash,
            })
        );
        assert_eq!(
            CatPuzzleInfo::parse(&standard_puzzle(fixture.synthetic_key)?)?,
            None
        );

        Ok(())
    }

    #[test]
    fn test_cat_inner_solution() {
        let address = Bytes32::new([0xbb; 32]);
        let hex = hex::encode(address);

        assert_eq!(
            cat_inner_solution(&[
                TransferTarget::new("BSH", address, 10),
                TransferTarget::new("BSH", address, 5).with_memos(vec![Bytes::new(vec![1])]),
            ]),
            format!("(() (q (51 0x{hex} 10 (0x{hex})) (51 0x{hex} 5 (0x01))) ())")
        );
    }

    #[tokio::test]
    async fn test_cat_ring() -> anyhow::Result<()> {
        let fixture = fixture(ASSET_ID)?;

        let (coins, parents) = cat_coins(&fixture, &[70, 30]);

        let recipient = Bytes32::new([0xbb; 32]);
        let plan = TokenSpendPlan {
            coins: coins.clone(),
            targets: vec![
                TransferTarget::new("BSH", recipient, 60),
                TransferTarget::new("BSH", fixture.inner_puzzle_hash, 40),
            ],
        };

        let coin_spends = CatSpendGenerator::new(&parents)
            .with_asset_id(ASSET_ID)
            .generate_coin_spends(&plan, &fixture.puzzles)
            .await?;

        assert_eq!(coin_spends.len(), 2);

        let mut allocator = Allocator::new();

        for (index, coin_spend) in coin_spends.iter().enumerate() {
            assert_eq!(coin_spend.coin, coins[index]);
            assert_eq!(coin_spend.puzzle_reveal, fixture.puzzle);

            let ptr = coin_spend.solution.to_clvm(&mut allocator)?;
            let solution = CatSolution::<NodePtr>::from_clvm(&allocator, ptr)?;

            let prev = &coins[(index + 1) % 2];
            let next = &coins[(index + 1) % 2];

            assert_eq!(solution.prev_coin_id, prev.coin_id());
            assert_eq!(solution.this_coin_info, coins[index]);
            assert_eq!(
                solution.next_coin_proof,
                CoinProof {
                    parent_coin_info: next.parent_coin_info,
                    inner_puzzle_hash: fixture.inner_puzzle_hash,
                    amount: next.amount,
                }
            );
            assert_eq!(
                solution.lineage_proof,
                Some(LineageProof {
                    parent_parent_coin_info: Bytes32::new([index as u8 + 1; 32]),
                    parent_inner_puzzle_hash: fixture.inner_puzzle_hash,
                    parent_amount: coins[index].amount,
                })
            );
            assert_eq!(solution.extra_delta, 0);
            assert_eq!(solution.prev_subtotal, [0, -30][index]);

            let conditions = parse_conditions(&run_puzzle(
                &coin_spend.puzzle_reveal,
                &coin_spend.solution,
            )?)?;
            let created = conditions
                .iter()
                .filter(|condition| condition.opcode == CREATE_COIN)
                .count();

            assert_eq!(created, [2, 0][index]);
            assert!(conditions
                .iter()
                .any(|condition| condition.opcode == AGG_SIG_ME));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_cat_outputs() -> anyhow::Result<()> {
        let fixture = fixture(ASSET_ID)?;

        let (coins, parents) = cat_coins(&fixture, &[100]);
        let recipient = Bytes32::new([0xbb; 32]);
        let plan = TokenSpendPlan {
            coins,
            targets: vec![TransferTarget::new("BSH", recipient, 100)],
        };

        let coin_spends = CatSpendGenerator::new(&parents)
            .generate_coin_spends(&plan, &fixture.puzzles)
            .await?;

        let conditions = parse_conditions(&run_puzzle(
            &coin_spends[0].puzzle_reveal,
            &coin_spends[0].solution,
        )?)?;

        let wrapped: Bytes32 = CatArgs::curry_tree_hash(ASSET_ID, recipient.into()).into();

        assert!(conditions.iter().any(|condition| condition.opcode == AGG_SIG_ME
            && condition.args[0]
                == ConditionArg::Atom(Bytes::new(fixture.synthetic_key.to_bytes().to_vec()))));
        assert!(conditions.iter().any(|condition| condition.opcode == CREATE_COIN
            && condition.args[0] == ConditionArg::Atom(Bytes::new(wrapped.to_vec()))));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_parent() -> anyhow::Result<()> {
        let fixture = fixture(ASSET_ID)?;

        let plan = TokenSpendPlan {
            coins: vec![Coin::new(Bytes32::new([1; 32]), fixture.puzzle_hash, 100)],
            targets: vec![TransferTarget::new("BSH", Bytes32::new([0xbb; 32]), 100)],
        };

        let result = CatSpendGenerator::new(&Parents::default())
            .generate_coin_spends(&plan, &fixture.puzzles)
            .await;

        assert!(matches!(
            result,
            Err(DriverError::MissingParent(parent)) if parent == Bytes32::new([1; 32])
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_asset_id_mismatch() -> anyhow::Result<()> {
        let fixture = fixture(ASSET_ID)?;
        let (coins, parents) = cat_coins(&fixture, &[100]);

        let plan = TokenSpendPlan {
            coins,
            targets: vec![TransferTarget::new("BSH", Bytes32::new([0xbb; 32]), 100)],
        };

        let result = CatSpendGenerator::new(&parents)
            .with_asset_id(Bytes32::new([0x11; 32]))
            .generate_coin_spends(&plan, &fixture.puzzles)
            .await;

        assert!(matches!(result, Err(DriverError::AssetIdMismatch { .. })));

        Ok(())
    }
}
