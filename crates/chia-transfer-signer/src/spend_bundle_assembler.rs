use std::future::{self, Future};

use chia_bls::{aggregate, Signature};
use chia_protocol::{Bytes32, CoinSpend, SpendBundle};
use chia_transfer_driver::{
    parse_conditions, CatSpendGenerator, ClvmEvaluator, DriverError, ParentLookup, ParentPuzzle,
    PuzzleEvaluator, SpendGenerator, StandardSpendGenerator,
};
use chia_transfer_types::{coin_name, Network, OwnedPuzzles, SpendPlan, TokenPuzzleDetail};
use tracing::{debug, trace};

use crate::{sign_conditions, synthetic_secret_key, BlsContext, SignerError};

/// Renders a signature as `0x` prefixed hex.
pub fn signature_hex(signature: &Signature) -> String {
    format!("0x{}", hex::encode(signature.to_bytes()))
}

/// Stands in for a parent lookup when only native coins are spent.
#[derive(Debug, Clone, Copy)]
struct NoParentLookup;

impl ParentLookup for NoParentLookup {
    fn parent_puzzle(
        &self,
        _parent_coin_id: Bytes32,
    ) -> impl Future<Output = Result<Option<ParentPuzzle>, DriverError>> + Send {
        future::ready(Ok(None))
    }
}

/// Turns a spend plan into a signed spend bundle.
///
/// Native coins are spent with the standard puzzle, and every other token is spent as a
/// CAT. Each coin spend is evaluated to find the `AGG_SIG_ME` conditions that need to be
/// signed with the synthetic key of the puzzle that owns the coin.
#[derive(Debug, Clone)]
pub struct SpendBundleAssembler<E = ClvmEvaluator> {
    network: Network,
    context: Option<BlsContext>,
    evaluator: E,
}

impl SpendBundleAssembler {
    /// Creates an assembler without a [`BlsContext`]. It must be initialized before use.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            context: None,
            evaluator: ClvmEvaluator,
        }
    }

    /// Creates an assembler initialized with the context of the network.
    pub fn for_network(network: Network) -> Self {
        let context = BlsContext::from(&network);
        Self::new(network).with_context(context)
    }
}

impl<E> SpendBundleAssembler<E>
where
    E: PuzzleEvaluator,
{
    #[must_use]
    pub fn with_context(mut self, context: BlsContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_evaluator<T>(self, evaluator: T) -> SpendBundleAssembler<T>
    where
        T: PuzzleEvaluator,
    {
        SpendBundleAssembler {
            network: self.network,
            context: self.context,
            evaluator,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn context(&self) -> Option<&BlsContext> {
        self.context.as_ref()
    }

    /// Builds and signs the coin spends of a plan that only spends the native token.
    pub async fn generate_spend_bundle(
        &self,
        plan: SpendPlan,
        puzzles: &[TokenPuzzleDetail],
    ) -> Result<SpendBundle, SignerError> {
        self.assemble(plan, puzzles, None::<&NoParentLookup>).await
    }

    /// Builds and signs the coin spends of a plan, looking up the parents of CAT coins
    /// to prove their lineage.
    pub async fn generate_spend_bundle_with_lookup<L>(
        &self,
        plan: SpendPlan,
        puzzles: &[TokenPuzzleDetail],
        lookup: &L,
    ) -> Result<SpendBundle, SignerError>
    where
        L: ParentLookup,
    {
        self.assemble(plan, puzzles, Some(lookup)).await
    }

    async fn assemble<L>(
        &self,
        plan: SpendPlan,
        puzzles: &[TokenPuzzleDetail],
        lookup: Option<&L>,
    ) -> Result<SpendBundle, SignerError>
    where
        L: ParentLookup,
    {
        let context = self.context.as_ref().ok_or(SignerError::NotInitialized)?;
        let owned = OwnedPuzzles::from(puzzles);

        let mut coin_spends = Vec::new();
        let mut signatures = Vec::new();

        for (symbol, token_plan) in &plan {
            let token_spends = if self.network.is_native(symbol) {
                StandardSpendGenerator
                    .generate_coin_spends(token_plan, &owned)
                    .await?
            } else {
                let lookup =
                    lookup.ok_or_else(|| SignerError::MissingParentLookup(symbol.clone()))?;
                let mut generator = CatSpendGenerator::new(lookup);

                if let Some(asset_id) = puzzles
                    .iter()
                    .find(|token| &token.symbol == symbol)
                    .and_then(|token| token.asset_id)
                {
                    generator = generator.with_asset_id(asset_id);
                }

                generator.generate_coin_spends(token_plan, &owned).await?
            };

            debug!(%symbol, coin_spends = token_spends.len(), "generated coin spends");

            for coin_spend in &token_spends {
                signatures.extend(self.sign_coin_spend(context, coin_spend, &owned).await?);
            }

            coin_spends.extend(token_spends);
        }

        Ok(SpendBundle::new(coin_spends, aggregate(&signatures)))
    }

    /// Signs coin spends that have already been built, returning the aggregated signature.
    pub async fn sign_coin_spends(
        &self,
        coin_spends: &[CoinSpend],
        puzzles: &[TokenPuzzleDetail],
    ) -> Result<Signature, SignerError> {
        let context = self.context.as_ref().ok_or(SignerError::NotInitialized)?;
        let owned = OwnedPuzzles::from(puzzles);

        let mut signatures = Vec::new();
        for coin_spend in coin_spends {
            signatures.extend(self.sign_coin_spend(context, coin_spend, &owned).await?);
        }

        Ok(aggregate(&signatures))
    }

    async fn sign_coin_spend(
        &self,
        context: &BlsContext,
        coin_spend: &CoinSpend,
        owned: &OwnedPuzzles,
    ) -> Result<Vec<Signature>, SignerError> {
        let puzzle_hash = coin_spend.coin.puzzle_hash;
        let detail = owned
            .get(&puzzle_hash)
            .ok_or(SignerError::PuzzleNotOwned(puzzle_hash))?;

        let synthetic_key = synthetic_secret_key(&detail.secret_key, context.hidden_puzzle_hash)?;
        let coin_id = coin_name(&coin_spend.coin);

        let output = self
            .evaluator
            .evaluate(&detail.puzzle, &coin_spend.solution)
            .await?;
        let conditions = parse_conditions(&output)?;

        let signatures = sign_conditions(&conditions, &synthetic_key, coin_id, context)?;
        trace!(%coin_id, signatures = signatures.len(), "signed coin spend");

        Ok(signatures)
    }
}
