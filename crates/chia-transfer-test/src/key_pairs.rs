use bip39::Mnemonic;
use chia_bls::{PublicKey, SecretKey};
use chia_protocol::Bytes32;
use chia_puzzle_types::{cat::CatArgs, standard::StandardArgs, DeriveSynthetic};
use chia_transfer_driver::{cat_puzzle, standard_puzzle, DriverError};
use chia_transfer_types::PuzzleDetail;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A deterministic key pair and the standard puzzle hash of its synthetic key.
#[derive(Debug, Clone)]
pub struct BlsPair {
    pub sk: SecretKey,
    pub pk: PublicKey,
    pub synthetic_key: PublicKey,
    pub puzzle_hash: Bytes32,
}

impl Default for BlsPair {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BlsPair {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let entropy: [u8; 32] = rng.gen();
        let mnemonic = Mnemonic::from_entropy(&entropy).unwrap();
        let seed = mnemonic.to_seed("");
        let sk = SecretKey::from_seed(&seed);
        let pk = sk.public_key();
        let synthetic_key = pk.derive_synthetic();
        Self {
            sk,
            pk,
            synthetic_key,
            puzzle_hash: StandardArgs::curry_tree_hash(synthetic_key).into(),
        }
    }

    pub fn range_vec(length: usize) -> Vec<Self> {
        Self::range_vec_with_seed(0, length)
    }

    pub fn range_vec_with_seed(seed: u64, length: usize) -> Vec<Self> {
        (0..length as u64).map(|i| Self::new(seed + i)).collect()
    }

    /// The puzzle hash of a CAT of the given asset owned by this key.
    pub fn cat_puzzle_hash(&self, asset_id: Bytes32) -> Bytes32 {
        CatArgs::curry_tree_hash(asset_id, self.puzzle_hash.into()).into()
    }

    pub fn standard_puzzle_detail(&self) -> Result<PuzzleDetail, DriverError> {
        Ok(PuzzleDetail {
            puzzle_hash: self.puzzle_hash,
            puzzle: standard_puzzle(self.synthetic_key)?,
            secret_key: self.sk.clone(),
        })
    }

    pub fn cat_puzzle_detail(&self, asset_id: Bytes32) -> Result<PuzzleDetail, DriverError> {
        Ok(PuzzleDetail {
            puzzle_hash: self.cat_puzzle_hash(asset_id),
            puzzle: cat_puzzle(asset_id, &standard_puzzle(self.synthetic_key)?)?,
            secret_key: self.sk.clone(),
        })
    }
}
