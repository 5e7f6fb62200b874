use chia_bls::SecretKey;
use chia_protocol::{Bytes32, Program};
use indexmap::IndexMap;

/// A puzzle controlled by the wallet, along with the base secret key that owns it.
#[derive(Debug, Clone)]
pub struct PuzzleDetail {
    pub puzzle_hash: Bytes32,
    pub puzzle: Program,
    pub secret_key: SecretKey,
}

/// The puzzles the wallet controls for a single token. The asset id is `None`
/// for the native token.
#[derive(Debug, Clone)]
pub struct TokenPuzzleDetail {
    pub symbol: String,
    pub asset_id: Option<Bytes32>,
    pub puzzles: Vec<PuzzleDetail>,
}

/// Every puzzle the wallet controls, keyed by puzzle hash.
#[derive(Debug, Default, Clone)]
pub struct OwnedPuzzles {
    puzzles: IndexMap<Bytes32, PuzzleDetail>,
}

impl OwnedPuzzles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, detail: PuzzleDetail) {
        self.puzzles.insert(detail.puzzle_hash, detail);
    }

    pub fn get(&self, puzzle_hash: &Bytes32) -> Option<&PuzzleDetail> {
        self.puzzles.get(puzzle_hash)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

impl FromIterator<PuzzleDetail> for OwnedPuzzles {
    fn from_iter<T: IntoIterator<Item = PuzzleDetail>>(iter: T) -> Self {
        let mut puzzles = Self::new();
        for detail in iter {
            puzzles.insert(detail);
        }
        puzzles
    }
}

impl From<&[TokenPuzzleDetail]> for OwnedPuzzles {
    fn from(tokens: &[TokenPuzzleDetail]) -> Self {
        tokens
            .iter()
            .flat_map(|token| token.puzzles.iter().cloned())
            .collect()
    }
}
