use chia_protocol::Bytes32;
use chia_transfer_types::{Network, DEFAULT_HIDDEN_PUZZLE_HASH};

/// The values needed to derive synthetic keys and sign `AGG_SIG_ME` conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlsContext {
    pub agg_sig_me_additional_data: Bytes32,
    pub hidden_puzzle_hash: Bytes32,
}

impl BlsContext {
    pub fn new(agg_sig_me_additional_data: Bytes32) -> Self {
        Self {
            agg_sig_me_additional_data,
            hidden_puzzle_hash: DEFAULT_HIDDEN_PUZZLE_HASH,
        }
    }

    #[must_use]
    pub fn with_hidden_puzzle_hash(mut self, hidden_puzzle_hash: Bytes32) -> Self {
        self.hidden_puzzle_hash = hidden_puzzle_hash;
        self
    }
}

impl From<&Network> for BlsContext {
    fn from(network: &Network) -> Self {
        Self::new(network.agg_sig_me_additional_data)
    }
}
