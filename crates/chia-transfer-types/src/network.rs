use chia_protocol::Bytes32;
use hex_literal::hex;
use serde::{Deserialize, Serialize};

use crate::serde_hex::hex_bytes32;

const MAINNET_GENESIS_CHALLENGE: Bytes32 = Bytes32::new(hex!(
    "ccd5bb71183532bff220ba46c268991a3ff07eb358e8255a65c30a2dce0e5fbb"
));

const TESTNET11_GENESIS_CHALLENGE: Bytes32 = Bytes32::new(hex!(
    "37a90eb5185a9c4439a91ddc98bbadce7b4feba060d50116a067de66bf236615"
));

/// The network a transfer is built for. This determines the native token symbol,
/// the address prefix, and the additional data appended to `AGG_SIG_ME` messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub prefix: String,
    pub symbol: String,
    #[serde(with = "hex_bytes32")]
    pub genesis_challenge: Bytes32,
    #[serde(with = "hex_bytes32")]
    pub agg_sig_me_additional_data: Bytes32,
}

impl Network {
    pub fn mainnet() -> Self {
        Self {
            prefix: "xch".to_string(),
            symbol: "XCH".to_string(),
            genesis_challenge: MAINNET_GENESIS_CHALLENGE,
            agg_sig_me_additional_data: MAINNET_GENESIS_CHALLENGE,
        }
    }

    pub fn testnet11() -> Self {
        Self {
            prefix: "txch".to_string(),
            symbol: "TXCH".to_string(),
            genesis_challenge: TESTNET11_GENESIS_CHALLENGE,
            agg_sig_me_additional_data: TESTNET11_GENESIS_CHALLENGE,
        }
    }

    /// Whether the symbol refers to the native token, ignoring case.
    pub fn is_native(&self, symbol: &str) -> bool {
        symbol.eq_ignore_ascii_case(&self.symbol)
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::mainnet()
    }
}
