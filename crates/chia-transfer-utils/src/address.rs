use bech32::{u5, Variant};
use chia_protocol::Bytes32;
use chia_transfer_types::Network;
use thiserror::Error;

/// Errors you can get while converting between addresses and puzzle hashes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressError {
    #[error("address is not bech32m encoded")]
    InvalidFormat,

    #[error("expected a 32 byte puzzle hash, found {0} bytes")]
    WrongLength(usize),

    #[error("address prefix {found} does not match network prefix {expected}")]
    WrongPrefix { found: String, expected: String },

    #[error("invalid puzzle hash hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
}

/// A transfer destination, as a puzzle hash paired with the prefix it is displayed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub puzzle_hash: Bytes32,
    pub prefix: String,
}

impl Address {
    pub fn new(puzzle_hash: Bytes32, prefix: impl Into<String>) -> Self {
        Self {
            puzzle_hash,
            prefix: prefix.into(),
        }
    }

    pub fn decode(address: &str) -> Result<Self, AddressError> {
        let (prefix, data, variant) = bech32::decode(address)?;

        if variant != Variant::Bech32m {
            return Err(AddressError::InvalidFormat);
        }

        let data = bech32::convert_bits(&data, 5, 8, false)?;
        let length = data.len();
        let puzzle_hash: [u8; 32] = data
            .try_into()
            .map_err(|_| AddressError::WrongLength(length))?;

        Ok(Self::new(puzzle_hash.into(), prefix))
    }

    pub fn encode(&self) -> Result<String, AddressError> {
        let data = bech32::convert_bits(&self.puzzle_hash, 8, 5, true)?
            .into_iter()
            .map(u5::try_from_u8)
            .collect::<Result<Vec<_>, bech32::Error>>()?;
        Ok(bech32::encode(&self.prefix, data, Variant::Bech32m)?)
    }
}

/// Parses a transfer destination, which is either a bech32m address for the network
/// or a puzzle hash in hex with an optional `0x` prefix.
pub fn parse_puzzle_hash(value: &str, network: &Network) -> Result<Bytes32, AddressError> {
    let stripped = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    if stripped.len() == 64 && stripped.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        let bytes = hex::decode(stripped)?;
        let length = bytes.len();
        let puzzle_hash: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AddressError::WrongLength(length))?;
        return Ok(puzzle_hash.into());
    }

    let address = Address::decode(value)?;

    if address.prefix != network.prefix {
        return Err(AddressError::WrongPrefix {
            found: address.prefix,
            expected: network.prefix.clone(),
        });
    }

    Ok(address.puzzle_hash)
}
