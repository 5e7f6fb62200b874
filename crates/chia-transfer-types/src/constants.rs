use chia_protocol::Bytes32;
use hex_literal::hex;
use num_bigint::{BigInt, Sign};
use once_cell::sync::Lazy;

/// The hidden puzzle hash used by the standard puzzle when no custom hidden puzzle is
/// specified. It is the tree hash of `(=)`, which always fails.
pub const DEFAULT_HIDDEN_PUZZLE_HASH: Bytes32 = Bytes32::new(hex!(
    "711d6c4e32c92e53179b199484cf8c897542bc57f2b22582799f9d657eec4699"
));

/// The order of the BLS12-381 G1 group, big-endian.
pub const GROUP_ORDER_BYTES: [u8; 32] =
    hex!("73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001");

pub static GROUP_ORDER: Lazy<BigInt> =
    Lazy::new(|| BigInt::from_bytes_be(Sign::Plus, &GROUP_ORDER_BYTES));

/// The maximum cost allowed when running a single puzzle.
pub const MAX_PUZZLE_COST: u64 = 11_000_000_000;
