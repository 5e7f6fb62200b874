use chia_protocol::{Bytes32, Coin};
use chia_sha2::Sha256;
use num_bigint::{BigInt, Sign};

/// Encodes an integer the way CLVM stores signed atoms: minimal two's complement,
/// big-endian, with zero encoded as the empty string.
pub fn signed_bytes_be(value: &BigInt) -> Vec<u8> {
    if value.sign() == Sign::NoSign {
        return Vec::new();
    }
    value.to_signed_bytes_be()
}

/// Computes the name (id) of a coin.
///
/// The amount is hashed using the signed atom encoding, so an amount with the
/// high bit set gains a leading zero byte.
pub fn coin_name(coin: &Coin) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update(coin.parent_coin_info);
    hasher.update(coin.puzzle_hash);
    hasher.update(signed_bytes_be(&BigInt::from(coin.amount)));
    hasher.finalize().into()
}

/// The coin name as `0x` prefixed hex.
pub fn coin_name_hex(coin: &Coin) -> String {
    format!("0x{}", hex::encode(coin_name(coin)))
}
