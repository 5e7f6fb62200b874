use chia_bls::{PublicKey, SecretKey};
use chia_protocol::Bytes32;
use chia_sha2::Sha256;
use chia_transfer_types::GROUP_ORDER;
use num_bigint::{BigInt, Sign};

use crate::SignerError;

/// The offset added to a key so that its synthetic key also commits to the hidden puzzle.
pub fn synthetic_offset(public_key: &PublicKey, hidden_puzzle_hash: Bytes32) -> BigInt {
    let mut hasher = Sha256::new();
    hasher.update(public_key.to_bytes());
    hasher.update(hidden_puzzle_hash);
    let blob: [u8; 32] = hasher.finalize();

    let mut offset = BigInt::from_signed_bytes_be(&blob);
    while offset.sign() == Sign::Minus {
        offset += &*GROUP_ORDER;
    }
    offset % &*GROUP_ORDER
}

/// Derives the synthetic secret key that signs for the standard puzzle of a key.
pub fn synthetic_secret_key(
    secret_key: &SecretKey,
    hidden_puzzle_hash: Bytes32,
) -> Result<SecretKey, SignerError> {
    let secret_exponent = BigInt::from_signed_bytes_be(&secret_key.to_bytes());
    let offset = synthetic_offset(&secret_key.public_key(), hidden_puzzle_hash);
    let synthetic_exponent = (secret_exponent + offset) % &*GROUP_ORDER;

    let (_, bytes) = synthetic_exponent.to_bytes_be();
    let mut padded = [0; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);

    Ok(SecretKey::from_bytes(&padded)?)
}
