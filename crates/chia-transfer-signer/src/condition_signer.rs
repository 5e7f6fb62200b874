use chia_bls::{sign, SecretKey, Signature};
use chia_protocol::Bytes32;
use chia_transfer_types::{Condition, ConditionArg, AGG_SIG_ME, AGG_SIG_UNSAFE};

use crate::{BlsContext, SignerError};

/// Signs every `AGG_SIG_ME` condition output by a coin spend with its synthetic key.
///
/// The message signed is the condition's message followed by the coin id and the
/// network's additional data. Other conditions are ignored, except for `AGG_SIG_UNSAFE`,
/// which is not supported.
pub fn sign_conditions(
    conditions: &[Condition],
    synthetic_key: &SecretKey,
    coin_id: Bytes32,
    context: &BlsContext,
) -> Result<Vec<Signature>, SignerError> {
    let synthetic_public_key = synthetic_key.public_key().to_bytes();
    let mut signatures = Vec::new();

    for condition in conditions {
        match condition.opcode {
            AGG_SIG_UNSAFE => return Err(SignerError::UnsupportedCondition(AGG_SIG_UNSAFE)),
            AGG_SIG_ME => {}
            _ => continue,
        }

        let [ConditionArg::Atom(public_key), ConditionArg::Atom(message)] =
            condition.args.as_slice()
        else {
            return Err(SignerError::UnexpectedConditionShape(format!(
                "expected a public key and message, found {} arguments",
                condition.args.len()
            )));
        };

        if public_key.to_vec() != synthetic_public_key {
            return Err(SignerError::UnexpectedConditionShape(format!(
                "public key 0x{} is not the synthetic key",
                hex::encode(public_key)
            )));
        }

        let message = [
            message.to_vec(),
            coin_id.to_vec(),
            context.agg_sig_me_additional_data.to_vec(),
        ]
        .concat();

        signatures.push(sign(synthetic_key, message));
    }

    Ok(signatures)
}

#[cfg(test)]
mod tests {
    use chia_bls::{aggregate, verify};
    use chia_protocol::Bytes;
    use chia_transfer_types::{Network, CREATE_COIN};

    use super::*;

    fn agg_sig_me(public_key: &[u8], message: &[u8]) -> Condition {
        Condition::new(
            AGG_SIG_ME,
            vec![
                ConditionArg::Atom(Bytes::new(public_key.to_vec())),
                ConditionArg::Atom(Bytes::new(message.to_vec())),
            ],
        )
    }

    #[test]
    fn test_sign_agg_sig_me() -> anyhow::Result<()> {
        let synthetic_key = SecretKey::from_seed(&[1; 32]);
        let public_key = synthetic_key.public_key();
        let context = BlsContext::from(&Network::mainnet());
        let coin_id = Bytes32::new([2; 32]);

        let conditions = [
            agg_sig_me(&public_key.to_bytes(), b"hello"),
            Condition::new(CREATE_COIN, Vec::new()),
            agg_sig_me(&public_key.to_bytes(), b"world"),
        ];

        let signatures = sign_conditions(&conditions, &synthetic_key, coin_id, &context)?;
        assert_eq!(signatures.len(), 2);

        let message = [
            b"hello".to_vec(),
            coin_id.to_vec(),
            context.agg_sig_me_additional_data.to_vec(),
        ]
        .concat();
        assert!(verify(&signatures[0], &public_key, message));

        assert_eq!(
            aggregate(&signatures),
            aggregate(signatures.iter().rev())
        );

        Ok(())
    }

    #[test]
    fn test_no_conditions() -> anyhow::Result<()> {
        let signatures = sign_conditions(
            &[],
            &SecretKey::from_seed(&[1; 32]),
            Bytes32::default(),
            &BlsContext::from(&Network::mainnet()),
        )?;
        assert!(signatures.is_empty());
        Ok(())
    }

    #[test]
    fn test_unsupported_unsafe() {
        let synthetic_key = SecretKey::from_seed(&[1; 32]);
        let condition = Condition::new(AGG_SIG_UNSAFE, Vec::new());

        let result = sign_conditions(
            &[condition],
            &synthetic_key,
            Bytes32::default(),
            &BlsContext::from(&Network::mainnet()),
        );

        assert!(matches!(
            result,
            Err(SignerError::UnsupportedCondition(AGG_SIG_UNSAFE))
        ));
    }

    #[test]
    fn test_unexpected_shape() {
        let synthetic_key = SecretKey::from_seed(&[1; 32]);
        let public_key = synthetic_key.public_key().to_bytes();
        let context = BlsContext::from(&Network::mainnet());

        let wrong_count = Condition::new(
            AGG_SIG_ME,
            vec![ConditionArg::Atom(Bytes::new(public_key.to_vec()))],
        );
        let wrong_key = agg_sig_me(&[7; 48], b"hello");
        let nested = Condition::new(
            AGG_SIG_ME,
            vec![
                ConditionArg::Atom(Bytes::new(public_key.to_vec())),
                ConditionArg::List(Vec::new()),
            ],
        );

        for condition in [wrong_count, wrong_key, nested] {
            assert!(matches!(
                sign_conditions(&[condition], &synthetic_key, Bytes32::default(), &context),
                Err(SignerError::UnexpectedConditionShape(_))
            ));
        }
    }
}
