use chia_bls::{aggregate_verify, PublicKey};
use chia_protocol::{Bytes32, SpendBundle};
use chia_transfer_driver::{parse_conditions, run_puzzle};
use chia_transfer_types::{coin_name, ConditionArg, AGG_SIG_ME};

use crate::VerifyError;

/// Runs every coin spend in the bundle and checks the aggregated signature against the
/// `AGG_SIG_ME` conditions they output.
pub fn verify_spend_bundle(
    spend_bundle: &SpendBundle,
    agg_sig_me_additional_data: Bytes32,
) -> Result<(), VerifyError> {
    let mut pairs = Vec::new();

    for coin_spend in &spend_bundle.coin_spends {
        let output = run_puzzle(&coin_spend.puzzle_reveal, &coin_spend.solution)?;
        let coin_id = coin_name(&coin_spend.coin);

        for condition in parse_conditions(&output)? {
            if condition.opcode != AGG_SIG_ME {
                continue;
            }

            let [ConditionArg::Atom(public_key), ConditionArg::Atom(message)] =
                condition.args.as_slice()
            else {
                return Err(VerifyError::MalformedAggSig);
            };

            let public_key = <[u8; 48]>::try_from(public_key.to_vec())
                .map_err(|_| VerifyError::MalformedAggSig)?;

            let message = [
                message.to_vec(),
                coin_id.to_vec(),
                agg_sig_me_additional_data.to_vec(),
            ]
            .concat();

            pairs.push((PublicKey::from_bytes(&public_key)?, message));
        }
    }

    if !aggregate_verify(&spend_bundle.aggregated_signature, pairs) {
        return Err(VerifyError::BadAggregateSignature);
    }

    Ok(())
}
