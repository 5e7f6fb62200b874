use chia_transfer_driver::DriverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("bls error: {0}")]
    Bls(#[from] chia_bls::Error),

    #[error("malformed AGG_SIG_ME condition")]
    MalformedAggSig,

    #[error("bad aggregate signature")]
    BadAggregateSignature,
}
