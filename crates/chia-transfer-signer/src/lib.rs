mod bls_context;
mod condition_signer;
mod signer_error;
mod spend_bundle_assembler;
mod synthetic_key;

pub use bls_context::*;
pub use condition_signer::*;
pub use signer_error::*;
pub use spend_bundle_assembler::*;
pub use synthetic_key::*;
