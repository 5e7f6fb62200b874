//! Builds and signs Chia spend bundles that transfer the native token and CATs.
//!
//! A transfer goes through three steps. Coins are selected for each token with
//! [`generate_spend_plan`](utils::generate_spend_plan), the selected coins are turned into
//! coin spends, and every `AGG_SIG_ME` condition they output is signed with the synthetic
//! key of the puzzle that owns the coin. The last two steps are done by
//! [`SpendBundleAssembler`](signer::SpendBundleAssembler).

pub use chia_transfer_driver as driver;
pub use chia_transfer_signer as signer;
pub use chia_transfer_types as types;
pub use chia_transfer_utils as utils;

pub mod prelude;
