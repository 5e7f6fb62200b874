pub use chia_bls::{PublicKey, SecretKey, Signature};
pub use chia_protocol::{Bytes, Bytes32, Coin, CoinSpend, Program, SpendBundle};

pub use chia_transfer_driver::{
    ClvmEvaluator, DriverError, ParentLookup, ParentPuzzle, PuzzleEvaluator, SpendGenerator,
};
pub use chia_transfer_signer::{signature_hex, BlsContext, SignerError, SpendBundleAssembler};
pub use chia_transfer_types::{
    coin_name, Network, PuzzleDetail, SpendPlan, SymbolCoins, TokenPuzzleDetail,
    TokenSpendPlan, TransferTarget,
};
pub use chia_transfer_utils::{
    generate_spend_plan, parse_puzzle_hash, Address, AddressError, CoinSelectionError,
};
