mod cat_spend;
mod delegated_puzzle;
mod driver_error;
mod evaluator;
mod parent_lookup;
mod spend_generator;
mod standard_spend;

pub use cat_spend::*;
pub use delegated_puzzle::*;
pub use driver_error::*;
pub use evaluator::*;
pub use parent_lookup::*;
pub use spend_generator::*;
pub use standard_spend::*;
