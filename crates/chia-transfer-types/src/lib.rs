mod coin_name;
mod condition;
mod constants;
mod network;
mod puzzle_detail;
mod transfer;

pub mod serde_hex;

pub use coin_name::*;
pub use condition::*;
pub use constants::*;
pub use network::*;
pub use puzzle_detail::*;
pub use transfer::*;
