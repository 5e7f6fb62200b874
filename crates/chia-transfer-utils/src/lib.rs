mod address;
mod coin_locks;
mod coin_selection;

pub use address::*;
pub use coin_locks::*;
pub use coin_selection::*;
