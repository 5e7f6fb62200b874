mod error;
mod fixtures;
mod key_pairs;
mod parent_lookup;
mod verify;

pub use error::*;
pub use fixtures::*;
pub use key_pairs::*;
pub use parent_lookup::*;
pub use verify::*;
