//! Player-side editing: inventory, block selection, timed mining.
#![forbid(unsafe_code)]

mod inventory;
mod mining;
mod session;

pub use inventory::{BlockSelector, Inventory};
pub use mining::{MiningProgress, MiningStep};
pub use session::{EditError, EditSession};
