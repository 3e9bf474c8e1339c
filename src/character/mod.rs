//! Per-character state and the sheet wrapper around it.

mod sheet;
mod state;

pub use sheet::CharacterSheet;
pub use state::{CharacterState, ResourceState};
