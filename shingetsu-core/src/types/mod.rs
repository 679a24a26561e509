pub mod layout;
pub mod errors;

pub use layout::{Character, KeyBinding, Modifier, ModifierSet, ShiftState};
pub use errors::{BuildError, Result};
