pub mod types;
pub mod keymap;
pub mod buckets;
pub mod compose;
pub mod romaji;

pub use types::*;

// Re-export commonly used types
pub use types::layout::{Character, KeyBinding, Modifier, ModifierSet, ShiftState};
pub use types::errors::{BuildError, Result};
pub use keymap::Arrangement;
pub use buckets::{Bucket, Buckets, Classified, Shortcuts, SpecialSlots};
pub use compose::{CompositionKind, CompositionRule, CompositionSet, EmittedId, IdRegistry};
