//! LastEmitted identifier allocation.
//!
//! Each character that can take part in postfix composition carries a
//! unique identifier in the generated ruleset's `last` state variable.
//! Identifiers are tagged by composition depth — a freshly emitted base
//! character, a depth-1 result, and a depth-2 result live in disjoint
//! spaces — so a second diacritic press can never be mistaken for a first.
//! The whole space is allocated once, before rule emission.

use std::collections::BTreeMap;

use crate::types::errors::{BuildError, Result};
use crate::types::layout::Character;

/// Which composition depth an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IdClass {
    /// Emitted directly from a bucket; eligible for a first diacritic press.
    Base,
    /// Result of a first press (voiced, or a depth-1 small form).
    Voiced,
    /// Result of a second press; the chain is terminal here.
    SemiVoicedOrSmall,
}

/// A tagged LastEmitted identifier. The wire value is what the ruleset's
/// conditions and variable updates carry; 0 is reserved for "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmittedId {
    Base(u16),
    Voiced(u16),
    SemiVoicedOrSmall(u16),
}

impl EmittedId {
    pub fn wire(self) -> u16 {
        match self {
            Self::Base(v) | Self::Voiced(v) | Self::SemiVoicedOrSmall(v) => v,
        }
    }

    pub fn class(self) -> IdClass {
        match self {
            Self::Base(_) => IdClass::Base,
            Self::Voiced(_) => IdClass::Voiced,
            Self::SemiVoicedOrSmall(_) => IdClass::SemiVoicedOrSmall,
        }
    }

    fn new(class: IdClass, value: u16) -> Self {
        match class {
            IdClass::Base => Self::Base(value),
            IdClass::Voiced => Self::Voiced(value),
            IdClass::SemiVoicedOrSmall => Self::SemiVoicedOrSmall(value),
        }
    }
}

/// Allocates wire values sequentially from 1 and guarantees that no two
/// (character, class) pairs share one. Allocating the same pair twice is
/// the identifier-collision build error.
#[derive(Debug)]
pub struct IdRegistry {
    ids: BTreeMap<(Character, IdClass), u16>,
    next: u16,
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdRegistry {
    pub fn new() -> Self {
        Self {
            ids: BTreeMap::new(),
            next: 1,
        }
    }

    pub fn allocate(&mut self, character: &Character, class: IdClass) -> Result<EmittedId> {
        if let Some(&existing) = self.ids.get(&(character.clone(), class)) {
            return Err(BuildError::IdentifierCollision {
                character: character.clone(),
                existing,
            });
        }
        let value = self.next;
        self.next += 1;
        self.ids.insert((character.clone(), class), value);
        Ok(EmittedId::new(class, value))
    }

    pub fn get(&self, character: &Character, class: IdClass) -> Option<EmittedId> {
        self.ids
            .get(&(character.clone(), class))
            .map(|&v| EmittedId::new(class, v))
    }

    /// Wire value for a freshly emitted character: its Base id when it has
    /// one, otherwise 0 ("none").
    pub fn base_wire(&self, character: &Character) -> u16 {
        self.get(character, IdClass::Base).map_or(0, EmittedId::wire)
    }
}
