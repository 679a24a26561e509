//! Bucket classification.
//!
//! Every binding of a layout falls into exactly one of five mutually
//! exclusive buckets, or is routed to a fixed special-case slot (markers,
//! punctuation literals, double-tap shortcuts), or lands in the residual
//! bin. Collisions on a (key, bucket) slot are a build-time error.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::errors::{BuildError, Result};
use crate::types::layout::{Character, KeyBinding};

/// Marker glyph for the shift-A layer.
pub const SHIFT_A_MARKER: &str = "★";
/// Marker glyph for the shift-B layer.
pub const SHIFT_B_MARKER: &str = "☆";
/// The voicing mark; doubles as the postfix-composition key.
pub const DIACRITIC_MARKER: &str = "゛";
/// The semi-voicing mark.
pub const SEMIVOICED_MARKER: &str = "゜";

/// Punctuation and the long-vowel mark occupy fixed neutral-layer rows and
/// are never bucketed.
const LITERAL_CHARS: &[&str] = &["、", "。", "「", "」", "・", "ー"];

/// One of the five disjoint classes a (key, modifier-set) binding falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Neutral,
    ShiftA,
    ShiftB,
    ShiftADiacritic,
    ShiftBDiacritic,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Neutral,
        Bucket::ShiftA,
        Bucket::ShiftB,
        Bucket::ShiftADiacritic,
        Bucket::ShiftBDiacritic,
    ];
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::Neutral => "neutral",
            Bucket::ShiftA => "shift-A",
            Bucket::ShiftB => "shift-B",
            Bucket::ShiftADiacritic => "shift-A+diacritic",
            Bucket::ShiftBDiacritic => "shift-B+diacritic",
        };
        f.write_str(name)
    }
}

/// The five (key -> character) slot maps. BTreeMap keeps iteration order
/// stable so regenerated artifacts are byte-identical.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    neutral: BTreeMap<String, Character>,
    shift_a: BTreeMap<String, Character>,
    shift_b: BTreeMap<String, Character>,
    shift_a_diacritic: BTreeMap<String, Character>,
    shift_b_diacritic: BTreeMap<String, Character>,
}

impl Buckets {
    pub fn layer(&self, bucket: Bucket) -> &BTreeMap<String, Character> {
        match bucket {
            Bucket::Neutral => &self.neutral,
            Bucket::ShiftA => &self.shift_a,
            Bucket::ShiftB => &self.shift_b,
            Bucket::ShiftADiacritic => &self.shift_a_diacritic,
            Bucket::ShiftBDiacritic => &self.shift_b_diacritic,
        }
    }

    fn layer_mut(&mut self, bucket: Bucket) -> &mut BTreeMap<String, Character> {
        match bucket {
            Bucket::Neutral => &mut self.neutral,
            Bucket::ShiftA => &mut self.shift_a,
            Bucket::ShiftB => &mut self.shift_b,
            Bucket::ShiftADiacritic => &mut self.shift_a_diacritic,
            Bucket::ShiftBDiacritic => &mut self.shift_b_diacritic,
        }
    }

    pub fn get(&self, bucket: Bucket, key: &str) -> Option<&Character> {
        self.layer(bucket).get(key)
    }

    /// Inserts a slot assignment, failing if the slot already holds a
    /// different character.
    pub fn insert(&mut self, bucket: Bucket, key: String, character: Character) -> Result<()> {
        let layer = self.layer_mut(bucket);
        if let Some(existing) = layer.get(&key) {
            if *existing != character {
                return Err(BuildError::AmbiguousBinding {
                    key,
                    bucket,
                    first: existing.clone(),
                    second: character,
                });
            }
            return Ok(());
        }
        layer.insert(key, character);
        Ok(())
    }

    /// Every character assigned to any bucket; a character bound in more
    /// than one bucket appears once per slot.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        Bucket::ALL
            .iter()
            .flat_map(|b| self.layer(*b).values())
    }
}

/// Key positions of the marker characters themselves. These keys behave as
/// state selectors, not as ordinary bucketed keys, so both generators need
/// to know where they sit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialSlots {
    pub shift_a_key: String,
    pub shift_b_key: String,
    pub diacritic_key: String,
    pub semivoiced_key: Option<String>,
}

/// The two double-tap shortcut characters, when the layout defines them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shortcuts {
    pub shift_a_double: Option<Character>,
    pub shift_b_double: Option<Character>,
}

/// Classification result: an immutable snapshot consumed by both artifact
/// generators.
#[derive(Debug, Clone)]
pub struct Classified {
    pub buckets: Buckets,
    pub specials: SpecialSlots,
    /// Fixed neutral-layer rows (punctuation, long-vowel mark), keyed by key.
    pub literals: BTreeMap<String, Character>,
    pub shortcuts: Shortcuts,
    /// Bindings no bucket or special slot accepts. Kept for diagnostics;
    /// not an error.
    pub residual: Vec<KeyBinding>,
}

/// Classifies a full set of (already arrangement-remapped) bindings.
pub fn classify(bindings: &[KeyBinding]) -> Result<Classified> {
    let specials = find_specials(bindings)?;

    let mut buckets = Buckets::default();
    let mut literals = BTreeMap::new();
    let mut shortcuts = Shortcuts::default();
    let mut residual = Vec::new();

    for binding in bindings {
        let text = binding.character.as_str();

        // Marker characters were consumed by find_specials.
        if matches!(
            text,
            SHIFT_A_MARKER | SHIFT_B_MARKER | DIACRITIC_MARKER | SEMIVOICED_MARKER
        ) {
            continue;
        }

        if LITERAL_CHARS.contains(&text) {
            if binding.keys.len() == 1 && binding.shift.is_empty() {
                literals.insert(binding.keys[0].clone(), binding.character.clone());
            } else {
                residual.push(binding.clone());
            }
            continue;
        }

        if binding.character.is_passthrough() {
            residual.push(binding.clone());
            continue;
        }

        match binding.keys.len() {
            2 => route_shortcut(binding, &specials, &mut shortcuts, &mut residual)?,
            1 => match binding.shift.bucket() {
                Some(bucket) => buckets.insert(
                    bucket,
                    binding.keys[0].clone(),
                    binding.character.clone(),
                )?,
                None => residual.push(binding.clone()),
            },
            _ => residual.push(binding.clone()),
        }
    }

    Ok(Classified {
        buckets,
        specials,
        literals,
        shortcuts,
        residual,
    })
}

fn find_specials(bindings: &[KeyBinding]) -> Result<SpecialSlots> {
    let find = |marker: &str| -> Option<String> {
        bindings
            .iter()
            .find(|b| b.character.as_str() == marker && b.keys.len() == 1 && b.shift.is_empty())
            .map(|b| b.keys[0].clone())
    };

    let require = |marker: &str| -> Result<String> {
        find(marker).ok_or_else(|| {
            BuildError::malformed(marker, "layout defines no key for this marker")
        })
    };

    Ok(SpecialSlots {
        shift_a_key: require(SHIFT_A_MARKER)?,
        shift_b_key: require(SHIFT_B_MARKER)?,
        diacritic_key: require(DIACRITIC_MARKER)?,
        semivoiced_key: find(SEMIVOICED_MARKER),
    })
}

fn route_shortcut(
    binding: &KeyBinding,
    specials: &SpecialSlots,
    shortcuts: &mut Shortcuts,
    residual: &mut Vec<KeyBinding>,
) -> Result<()> {
    let keys = &binding.keys;
    let slot = if keys[0] == specials.shift_a_key && keys[1] == specials.shift_a_key {
        Some(&mut shortcuts.shift_a_double)
    } else if keys[0] == specials.shift_b_key && keys[1] == specials.shift_b_key {
        Some(&mut shortcuts.shift_b_double)
    } else {
        None
    };

    match slot {
        Some(slot) => {
            if let Some(existing) = slot {
                if *existing != binding.character {
                    return Err(BuildError::AmbiguousBinding {
                        key: format!("{}{}", keys[0], keys[1]),
                        bucket: Bucket::Neutral,
                        first: existing.clone(),
                        second: binding.character.clone(),
                    });
                }
            }
            *slot = Some(binding.character.clone());
        }
        None => residual.push(binding.clone()),
    }
    Ok(())
}
