//! Physical key-arrangement mapping.
//!
//! Layout definitions are written against QWERTY key names. Before any
//! bucket or rule is derived, every key reference — shift and diacritic
//! keys included — is translated to the target arrangement so that the
//! generated artifacts land on the same physical positions.

use crate::types::layout::KeyBinding;

/// Supported physical key arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    Qwerty,
    Colemak,
}

impl Arrangement {
    pub fn label(self) -> &'static str {
        match self {
            Self::Qwerty => "qwerty",
            Self::Colemak => "colemak",
        }
    }

    pub const ALL: [Arrangement; 2] = [Arrangement::Qwerty, Arrangement::Colemak];
}

/// QWERTY position -> Colemak key on the same physical position.
const QWERTY_TO_COLEMAK: &[(&str, &str)] = &[
    ("q", "q"),
    ("w", "w"),
    ("e", "f"),
    ("r", "p"),
    ("t", "g"),
    ("y", "j"),
    ("u", "l"),
    ("i", "u"),
    ("o", "y"),
    ("p", ";"),
    ("a", "a"),
    ("s", "r"),
    ("d", "s"),
    ("f", "t"),
    ("g", "d"),
    ("h", "h"),
    ("j", "n"),
    ("k", "e"),
    ("l", "i"),
    (";", "o"),
    ("z", "z"),
    ("x", "x"),
    ("c", "c"),
    ("v", "v"),
    ("b", "b"),
    ("n", "k"),
    ("m", "m"),
];

/// Translates one key identifier. Keys absent from the substitution table
/// (punctuation, space, bracket keys) identity-map.
pub fn remap_key(key: &str, arrangement: Arrangement) -> String {
    match arrangement {
        Arrangement::Qwerty => key.to_string(),
        Arrangement::Colemak => QWERTY_TO_COLEMAK
            .iter()
            .find(|(qwerty, _)| *qwerty == key)
            .map(|(_, colemak)| (*colemak).to_string())
            .unwrap_or_else(|| key.to_string()),
    }
}

/// Translates every key reference of a binding.
pub fn remap_binding(binding: &KeyBinding, arrangement: Arrangement) -> KeyBinding {
    KeyBinding {
        character: binding.character.clone(),
        keys: binding
            .keys
            .iter()
            .map(|k| remap_key(k, arrangement))
            .collect(),
        shift: binding.shift,
    }
}
