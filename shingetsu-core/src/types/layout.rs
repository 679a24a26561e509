//! Character and key-binding types shared by the classifier and the
//! artifact generators.

use std::fmt;

use crate::buckets::Bucket;

/// A single output character of the layout: one kana glyph, one punctuation
/// glyph, or a multi-glyph yoon digraph such as "みゃ". Identified purely by
/// its literal text value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Character(String);

impl Character {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of glyphs, not bytes. Digraphs count 2.
    pub fn glyph_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// True for characters that are passed through to the host untouched:
    /// plain ASCII text, blanks, and the full-width exclamation mark the
    /// original layouts park on the number row.
    pub fn is_passthrough(&self) -> bool {
        self.0.is_empty()
            || self.0.chars().all(|c| c.is_ascii())
            || self.0 == "！"
            || self.0 == "　"
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Required because `BuildError::UnreachableCompositionTarget` has a field
// named `source`, which thiserror treats as the error source.
impl std::error::Error for Character {}

impl From<&str> for Character {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<char> for Character {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

/// Shift-modifier vocabulary of the layout definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Prefix shift layer A (the ★ key).
    ShiftA,
    /// Prefix shift layer B (the ☆ key).
    ShiftB,
    /// The diacritic key (゛), both as a layer selector and a postfix signal.
    Diacritic,
}

impl Modifier {
    /// Parses a modifier token from the layout document. Anything outside
    /// the fixed vocabulary is a malformed layout.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "A" => Some(Self::ShiftA),
            "B" => Some(Self::ShiftB),
            "D" => Some(Self::Diacritic),
            _ => None,
        }
    }
}

/// Set of modifiers attached to one binding. The set uniquely determines
/// which bucket the binding belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSet {
    pub shift_a: bool,
    pub shift_b: bool,
    pub diacritic: bool,
}

impl ModifierSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::ShiftA => self.shift_a = true,
            Modifier::ShiftB => self.shift_b = true,
            Modifier::Diacritic => self.diacritic = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.shift_a && !self.shift_b && !self.diacritic
    }

    /// Maps the set onto one of the five buckets. Combinations outside the
    /// table (both shifts at once, or the diacritic alone) have no bucket
    /// and land in the residual bin.
    pub fn bucket(&self) -> Option<Bucket> {
        match (self.shift_a, self.shift_b, self.diacritic) {
            (false, false, false) => Some(Bucket::Neutral),
            (true, false, false) => Some(Bucket::ShiftA),
            (false, true, false) => Some(Bucket::ShiftB),
            (true, false, true) => Some(Bucket::ShiftADiacritic),
            (false, true, true) => Some(Bucket::ShiftBDiacritic),
            _ => None,
        }
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<T: IntoIterator<Item = Modifier>>(iter: T) -> Self {
        let mut set = Self::empty();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

/// One layout-definition record: a character, the physical keys that produce
/// it, and the modifier set selecting its layer. The key sequence has length
/// 1 except for double-tap shortcut entries (length 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub character: Character,
    pub keys: Vec<String>,
    pub shift: ModifierSet,
}

/// Runtime shift state modeled by the generated ruleset. The wire values are
/// what the ruleset's state-variable conditions and updates carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftState {
    Neutral,
    A,
    B,
    ADiacritic,
    BDiacritic,
}

impl ShiftState {
    pub fn wire_value(self) -> u16 {
        match self {
            Self::Neutral => 0,
            Self::A => 1,
            Self::B => 2,
            Self::ADiacritic => 3,
            Self::BDiacritic => 4,
        }
    }
}
