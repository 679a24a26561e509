//! Postfix diacritic composition.
//!
//! A composition rule is a directed edge between characters, tagged with
//! the kind of mark applied and the chain depth. Chains are at most two
//! steps long: a base character may become voiced, and a voiced character
//! may further become semi-voiced or small-form.

mod ids;

pub use ids::{EmittedId, IdClass, IdRegistry};

use crate::types::errors::{BuildError, Result};
use crate::types::layout::Character;

/// The kind of mark a composition step applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionKind {
    Voicing,
    SemiVoicing,
    SmallForm,
}

impl CompositionKind {
    /// Parses the kind token used by layout-declared composition entries.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "voicing" => Some(Self::Voicing),
            "semi-voicing" => Some(Self::SemiVoicing),
            "small-form" => Some(Self::SmallForm),
            _ => None,
        }
    }
}

/// One composition edge. `depth` is 1 for base→voiced (and vowel→small)
/// steps, 2 for voiced→semi-voiced and the single ゔ→ぅ exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionRule {
    pub source: Character,
    pub target: Character,
    pub kind: CompositionKind,
    pub depth: u8,
}

impl CompositionRule {
    fn new(source: &str, target: &str, kind: CompositionKind, depth: u8) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            depth,
        }
    }
}

/// Depth-1 voicing pairs, う→ゔ included.
const VOICING: &[(&str, &str)] = &[
    ("か", "が"),
    ("き", "ぎ"),
    ("く", "ぐ"),
    ("け", "げ"),
    ("こ", "ご"),
    ("さ", "ざ"),
    ("し", "じ"),
    ("す", "ず"),
    ("せ", "ぜ"),
    ("そ", "ぞ"),
    ("た", "だ"),
    ("ち", "ぢ"),
    ("つ", "づ"),
    ("て", "で"),
    ("と", "ど"),
    ("は", "ば"),
    ("ひ", "び"),
    ("ふ", "ぶ"),
    ("へ", "べ"),
    ("ほ", "ぼ"),
    ("う", "ゔ"),
];

/// Depth-2 semi-voicing pairs (second press of the diacritic key).
const SEMI_VOICING: &[(&str, &str)] = &[
    ("ば", "ぱ"),
    ("び", "ぴ"),
    ("ぶ", "ぷ"),
    ("べ", "ぺ"),
    ("ぼ", "ぽ"),
];

/// Depth-1 small forms for the vowels without a voiced form. う is absent
/// because う→ゔ wins the first press; its small form hangs off ゔ below.
const SMALL_FORM: &[(&str, &str)] = &[
    ("あ", "ぁ"),
    ("い", "ぃ"),
    ("え", "ぇ"),
    ("お", "ぉ"),
];

/// The single depth-2 small-form exception.
const VU_SMALL: (&str, &str) = ("ゔ", "ぅ");

/// The full composition-rule set: the built-in standard rules, optionally
/// extended by layout-declared edges.
#[derive(Debug, Clone)]
pub struct CompositionSet {
    rules: Vec<CompositionRule>,
}

impl CompositionSet {
    /// The built-in rule set recovered from the standard kana tables.
    pub fn standard() -> Self {
        let mut rules = Vec::new();
        for (source, target) in VOICING {
            rules.push(CompositionRule::new(source, target, CompositionKind::Voicing, 1));
        }
        for (source, target) in SEMI_VOICING {
            rules.push(CompositionRule::new(source, target, CompositionKind::SemiVoicing, 2));
        }
        for (source, target) in SMALL_FORM {
            rules.push(CompositionRule::new(source, target, CompositionKind::SmallForm, 1));
        }
        rules.push(CompositionRule::new(
            VU_SMALL.0,
            VU_SMALL.1,
            CompositionKind::SmallForm,
            2,
        ));
        Self { rules }
    }

    /// Adds a layout-declared edge. Depth is derived from the existing set:
    /// an edge whose source is itself a composition target continues that
    /// chain. A chain deeper than two steps, or a second outgoing edge for
    /// the same source, is a malformed layout.
    pub fn add_declared(
        &mut self,
        source: Character,
        target: Character,
        kind: CompositionKind,
    ) -> Result<()> {
        if let Some(existing) = self.rule_from(&source) {
            if existing.target == target && existing.kind == kind {
                return Ok(());
            }
            return Err(BuildError::malformed(
                target.as_str(),
                format!(
                    "'{}' already composes into '{}'; a character has at most one outgoing composition",
                    source, existing.target
                ),
            ));
        }

        let depth = match self.rules.iter().find(|r| r.target == source) {
            None => 1,
            Some(parent) if parent.depth == 1 => 2,
            Some(_) => {
                return Err(BuildError::malformed(
                    target.as_str(),
                    format!("composition chain through '{}' would exceed depth 2", source),
                ));
            }
        };

        self.rules.push(CompositionRule {
            source,
            target,
            kind,
            depth,
        });
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompositionRule> {
        self.rules.iter()
    }

    /// The outgoing edge of a character, if any.
    pub fn rule_from(&self, source: &Character) -> Option<&CompositionRule> {
        self.rules.iter().find(|r| r.source == *source)
    }

    /// Rules of one (depth, kind) group in definition order; the flat table
    /// walks these group by group.
    pub fn group(&self, depth: u8, kind: CompositionKind) -> impl Iterator<Item = &CompositionRule> {
        self.rules
            .iter()
            .filter(move |r| r.depth == depth && r.kind == kind)
    }
}
