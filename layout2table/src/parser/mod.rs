//! Layout-definition parsing.
//!
//! The layout document is JSON: a `conversion` map from character to either
//! a key binding (`keys` + optional `shift`) or a declared composition edge
//! (`composes`). Parsing is a pure transformation into core types; every
//! structural problem is a malformed-layout build error.

use std::collections::BTreeMap;

use serde::Deserialize;

use shingetsu_core::{
    BuildError, Character, CompositionKind, KeyBinding, Modifier, ModifierSet, Result,
};

#[derive(Debug, Deserialize)]
struct LayoutDoc {
    #[serde(default)]
    name: Option<String>,
    conversion: BTreeMap<String, LayoutEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LayoutEntry {
    Composition { composes: ComposeDecl },
    Binding {
        keys: Vec<String>,
        #[serde(default)]
        shift: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ComposeDecl {
    kind: String,
    source: String,
}

/// A composition edge declared by the layout itself, as opposed to the
/// built-in standard set.
#[derive(Debug, Clone)]
pub struct DeclaredComposition {
    pub source: Character,
    pub target: Character,
    pub kind: CompositionKind,
}

/// Parsed layout definition, before arrangement remapping.
#[derive(Debug)]
pub struct LayoutModel {
    pub name: String,
    pub bindings: Vec<KeyBinding>,
    pub declared_compositions: Vec<DeclaredComposition>,
}

/// Parses and validates a layout document.
pub fn parse_layout(input: &str) -> Result<LayoutModel> {
    let doc: LayoutDoc = serde_json::from_str(input)
        .map_err(|e| BuildError::malformed("<document>", e.to_string()))?;

    let mut bindings = Vec::new();
    let mut declared_compositions = Vec::new();

    for (character, entry) in &doc.conversion {
        if character.is_empty() {
            return Err(BuildError::malformed("<empty>", "empty character"));
        }
        match entry {
            LayoutEntry::Binding { keys, shift } => {
                bindings.push(parse_binding(character, keys, shift)?);
            }
            LayoutEntry::Composition { composes } => {
                let kind = CompositionKind::parse(&composes.kind).ok_or_else(|| {
                    BuildError::malformed(
                        character,
                        format!("unknown composition kind '{}'", composes.kind),
                    )
                })?;
                if composes.source.is_empty() {
                    return Err(BuildError::malformed(character, "empty composition source"));
                }
                declared_compositions.push(DeclaredComposition {
                    source: Character::new(&composes.source),
                    target: Character::new(character),
                    kind,
                });
            }
        }
    }

    Ok(LayoutModel {
        name: doc.name.unwrap_or_else(|| "kana layout".to_string()),
        bindings,
        declared_compositions,
    })
}

fn parse_binding(character: &str, keys: &[String], shift: &[String]) -> Result<KeyBinding> {
    if keys.is_empty() {
        return Err(BuildError::malformed(character, "empty key sequence"));
    }
    if keys.len() > 2 {
        return Err(BuildError::malformed(
            character,
            format!("key sequence of length {} (at most 2)", keys.len()),
        ));
    }
    if keys.iter().any(String::is_empty) {
        return Err(BuildError::malformed(character, "empty key identifier"));
    }

    let mut modifiers = ModifierSet::empty();
    for token in shift {
        let modifier = Modifier::parse(token).ok_or_else(|| {
            BuildError::malformed(character, format!("unknown shift modifier '{token}'"))
        })?;
        modifiers.insert(modifier);
    }

    Ok(KeyBinding {
        character: Character::new(character),
        keys: keys.to_vec(),
        shift: modifiers,
    })
}
