//! Flat lookup-table generation.
//!
//! The table artifact is newline-separated rows: `<key>\t\t<output>` on the
//! neutral layer, `<marker><key>\t<output>` on shifted layers, with the
//! marker doubled by the diacritic glyph for the yoon sub-layer. Row order
//! does not affect lookup correctness — the consuming engine matches on
//! trigger length and literal key sequence — but mirrors the physical
//! layering for human review.

use crate::CompiledLayout;
use shingetsu_core::buckets::{Bucket, DIACRITIC_MARKER, SEMIVOICED_MARKER, SHIFT_A_MARKER, SHIFT_B_MARKER};
use shingetsu_core::keymap::remap_key;
use shingetsu_core::CompositionKind;

/// Left-hand key positions, top row first, in QWERTY names.
pub const LEFT_HAND_KEYS: [&str; 15] = [
    "q", "w", "e", "r", "t", "a", "s", "d", "f", "g", "z", "x", "c", "v", "b",
];

/// Right-hand key positions, top row first, in QWERTY names.
pub const RIGHT_HAND_KEYS: [&str; 18] = [
    "y", "u", "i", "o", "p", "[", "h", "j", "k", "l", ";", "'", "n", "m", ",", ".", "/", "\\",
];

/// Physical walk order for one arrangement: left hand before right hand.
pub fn physical_key_order(compiled: &CompiledLayout) -> Vec<String> {
    LEFT_HAND_KEYS
        .iter()
        .chain(RIGHT_HAND_KEYS.iter())
        .map(|k| remap_key(k, compiled.arrangement))
        .collect()
}

/// Generates the table artifact.
pub fn generate(compiled: &CompiledLayout) -> String {
    let classified = &compiled.classified;
    let specials = &classified.specials;
    let order = physical_key_order(compiled);
    let mut lines = Vec::new();

    lines.push(format!(
        "# {} ({})",
        compiled.name,
        compiled.arrangement.label()
    ));
    lines.push(format!(
        "# shift-A={} shift-B={} diacritic={}",
        specials.shift_a_key, specials.shift_b_key, specials.diacritic_key
    ));
    lines.push(String::new());

    // Neutral layer: bucketed characters, fixed literals, and the marker
    // glyphs on their own keys.
    for key in &order {
        if let Some(literal) = classified.literals.get(key) {
            lines.push(format!("{key}\t\t{literal}"));
        } else if *key == specials.shift_a_key {
            lines.push(format!("{key}\t\t{SHIFT_A_MARKER}"));
        } else if *key == specials.shift_b_key {
            lines.push(format!("{key}\t\t{SHIFT_B_MARKER}"));
        } else if *key == specials.diacritic_key {
            lines.push(format!("{key}\t\t{DIACRITIC_MARKER}"));
        } else if specials.semivoiced_key.as_deref() == Some(key.as_str()) {
            lines.push(format!("{key}\t\t{SEMIVOICED_MARKER}"));
        } else if let Some(character) = classified.buckets.get(Bucket::Neutral, key) {
            lines.push(format!("{key}\t\t{character}"));
        }
    }

    // Prefix shift layers.
    for key in &order {
        if let Some(character) = classified.buckets.get(Bucket::ShiftA, key) {
            lines.push(format!("{SHIFT_A_MARKER}{key}\t{character}"));
        }
    }
    for key in &order {
        if let Some(character) = classified.buckets.get(Bucket::ShiftB, key) {
            lines.push(format!("{SHIFT_B_MARKER}{key}\t{character}"));
        }
    }

    // Double-tap shortcuts.
    if let Some(character) = &classified.shortcuts.shift_a_double {
        let a = &specials.shift_a_key;
        lines.push(format!("{a}{a}\t{character}"));
    }
    if let Some(character) = &classified.shortcuts.shift_b_double {
        let b = &specials.shift_b_key;
        lines.push(format!("{b}{b}\t{character}"));
    }

    // Postfix diacritic rows: walk every composition rule, group by group,
    // up to the maximum chain depth.
    let groups = [
        (1, CompositionKind::Voicing),
        (2, CompositionKind::SemiVoicing),
        (1, CompositionKind::SmallForm),
        (2, CompositionKind::SmallForm),
    ];
    for (depth, kind) in groups {
        for rule in compiled.compositions.group(depth, kind) {
            lines.push(format!(
                "{}{DIACRITIC_MARKER}\t{}",
                rule.source, rule.target
            ));
        }
    }

    // Yoon sub-layer: shift marker doubled by the diacritic glyph.
    for key in &order {
        if let Some(character) = classified.buckets.get(Bucket::ShiftADiacritic, key) {
            lines.push(format!("{SHIFT_A_MARKER}{DIACRITIC_MARKER}{key}\t{character}"));
        }
    }
    for key in &order {
        if let Some(character) = classified.buckets.get(Bucket::ShiftBDiacritic, key) {
            lines.push(format!("{SHIFT_B_MARKER}{DIACRITIC_MARKER}{key}\t{character}"));
        }
    }

    lines.join("\n") + "\n"
}
