use shingetsu_core::{Character, KeyBinding, Modifier, ModifierSet};

/// Builds one layout binding from literal parts.
pub fn binding(character: &str, keys: &[&str], shift: &[&str]) -> KeyBinding {
    let modifiers: ModifierSet = shift
        .iter()
        .map(|t| Modifier::parse(t).expect("modifier token"))
        .collect();
    KeyBinding {
        character: Character::new(character),
        keys: keys.iter().map(|k| k.to_string()).collect(),
        shift: modifiers,
    }
}

/// A small but complete layout exercising every classification path:
/// all four markers, all five buckets, both double-tap shortcuts, a cross
/// shortcut on the shift-A key, punctuation literals, and a passthrough
/// entry.
#[allow(dead_code)]
pub fn fixture_bindings() -> Vec<KeyBinding> {
    vec![
        binding("★", &["d"], &[]),
        binding("☆", &["k"], &[]),
        binding("゛", &["l"], &[]),
        binding("゜", &["\\"], &[]),
        binding("あ", &["a"], &[]),
        binding("か", &["f"], &[]),
        binding("は", &["g"], &[]),
        binding("う", &["s"], &[]),
        binding("ん", &["j"], &[]),
        binding("た", &["q"], &["A"]),
        binding("み", &["w"], &["B"]),
        binding("みゃ", &["w"], &["B", "D"]),
        binding("ちゃ", &["u"], &["A", "D"]),
        binding("で", &["d"], &["B"]),
        binding("ら", &["d", "d"], &[]),
        binding("も", &["k", "k"], &[]),
        binding("お", &["l"], &["A", "D"]),
        binding("、", &[","], &[]),
        binding("。", &["."], &[]),
        binding("ー", &["'"], &[]),
        binding("・", &["/"], &[]),
        binding("！", &["1"], &[]),
    ]
}
