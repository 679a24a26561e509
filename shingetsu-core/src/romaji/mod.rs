//! Emission sequences.
//!
//! The state-machine ruleset cannot emit kana directly; it replays the
//! ASCII romanization of a character as a literal key sequence and lets the
//! host IME convert it. Every character reachable from any bucket must have
//! exactly one sequence, or the build fails.

use crate::types::layout::Character;

fn glyph_romaji(c: char) -> Option<&'static str> {
    let s = match c {
        'あ' => "a",
        'い' => "i",
        'う' => "u",
        'え' => "e",
        'お' => "o",
        'か' => "ka",
        'き' => "ki",
        'く' => "ku",
        'け' => "ke",
        'こ' => "ko",
        'さ' => "sa",
        'し' => "si",
        'す' => "su",
        'せ' => "se",
        'そ' => "so",
        'た' => "ta",
        'ち' => "ti",
        'つ' => "tu",
        'て' => "te",
        'と' => "to",
        'な' => "na",
        'に' => "ni",
        'ぬ' => "nu",
        'ね' => "ne",
        'の' => "no",
        'は' => "ha",
        'ひ' => "hi",
        'ふ' => "fu",
        'へ' => "he",
        'ほ' => "ho",
        'ま' => "ma",
        'み' => "mi",
        'む' => "mu",
        'め' => "me",
        'も' => "mo",
        'や' => "ya",
        'ゆ' => "yu",
        'よ' => "yo",
        'ら' => "ra",
        'り' => "ri",
        'る' => "ru",
        'れ' => "re",
        'ろ' => "ro",
        'わ' => "wa",
        'を' => "wo",
        'ん' => "nn",
        'が' => "ga",
        'ぎ' => "gi",
        'ぐ' => "gu",
        'げ' => "ge",
        'ご' => "go",
        'ざ' => "za",
        'じ' => "zi",
        'ず' => "zu",
        'ぜ' => "ze",
        'ぞ' => "zo",
        'だ' => "da",
        'ぢ' => "di",
        'づ' => "du",
        'で' => "de",
        'ど' => "do",
        'ば' => "ba",
        'び' => "bi",
        'ぶ' => "bu",
        'べ' => "be",
        'ぼ' => "bo",
        'ぱ' => "pa",
        'ぴ' => "pi",
        'ぷ' => "pu",
        'ぺ' => "pe",
        'ぽ' => "po",
        'ぁ' => "xa",
        'ぃ' => "xi",
        'ぅ' => "xu",
        'ぇ' => "xe",
        'ぉ' => "xo",
        'ゃ' => "xya",
        'ゅ' => "xyu",
        'ょ' => "xyo",
        'っ' => "xtu",
        'ゎ' => "xwa",
        'ー' => "-",
        'ゔ' => "vu",
        'ヴ' => "vu",
        _ => return None,
    };
    Some(s)
}

/// Suffix contributed by the trailing small glyph of a yoon digraph.
fn small_suffix(c: char) -> Option<&'static str> {
    match c {
        'ゃ' => Some("ya"),
        'ゅ' => Some("yu"),
        'ょ' => Some("yo"),
        'ぁ' => Some("a"),
        'ぃ' => Some("i"),
        'ぅ' => Some("u"),
        'ぇ' => Some("e"),
        'ぉ' => Some("o"),
        _ => None,
    }
}

/// Looks up the emission sequence of a character. Digraphs are synthesized
/// from their parts: the consonant glyph's romanization loses its trailing
/// vowel and the small glyph contributes the rest (み+ゃ → "mya").
pub fn emission_sequence(character: &Character) -> Option<String> {
    let glyphs: Vec<char> = character.glyphs().collect();
    match glyphs.as_slice() {
        [single] => glyph_romaji(*single).map(str::to_string),
        [lead, small] => {
            if let Some(suffix) = small_suffix(*small) {
                let lead_romaji = glyph_romaji(*lead)?;
                let stem = &lead_romaji[..lead_romaji.len().saturating_sub(1)];
                Some(format!("{stem}{suffix}"))
            } else {
                let a = glyph_romaji(*lead)?;
                let b = glyph_romaji(*small)?;
                Some(format!("{a}{b}"))
            }
        }
        _ => None,
    }
}
