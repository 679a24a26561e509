use shingetsu_core::romaji::emission_sequence;
use shingetsu_core::Character;

fn seq(s: &str) -> Option<String> {
    emission_sequence(&Character::new(s))
}

#[test]
fn single_glyphs_use_kunrei_spellings() {
    assert_eq!(seq("か").as_deref(), Some("ka"));
    assert_eq!(seq("し").as_deref(), Some("si"));
    assert_eq!(seq("ち").as_deref(), Some("ti"));
    assert_eq!(seq("つ").as_deref(), Some("tu"));
    assert_eq!(seq("ふ").as_deref(), Some("fu"));
}

#[test]
fn moraic_n_doubles_to_disambiguate() {
    assert_eq!(seq("ん").as_deref(), Some("nn"));
}

#[test]
fn long_vowel_mark_is_a_hyphen() {
    assert_eq!(seq("ー").as_deref(), Some("-"));
}

#[test]
fn small_forms_take_the_x_prefix() {
    assert_eq!(seq("ぁ").as_deref(), Some("xa"));
    assert_eq!(seq("っ").as_deref(), Some("xtu"));
    assert_eq!(seq("ぅ").as_deref(), Some("xu"));
}

#[test]
fn yoon_digraphs_merge_at_the_vowel() {
    assert_eq!(seq("みゃ").as_deref(), Some("mya"));
    assert_eq!(seq("きゅ").as_deref(), Some("kyu"));
    assert_eq!(seq("ちゃ").as_deref(), Some("tya"));
}

#[test]
fn vu_spells_the_same_in_both_scripts() {
    assert_eq!(seq("ゔ").as_deref(), Some("vu"));
    assert_eq!(seq("ヴ").as_deref(), Some("vu"));
}

#[test]
fn unmapped_glyphs_have_no_sequence() {
    assert_eq!(seq("ゐ"), None);
    assert_eq!(seq("、"), None);
}

#[test]
fn sequences_cap_at_two_glyphs() {
    assert_eq!(seq("みゃあ"), None);
}
