mod common;

use common::{binding, fixture_bindings};
use pretty_assertions::assert_eq;
use shingetsu_core::buckets::{classify, Bucket};
use shingetsu_core::{BuildError, Character};

#[test]
fn marker_keys_become_special_slots() {
    let classified = classify(&fixture_bindings()).unwrap();
    let specials = &classified.specials;
    assert_eq!(specials.shift_a_key, "d");
    assert_eq!(specials.shift_b_key, "k");
    assert_eq!(specials.diacritic_key, "l");
    assert_eq!(specials.semivoiced_key.as_deref(), Some("\\"));
}

#[test]
fn semivoiced_marker_is_optional() {
    let bindings: Vec<_> = fixture_bindings()
        .into_iter()
        .filter(|b| b.character.as_str() != "゜")
        .collect();
    let classified = classify(&bindings).unwrap();
    assert_eq!(classified.specials.semivoiced_key, None);
}

#[test]
fn missing_shift_marker_is_malformed() {
    let bindings: Vec<_> = fixture_bindings()
        .into_iter()
        .filter(|b| b.character.as_str() != "☆")
        .collect();
    let err = classify(&bindings).unwrap_err();
    assert!(matches!(err, BuildError::MalformedLayout { entry, .. } if entry == "☆"));
}

#[test]
fn plain_bindings_fill_the_neutral_bucket() {
    let classified = classify(&fixture_bindings()).unwrap();
    let neutral = classified.buckets.layer(Bucket::Neutral);
    assert_eq!(neutral.get("a"), Some(&Character::new("あ")));
    assert_eq!(neutral.get("f"), Some(&Character::new("か")));
    assert_eq!(neutral.get("j"), Some(&Character::new("ん")));
    // Marker and literal keys never occupy a bucket slot.
    assert_eq!(neutral.get("d"), None);
    assert_eq!(neutral.get(","), None);
}

#[test]
fn modifier_sets_select_their_buckets() {
    let classified = classify(&fixture_bindings()).unwrap();
    let buckets = &classified.buckets;
    assert_eq!(buckets.get(Bucket::ShiftA, "q"), Some(&Character::new("た")));
    assert_eq!(buckets.get(Bucket::ShiftB, "w"), Some(&Character::new("み")));
    assert_eq!(
        buckets.get(Bucket::ShiftADiacritic, "u"),
        Some(&Character::new("ちゃ"))
    );
    assert_eq!(
        buckets.get(Bucket::ShiftBDiacritic, "w"),
        Some(&Character::new("みゃ"))
    );
}

#[test]
fn shift_key_position_can_carry_an_opposite_layer_binding() {
    // で sits on the shift-A key itself, reachable through shift-B.
    let classified = classify(&fixture_bindings()).unwrap();
    assert_eq!(
        classified.buckets.get(Bucket::ShiftB, "d"),
        Some(&Character::new("で"))
    );
}

#[test]
fn diacritic_key_position_can_carry_a_sublayer_binding() {
    let classified = classify(&fixture_bindings()).unwrap();
    assert_eq!(
        classified.buckets.get(Bucket::ShiftADiacritic, "l"),
        Some(&Character::new("お"))
    );
}

#[test]
fn double_taps_of_the_shift_keys_are_shortcuts() {
    let classified = classify(&fixture_bindings()).unwrap();
    assert_eq!(
        classified.shortcuts.shift_a_double,
        Some(Character::new("ら"))
    );
    assert_eq!(
        classified.shortcuts.shift_b_double,
        Some(Character::new("も"))
    );
}

#[test]
fn punctuation_stays_in_the_literal_map() {
    let classified = classify(&fixture_bindings()).unwrap();
    assert_eq!(classified.literals.get(","), Some(&Character::new("、")));
    assert_eq!(classified.literals.get("'"), Some(&Character::new("ー")));
    assert_eq!(classified.literals.get("/"), Some(&Character::new("・")));
}

#[test]
fn passthrough_entries_land_in_the_residual_bin() {
    let classified = classify(&fixture_bindings()).unwrap();
    assert!(classified
        .residual
        .iter()
        .any(|b| b.character.as_str() == "！"));
}

#[test]
fn two_key_sequence_off_the_shift_keys_is_residual() {
    let mut bindings = fixture_bindings();
    bindings.push(binding("ね", &["a", "s"], &[]));
    let classified = classify(&bindings).unwrap();
    assert!(classified
        .residual
        .iter()
        .any(|b| b.character.as_str() == "ね"));
}

#[test]
fn both_shifts_at_once_have_no_bucket() {
    let mut bindings = fixture_bindings();
    bindings.push(binding("ほ", &["b"], &["A", "B"]));
    let classified = classify(&bindings).unwrap();
    assert!(classified
        .residual
        .iter()
        .any(|b| b.character.as_str() == "ほ"));
}

#[test]
fn conflicting_slot_assignment_is_ambiguous() {
    let mut bindings = fixture_bindings();
    bindings.push(binding("け", &["f"], &[]));
    let err = classify(&bindings).unwrap_err();
    match err {
        BuildError::AmbiguousBinding { key, bucket, first, second } => {
            assert_eq!(key, "f");
            assert_eq!(bucket, Bucket::Neutral);
            assert_eq!(first, Character::new("か"));
            assert_eq!(second, Character::new("け"));
        }
        other => panic!("expected AmbiguousBinding, got {other:?}"),
    }
}

#[test]
fn repeating_an_identical_assignment_is_fine() {
    let mut bindings = fixture_bindings();
    bindings.push(binding("か", &["f"], &[]));
    assert!(classify(&bindings).is_ok());
}

#[test]
fn conflicting_double_tap_is_ambiguous() {
    let mut bindings = fixture_bindings();
    bindings.push(binding("れ", &["d", "d"], &[]));
    let err = classify(&bindings).unwrap_err();
    assert!(matches!(err, BuildError::AmbiguousBinding { key, .. } if key == "dd"));
}
