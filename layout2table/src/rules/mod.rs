//! State-machine ruleset generation.
//!
//! The flat table leaves multi-stage input (prefix shift layers, double-tap
//! shortcuts, postfix diacritic correction) to the consuming engine; this
//! generator derives the behavior explicitly as a finite state machine over
//! two variables: the shift state and the last-emitted identifier. Every
//! rule matches one physical key under required variable values and rewrites
//! both variables exactly once.

mod ruleset;

pub use ruleset::*;

use std::collections::{BTreeMap, BTreeSet};

use crate::table::physical_key_order;
use crate::CompiledLayout;
use shingetsu_core::buckets::Bucket;
use shingetsu_core::compose::IdClass;
use shingetsu_core::{romaji, BuildError, Character, EmittedId, IdRegistry, Result, ShiftState};

/// Generates the ruleset for the compiled layout's arrangement.
pub fn generate(compiled: &CompiledLayout) -> Result<RuleSet> {
    let mut generator = Generator {
        compiled,
        emissions: BTreeMap::new(),
        ids: IdRegistry::new(),
    };
    generator.collect_emissions()?;
    generator.validate_declared_compositions()?;
    generator.allocate_identifiers()?;
    Ok(generator.build())
}

/// Renders the ruleset document. Serialization of the plain structs in
/// [`ruleset`] cannot fail.
pub fn render_json(ruleset: &RuleSet) -> String {
    let mut json = serde_json::to_string_pretty(ruleset).expect("ruleset serializes");
    json.push('\n');
    json
}

struct Generator<'a> {
    compiled: &'a CompiledLayout,
    /// Emission sequence per character, pre-resolved so rule emission is
    /// infallible.
    emissions: BTreeMap<Character, String>,
    ids: IdRegistry,
}

impl<'a> Generator<'a> {
    /// Resolves the emission sequence of every character reachable from any
    /// bucket or shortcut slot. Literals keep their row in the flat table
    /// even without a sequence; everything else must romanize.
    fn collect_emissions(&mut self) -> Result<()> {
        let classified = &self.compiled.classified;

        let required: Vec<&Character> = classified
            .buckets
            .characters()
            .chain(classified.shortcuts.shift_a_double.iter())
            .chain(classified.shortcuts.shift_b_double.iter())
            .collect();
        for character in required {
            self.require_emission(character)?;
        }

        for literal in classified.literals.values() {
            if let Some(sequence) = romaji::emission_sequence(literal) {
                self.emissions.insert(literal.clone(), sequence);
            }
        }
        Ok(())
    }

    fn require_emission(&mut self, character: &Character) -> Result<()> {
        if self.emissions.contains_key(character) {
            return Ok(());
        }
        let sequence = romaji::emission_sequence(character)
            .ok_or_else(|| BuildError::MissingRomanization(character.clone()))?;
        self.emissions.insert(character.clone(), sequence);
        Ok(())
    }

    /// Characters whose emission can leave a LastEmitted trace: everything
    /// reachable on the neutral and prefix-shift layers, the double-tap
    /// shortcuts, and romanizable literals.
    fn base_characters(&self) -> BTreeSet<Character> {
        let classified = &self.compiled.classified;
        let mut set: BTreeSet<Character> = [Bucket::Neutral, Bucket::ShiftA, Bucket::ShiftB]
            .iter()
            .flat_map(|b| classified.buckets.layer(*b).values().cloned())
            .collect();
        set.extend(classified.shortcuts.shift_a_double.clone());
        set.extend(classified.shortcuts.shift_b_double.clone());
        set.extend(
            classified
                .literals
                .values()
                .filter(|l| self.emissions.contains_key(*l))
                .cloned(),
        );
        set
    }

    /// A layout-declared composition edge whose source is bound nowhere is
    /// a dangling reference: its emission could never be looked up, so the
    /// build refuses rather than emit it.
    fn validate_declared_compositions(&self) -> Result<()> {
        let base = self.base_characters();
        for decl in &self.compiled.declared_compositions {
            if !base.contains(&decl.source) {
                return Err(BuildError::UnreachableCompositionTarget {
                    source: decl.source.clone(),
                    target: decl.target.clone(),
                });
            }
        }
        Ok(())
    }

    /// Allocates the LastEmitted identifier space once, globally, before any
    /// rule is emitted: base ids for emittable composition sources, then
    /// depth-1 result ids, then depth-2 result ids. Built-in rules whose
    /// source is not on this layout stay inert and allocate nothing.
    fn allocate_identifiers(&mut self) -> Result<()> {
        let base = self.base_characters();
        let compositions = self.compiled.compositions.clone();

        for character in &base {
            if compositions.rule_from(character).is_some() {
                self.ids.allocate(character, IdClass::Base)?;
            }
        }
        for rule in compositions.iter() {
            if self.ids.get(&rule.source, IdClass::Base).is_some() {
                self.require_emission(&rule.target)?;
                self.ids.allocate(&rule.target, IdClass::Voiced)?;
            }
        }
        for rule in compositions.iter() {
            if self.ids.get(&rule.source, IdClass::Voiced).is_some() {
                self.require_emission(&rule.target)?;
                self.ids.allocate(&rule.target, IdClass::SemiVoicedOrSmall)?;
            }
        }
        Ok(())
    }

    fn build(&self) -> RuleSet {
        let specials = &self.compiled.classified.specials;
        let mut manipulators = Vec::new();

        for key in self.key_walk_order() {
            if key == specials.shift_a_key {
                manipulators.extend(self.shift_key_rules(&key, true));
            } else if key == specials.shift_b_key {
                manipulators.extend(self.shift_key_rules(&key, false));
            } else if key == specials.diacritic_key {
                manipulators.extend(self.diacritic_key_rules(&key));
            } else {
                manipulators.extend(self.ordinary_key_rules(&key));
            }
        }

        // Explicit cancel: the only externally triggered reset.
        manipulators.push(Manipulator::basic(
            CANCEL_KEY_CODE,
            vec![],
            vec![
                ToAction::key(CANCEL_KEY_CODE),
                ToAction::set_shift(ShiftState::Neutral),
                ToAction::set_last(0),
            ],
        ));

        RuleSet {
            description: format!(
                "{} - prefix/postfix shift ({})",
                self.compiled.name,
                self.compiled.arrangement.label()
            ),
            manipulators,
        }
    }

    /// Fixed physical order, extended by any bound keys that sit outside the
    /// two hand blocks.
    fn key_walk_order(&self) -> Vec<String> {
        let mut order = physical_key_order(self.compiled);
        let mut seen: BTreeSet<String> = order.iter().cloned().collect();
        let classified = &self.compiled.classified;
        let mut extra: BTreeSet<String> = Bucket::ALL
            .iter()
            .flat_map(|b| classified.buckets.layer(*b).keys().cloned())
            .chain(classified.literals.keys().cloned())
            .collect();
        extra.insert(classified.specials.shift_a_key.clone());
        extra.insert(classified.specials.shift_b_key.clone());
        extra.insert(classified.specials.diacritic_key.clone());
        for key in extra {
            if seen.insert(key.clone()) {
                order.push(key);
            }
        }
        order
    }

    fn emission_actions(&self, character: &Character) -> Vec<ToAction> {
        self.emissions[character]
            .chars()
            .map(|c| ToAction::key(output_key_code(c)))
            .collect()
    }

    fn reset_actions(&self) -> Vec<ToAction> {
        vec![ToAction::set_shift(ShiftState::Neutral), ToAction::set_last(0)]
    }

    /// Wire value recorded after emitting `character` outside the diacritic
    /// sub-layers: its base id when it can start a composition, else none.
    fn base_last(&self, character: &Character) -> u16 {
        self.ids.base_wire(character)
    }

    /// Emission rule for one (key, state, bucket) slot; a reset-only rule
    /// when the slot is empty, so a shifted state never sticks.
    fn layer_rule(
        &self,
        key: &str,
        state: ShiftState,
        bucket: Bucket,
        track_last: bool,
    ) -> Manipulator {
        match self.compiled.classified.buckets.get(bucket, key) {
            Some(character) => {
                let mut to = self.emission_actions(character);
                to.push(ToAction::set_shift(ShiftState::Neutral));
                let last = if track_last { self.base_last(character) } else { 0 };
                to.push(ToAction::set_last(last));
                Manipulator::basic(key, vec![Condition::shift_is(state)], to)
            }
            None => Manipulator::basic(
                key,
                vec![Condition::shift_is(state)],
                self.reset_actions(),
            ),
        }
    }

    /// Rules for a prefix shift key: diacritic sub-layers resolve through
    /// the buckets, the opposite shift state resolves the cross shortcut,
    /// its own state fires the double-tap shortcut, and from neutral it
    /// selects its layer without emitting.
    fn shift_key_rules(&self, key: &str, is_shift_a: bool) -> Vec<Manipulator> {
        let shortcuts = &self.compiled.classified.shortcuts;
        let (own_state, cross_state, cross_bucket, doubletap) = if is_shift_a {
            (ShiftState::A, ShiftState::B, Bucket::ShiftB, &shortcuts.shift_a_double)
        } else {
            (ShiftState::B, ShiftState::A, Bucket::ShiftA, &shortcuts.shift_b_double)
        };

        let doubletap_rule = match doubletap {
            Some(character) => {
                let mut to = self.emission_actions(character);
                to.push(ToAction::set_shift(ShiftState::Neutral));
                to.push(ToAction::set_last(self.base_last(character)));
                Manipulator::basic(key, vec![Condition::shift_is(own_state)], to)
            }
            None => Manipulator::basic(
                key,
                vec![Condition::shift_is(own_state)],
                self.reset_actions(),
            ),
        };

        vec![
            self.layer_rule(key, ShiftState::BDiacritic, Bucket::ShiftBDiacritic, false),
            self.layer_rule(key, ShiftState::ADiacritic, Bucket::ShiftADiacritic, false),
            self.layer_rule(key, cross_state, cross_bucket, true),
            doubletap_rule,
            Manipulator::basic(
                key,
                vec![Condition::shift_is(ShiftState::Neutral)],
                vec![ToAction::set_shift(own_state), ToAction::set_last(0)],
            ),
        ]
    }

    /// Rules for the diacritic key: sub-layer double-taps resolve through
    /// the diacritic buckets on its own position, the prefix states enter
    /// the yoon sub-layers, and in neutral it is a pure postfix signal
    /// matched against the last-emitted identifier.
    fn diacritic_key_rules(&self, key: &str) -> Vec<Manipulator> {
        let mut out = vec![
            self.layer_rule(key, ShiftState::BDiacritic, Bucket::ShiftBDiacritic, false),
            self.layer_rule(key, ShiftState::ADiacritic, Bucket::ShiftADiacritic, false),
            Manipulator::basic(
                key,
                vec![Condition::shift_is(ShiftState::B)],
                vec![ToAction::set_shift(ShiftState::BDiacritic), ToAction::set_last(0)],
            ),
            Manipulator::basic(
                key,
                vec![Condition::shift_is(ShiftState::A)],
                vec![ToAction::set_shift(ShiftState::ADiacritic), ToAction::set_last(0)],
            ),
        ];

        for rule in self.compiled.compositions.iter() {
            // First press: base -> depth-1 result, which stays correctable.
            if let Some(id) = self.ids.get(&rule.source, IdClass::Base) {
                let next_last = self
                    .ids
                    .get(&rule.target, IdClass::Voiced)
                    .map_or(0, EmittedId::wire);
                out.push(self.composition_rule(key, id, rule, next_last));
            }
            // Second press: depth-1 result -> terminal depth-2 result.
            if let Some(id) = self.ids.get(&rule.source, IdClass::Voiced) {
                out.push(self.composition_rule(key, id, rule, 0));
            }
        }

        // No matching last-emitted value: consume the key without output.
        // The layout may simply lack a composition for the character typed
        // last; silently dropping the press mirrors the declarative table's
        // behavior, and consuming it keeps the raw letter from leaking
        // through to the host.
        out.push(Manipulator::basic(
            key,
            vec![Condition::shift_is(ShiftState::Neutral)],
            vec![ToAction::set_shift(ShiftState::Neutral)],
        ));
        out
    }

    fn composition_rule(
        &self,
        key: &str,
        id: EmittedId,
        rule: &shingetsu_core::CompositionRule,
        next_last: u16,
    ) -> Manipulator {
        let erase = self.emissions[&rule.source].chars().count();
        let mut to = Vec::with_capacity(erase + 4);
        for _ in 0..erase {
            to.push(ToAction::backspace());
        }
        to.extend(self.emission_actions(&rule.target));
        to.push(ToAction::set_shift(ShiftState::Neutral));
        to.push(ToAction::set_last(next_last));
        Manipulator::basic(
            key,
            vec![
                Condition::shift_is(ShiftState::Neutral),
                Condition::last_is(id.wire()),
            ],
            to,
        )
    }

    /// Rules for an ordinary bucketed (or literal) key across all five
    /// states.
    fn ordinary_key_rules(&self, key: &str) -> Vec<Manipulator> {
        let classified = &self.compiled.classified;
        let bound = Bucket::ALL
            .iter()
            .any(|b| classified.buckets.get(*b, key).is_some());
        let literal = classified.literals.get(key);
        if !bound && literal.is_none() {
            return Vec::new();
        }

        let mut out = vec![
            self.layer_rule(key, ShiftState::BDiacritic, Bucket::ShiftBDiacritic, false),
            self.layer_rule(key, ShiftState::ADiacritic, Bucket::ShiftADiacritic, false),
            self.layer_rule(key, ShiftState::B, Bucket::ShiftB, true),
            self.layer_rule(key, ShiftState::A, Bucket::ShiftA, true),
        ];

        if let Some(character) = classified.buckets.get(Bucket::Neutral, key) {
            let mut to = self.emission_actions(character);
            to.push(ToAction::set_shift(ShiftState::Neutral));
            to.push(ToAction::set_last(self.base_last(character)));
            out.push(Manipulator::basic(
                key,
                vec![Condition::shift_is(ShiftState::Neutral)],
                to,
            ));
        } else if let Some(literal) = literal {
            if self.emissions.contains_key(literal) {
                let mut to = self.emission_actions(literal);
                to.push(ToAction::set_shift(ShiftState::Neutral));
                to.push(ToAction::set_last(0));
                out.push(Manipulator::basic(
                    key,
                    vec![Condition::shift_is(ShiftState::Neutral)],
                    to,
                ));
            }
        }
        out
    }
}
