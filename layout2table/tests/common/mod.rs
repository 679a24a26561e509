#![allow(dead_code)]

use std::collections::BTreeMap;

use layout2table::rules::{
    self, key_code_for, Condition, RuleSet, ToAction, BACKSPACE_KEY_CODE, CANCEL_KEY_CODE,
    LAST_VARIABLE, SHIFT_VARIABLE,
};
use layout2table::{compile_layout, Arrangement, CompiledLayout};

/// A complete layout document exercising every generation path: markers,
/// all five buckets, double-tap and cross shortcuts, literals, and a
/// passthrough entry.
pub fn fixture_layout() -> String {
    serde_json::json!({
        "name": "test layout",
        "conversion": {
            "★": {"keys": ["d"]},
            "☆": {"keys": ["k"]},
            "゛": {"keys": ["l"]},
            "゜": {"keys": ["\\"]},
            "あ": {"keys": ["a"]},
            "か": {"keys": ["f"]},
            "は": {"keys": ["g"]},
            "う": {"keys": ["s"]},
            "ん": {"keys": ["j"]},
            "た": {"keys": ["q"], "shift": ["A"]},
            "み": {"keys": ["w"], "shift": ["B"]},
            "みゃ": {"keys": ["w"], "shift": ["B", "D"]},
            "ちゃ": {"keys": ["u"], "shift": ["A", "D"]},
            "で": {"keys": ["d"], "shift": ["B"]},
            "ら": {"keys": ["d", "d"]},
            "も": {"keys": ["k", "k"]},
            "お": {"keys": ["l"], "shift": ["A", "D"]},
            "、": {"keys": [","]},
            "。": {"keys": ["."]},
            "ー": {"keys": ["'"]},
            "・": {"keys": ["/"]},
            "！": {"keys": ["1"]}
        }
    })
    .to_string()
}

pub fn compile_fixture(arrangement: Arrangement) -> CompiledLayout {
    compile_layout(&fixture_layout(), arrangement).unwrap()
}

pub fn fixture_ruleset(arrangement: Arrangement) -> RuleSet {
    rules::generate(&compile_fixture(arrangement)).unwrap()
}

/// Replays key presses against a generated ruleset the way the remapping
/// engine would: first manipulator whose key and variable conditions match
/// wins, its actions run in order, and an unmatched press passes through.
pub struct RulesetHarness {
    ruleset: RuleSet,
    variables: BTreeMap<String, u16>,
    pub output: String,
}

impl RulesetHarness {
    pub fn new(ruleset: RuleSet) -> Self {
        Self {
            ruleset,
            variables: BTreeMap::new(),
            output: String::new(),
        }
    }

    pub fn for_arrangement(arrangement: Arrangement) -> Self {
        Self::new(fixture_ruleset(arrangement))
    }

    pub fn press(&mut self, key: &str) {
        let code = key_code_for(key);
        let matched = self
            .ruleset
            .manipulators
            .iter()
            .find(|m| m.from.key_code == code && self.conditions_hold(&m.conditions));
        match matched {
            Some(manipulator) => {
                let actions = manipulator.to.clone();
                for action in actions {
                    self.apply(&action);
                }
            }
            None => self.output.push_str(key),
        }
    }

    pub fn press_all(&mut self, keys: &[&str]) {
        for key in keys {
            self.press(key);
        }
    }

    pub fn shift_state(&self) -> u16 {
        self.variables.get(SHIFT_VARIABLE).copied().unwrap_or(0)
    }

    pub fn last_emitted(&self) -> u16 {
        self.variables.get(LAST_VARIABLE).copied().unwrap_or(0)
    }

    fn conditions_hold(&self, conditions: &[Condition]) -> bool {
        conditions
            .iter()
            .all(|c| self.variables.get(&c.name).copied().unwrap_or(0) == c.value)
    }

    fn apply(&mut self, action: &ToAction) {
        match action {
            ToAction::Key { key_code } => {
                if key_code == BACKSPACE_KEY_CODE {
                    self.output.pop();
                } else if key_code != CANCEL_KEY_CODE {
                    self.output.push(output_char(key_code));
                }
            }
            ToAction::SetVariable { set_variable } => {
                self.variables
                    .insert(set_variable.name.clone(), set_variable.value);
            }
        }
    }
}

fn output_char(key_code: &str) -> char {
    match key_code {
        "hyphen" => '-',
        "semicolon" => ';',
        "comma" => ',',
        "period" => '.',
        "slash" => '/',
        other => other.chars().next().expect("nonempty key code"),
    }
}
