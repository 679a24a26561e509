//! Typed model of the ruleset artifact.
//!
//! The document is a Karabiner-style rule list: per rule a matched physical
//! key, `variable_if` conditions on the shift-state and last-emitted
//! variables, and an action list of correcting deletes, literal key events,
//! and state-variable updates. Serialization order is struct order, so the
//! artifact is byte-identical across runs.

use serde::Serialize;

use shingetsu_core::ShiftState;

/// State variable holding the current shift state (0..4).
pub const SHIFT_VARIABLE: &str = "shingetsu_shift";
/// State variable holding the last-emitted identifier (0 = none).
pub const LAST_VARIABLE: &str = "shingetsu_last";

/// Key code of a correcting delete.
pub const BACKSPACE_KEY_CODE: &str = "delete_or_backspace";
/// The explicit cancel signal.
pub const CANCEL_KEY_CODE: &str = "escape";

#[derive(Debug, Clone, Serialize)]
pub struct RuleSet {
    pub description: String,
    pub manipulators: Vec<Manipulator>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Manipulator {
    #[serde(rename = "type")]
    pub kind: String,
    pub from: FromKey,
    pub to: Vec<ToAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Manipulator {
    pub fn basic(key: &str, conditions: Vec<Condition>, to: Vec<ToAction>) -> Self {
        Self {
            kind: "basic".to_string(),
            from: FromKey {
                key_code: key_code_for(key),
            },
            to,
            conditions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FromKey {
    pub key_code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToAction {
    Key { key_code: String },
    SetVariable { set_variable: VariableUpdate },
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableUpdate {
    pub name: String,
    pub value: u16,
}

impl ToAction {
    pub fn key(key_code: impl Into<String>) -> Self {
        Self::Key {
            key_code: key_code.into(),
        }
    }

    pub fn backspace() -> Self {
        Self::key(BACKSPACE_KEY_CODE)
    }

    pub fn set_shift(state: ShiftState) -> Self {
        Self::SetVariable {
            set_variable: VariableUpdate {
                name: SHIFT_VARIABLE.to_string(),
                value: state.wire_value(),
            },
        }
    }

    pub fn set_last(value: u16) -> Self {
        Self::SetVariable {
            set_variable: VariableUpdate {
                name: LAST_VARIABLE.to_string(),
                value,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub value: u16,
}

impl Condition {
    fn variable_if(name: &str, value: u16) -> Self {
        Self {
            kind: "variable_if".to_string(),
            name: name.to_string(),
            value,
        }
    }

    pub fn shift_is(state: ShiftState) -> Self {
        Self::variable_if(SHIFT_VARIABLE, state.wire_value())
    }

    pub fn last_is(value: u16) -> Self {
        Self::variable_if(LAST_VARIABLE, value)
    }
}

/// Physical key identifier -> engine key code.
pub fn key_code_for(key: &str) -> String {
    match key {
        ";" => "semicolon",
        "'" => "quote",
        "," => "comma",
        "." => "period",
        "/" => "slash",
        "[" => "open_bracket",
        "]" => "close_bracket",
        "-" => "hyphen",
        "=" => "equal_sign",
        "\\" => "backslash",
        "space" => "spacebar",
        other => other,
    }
    .to_string()
}

/// Emission-sequence character -> engine key code.
pub fn output_key_code(c: char) -> String {
    match c {
        '-' => "hyphen".to_string(),
        ';' => "semicolon".to_string(),
        ',' => "comma".to_string(),
        '.' => "period".to_string(),
        '/' => "slash".to_string(),
        other => other.to_string(),
    }
}
