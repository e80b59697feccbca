//! `Signal`: a named bit-field within a message.

use std::collections::BTreeMap;

use crate::model::attributes::Literal;
use crate::model::range::Range;
use crate::model::switch::Switch;

/// How a `SIG_VALTYPE_` code maps to the signal's physical interpretation.
/// `Unspecified` means inherit from `is_signed`/`numbits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    Unspecified,
    Integer,
    Float,
    Double,
}

impl ValueType {
    /// `SIG_VALTYPE_` restricts its code to the single digits `0`-`3`; `2`
    /// and `3` both render as an IEEE double-precision value, since the
    /// format names no fifth kind for the code `3`.
    pub(crate) fn from_code(code: u8) -> ValueType {
        match code {
            0 => ValueType::Integer,
            1 => ValueType::Float,
            _ => ValueType::Double,
        }
    }
}

/// A named bit-field within a [`crate::model::message::Message`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signal {
    pub name: String,

    // encoding
    pub start_bit: u32,
    pub numbits: u32,
    pub is_little_endian: bool,
    pub is_signed: bool,
    pub value_type: ValueType,

    // scaling
    pub factor: f64,
    pub offset: f64,
    pub range: Range,
    pub unit: String,

    // multiplexing
    pub multiplex_value: Option<u32>,
    pub is_multiplexor: bool,
    pub switch: Switch,

    // routing
    pub receivers: Vec<String>,

    // decoration
    pub comments: Vec<String>,
    pub attributes: BTreeMap<String, Literal>,
    pub value_descriptions: BTreeMap<i64, String>,
}

impl Signal {
    /// `true` iff this signal is a multiplexor and `val` is a value it could
    /// select (`0 <= val < 2^numbits`).
    pub fn multiplexes(&self, val: u32) -> bool {
        self.is_multiplexor && (val as u64) < (1u64 << self.numbits.min(63))
    }

    /// Canonical single-line `SG_ ...` rendering, used both by the
    /// serializer and as the definition of signal equality for diffing.
    pub fn to_dbc_line(&self) -> String {
        crate::serialize::signal_line(self)
    }

    /// Searches this signal's switch, recursively, for a nested signal named
    /// `name` (supports multiplexor chains: a multiplexed signal that is
    /// itself a multiplexor owns its own nested switch).
    pub(crate) fn find_nested(&self, name: &str) -> Option<&Signal> {
        for (_, sig) in self.switch.entries() {
            if sig.name == name {
                return Some(sig);
            }
            if let Some(found) = sig.find_nested(name) {
                return Some(found);
            }
        }
        None
    }

    pub(crate) fn find_nested_mut(&mut self, name: &str) -> Option<&mut Signal> {
        for (_, sig) in self.switch.entries_mut() {
            if sig.name == name {
                return Some(sig);
            }
            if let Some(found) = sig.find_nested_mut(name) {
                return Some(found);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplexes_respects_bit_width() {
        let mut s = Signal {
            is_multiplexor: true,
            numbits: 2,
            ..Default::default()
        };
        assert!(s.multiplexes(0));
        assert!(s.multiplexes(3));
        assert!(!s.multiplexes(4));
        s.is_multiplexor = false;
        assert!(!s.multiplexes(0));
    }
}
