//! `Message`: an addressable CAN frame and the signals it carries.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::model::attributes::Literal;
use crate::model::signal::Signal;

/// A repeated group of signals declared by `SIG_GROUP_`.
///
/// Equality is by repetition count and the *set* of names (order-insensitive);
/// see DESIGN.md for why repetition count is included.
#[derive(Debug, Clone)]
pub struct SignalGroup {
    pub repetition_count: u32,
    pub names: Vec<String>,
}

impl SignalGroup {
    pub fn new(repetition_count: u32, names: Vec<String>) -> Self {
        SignalGroup {
            repetition_count,
            names,
        }
    }

    pub fn name_set(&self) -> BTreeSet<&str> {
        self.names.iter().map(String::as_str).collect()
    }
}

impl PartialEq for SignalGroup {
    fn eq(&self, other: &Self) -> bool {
        self.repetition_count == other.repetition_count && self.name_set() == other.name_set()
    }
}

/// An addressable CAN frame identified by a numeric id, carrying signals.
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub id: u32,
    pub name: String,
    pub size: u32,
    /// First entry is the canonical transmitter; later entries come from
    /// `BO_TX_BU_`.
    pub transmitters: Vec<String>,
    /// Insertion-ordered; after multiplex reconstruction, holds only the
    /// signals not owned by a multiplexor's switch.
    pub signals: Vec<Signal>,
    /// Every signal name this message ever declared, in `SG_` declaration
    /// order, regardless of whether multiplex reconstruction later moved it
    /// into a switch. Used for uniqueness, diffing, and serialization: the
    /// canonical `SG_` block lists every signal, nested ones included.
    signal_order: Vec<String>,
    pub comments: Vec<String>,
    pub attributes: BTreeMap<String, Literal>,
    pub signal_groups: BTreeMap<String, SignalGroup>,
}

impl Message {
    pub fn new(id: u32, name: String, size: u32, transmitter: String) -> Self {
        Message {
            id,
            name,
            size,
            transmitters: vec![transmitter],
            ..Default::default()
        }
    }

    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    pub fn signal_mut(&mut self, name: &str) -> Option<&mut Signal> {
        self.signals.iter_mut().find(|s| s.name == name)
    }

    pub fn has_signal(&self, name: &str) -> bool {
        self.signal(name).is_some()
    }

    /// Appends a signal, enforcing the name-uniqueness invariant. Returns
    /// `false` without mutating the message if the name is already taken.
    #[must_use]
    pub fn push_signal(&mut self, signal: Signal) -> bool {
        if self.has_signal(&signal.name) {
            return false;
        }
        self.signal_order.push(signal.name.clone());
        self.signals.push(signal);
        true
    }

    /// Removes and returns the named top-level signal, if present.
    pub fn take_signal(&mut self, name: &str) -> Option<Signal> {
        let idx = self.signals.iter().position(|s| s.name == name)?;
        Some(self.signals.remove(idx))
    }

    /// Every name ever declared for this message, in original `SG_`
    /// declaration order, regardless of multiplex reconstruction.
    pub fn signal_order(&self) -> &[String] {
        &self.signal_order
    }

    /// `true` iff `name` was ever declared for this message, whether or not
    /// it still sits at the top level.
    pub fn declares_signal(&self, name: &str) -> bool {
        self.signal_order.iter().any(|n| n == name)
    }

    /// Finds a signal by name wherever it currently lives: at the top level,
    /// or nested inside some multiplexor's switch (recursively, for
    /// multiplexor chains).
    pub fn signal_by_name(&self, name: &str) -> Option<&Signal> {
        if let Some(s) = self.signal(name) {
            return Some(s);
        }
        self.signals.iter().find_map(|s| s.find_nested(name))
    }

    /// Mutable counterpart of [`Message::signal_by_name`].
    pub fn signal_by_name_mut(&mut self, name: &str) -> Option<&mut Signal> {
        if self.has_signal(name) {
            return self.signal_mut(name);
        }
        self.signals.iter_mut().find_map(|s| s.find_nested_mut(name))
    }

    pub fn name_set(&self) -> BTreeSet<&str> {
        self.signal_order.iter().map(String::as_str).collect()
    }
}
