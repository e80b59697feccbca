//! `Bus`: everything a DBC file can describe about a CAN network.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::model::attributes::{AttrTypedef, Literal, TargetKind};
use crate::model::message::Message;

/// A node (`BU_` entry) and the comments/attributes attached to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: String,
    pub comments: Vec<String>,
    pub attributes: BTreeMap<String, Literal>,
}

/// Everything a DBC file can describe about a CAN network.
///
/// `Bus` owns its [`Message`]s; each `Message` owns its signals. Built once
/// by [`crate::builder::build`] and not mutated incrementally afterward.
#[derive(Debug, Clone, Default)]
pub struct Bus {
    pub version: String,
    pub baudrate: Option<u32>,
    pub btr: Option<(u32, u32)>,

    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,

    /// Recognized extension keywords declared by `NS_`, in file order.
    pub newsymbols: Vec<String>,

    /// Per-table value→label maps, keyed by table name.
    pub global_values: BTreeMap<String, BTreeMap<i64, String>>,

    messages: Vec<Message>,
    message_index: HashMap<u32, usize>,

    pub comments: Vec<String>,
    pub attrib_typedefs: BTreeMap<TargetKind, BTreeMap<String, AttrTypedef>>,
    pub attrib_defaults: BTreeMap<String, Literal>,
    pub attributes: BTreeMap<String, Literal>,
}

impl Bus {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.node_index.get(name).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        let idx = *self.node_index.get(name)?;
        Some(&mut self.nodes[idx])
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// Appends a node. Returns `false` without mutating if the name already
    /// exists (callers are expected to have deduplicated `BU_` already).
    #[must_use]
    pub fn push_node(&mut self, node: Node) -> bool {
        if self.has_node(&node.name) {
            return false;
        }
        self.node_index.insert(node.name.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut [Message] {
        &mut self.messages
    }

    pub fn message(&self, id: u32) -> Option<&Message> {
        self.message_index.get(&id).map(|&i| &self.messages[i])
    }

    pub fn message_mut(&mut self, id: u32) -> Option<&mut Message> {
        let idx = *self.message_index.get(&id)?;
        Some(&mut self.messages[idx])
    }

    pub fn has_message(&self, id: u32) -> bool {
        self.message_index.contains_key(&id)
    }

    /// Appends a message. Returns `false` without mutating if the id already
    /// exists.
    #[must_use]
    pub fn push_message(&mut self, message: Message) -> bool {
        if self.has_message(message.id) {
            return false;
        }
        self.message_index.insert(message.id, self.messages.len());
        self.messages.push(message);
        true
    }
}
