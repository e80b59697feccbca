//! Structural diff: the first human-readable difference between two buses.
//!
//! Comparisons short-circuit on the first mismatch, in the fixed check order
//! of the model builder's own section order: scalars first, then node set
//! and payload, then messages, then global decoration. Two equal buses diff
//! to the empty string.

use std::collections::BTreeSet;

use crate::model::bus::{Bus, Node};
use crate::model::message::Message;

/// Renders a scalar mismatch as `"{field}:\n < {left}\n > {right}\n"`, the
/// smallest-difference shape every other check in this module reduces to.
fn line(field: &str, left: impl std::fmt::Display, right: impl std::fmt::Display) -> String {
    format!("{field}:\n < {left}\n > {right}\n")
}

fn scalar<T: std::fmt::Display + PartialEq>(field: &str, left: T, right: T) -> Option<String> {
    if left == right {
        None
    } else {
        Some(line(field, left, right))
    }
}

fn optional_scalar<T: std::fmt::Display + PartialEq>(
    field: &str,
    left: Option<T>,
    right: Option<T>,
) -> Option<String> {
    match (left, right) {
        (None, None) => None,
        (Some(l), Some(r)) if l == r => None,
        (l, r) => Some(line(
            field,
            l.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string()),
            r.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string()),
        )),
    }
}

fn name_set<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeSet<&'a str> {
    names.into_iter().collect()
}

fn set_diff(field: &str, left: &BTreeSet<&str>, right: &BTreeSet<&str>) -> Option<String> {
    if left == right {
        return None;
    }
    let only_left: Vec<&str> = left.difference(right).copied().collect();
    let only_right: Vec<&str> = right.difference(left).copied().collect();
    Some(line(field, only_left.join(", "), only_right.join(", ")))
}

fn node_payload_diff(a: &Node, b: &Node) -> Option<String> {
    if a.comments != b.comments {
        return Some(line(
            &format!("node \"{}\" comments", a.name),
            a.comments.join("; "),
            b.comments.join("; "),
        ));
    }
    if a.attributes != b.attributes {
        return Some(line(
            &format!("node \"{}\" attributes", a.name),
            format!("{:?}", a.attributes),
            format!("{:?}", b.attributes),
        ));
    }
    None
}

fn message_diff(a: &Message, b: &Message) -> Option<String> {
    let ctx = format!("message {}", a.id);
    if let Some(d) = scalar(&format!("{ctx} name"), &a.name, &b.name) {
        return Some(d);
    }
    if let Some(d) = scalar(&format!("{ctx} size"), a.size, b.size) {
        return Some(d);
    }
    let a_tx = name_set(a.transmitters.iter().map(String::as_str));
    let b_tx = name_set(b.transmitters.iter().map(String::as_str));
    if let Some(d) = set_diff(&format!("{ctx} transmitters"), &a_tx, &b_tx) {
        return Some(d);
    }
    let a_names = a.name_set();
    let b_names = b.name_set();
    if let Some(d) = set_diff(&format!("{ctx} signal names"), &a_names, &b_names) {
        return Some(d);
    }
    for name in a.signal_order() {
        let Some(sig_a) = a.signal_by_name(name) else {
            continue;
        };
        let Some(sig_b) = b.signal_by_name(name) else {
            continue;
        };
        let line_a = sig_a.to_dbc_line();
        let line_b = sig_b.to_dbc_line();
        if line_a != line_b {
            return Some(line(&format!("{ctx} signal \"{name}\""), line_a, line_b));
        }
    }
    if a.comments != b.comments {
        return Some(line(&format!("{ctx} comments"), a.comments.join("; "), b.comments.join("; ")));
    }
    if a.attributes != b.attributes {
        return Some(line(
            &format!("{ctx} attributes"),
            format!("{:?}", a.attributes),
            format!("{:?}", b.attributes),
        ));
    }
    let a_groups = name_set(a.signal_groups.keys().map(String::as_str));
    let b_groups = name_set(b.signal_groups.keys().map(String::as_str));
    if let Some(d) = set_diff(&format!("{ctx} signal groups"), &a_groups, &b_groups) {
        return Some(d);
    }
    for (group_name, group_a) in &a.signal_groups {
        let Some(group_b) = b.signal_groups.get(group_name) else {
            continue;
        };
        if group_a != group_b {
            return Some(line(
                &format!("{ctx} signal group \"{group_name}\""),
                format!("count={} names={:?}", group_a.repetition_count, group_a.names),
                format!("count={} names={:?}", group_b.repetition_count, group_b.names),
            ));
        }
    }
    None
}

/// Returns the first structural difference between `a` and `b` as a
/// human-readable string; the empty string means the two buses are equal.
///
/// Check order: version, baudrate, btr, node set, per-node payload,
/// newsymbols set, value tables, message-id set, per-message fields (in
/// declaration order), global comments, attribute typedefs, attribute
/// defaults, global attributes.
pub fn diff(a: &Bus, b: &Bus) -> String {
    diff_inner(a, b).unwrap_or_default()
}

fn diff_inner(a: &Bus, b: &Bus) -> Option<String> {
    if let Some(d) = scalar("version", &a.version, &b.version) {
        return Some(d);
    }
    if let Some(d) = optional_scalar("baudrate", a.baudrate, b.baudrate) {
        return Some(d);
    }
    let (a_btr1, a_btr2) = a.btr.map(|(x, y)| (Some(x), Some(y))).unwrap_or((None, None));
    let (b_btr1, b_btr2) = b.btr.map(|(x, y)| (Some(x), Some(y))).unwrap_or((None, None));
    if let Some(d) = optional_scalar("btr1", a_btr1, b_btr1) {
        return Some(d);
    }
    if let Some(d) = optional_scalar("btr2", a_btr2, b_btr2) {
        return Some(d);
    }

    let a_nodes = name_set(a.nodes().iter().map(|n| n.name.as_str()));
    let b_nodes = name_set(b.nodes().iter().map(|n| n.name.as_str()));
    if let Some(d) = set_diff("nodes", &a_nodes, &b_nodes) {
        return Some(d);
    }
    for node in a.nodes() {
        let Some(other) = b.node(&node.name) else {
            continue;
        };
        if let Some(d) = node_payload_diff(node, other) {
            return Some(d);
        }
    }

    let a_ns = name_set(a.newsymbols.iter().map(String::as_str));
    let b_ns = name_set(b.newsymbols.iter().map(String::as_str));
    if let Some(d) = set_diff("newsymbols", &a_ns, &b_ns) {
        return Some(d);
    }

    if a.global_values != b.global_values {
        return Some(line(
            "global_values",
            format!("{:?}", a.global_values),
            format!("{:?}", b.global_values),
        ));
    }

    let a_ids: BTreeSet<u32> = a.messages().iter().map(|m| m.id).collect();
    let b_ids: BTreeSet<u32> = b.messages().iter().map(|m| m.id).collect();
    if a_ids != b_ids {
        let only_a: Vec<String> = a_ids.difference(&b_ids).map(u32::to_string).collect();
        let only_b: Vec<String> = b_ids.difference(&a_ids).map(u32::to_string).collect();
        return Some(line("message ids", only_a.join(", "), only_b.join(", ")));
    }
    for message in a.messages() {
        let Some(other) = b.message(message.id) else {
            continue;
        };
        if let Some(d) = message_diff(message, other) {
            return Some(d);
        }
    }

    if a.comments != b.comments {
        return Some(line("comments", a.comments.join("; "), b.comments.join("; ")));
    }

    if a.attrib_typedefs != b.attrib_typedefs {
        return Some(line(
            "attrib_typedefs",
            format!("{:?}", a.attrib_typedefs),
            format!("{:?}", b.attrib_typedefs),
        ));
    }

    if a.attrib_defaults != b.attrib_defaults {
        return Some(line(
            "attrib_defaults",
            format!("{:?}", a.attrib_defaults),
            format!("{:?}", b.attrib_defaults),
        ));
    }

    if a.attributes != b.attributes {
        return Some(line(
            "attributes",
            format!("{:?}", a.attributes),
            format!("{:?}", b.attributes),
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus(version: &str) -> Bus {
        let text = format!("VERSION \"{version}\"\nNS_ :\nBS_:\nBU_: \n");
        crate::load(&text).unwrap().bus
    }

    #[test]
    fn equal_buses_diff_to_empty_string() {
        let b = bus("x");
        assert_eq!(diff(&b, &b), "");
    }

    #[test]
    fn diff_is_symmetric_in_equality() {
        let a = bus("a");
        let b = bus("b");
        assert_eq!(diff(&a, &b).is_empty(), diff(&b, &a).is_empty());
    }

    #[test]
    fn smallest_difference_reports_version() {
        let a = bus("a");
        let b = bus("b");
        assert_eq!(diff(&a, &b), "version:\n < a\n > b\n");
    }

    #[test]
    fn multiplexed_message_diff_reports_signal_line() {
        let text_a = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N1 N2\n\
            BO_ 100 Msg: 8 N1\n SG_ Sel M : 0|8@1+ (1,0) [0|3] \"\" N2\n SG_ A m0 : 8|8@1+ (1,0) [0|0] \"\" N2\n\n";
        let text_b = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N1 N2\n\
            BO_ 100 Msg: 8 N1\n SG_ Sel M : 0|8@1+ (1,0) [0|3] \"\" N2\n SG_ A m0 : 8|16@1+ (1,0) [0|0] \"\" N2\n\n";
        let a = crate::load(text_a).unwrap().bus;
        let b = crate::load(text_b).unwrap().bus;
        let d = diff(&a, &b);
        assert!(d.contains("signal \"A\""), "diff was: {d}");
    }
}
