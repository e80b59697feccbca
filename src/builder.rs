//! The semantic model builder: consumes a [`SectionStore`] in a fixed
//! dependency order, validates section-level invariants, resolves
//! cross-references, and reconstructs multiplex hierarchies.

use std::collections::BTreeMap;

use crate::error::DatabaseError;
use crate::model::attributes::{Literal, TargetKind};
use crate::model::bus::{Bus, Node};
use crate::model::message::{Message, SignalGroup};
use crate::model::range::Range;
use crate::model::signal::{Signal, ValueType};
use crate::section::{ComponentRef, RawSignal, Section, SectionStore};

/// Result of a successful [`build`]: the assembled [`Bus`] plus any
/// non-fatal warnings collected along the way (duplicated node names,
/// duplicated value-table entries).
#[derive(Debug)]
pub struct BuildOutcome {
    pub bus: Bus,
    pub warnings: Vec<String>,
}

fn signal_from_raw(raw: RawSignal) -> Signal {
    Signal {
        name: raw.name,
        start_bit: raw.start_bit,
        numbits: raw.numbits,
        is_little_endian: raw.is_little_endian,
        is_signed: raw.is_signed,
        value_type: ValueType::Unspecified,
        factor: raw.factor,
        offset: raw.offset,
        range: Range::new(raw.range.0, raw.range.1),
        unit: raw.unit,
        multiplex_value: raw.multiplex_value,
        is_multiplexor: raw.is_multiplexor,
        switch: Default::default(),
        receivers: raw.receivers,
        comments: Vec::new(),
        attributes: BTreeMap::new(),
        value_descriptions: BTreeMap::new(),
    }
}

/// Assembles a [`Bus`] from parsed sections in dependency order: leaves
/// (`VERSION`, `BS_`, `BU_`) first, then messages and their signals, then
/// every cross-referencing section, then multiplex reconstruction. After
/// every step has run, `store` must be empty.
pub fn build(mut store: SectionStore) -> Result<BuildOutcome, DatabaseError> {
    let mut warnings = Vec::new();
    let mut bus = Bus::default();

    // 1. VERSION — exactly one required.
    let versions = store.extract(|s| match s {
        Section::Version(v) => Ok(v),
        other => Err(other),
    });
    bus.version = match versions.len() {
        0 => {
            return Err(DatabaseError::MissingSection {
                section: "VERSION",
            });
        }
        1 => versions.into_iter().next().unwrap(),
        _ => {
            return Err(DatabaseError::DuplicateSection {
                section: "VERSION",
            });
        }
    };

    // 2. BS_ — exactly one required; empty body means no baudrate/btr.
    let bs = store.extract(|s| match s {
        Section::Bs(v) => Ok(v),
        other => Err(other),
    });
    match bs.len() {
        0 => return Err(DatabaseError::MissingSection { section: "BS_" }),
        1 => {
            if let Some((baudrate, btr1, btr2)) = bs.into_iter().next().unwrap() {
                bus.baudrate = Some(baudrate);
                bus.btr = Some((btr1, btr2));
            }
        }
        _ => return Err(DatabaseError::DuplicateSection { section: "BS_" }),
    }

    // 3. BU_ — exactly one required; duplicate names warn and keep first.
    let bu = store.extract(|s| match s {
        Section::Bu(v) => Ok(v),
        other => Err(other),
    });
    let nodes = match bu.len() {
        0 => return Err(DatabaseError::MissingSection { section: "BU_" }),
        1 => bu.into_iter().next().unwrap(),
        _ => return Err(DatabaseError::DuplicateSection { section: "BU_" }),
    };
    let mut seen_nodes = Vec::with_capacity(nodes.len());
    let mut had_dup_node = false;
    for name in nodes {
        if seen_nodes.contains(&name) {
            had_dup_node = true;
            continue;
        }
        seen_nodes.push(name);
    }
    if had_dup_node {
        warnings.push("BU_: repeated nodes, removing duplicates".to_string());
    }
    for name in seen_nodes {
        let _ = bus.push_node(Node {
            name,
            comments: Vec::new(),
            attributes: BTreeMap::new(),
        });
    }

    // 4. NS_ — at most one, recorded verbatim.
    let ns = store.extract(|s| match s {
        Section::Ns(v) => Ok(v),
        other => Err(other),
    });
    match ns.len() {
        0 => {}
        1 => bus.newsymbols = ns.into_iter().next().unwrap(),
        _ => return Err(DatabaseError::DuplicateSection { section: "NS_" }),
    }

    // 5. VAL_TABLE_ — table names unique; per-table duplicate keys warn and
    //    last-defined wins.
    let val_tables = store.extract(|s| match s {
        Section::ValTable { name, entries } => Ok((name, entries)),
        other => Err(other),
    });
    for (name, entries) in val_tables {
        if bus.global_values.contains_key(&name) {
            return Err(DatabaseError::DuplicateValueTable { name });
        }
        let mut table = BTreeMap::new();
        for (value, label) in entries {
            if table.contains_key(&value) {
                warnings.push(format!(
                    "table \"{name}\" has value {value} defined more than once, last definition is used"
                ));
            }
            table.insert(value, label);
        }
        bus.global_values.insert(name, table);
    }

    // 6. BO_ — each creates a Message; duplicate id is an error.
    let messages = store.extract(|s| match s {
        Section::Bo(m) => Ok(m),
        other => Err(other),
    });
    for raw in messages {
        if bus.has_message(raw.id) {
            return Err(DatabaseError::DuplicateMessageId {
                id: raw.id,
                name: raw.name,
            });
        }
        let mut message = Message::new(raw.id, raw.name, raw.size, raw.transmitter);
        for raw_signal in raw.signals {
            let _ = message.push_signal(signal_from_raw(raw_signal));
        }
        let _ = bus.push_message(message);
    }

    // 7. BO_TX_BU_ — appends secondary transmitters.
    let tx = store.extract(|s| match s {
        Section::BoTxBu { id, transmitters } => Ok((id, transmitters)),
        other => Err(other),
    });
    for (id, transmitters) in tx {
        for node in &transmitters {
            if !bus.has_node(node) {
                return Err(DatabaseError::UndefinedTransmitter {
                    node: node.clone(),
                });
            }
        }
        let Some(message) = bus.message_mut(id) else {
            return Err(DatabaseError::UndefinedMessageInTxBu { id });
        };
        for node in transmitters {
            if !message.transmitters.contains(&node) {
                message.transmitters.push(node);
            }
        }
    }

    // 8. CM_ — attaches comments; dangling references are errors.
    let comments = store.extract(|s| match s {
        Section::Cm { target, text } => Ok((target, text)),
        other => Err(other),
    });
    for (target, text) in comments {
        match target {
            ComponentRef::Global => bus.comments.push(text),
            ComponentRef::Node(name) => {
                let Some(node) = bus.node_mut(&name) else {
                    return Err(DatabaseError::CommentForUndefinedNode { name });
                };
                node.comments.push(text);
            }
            ComponentRef::Message(id) => {
                let Some(message) = bus.message_mut(id) else {
                    return Err(DatabaseError::CommentForUndefinedMessage { id });
                };
                message.comments.push(text);
            }
            ComponentRef::Signal(id, signal) => {
                let Some(message) = bus.message_mut(id) else {
                    return Err(DatabaseError::CommentForUndefinedSignal { id, signal });
                };
                let Some(sig) = message.signal_mut(&signal) else {
                    return Err(DatabaseError::CommentForUndefinedSignal { id, signal });
                };
                sig.comments.push(text);
            }
            ComponentRef::Event(_) => return Err(DatabaseError::CommentForEventUnsupported),
        }
    }

    // 9. BA_DEF_ — registers an attribute typedef by (target-kind, name).
    let ba_defs = store.extract(|s| match s {
        Section::BaDef {
            target,
            name,
            typedef,
        } => Ok((target, name, typedef)),
        other => Err(other),
    });
    bus.attrib_typedefs.insert(TargetKind::Global, BTreeMap::new());
    bus.attrib_typedefs.insert(TargetKind::Node, BTreeMap::new());
    bus.attrib_typedefs.insert(TargetKind::Message, BTreeMap::new());
    bus.attrib_typedefs.insert(TargetKind::Signal, BTreeMap::new());
    bus.attrib_typedefs.insert(TargetKind::Event, BTreeMap::new());
    for (target, name, typedef) in ba_defs {
        let table = bus.attrib_typedefs.get_mut(&target).unwrap();
        if table.contains_key(&name) {
            return Err(DatabaseError::DuplicateAttributeTypedef {
                kind: target.dbc_label().to_string(),
                name,
            });
        }
        table.insert(name, typedef);
    }

    // 10. BA_DEF_DEF_ — registers a default value.
    let ba_def_defs = store.extract(|s| match s {
        Section::BaDefDef { name, value } => Ok((name, value)),
        other => Err(other),
    });
    for (name, value) in ba_def_defs {
        if bus.attrib_defaults.contains_key(&name) {
            return Err(DatabaseError::DuplicateAttributeDefault { name });
        }
        bus.attrib_defaults.insert(name, value);
    }

    // 11. BA_ — assigns an attribute value on a target.
    let bas = store.extract(|s| match s {
        Section::Ba { name, target, value } => Ok((name, target, value)),
        other => Err(other),
    });
    assign_attributes(&mut bus, bas)?;

    // 12. VAL_ — attaches a value-description map on a signal.
    let vals = store.extract(|s| match s {
        Section::Val { id, signal, entries } => Ok((id, signal, entries)),
        other => Err(other),
    });
    for (id, signal, entries) in vals {
        let Some(message) = bus.message_mut(id) else {
            return Err(DatabaseError::UnknownValueDescriptionMessage { id, signal });
        };
        let Some(sig) = message.signal_mut(&signal) else {
            return Err(DatabaseError::UnknownValueDescriptionSignal { id, signal });
        };
        for (value, label) in entries {
            sig.value_descriptions.insert(value, label);
        }
    }

    // 13. SIG_GROUP_ — registers a signal group.
    let groups = store.extract(|s| match s {
        Section::SigGroup {
            id,
            name,
            repetition_count,
            signals,
        } => Ok((id, name, repetition_count, signals)),
        other => Err(other),
    });
    for (id, name, repetition_count, signals) in groups {
        let Some(message) = bus.message_mut(id) else {
            return Err(DatabaseError::UnknownSignalGroupMessage { id, group: name });
        };
        if message.signal_groups.contains_key(&name) {
            return Err(DatabaseError::DuplicateSignalGroup { group: name, id });
        }
        let mut deduped = Vec::with_capacity(signals.len());
        for signame in signals {
            if !deduped.contains(&signame) {
                deduped.push(signame);
            }
        }
        let undefined: Vec<&str> = deduped
            .iter()
            .filter(|s| !message.has_signal(s))
            .map(String::as_str)
            .collect();
        if !undefined.is_empty() {
            return Err(DatabaseError::UndefinedSignalsInGroup {
                group: name,
                id,
                signals: undefined.join(", "),
            });
        }
        message
            .signal_groups
            .insert(name, SignalGroup::new(repetition_count, deduped));
    }

    // 14. SIG_VALTYPE_ — sets a signal's value_type.
    let valtypes = store.extract(|s| match s {
        Section::SigValtype { id, signal, code } => Ok((id, signal, code)),
        other => Err(other),
    });
    for (id, signal, code) in valtypes {
        let Some(message) = bus.message_mut(id) else {
            return Err(DatabaseError::UnknownValueTypeMessage { id, signal });
        };
        let Some(sig) = message.signal_mut(&signal) else {
            return Err(DatabaseError::UnknownValueTypeSignal { id, signal });
        };
        sig.value_type = ValueType::from_code(code);
    }

    // 15. Single-multiplexor reconstruction.
    for message in bus.messages_mut() {
        reconstruct_single_multiplexor(message)?;
    }

    // 16. SG_MUL_VAL_ — extended multiplexing.
    let sg_mul_vals = store.extract(|s| match s {
        Section::SgMulVal {
            id,
            signal,
            muxor,
            ranges,
        } => Ok((id, signal, muxor, ranges)),
        other => Err(other),
    });
    for (id, signal, muxor, ranges) in sg_mul_vals {
        let Some(message) = bus.message_mut(id) else {
            return Err(DatabaseError::UnknownExtendedMultiplexMessage {
                id,
                signal,
                mux: muxor,
            });
        };
        if !message.declares_signal(&signal) {
            return Err(DatabaseError::UnknownExtendedMultiplexSignal { id, signal });
        }
        if !message.declares_signal(&muxor) {
            return Err(DatabaseError::UnknownExtendedMultiplexMux { id, mux: muxor });
        }
        if !message
            .signal_by_name(&muxor)
            .is_some_and(|s| s.is_multiplexor)
        {
            return Err(DatabaseError::NotAMultiplexor { id, mux: muxor });
        }
        if ranges.is_empty() {
            continue;
        }
        let Some(sig) = message.take_signal(&signal) else {
            return Err(DatabaseError::SignalClaimedByMultipleMultiplexors { id, signal });
        };
        let mux = message.signal_by_name_mut(&muxor).unwrap();
        for (low, high) in ranges {
            mux.switch
                .append(Range::new(low as f64, high as f64), sig.clone());
        }
    }

    // 17. Orphan check.
    let mut orphans = String::new();
    for message in bus.messages() {
        for signal in &message.signals {
            if signal.multiplex_value.is_some() {
                orphans.push_str(&format!("\n    \"{}\": \"{}\"", message.id, signal.name));
            }
        }
    }
    if !orphans.is_empty() {
        return Err(DatabaseError::UnspecifiedMultiplexor { details: orphans });
    }

    if !store.is_empty() {
        return Err(DatabaseError::ResidualSections {
            sections: store.remaining_kinds().join(", "),
        });
    }

    Ok(BuildOutcome { bus, warnings })
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::grammar::parse;

    fn build_text(text: &str) -> Result<BuildOutcome, DatabaseError> {
        super::build(parse(text).expect("text must parse"))
    }

    #[test]
    fn minimal_file_builds_an_empty_bus() {
        let outcome = build_text("VERSION \"\"\nNS_ :\nBS_:\nBU_: \n").unwrap();
        assert_eq!(outcome.bus.version, "");
        assert_eq!(outcome.bus.baudrate, None);
        assert!(outcome.bus.nodes().is_empty());
    }

    #[test]
    fn missing_bs_is_a_database_error() {
        let err = build_text("VERSION \"\"\nNS_ :\nBU_: \n").unwrap_err();
        assert_eq!(
            err,
            DatabaseError::MissingSection { section: "BS_" }
        );
    }

    #[test]
    fn duplicate_message_id_is_an_error() {
        let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N1\n\
            BO_ 42 A: 1 N1\n\
            BO_ 42 B: 1 N1\n";
        let err = build_text(text).unwrap_err();
        match err {
            DatabaseError::DuplicateMessageId { id, .. } => assert_eq!(id, 42),
            other => panic!("expected DuplicateMessageId, got {other:?}"),
        }
    }

    #[test]
    fn single_multiplexor_places_both_selected_signals_under_the_switch() {
        let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N2\n\
            BO_ 100 Msg: 8 N2\n\
             SG_ Sel M : 0|8@1+ (1,0) [0|3] \"\" N2\n\
             SG_ A m0 : 8|16@1+ (1,0) [0|0] \"\" N2\n\
             SG_ A m2 : 8|16@1+ (1,0) [0|0] \"\" N2\n";
        let outcome = build_text(text).unwrap();
        let message = outcome.bus.message(100).unwrap();
        assert_eq!(message.signals.len(), 1);
        assert_eq!(message.signals[0].name, "Sel");
        let ranges: Vec<(f64, f64)> = message.signals[0]
            .switch
            .entries()
            .iter()
            .map(|(r, _)| r.limits())
            .collect();
        assert_eq!(ranges, vec![(0.0, 0.0), (2.0, 2.0)]);
    }

    #[test]
    fn multiplex_value_out_of_selector_range_is_an_error() {
        let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N2\n\
            BO_ 100 Msg: 8 N2\n\
             SG_ Sel M : 0|2@1+ (1,0) [0|3] \"\" N2\n\
             SG_ A m9 : 8|16@1+ (1,0) [0|0] \"\" N2\n";
        let err = build_text(text).unwrap_err();
        assert!(matches!(err, DatabaseError::MultiplexValueOutOfRange { .. }));
    }

    #[test]
    fn orphaned_multiplex_value_with_no_multiplexor_is_an_error() {
        let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N2\n\
            BO_ 100 Msg: 8 N2\n\
             SG_ A m0 : 0|8@1+ (1,0) [0|0] \"\" N2\n";
        let err = build_text(text).unwrap_err();
        assert!(matches!(err, DatabaseError::UnspecifiedMultiplexor { .. }));
    }

    #[test]
    fn extended_multiplexing_reclaims_signal_from_a_different_multiplexor() {
        let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N2\n\
            BO_ 100 Msg: 8 N2\n\
             SG_ Sel M : 0|8@1+ (1,0) [0|3] \"\" N2\n\
             SG_ A : 8|8@1+ (1,0) [0|0] \"\" N2\n\
            SG_MUL_VAL_ 100 A Sel 0-1,3-3;\n";
        let outcome = build_text(text).unwrap();
        let message = outcome.bus.message(100).unwrap();
        assert_eq!(message.signals.len(), 1);
        let sw = &message.signals[0].switch;
        assert_eq!(sw.len(), 2);
    }

    #[test]
    fn duplicate_sg_mul_val_claim_on_the_same_signal_is_an_error() {
        let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N2\n\
            BO_ 100 Msg: 8 N2\n\
             SG_ Sel M : 0|8@1+ (1,0) [0|3] \"\" N2\n\
             SG_ Other M : 8|8@1+ (1,0) [0|0] \"\" N2\n\
             SG_ A : 16|8@1+ (1,0) [0|0] \"\" N2\n\
            SG_MUL_VAL_ 100 A Sel 0-0;\n\
            SG_MUL_VAL_ 100 A Other 0-0;\n";
        let err = build_text(text).unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::SignalClaimedByMultipleMultiplexors { .. }
        ));
    }

    #[test]
    fn comment_for_undefined_signal_is_an_error() {
        let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N1\n\
            BO_ 1 A: 1 N1\n\
             SG_ S : 0|8@1+ (1,0) [0|0] \"\" N1\n\
            CM_ SG_ 1 Missing \"hi\";\n";
        let err = build_text(text).unwrap_err();
        match err {
            DatabaseError::CommentForUndefinedSignal { id, signal } => {
                assert_eq!(id, 1);
                assert_eq!(signal, "Missing");
            }
            other => panic!("expected CommentForUndefinedSignal, got {other:?}"),
        }
    }
}

fn assign_attributes(
    bus: &mut Bus,
    bas: Vec<(String, ComponentRef, Literal)>,
) -> Result<(), DatabaseError> {
    for (name, target, value) in bas {
        match target {
            ComponentRef::Global => {
                if bus.attributes.contains_key(&name) {
                    return Err(DatabaseError::DuplicateGlobalAttribute { name });
                }
                bus.attributes.insert(name, value);
            }
            ComponentRef::Node(node) => {
                let Some(n) = bus.node_mut(&node) else {
                    return Err(DatabaseError::UnknownAttributeNode { node });
                };
                if n.attributes.contains_key(&name) {
                    return Err(DatabaseError::DuplicateNodeAttribute { name, node });
                }
                n.attributes.insert(name, value);
            }
            ComponentRef::Message(id) => {
                let Some(message) = bus.message_mut(id) else {
                    return Err(DatabaseError::UnknownAttributeMessage { id });
                };
                if message.attributes.contains_key(&name) {
                    return Err(DatabaseError::DuplicateMessageAttribute { name, id });
                }
                message.attributes.insert(name, value);
            }
            ComponentRef::Signal(id, signal) => {
                let Some(message) = bus.message_mut(id) else {
                    return Err(DatabaseError::UnknownAttributeMessageForSignal { id, signal });
                };
                let Some(sig) = message.signal_mut(&signal) else {
                    return Err(DatabaseError::UnknownAttributeSignal { id, signal });
                };
                if sig.attributes.contains_key(&name) {
                    return Err(DatabaseError::DuplicateSignalAttribute { name, signal, id });
                }
                sig.attributes.insert(name, value);
            }
            ComponentRef::Event(_) => return Err(DatabaseError::AttributeForEventUnsupported),
        }
    }
    Ok(())
}

/// For a message with exactly one multiplexor signal, moves every signal
/// carrying a `multiplex_value` into that multiplexor's switch.
fn reconstruct_single_multiplexor(message: &mut Message) -> Result<(), DatabaseError> {
    let mux_names: Vec<String> = message
        .signals
        .iter()
        .filter(|s| s.is_multiplexor)
        .map(|s| s.name.clone())
        .collect();
    if mux_names.len() != 1 {
        return Ok(());
    }
    let mux_name = mux_names.into_iter().next().unwrap();
    let targets: Vec<(String, u32)> = message
        .signals
        .iter()
        .filter(|s| s.name != mux_name)
        .filter_map(|s| s.multiplex_value.map(|v| (s.name.clone(), v)))
        .collect();
    for (name, value) in targets {
        if !message.signal(&mux_name).unwrap().multiplexes(value) {
            return Err(DatabaseError::MultiplexValueOutOfRange {
                signal: name,
                id: message.id,
                mux: mux_name,
            });
        }
        let sig = message.take_signal(&name).unwrap();
        let mux = message.signal_mut(&mux_name).unwrap();
        mux.switch
            .append(Range::new(value as f64, value as f64), sig);
    }
    Ok(())
}
