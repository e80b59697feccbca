//! Canonical DBC text emission.
//!
//! Output need not be byte-identical to whatever text a [`Bus`] was parsed
//! from; it only needs to round-trip through [`crate::grammar::parse`] and
//! [`crate::builder::build`] into an equal model, per [`crate::diff::diff`].

use crate::model::attributes::{AttrTypedef, Literal};
use crate::model::bus::Bus;
use crate::model::message::Message;
use crate::model::signal::Signal;

fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

fn literal_rendered(value: &Literal) -> String {
    if value.is_string() {
        format!("\"{value}\"")
    } else {
        format!("{value}")
    }
}

fn typedef_keyword(typedef: &AttrTypedef) -> &'static str {
    match typedef {
        AttrTypedef::Int { .. } => "INT",
        AttrTypedef::Hex { .. } => "HEX",
        AttrTypedef::Float { .. } => "FLOAT",
        AttrTypedef::Str => "STRING",
        AttrTypedef::Enum(_) => "ENUM",
    }
}

/// Canonical single-line `SG_ ...` rendering of a signal. Also the
/// definition of signal equality for diffing: two signals are equal iff
/// their lines are equal.
pub(crate) fn signal_line(signal: &Signal) -> String {
    let mut s = format!("SG_ {} ", signal.name);
    let mut one_more = false;
    if let Some(v) = signal.multiplex_value {
        s += &format!("m{v}");
        one_more = true;
    }
    if signal.is_multiplexor {
        s += "M";
        one_more = true;
    }
    if one_more {
        s.push(' ');
    }
    s.push(':');
    s += &format!(" {}|{}@", signal.start_bit, signal.numbits);
    s.push(if signal.is_little_endian { '1' } else { '0' });
    s.push(if signal.is_signed { '-' } else { '+' });
    s += &format!(" ({},{})", signal.factor, signal.offset);
    s += &format!(" [{}|{}]", signal.range.min, signal.range.max);
    s += &format!(" \"{}\"", signal.unit);
    if let Some((first, rest)) = signal.receivers.split_first() {
        s += &format!("  {first}");
        for r in rest {
            s += &format!(", {r}");
        }
    }
    s
}

fn sg_mul_val_lines(signal: &Signal) -> Vec<String> {
    if !signal.is_multiplexor {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for (sig, ranges) in signal.switch.grouped_by_signal() {
        let rstr = ranges
            .iter()
            .map(|r| format!("{}-{}", r.min, r.max))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("{} {} {rstr}", sig.name, signal.name));
        lines.extend(sg_mul_val_lines(sig));
    }
    lines
}

/// `true` iff the message needs an `SG_MUL_VAL_` block at all: either more
/// than one of its signals (top-level or nested) is a multiplexor, or some
/// multiplexor's switch holds a signal under more than one range.
fn needs_sg_mul_val_block(message: &Message) -> bool {
    let mux_count = message
        .signal_order()
        .iter()
        .filter(|n| {
            message
                .signal_by_name(n)
                .is_some_and(|s| s.is_multiplexor)
        })
        .count();
    if mux_count > 1 {
        return true;
    }
    message.signal_order().iter().any(|n| {
        message
            .signal_by_name(n)
            .is_some_and(|s| s.switch.any_multiples())
    })
}

/// Renders a [`Bus`] to canonical DBC text.
pub fn to_dbc_text(bus: &Bus) -> String {
    let mut out = String::new();

    out += &format!("VERSION \"{}\"\n\n", bus.version);

    out += "NS_ :\n";
    for symbol in &bus.newsymbols {
        out += &format!("    {symbol}\n");
    }
    out.push('\n');

    out += "BS_:";
    if let (Some(baudrate), Some((btr1, btr2))) = (bus.baudrate, bus.btr) {
        out += &format!(" {baudrate}: {btr1}, {btr2}");
    }
    out += "\n\n";

    out += "BU_:";
    for node in bus.nodes() {
        out += &format!(" {}", node.name);
    }
    out += "\n\n";

    if !bus.global_values.is_empty() {
        for (table, values) in &bus.global_values {
            out += &format!("VAL_TABLE_ {table}");
            for (value, label) in values.iter().rev() {
                out += &format!(" {value} \"{label}\"");
            }
            out += " ;\n";
        }
        out.push('\n');
    }

    for message in bus.messages() {
        out += &format!(
            "BO_ {} {}: {} {}\n",
            message.id, message.name, message.size, message.transmitters[0]
        );
        for name in message.signal_order() {
            let Some(signal) = message.signal_by_name(name) else {
                continue;
            };
            out += &format!(" {}\n", signal.to_dbc_line());
        }
    }
    if !bus.messages().is_empty() {
        out.push('\n');
    }

    let mut count = 0;
    for message in bus.messages() {
        if message.transmitters.len() > 1 {
            count += 1;
            out += &format!("BO_TX_BU_ {}:", message.id);
            for tx in &message.transmitters {
                out += &format!(" {tx}");
            }
            out += " ;\n";
        }
    }
    if count > 0 {
        out.push('\n');
    }

    let mut count = 0;
    for comment in &bus.comments {
        count += 1;
        out += &format!("CM_ \"{}\";\n", escape(comment));
    }
    for node in bus.nodes() {
        for comment in &node.comments {
            count += 1;
            out += &format!("CM_ BU_ {} \"{}\";\n", node.name, escape(comment));
        }
    }
    for message in bus.messages() {
        for comment in &message.comments {
            count += 1;
            out += &format!("CM_ BO_ {} \"{}\";\n", message.id, escape(comment));
        }
        for name in message.signal_order() {
            let Some(signal) = message.signal_by_name(name) else {
                continue;
            };
            for comment in &signal.comments {
                count += 1;
                out += &format!(
                    "CM_ SG_ {} {} \"{}\";\n",
                    message.id,
                    name,
                    escape(comment)
                );
            }
        }
    }
    if count > 0 {
        out.push('\n');
    }

    let mut count = 0;
    for (kind, typedefs) in &bus.attrib_typedefs {
        let label = kind.dbc_label();
        for (name, typedef) in typedefs {
            count += 1;
            if label.is_empty() {
                out += "BA_DEF_ ";
            } else {
                out += &format!("BA_DEF_ {label} ");
            }
            out += &format!("\"{name}\" {} ", typedef_keyword(typedef));
            match typedef {
                AttrTypedef::Int { min, max } | AttrTypedef::Hex { min, max } => {
                    out += &format!("{min} {max}");
                }
                AttrTypedef::Float { min, max } => {
                    out += &format!("{min} {max}");
                }
                AttrTypedef::Str => {}
                AttrTypedef::Enum(values) => {
                    out += &values
                        .iter()
                        .map(|v| format!("\"{v}\""))
                        .collect::<Vec<_>>()
                        .join(", ");
                }
            }
            out += ";\n";
        }
    }
    if count > 0 {
        out.push('\n');
    }

    let mut count = 0;
    for (name, value) in &bus.attrib_defaults {
        count += 1;
        out += &format!("BA_DEF_DEF_ \"{name}\" {};\n", literal_rendered(value));
    }
    if count > 0 {
        out.push('\n');
    }

    let mut count = 0;
    for (name, value) in &bus.attributes {
        count += 1;
        out += &format!("BA_ \"{name}\" {};\n", literal_rendered(value));
    }
    for node in bus.nodes() {
        for (name, value) in &node.attributes {
            count += 1;
            out += &format!(
                "BA_ \"{name}\" BU_ {} {};\n",
                node.name,
                literal_rendered(value)
            );
        }
    }
    for message in bus.messages() {
        for (name, value) in &message.attributes {
            count += 1;
            out += &format!(
                "BA_ \"{name}\" BO_ {} {};\n",
                message.id,
                literal_rendered(value)
            );
        }
        for signame in message.signal_order() {
            let Some(signal) = message.signal_by_name(signame) else {
                continue;
            };
            for (name, value) in &signal.attributes {
                count += 1;
                out += &format!(
                    "BA_ \"{name}\" SG_ {} {signame} {};\n",
                    message.id,
                    literal_rendered(value)
                );
            }
        }
    }
    if count > 0 {
        out.push('\n');
    }

    let mut count = 0;
    for message in bus.messages() {
        for signame in message.signal_order() {
            let Some(signal) = message.signal_by_name(signame) else {
                continue;
            };
            if signal.value_descriptions.is_empty() {
                continue;
            }
            count += 1;
            out += &format!("VAL_ {} {signame}", message.id);
            for (value, label) in signal.value_descriptions.iter().rev() {
                out += &format!(" {value} \"{label}\"");
            }
            out += " ;\n";
        }
    }
    if count > 0 {
        out.push('\n');
    }

    let mut count = 0;
    for message in bus.messages() {
        for (group_name, group) in &message.signal_groups {
            count += 1;
            out += &format!("SIG_GROUP_ {} {group_name} ", message.id);
            out += &format!("{} :", group.repetition_count);
            for name in &group.names {
                out += &format!(" {name}");
            }
            out += ";\n";
        }
    }
    if count > 0 {
        out.push('\n');
    }

    for message in bus.messages() {
        if !needs_sg_mul_val_block(message) {
            continue;
        }
        for signal in &message.signals {
            for line in sg_mul_val_lines(signal) {
                out += &format!("SG_MUL_VAL_ {} {line};\n", message.id);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::range::Range;
    use crate::model::signal::ValueType;

    fn minimal_signal(name: &str) -> Signal {
        Signal {
            name: name.to_string(),
            start_bit: 0,
            numbits: 8,
            is_little_endian: true,
            is_signed: false,
            value_type: ValueType::Unspecified,
            factor: 1.0,
            offset: 0.0,
            range: Range::new(0.0, 255.0),
            unit: String::new(),
            multiplex_value: None,
            is_multiplexor: false,
            switch: Default::default(),
            receivers: vec!["Vector__XXX".to_string()],
            comments: Vec::new(),
            attributes: Default::default(),
            value_descriptions: Default::default(),
        }
    }

    #[test]
    fn signal_line_renders_plain_signal() {
        let sig = minimal_signal("Speed");
        assert_eq!(
            signal_line(&sig),
            "SG_ Speed : 0|8@1+ (1,0) [0|255] \"\"  Vector__XXX"
        );
    }

    #[test]
    fn signal_line_renders_multiplexor_and_multiplexed() {
        let mut mux = minimal_signal("Sel");
        mux.is_multiplexor = true;
        assert_eq!(
            signal_line(&mux),
            "SG_ Sel M : 0|8@1+ (1,0) [0|255] \"\"  Vector__XXX"
        );

        let mut sg = minimal_signal("A");
        sg.multiplex_value = Some(2);
        assert_eq!(
            signal_line(&sg),
            "SG_ A m2 : 0|8@1+ (1,0) [0|255] \"\"  Vector__XXX"
        );
    }

    #[test]
    fn to_dbc_text_round_trips_minimal_bus() {
        let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: \n";
        let outcome = crate::load(text).unwrap();
        let rendered = to_dbc_text(&outcome.bus);
        let reparsed = crate::load(&rendered).unwrap();
        assert_eq!(crate::diff::diff(&outcome.bus, &reparsed.bus), "");
    }
}
