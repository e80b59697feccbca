//! Section grammar: one rule per DBC section kind, dispatched by
//! longest-match section keyword.

mod ba;
mod ba_def;
mod ba_def_def;
mod bo;
mod bo_tx_bu;
mod bs;
mod bu;
mod cm;
mod common;
mod ns;
mod sg_mul_val;
mod sig_group;
mod sig_valtype;
mod val;
mod val_table;
mod version;

pub mod keywords;

use crate::error::ParseError;
use crate::lexer::Cursor;
use crate::section::{Section, SectionStore};

/// Recognizes the section keyword at the cursor by longest prefix match
/// against [`keywords::SECTION_ORDER`] (no identifier-boundary check: the
/// grammar relies on every keyword's trailing `_`), then dispatches to that
/// section's body rule.
fn section(cursor: &mut Cursor) -> Result<Section, ParseError> {
    let keyword = keywords::SECTION_ORDER
        .iter()
        .find(|kw| cursor.rest().as_bytes().starts_with(kw.as_bytes()));
    let Some(&keyword) = keyword else {
        let found_len = 10.min(cursor.rest().len());
        return Err(cursor.error(format!(
            "expected section keyword but found instead \"{}\"",
            cursor.rest()[..found_len].replace('"', "\\\"")
        )));
    };
    cursor.strmatch(keyword)?;
    match keyword {
        "VERSION" => version::parse(cursor),
        "NS_" => ns::parse(cursor),
        "BS_" => bs::parse(cursor),
        "BU_" => bu::parse(cursor),
        "VAL_TABLE_" => val_table::parse(cursor),
        "BO_" => bo::parse(cursor),
        "BO_TX_BU_" => bo_tx_bu::parse(cursor),
        "CM_" => cm::parse(cursor),
        "BA_DEF_" => ba_def::parse(cursor),
        "BA_DEF_DEF_" => ba_def_def::parse(cursor),
        "BA_" => ba::parse(cursor),
        "VAL_" => val::parse(cursor),
        "SIG_GROUP_" => sig_group::parse(cursor),
        "SIG_VALTYPE_" => sig_valtype::parse(cursor),
        "SG_MUL_VAL_" => sg_mul_val::parse(cursor),
        other => Err(cursor.error(format!("unimplemented section type {other} encountered near"))),
    }
}

/// Parses DBC source text into an ordered, untagged-order-preserved
/// [`SectionStore`]. Consumes whitespace then repeatedly recognizes a
/// section keyword and dispatches to its body rule until end-of-input; any
/// text that is neither whitespace nor a recognized section keyword is a
/// [`ParseError`].
pub fn parse(text: &str) -> Result<SectionStore, ParseError> {
    let mut cursor = Cursor::new(text);
    let mut sections = Vec::new();
    cursor.eat_whitespace();
    while !cursor.at_end() {
        sections.push(section(&mut cursor)?);
        cursor.eat_whitespace();
    }
    Ok(SectionStore::new(sections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Section;

    #[test]
    fn longest_match_dispatches_ba_def_def_before_ba_def_before_ba() {
        let mut cursor = Cursor::new("BA_DEF_DEF_ \"x\" 0;");
        let s = section(&mut cursor).unwrap();
        assert!(matches!(s, Section::BaDefDef { .. }));

        let mut cursor = Cursor::new("BA_DEF_ BU_ \"x\" STRING;");
        let s = section(&mut cursor).unwrap();
        assert!(matches!(s, Section::BaDef { .. }));

        let mut cursor = Cursor::new("BA_ \"x\" 1;");
        let s = section(&mut cursor).unwrap();
        assert!(matches!(s, Section::Ba { .. }));
    }

    #[test]
    fn unrecognized_text_at_top_level_is_a_parse_error() {
        let err = parse("VERSION \"\"\nNS_ :\nBS_:\nBU_: \nGARBAGE\n").unwrap_err();
        assert!(err.message.contains("GARBAGE") || err.message.contains("expected"));
    }

    #[test]
    fn section_order_is_independent_of_input_order() {
        let text = "BU_: N1\nVERSION \"\"\nBS_:\nNS_ :\n";
        let store = parse(text).unwrap();
        assert!(!store.is_empty());
    }
}
