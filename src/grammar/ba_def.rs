//! `BA_DEF_ [BU_|BO_|SG_|EV_] "name" type;`

use crate::error::ParseError;
use crate::grammar::common::string_list;
use crate::grammar::keywords;
use crate::lexer::combinators::one_of;
use crate::lexer::Cursor;
use crate::model::attributes::{AttrTypedef, TargetKind};
use crate::section::Section;

fn target(cursor: &mut Cursor) -> Result<TargetKind, ParseError> {
    one_of(
        cursor,
        vec![
            Box::new(|c: &mut Cursor| c.strmatch("BU_").map(|_| TargetKind::Node)),
            Box::new(|c: &mut Cursor| c.strmatch("BO_").map(|_| TargetKind::Message)),
            Box::new(|c: &mut Cursor| c.strmatch("SG_").map(|_| TargetKind::Signal)),
            Box::new(|c: &mut Cursor| c.strmatch("EV_").map(|_| TargetKind::Event)),
            Box::new(|_: &mut Cursor| Ok(TargetKind::Global)),
        ],
    )
}

fn ba_float(cursor: &mut Cursor) -> Result<AttrTypedef, ParseError> {
    cursor.strmatch("FLOAT")?;
    cursor.eat_whitespace();
    let min = cursor.double()?;
    cursor.eat_whitespace();
    let max = cursor.double()?;
    Ok(AttrTypedef::Float { min, max })
}

fn ba_int(cursor: &mut Cursor) -> Result<AttrTypedef, ParseError> {
    cursor.strmatch("INT")?;
    cursor.eat_whitespace();
    let min = cursor.sint()?;
    cursor.eat_whitespace();
    let max = cursor.sint()?;
    Ok(AttrTypedef::Int { min, max })
}

fn ba_hex(cursor: &mut Cursor) -> Result<AttrTypedef, ParseError> {
    cursor.strmatch("HEX")?;
    cursor.eat_whitespace();
    let min = cursor.sint()?;
    cursor.eat_whitespace();
    let max = cursor.sint()?;
    Ok(AttrTypedef::Hex { min, max })
}

fn ba_string(cursor: &mut Cursor) -> Result<AttrTypedef, ParseError> {
    cursor.strmatch("STRING")?;
    Ok(AttrTypedef::Str)
}

fn ba_enum(cursor: &mut Cursor) -> Result<AttrTypedef, ParseError> {
    cursor.strmatch("ENUM")?;
    cursor.eat_whitespace();
    Ok(AttrTypedef::Enum(string_list(cursor)))
}

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    let target = target(cursor)?;
    cursor.eat_whitespace();
    cursor.charmatch('"')?;
    let name = cursor.identifier(keywords::ALL)?;
    cursor.charmatch('"')?;
    cursor.eat_whitespace();
    let typedef = one_of(
        cursor,
        vec![
            Box::new(ba_float),
            Box::new(ba_int),
            Box::new(ba_hex),
            Box::new(ba_string),
            Box::new(ba_enum),
        ],
    )?;
    cursor.eat_whitespace();
    cursor.charmatch(';')?;
    Ok(Section::BaDef {
        target,
        name,
        typedef,
    })
}
