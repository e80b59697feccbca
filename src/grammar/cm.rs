//! `CM_ [BU_ node | BO_ id | SG_ id name | EV_ name] "text";`

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::combinators::one_of;
use crate::lexer::Cursor;
use crate::section::{ComponentRef, Section};

fn specifier_bu(cursor: &mut Cursor) -> Result<ComponentRef, ParseError> {
    cursor.strmatch("BU_")?;
    cursor.eat_whitespace();
    Ok(ComponentRef::Node(cursor.identifier(keywords::ALL)?))
}

fn specifier_bo(cursor: &mut Cursor) -> Result<ComponentRef, ParseError> {
    cursor.strmatch("BO_")?;
    cursor.eat_whitespace();
    Ok(ComponentRef::Message(cursor.uint()? as u32))
}

fn specifier_sg(cursor: &mut Cursor) -> Result<ComponentRef, ParseError> {
    cursor.strmatch("SG_")?;
    cursor.eat_whitespace();
    let id = cursor.uint()? as u32;
    cursor.eat_whitespace();
    let name = cursor.identifier(keywords::ALL)?;
    Ok(ComponentRef::Signal(id, name))
}

fn specifier_ev(cursor: &mut Cursor) -> Result<ComponentRef, ParseError> {
    cursor.strmatch("EV_")?;
    cursor.eat_whitespace();
    Ok(ComponentRef::Event(cursor.identifier(keywords::ALL)?))
}

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    let target = one_of(
        cursor,
        vec![
            Box::new(specifier_sg),
            Box::new(specifier_bu),
            Box::new(specifier_bo),
            Box::new(specifier_ev),
            Box::new(|_: &mut Cursor| Ok(ComponentRef::Global)),
        ],
    )?;
    cursor.eat_whitespace();
    let text = cursor.string()?;
    cursor.eat_whitespace();
    cursor.charmatch(';')?;
    Ok(Section::Cm { target, text })
}
