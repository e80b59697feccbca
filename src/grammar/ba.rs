//! `BA_ "name" [BU_ node | BO_ id | SG_ id name | EV_ name] literal ;`

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::combinators::one_of;
use crate::lexer::Cursor;
use crate::model::attributes::Literal;
use crate::section::{ComponentRef, Section};

fn target_bu(cursor: &mut Cursor) -> Result<ComponentRef, ParseError> {
    cursor.strmatch("BU_")?;
    cursor.eat_whitespace();
    Ok(ComponentRef::Node(cursor.identifier(keywords::ALL)?))
}

fn target_bo(cursor: &mut Cursor) -> Result<ComponentRef, ParseError> {
    cursor.strmatch("BO_")?;
    cursor.eat_whitespace();
    Ok(ComponentRef::Message(cursor.uint()? as u32))
}

fn target_sg(cursor: &mut Cursor) -> Result<ComponentRef, ParseError> {
    cursor.strmatch("SG_")?;
    cursor.eat_whitespace();
    let id = cursor.uint()? as u32;
    cursor.eat_whitespace();
    let name = cursor.identifier(keywords::ALL)?;
    Ok(ComponentRef::Signal(id, name))
}

fn target_ev(cursor: &mut Cursor) -> Result<ComponentRef, ParseError> {
    cursor.strmatch("EV_")?;
    cursor.eat_whitespace();
    Ok(ComponentRef::Event(cursor.identifier(keywords::ALL)?))
}

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    let name = cursor.string()?;
    cursor.eat_whitespace();
    let target = one_of(
        cursor,
        vec![
            Box::new(target_bu),
            Box::new(target_bo),
            Box::new(target_sg),
            Box::new(target_ev),
            Box::new(|_: &mut Cursor| Ok(ComponentRef::Global)),
        ],
    )?;
    cursor.eat_whitespace();
    let value = one_of(
        cursor,
        vec![
            Box::new(|c: &mut Cursor| c.double().map(Literal::Double)),
            Box::new(|c: &mut Cursor| c.uint().map(|v| Literal::Int(v as i64))),
            Box::new(|c: &mut Cursor| c.sint().map(Literal::Int)),
            Box::new(|c: &mut Cursor| c.string().map(Literal::Str)),
        ],
    )?;
    cursor.eat_whitespace();
    cursor.charmatch(';')?;
    Ok(Section::Ba {
        name,
        target,
        value,
    })
}
