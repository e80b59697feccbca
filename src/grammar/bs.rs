//! `BS_: [baudrate : btr1 , btr2]`

use crate::error::ParseError;
use crate::lexer::combinators::optional;
use crate::lexer::Cursor;
use crate::section::Section;

fn baudrate(cursor: &mut Cursor) -> Result<(u32, u32, u32), ParseError> {
    let baudrate = cursor.uint()? as u32;
    cursor.eat_whitespace();
    cursor.charmatch(':')?;
    cursor.eat_whitespace();
    let btr1 = cursor.uint()? as u32;
    cursor.eat_whitespace();
    cursor.charmatch(',')?;
    cursor.eat_whitespace();
    let btr2 = cursor.uint()? as u32;
    Ok((baudrate, btr1, btr2))
}

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    cursor.charmatch(':')?;
    cursor.eat_whitespace();
    let result = optional(cursor, baudrate);
    Ok(Section::Bs(result))
}
