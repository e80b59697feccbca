//! `VAL_TABLE_ name (sint string)* ;`

use crate::error::ParseError;
use crate::grammar::common::value_entry;
use crate::grammar::keywords;
use crate::lexer::combinators::any_number_of;
use crate::lexer::Cursor;
use crate::section::Section;

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    let name = cursor.identifier(keywords::ALL)?;
    cursor.eat_whitespace();
    let entries = any_number_of(cursor, value_entry);
    cursor.eat_whitespace();
    cursor.charmatch(';')?;
    Ok(Section::ValTable { name, entries })
}
