//! `VERSION "..."`

use crate::error::ParseError;
use crate::lexer::Cursor;
use crate::section::Section;

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    Ok(Section::Version(cursor.string()?))
}
