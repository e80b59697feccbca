//! `BU_: node*`

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::combinators::any_number_of;
use crate::lexer::Cursor;
use crate::section::Section;

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    cursor.charmatch(':')?;
    cursor.eat_whitespace();
    let nodes = any_number_of(cursor, |c| c.identifier_ws(keywords::MOST));
    Ok(Section::Bu(nodes))
}
