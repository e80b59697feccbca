//! `SIG_GROUP_ id name number : signal_name* ;`

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::combinators::any_number_of;
use crate::lexer::Cursor;
use crate::section::Section;

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    let id = cursor.uint()? as u32;
    cursor.eat_whitespace();
    let name = cursor.identifier(keywords::ALL)?;
    cursor.eat_whitespace();
    let repetition_count = cursor.uint()? as u32;
    cursor.eat_whitespace();
    cursor.charmatch(':')?;
    cursor.eat_whitespace();
    let signals = any_number_of(cursor, |c| c.identifier_ws(keywords::ALL));
    cursor.eat_whitespace();
    cursor.charmatch(';')?;
    Ok(Section::SigGroup {
        id,
        name,
        repetition_count,
        signals,
    })
}
