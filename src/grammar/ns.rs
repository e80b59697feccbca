//! `NS_ : symbol*`

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::Cursor;
use crate::section::Section;

/// Recognizes only names from the `NS_`-specific symbol whitelist, and stops
/// as soon as it sees a top-level section keyword instead. A stray `:` seen
/// after at least one symbol was collected means the previous token is
/// actually the start of the next section (e.g. `BS_:`): it gets un-accepted
/// and parsing rewinds to just before it. A stray `:` with nothing collected
/// yet is a syntax error.
pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    cursor.charmatch(':')?;
    cursor.eat_whitespace();

    let mut symbols: Vec<String> = Vec::new();
    let mut stored_pos = cursor.position();
    while !cursor.at_end() {
        cursor.eat_whitespace();
        if cursor.rest().as_bytes().first() == Some(&b':') {
            if symbols.is_empty() {
                return Err(cursor.error("expected reserved word, found \":\""));
            }
            symbols.pop();
            cursor.restore(stored_pos);
            break;
        }
        stored_pos = cursor.position();
        let name = cursor.identifier(&[])?;
        if keywords::NS_SYMBOLS.contains(&name.as_str()) {
            symbols.push(name);
        } else if keywords::ALL.contains(&name.as_str()) {
            cursor.restore(stored_pos);
            break;
        }
    }
    Ok(Section::Ns(symbols))
}
