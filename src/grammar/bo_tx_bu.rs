//! `BO_TX_BU_ id: node[, node]* ;`

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::combinators::optional;
use crate::lexer::Cursor;
use crate::section::Section;

fn identifier_list(cursor: &mut Cursor) -> Vec<String> {
    let mut items = Vec::new();
    let Some(first) = optional(cursor, |c| c.identifier(keywords::MOST)) else {
        return items;
    };
    items.push(first);
    while !cursor.at_end() {
        let pos = cursor.position();
        cursor.eat_set(b" ,");
        match optional(cursor, |c| c.identifier(keywords::MOST)) {
            Some(next) => items.push(next),
            None => {
                cursor.restore(pos);
                break;
            }
        }
    }
    items
}

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    let id = cursor.uint()? as u32;
    cursor.eat_whitespace();
    cursor.charmatch(':')?;
    cursor.eat_whitespace();
    let transmitters = identifier_list(cursor);
    cursor.eat_whitespace();
    cursor.charmatch(';')?;
    Ok(Section::BoTxBu { id, transmitters })
}
