//! `SIG_VALTYPE_ id signal_name : n ;` with `n` a single digit `0`-`3`.

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::Cursor;
use crate::section::Section;

fn code(cursor: &mut Cursor) -> Result<u8, ParseError> {
    match cursor.rest().as_bytes().first() {
        Some(c @ b'0'..=b'3') => {
            let digit = c - b'0';
            cursor.charmatch(*c as char)?;
            Ok(digit)
        }
        Some(&c) => Err(cursor.error(format!(
            "expected one of \"0123\", found \"{}\"",
            c as char
        ))),
        None => Err(cursor.error("expected one of \"0123\", found end of input")),
    }
}

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    let id = cursor.uint()? as u32;
    cursor.eat_whitespace();
    let signal = cursor.identifier(keywords::ALL)?;
    cursor.eat_whitespace();
    cursor.charmatch(':')?;
    cursor.eat_whitespace();
    let code = code(cursor)?;
    cursor.eat_whitespace();
    cursor.charmatch(';')?;
    Ok(Section::SigValtype { id, signal, code })
}
