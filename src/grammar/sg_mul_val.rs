//! `SG_MUL_VAL_ id signal_name muxor_name low-high[,low-high]* ;`

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::combinators::{any_number_of, optional};
use crate::lexer::Cursor;
use crate::section::Section;

fn uint_range(cursor: &mut Cursor) -> Result<(u32, u32), ParseError> {
    let low = cursor.uint()? as u32;
    cursor.eat_whitespace();
    cursor.charmatch('-')?;
    cursor.eat_whitespace();
    let high = cursor.uint()? as u32;
    Ok((low, high))
}

fn sep_uint_range(cursor: &mut Cursor) -> Result<(u32, u32), ParseError> {
    cursor.eat_set(b" ,");
    uint_range(cursor)
}

fn uint_ranges(cursor: &mut Cursor) -> Result<Vec<(u32, u32)>, ParseError> {
    cursor.eat_whitespace();
    let mut ranges = vec![uint_range(cursor)?];
    ranges.extend(any_number_of(cursor, sep_uint_range));
    Ok(ranges)
}

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    let id = cursor.uint()? as u32;
    cursor.eat_whitespace();
    let signal = cursor.identifier(keywords::ALL)?;
    cursor.eat_whitespace();
    let muxor = cursor.identifier(keywords::ALL)?;
    cursor.eat_whitespace();
    let ranges = optional(cursor, uint_ranges).unwrap_or_default();
    cursor.eat_whitespace();
    cursor.charmatch(';')?;
    Ok(Section::SgMulVal {
        id,
        signal,
        muxor,
        ranges,
    })
}
