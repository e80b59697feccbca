//! `BO_ id name: size transmitter` followed by its `SG_` lines.

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::combinators::{any_number_of, optional};
use crate::lexer::Cursor;
use crate::section::{RawMessage, RawSignal, Section};

fn multiplex_value(cursor: &mut Cursor) -> Result<u32, ParseError> {
    cursor.charmatch('m')?;
    cursor.eat_whitespace();
    Ok(cursor.uint()? as u32)
}

fn multiplex_spec(cursor: &mut Cursor) -> (Option<u32>, bool) {
    let mval = optional(cursor, multiplex_value);
    cursor.eat_whitespace();
    let is_multiplexor = cursor.charmatch('M').is_ok();
    (mval, is_multiplexor)
}

fn endian(cursor: &mut Cursor) -> Result<bool, ParseError> {
    if cursor.charmatch('1').is_ok() {
        return Ok(true);
    }
    cursor.charmatch('0')?;
    Ok(false)
}

fn signed(cursor: &mut Cursor) -> Result<bool, ParseError> {
    if cursor.charmatch('-').is_ok() {
        return Ok(true);
    }
    cursor.charmatch('+')?;
    Ok(false)
}

fn additional_receiver(cursor: &mut Cursor) -> Result<String, ParseError> {
    cursor.eat_whitespace();
    cursor.charmatch(',')?;
    cursor.eat_whitespace();
    cursor.identifier(keywords::MOST)
}

fn signal(cursor: &mut Cursor) -> Result<RawSignal, ParseError> {
    cursor.eat_whitespace();
    cursor.strmatch("SG_")?;
    cursor.eat_whitespace();
    let name = cursor.identifier(keywords::ALL)?;
    cursor.eat_whitespace();
    let (multiplex_value, is_multiplexor) = multiplex_spec(cursor);
    cursor.eat_whitespace();
    cursor.charmatch(':')?;
    cursor.eat_whitespace();
    let start_bit = cursor.uint()? as u32;
    cursor.eat_whitespace();
    cursor.charmatch('|')?;
    cursor.eat_whitespace();
    let numbits = cursor.uint()? as u32;
    cursor.eat_whitespace();
    cursor.charmatch('@')?;
    cursor.eat_whitespace();
    let is_little_endian = endian(cursor)?;
    let is_signed = signed(cursor)?;
    cursor.eat_whitespace();
    cursor.charmatch('(')?;
    cursor.eat_whitespace();
    let factor = cursor.double()?;
    cursor.eat_whitespace();
    cursor.charmatch(',')?;
    cursor.eat_whitespace();
    let offset = cursor.double()?;
    cursor.eat_whitespace();
    cursor.charmatch(')')?;
    cursor.eat_whitespace();
    cursor.charmatch('[')?;
    cursor.eat_whitespace();
    let minimum = cursor.double()?;
    cursor.eat_whitespace();
    cursor.charmatch('|')?;
    cursor.eat_whitespace();
    let maximum = cursor.double()?;
    cursor.eat_whitespace();
    cursor.charmatch(']')?;
    cursor.eat_whitespace();
    let unit = cursor.string()?;
    cursor.eat_whitespace();
    let mut receivers = vec![cursor.identifier(keywords::MOST)?];
    receivers.extend(any_number_of(cursor, additional_receiver));

    Ok(RawSignal {
        name,
        multiplex_value,
        is_multiplexor,
        start_bit,
        numbits,
        is_little_endian,
        is_signed,
        factor,
        offset,
        range: (minimum, maximum),
        unit,
        receivers,
    })
}

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    let id = cursor.uint()? as u32;
    cursor.eat_whitespace();
    let name = cursor.identifier(keywords::BO)?;
    cursor.eat_whitespace();
    cursor.charmatch(':')?;
    cursor.eat_whitespace();
    let size = cursor.uint()? as u32;
    cursor.eat_whitespace();
    let transmitter = cursor.identifier(keywords::MOST)?;
    cursor.eat_whitespace();
    let signals = any_number_of(cursor, signal);
    Ok(Section::Bo(RawMessage {
        id,
        name,
        size,
        transmitter,
        signals,
    }))
}
