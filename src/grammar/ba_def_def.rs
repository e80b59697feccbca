//! `BA_DEF_DEF_ "name" literal;`

use crate::error::ParseError;
use crate::grammar::keywords;
use crate::lexer::combinators::one_of;
use crate::lexer::Cursor;
use crate::model::attributes::Literal;
use crate::section::Section;

pub fn parse(cursor: &mut Cursor) -> Result<Section, ParseError> {
    cursor.eat_whitespace();
    cursor.charmatch('"')?;
    let name = cursor.identifier(keywords::ALL)?;
    cursor.charmatch('"')?;
    cursor.eat_whitespace();
    let value = one_of(
        cursor,
        vec![
            Box::new(|c: &mut Cursor| c.uint().map(|v| Literal::Int(v as i64))),
            Box::new(|c: &mut Cursor| c.sint().map(Literal::Int)),
            Box::new(|c: &mut Cursor| c.double().map(Literal::Double)),
            Box::new(|c: &mut Cursor| c.string().map(Literal::Str)),
        ],
    )?;
    cursor.eat_whitespace();
    cursor.charmatch(';')?;
    Ok(Section::BaDefDef { name, value })
}
