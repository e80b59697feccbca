//! Grammar fragments shared by more than one section rule.

use crate::error::ParseError;
use crate::lexer::combinators::optional;
use crate::lexer::Cursor;

/// `sint string`, the `(value, label)` pair used by `VAL_TABLE_` and `VAL_`.
pub fn value_entry(cursor: &mut Cursor) -> Result<(i64, String), ParseError> {
    cursor.eat_whitespace();
    let value = cursor.sint()?;
    cursor.eat_whitespace();
    let text = cursor.string()?;
    Ok((value, text))
}

/// Comma-separated run of quoted strings, used by `BA_DEF_`'s `ENUM` type.
pub fn string_list(cursor: &mut Cursor) -> Vec<String> {
    let mut items = Vec::new();
    let Some(first) = optional(cursor, Cursor::string) else {
        return items;
    };
    items.push(first);
    while !cursor.at_end() {
        let pos = cursor.position();
        cursor.eat_whitespace();
        if cursor.charmatch(',').is_err() {
            cursor.restore(pos);
            break;
        }
        cursor.eat_whitespace();
        match optional(cursor, Cursor::string) {
            Some(next) => items.push(next),
            None => {
                cursor.restore(pos);
                break;
            }
        }
    }
    items
}
