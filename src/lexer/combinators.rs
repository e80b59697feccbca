//! Backtracking combinators shared by every section-grammar rule.

use crate::error::ParseError;
use crate::lexer::Cursor;

/// Tries `rule`; on failure, rewinds the cursor and returns `None` instead of
/// propagating the error.
pub fn optional<'a, T>(
    cursor: &mut Cursor<'a>,
    rule: impl FnOnce(&mut Cursor<'a>) -> Result<T, ParseError>,
) -> Option<T> {
    let pos = cursor.position();
    match rule(cursor) {
        Ok(v) => Some(v),
        Err(_) => {
            cursor.restore(pos);
            None
        }
    }
}

/// Repeats `optional(rule)` until it fails, returning a possibly-empty
/// ordered sequence of the successful results.
pub fn any_number_of<'a, T>(
    cursor: &mut Cursor<'a>,
    mut rule: impl FnMut(&mut Cursor<'a>) -> Result<T, ParseError>,
) -> Vec<T> {
    let mut results = Vec::new();
    loop {
        let pos = cursor.position();
        match rule(cursor) {
            Ok(v) => results.push(v),
            Err(_) => {
                cursor.restore(pos);
                break;
            }
        }
    }
    results
}

/// Tries each rule in order; if all fail, raises the error from whichever
/// alternative advanced furthest into the input (by `(line, column)`, later
/// wins; ties favor the earlier-attempted alternative). This farthest-error
/// heuristic tends to produce the most useful diagnostic for a backtracking
/// grammar, since the alternative that consumed the most input was probably
/// the one the author intended to match.
pub fn one_of<'a, T>(
    cursor: &mut Cursor<'a>,
    mut rules: Vec<Box<dyn FnMut(&mut Cursor<'a>) -> Result<T, ParseError> + 'a>>,
) -> Result<T, ParseError> {
    let mut farthest: Option<ParseError> = None;
    for rule in rules.iter_mut() {
        let pos = cursor.position();
        match rule(cursor) {
            Ok(v) => return Ok(v),
            Err(e) => {
                cursor.restore(pos);
                farthest = Some(match farthest {
                    Some(best) if !e.is_farther_than(&best) => best,
                    _ => e,
                });
            }
        }
    }
    Err(farthest.expect("one_of requires at least one alternative"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_restores_position_on_failure() {
        let mut c = Cursor::new("abc");
        let r = optional(&mut c, Cursor::uint);
        assert_eq!(r, None);
        assert_eq!(c.rest(), "abc");
    }

    #[test]
    fn optional_keeps_position_on_success() {
        let mut c = Cursor::new("42abc");
        let r = optional(&mut c, Cursor::uint);
        assert_eq!(r, Some(42));
        assert_eq!(c.rest(), "abc");
    }

    #[test]
    fn any_number_of_collects_until_first_failure() {
        let mut c = Cursor::new("1,2,3,x");
        let digit_then_comma = |cur: &mut Cursor| -> Result<u64, ParseError> {
            let v = cur.uint()?;
            let _ = cur.charmatch(',');
            Ok(v)
        };
        let results = any_number_of(&mut c, digit_then_comma);
        assert_eq!(results, vec![1, 2, 3]);
        assert_eq!(c.rest(), "x");
    }

    #[test]
    fn any_number_of_returns_empty_on_immediate_failure() {
        let mut c = Cursor::new("abc");
        let results = any_number_of(&mut c, Cursor::uint);
        assert!(results.is_empty());
        assert_eq!(c.rest(), "abc");
    }

    #[test]
    fn one_of_reports_the_farthest_advancing_alternative() {
        let mut c = Cursor::new("12x");
        let short_fail = |cur: &mut Cursor| -> Result<(), ParseError> { cur.charmatch('z') };
        let far_fail = |cur: &mut Cursor| -> Result<(), ParseError> {
            cur.uint()?;
            cur.charmatch('y')
        };
        let rules: Vec<Box<dyn FnMut(&mut Cursor) -> Result<(), ParseError>>> =
            vec![Box::new(short_fail), Box::new(far_fail)];
        let err = one_of(&mut c, rules).unwrap_err();
        assert!(err.message.contains("\"y\""));
        assert_eq!(c.rest(), "12x");
    }

    #[test]
    fn one_of_returns_first_successful_alternative() {
        let mut c = Cursor::new("42");
        let fails = |cur: &mut Cursor| -> Result<u64, ParseError> { cur.charmatch('z').map(|_| 0) };
        let succeeds = |cur: &mut Cursor| -> Result<u64, ParseError> { cur.uint() };
        let rules: Vec<Box<dyn FnMut(&mut Cursor) -> Result<u64, ParseError>>> =
            vec![Box::new(fails), Box::new(succeeds)];
        assert_eq!(one_of(&mut c, rules).unwrap(), 42);
    }
}
