//! Lexical primitives and backtracking combinators for the DBC grammar.
//!
//! [`Cursor`] is the only mutable state a parse holds; [`combinators`] are
//! free functions that take a cursor and a rule closure, so grammar rules in
//! [`crate::grammar`] compose them directly instead of reimplementing
//! backtracking themselves.

pub mod combinators;
pub mod cursor;

pub use cursor::Cursor;
