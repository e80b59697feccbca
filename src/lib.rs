//! # dbc_bus
//!
//! Read, model, serialize, and diff **CAN-bus DBC** network description files.
//!
//! ## Highlights
//! - **Recursive-descent parser**: a hand-written lexer and backtracking
//!   combinators (`optional`, `any_number_of`, `one_of`) over the ~25 DBC
//!   section kinds, with farthest-error diagnostics.
//! - **Semantic model**: [`Bus`](crate::model::bus::Bus) holds nodes, messages,
//!   signals, multiplexing hierarchies, attributes, value tables and comments.
//! - **Cross-reference resolution**: [`builder::build`] assembles a `Bus` from
//!   parsed sections in dependency order and reconstructs multiplex switches.
//! - **Canonical serialization**: [`serialize::to_dbc_text`] renders a `Bus`
//!   back to DBC text.
//! - **Structural diff**: [`diff::diff`] reports the first human-readable
//!   difference between two buses.
//!
//! This crate does not decode live CAN frames, and does not implement
//! environment variables (`EV_`), signal types (`SGTYPE_`), or the `BA_REL_`
//! relation-attribute family.

pub mod diff;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod model;
pub mod section;

mod builder;
mod serialize;

pub use builder::{BuildOutcome, build};
pub use diff::diff;
pub use error::{DatabaseError, ParseError};
pub use grammar::parse;
pub use model::bus::Bus;
pub use serialize::to_dbc_text;

/// Parses DBC source text and builds the semantic [`Bus`] model in one step.
///
/// This is the common entry point: `parse` tokenizes and recognizes sections,
/// `build` resolves cross-references and reconstructs multiplex hierarchies.
/// Returns the built [`Bus`] together with any non-fatal warnings collected
/// along the way (duplicated node names, duplicated value-table entries).
pub fn load(text: &str) -> Result<BuildOutcome, LoadError> {
    let sections = parse(text)?;
    let outcome = build(sections)?;
    Ok(outcome)
}

/// Error returned by [`load`]: either a syntax error from the parser or a
/// semantic error from the model builder. Never both.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}
