//! The semantic model: typed entities with ownership invariants enforced by
//! construction rather than checked afterward.
//!
//! A [`bus::Bus`] owns its [`message::Message`]s; each `Message` owns its
//! [`signal::Signal`]s. A multiplexor signal's [`switch::Switch`] owns the
//! signals it multiplexes directly, so a multiplexed signal is reachable
//! either at the top level of its `Message` or through exactly one
//! multiplexor's switch, never both, with no ownership cycle.

pub mod attributes;
pub mod bus;
pub mod message;
pub mod range;
pub mod signal;
pub mod switch;
