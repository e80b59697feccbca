//! Error types for the lexer/grammar layer and the semantic model builder.
//!
//! The two kinds are never mixed: a [`ParseError`] means the input text
//! violates DBC syntax; a [`DatabaseError`] means the text parsed fine but
//! violates a section-level semantic invariant (missing mandatory section,
//! duplicate id, dangling reference, unsupported feature).

use thiserror::Error;

/// Syntax error raised by the lexer or the section grammar.
///
/// Bears the 1-based `(line, column)` of the failure, a message, and the
/// farthest position successfully reached by backtracking alternatives.
/// `one_of` keeps the error that advanced furthest into the input, which
/// tends to be the most informative diagnostic for a backtracking grammar.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("ParseError: {message} at line {line}, column {column}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl ParseError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Ordering key used by `one_of`'s farthest-error heuristic: later
    /// position wins; ties favor whichever error is kept first (the
    /// earlier-attempted alternative), so this uses a strict `>`.
    pub(crate) fn is_farther_than(&self, other: &ParseError) -> bool {
        (self.line, self.column) > (other.line, other.column)
    }
}

/// Semantic error raised by the model builder.
///
/// Not recoverable: construction aborts at the first one. Unlike
/// [`ParseError`], a `DatabaseError` means the input was syntactically valid
/// DBC text that this system's invariants refuse to model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    #[error("missing section: \"{section}\"")]
    MissingSection { section: &'static str },
    #[error("more than one section of type \"{section}\"")]
    DuplicateSection { section: &'static str },
    #[error("multiply defined table \"{name}\"")]
    DuplicateValueTable { name: String },
    #[error("multiple definitions of message {id} {name}")]
    DuplicateMessageId { id: u32, name: String },
    #[error("undefined message id \"{id}\" in BO_TX_BU_ statement")]
    UndefinedMessageInTxBu { id: u32 },
    #[error("transmitter \"{node}\" not among defined nodes")]
    UndefinedTransmitter { node: String },
    #[error("comment for undefined node \"{name}\"")]
    CommentForUndefinedNode { name: String },
    #[error("comment for undefined message \"{id}\"")]
    CommentForUndefinedMessage { id: u32 },
    #[error("comment for undefined signal \"{signal}\" in message \"{id}\"")]
    CommentForUndefinedSignal { id: u32, signal: String },
    #[error("CM_ EV_ not implemented")]
    CommentForEventUnsupported,
    #[error("unknown object type \"{kind}\" in BA_DEF_")]
    UnknownAttributeTargetKind { kind: String },
    #[error("attribute \"{name}\" already defined for \"{kind}\"")]
    DuplicateAttributeTypedef { kind: String, name: String },
    #[error("attribute default value for \"{name}\" multiply defined")]
    DuplicateAttributeDefault { name: String },
    #[error("general attribute \"{name}\" multiply defined")]
    DuplicateGlobalAttribute { name: String },
    #[error("unknown node \"{node}\" in attribute value statement")]
    UnknownAttributeNode { node: String },
    #[error("attribute \"{name}\" multiply defined for node \"{node}\"")]
    DuplicateNodeAttribute { name: String, node: String },
    #[error("unknown message id \"{id}\" in attribute value statement")]
    UnknownAttributeMessage { id: u32 },
    #[error("attribute \"{name}\" multiply defined for message \"{id}\"")]
    DuplicateMessageAttribute { name: String, id: u32 },
    #[error("unknown message id \"{id}\" in attribute value statement for signal \"{signal}\"")]
    UnknownAttributeMessageForSignal { id: u32, signal: String },
    #[error("unknown message - signal designation \"{id}\" - \"{signal}\" in attribute value statement")]
    UnknownAttributeSignal { id: u32, signal: String },
    #[error("attribute \"{name}\" multiply defined for signal \"{signal}\" in message \"{id}\"")]
    DuplicateSignalAttribute { name: String, signal: String, id: u32 },
    #[error("attributes for EV_ not implemented")]
    AttributeForEventUnsupported,
    #[error("unknown message id \"{id}\" in signal value description for signal \"{signal}\"")]
    UnknownValueDescriptionMessage { id: u32, signal: String },
    #[error("unknown message - signal designation \"{id}\" - \"{signal}\" in signal value description")]
    UnknownValueDescriptionSignal { id: u32, signal: String },
    #[error("unknown message id \"{id}\" in definition of signal group \"{group}\"")]
    UnknownSignalGroupMessage { id: u32, group: String },
    #[error("signal group \"{group}\" already defined for message \"{id}\"")]
    DuplicateSignalGroup { group: String, id: u32 },
    #[error("undefined signals in definition of group \"{group}\" for message \"{id}\": {signals}")]
    UndefinedSignalsInGroup {
        group: String,
        id: u32,
        signals: String,
    },
    #[error("unknown message id \"{id}\" in signal value-type statement for signal \"{signal}\"")]
    UnknownValueTypeMessage { id: u32, signal: String },
    #[error("unknown message - signal designation \"{id}\" - \"{signal}\" in signal value-type statement")]
    UnknownValueTypeSignal { id: u32, signal: String },
    #[error(
        "multiplex value for signal \"{signal}\" in message \"{id}\" is not in range of multiplexor \"{mux}\""
    )]
    MultiplexValueOutOfRange { signal: String, id: u32, mux: String },
    #[error("unknown message id \"{id}\" in extended multiplexing statement for signal \"{signal}\" and mux \"{mux}\"")]
    UnknownExtendedMultiplexMessage { id: u32, signal: String, mux: String },
    #[error("unknown signal name \"{signal}\" in extended multiplexing statement for message id \"{id}\"")]
    UnknownExtendedMultiplexSignal { id: u32, signal: String },
    #[error("unknown multiplexor name \"{mux}\" in extended multiplexing statement for message id \"{id}\"")]
    UnknownExtendedMultiplexMux { id: u32, mux: String },
    #[error("named multiplexor \"{mux}\" in extended multiplexing statement for message id \"{id}\" is not a multiplexor")]
    NotAMultiplexor { id: u32, mux: String },
    #[error("signal \"{signal}\" in message \"{id}\" multiplexed by more than one multiplexor")]
    SignalClaimedByMultipleMultiplexors { id: u32, signal: String },
    #[error("there were signals with unspecified multiplexor: {details}")]
    UnspecifiedMultiplexor { details: String },
    #[error("sections left to unpack after build: {sections}")]
    ResidualSections { sections: String },
}
