//! Error types for the AST crate.
//!
//! This module defines structured errors for lexing, parsing and node
//! construction. Every error carries the location of the offending token.

use thiserror::Error;

use crate::attributes::{AttributeError, RangeError};
use crate::nodes::Location;

#[derive(Debug, Clone, PartialEq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum AstError {
    /// The lexer could not recognize the input.
    #[error("{location}: invalid token `{literal}`")]
    InvalidToken { literal: String, location: Location },

    /// The parser found a token it cannot accept at this point.
    #[error("{location}: expected {expected}, found `{found}`")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        location: Location,
    },

    /// A string literal is not enclosed in double quotes.
    #[error("{location}: malformed string literal {literal}")]
    MalformedString { literal: String, location: Location },

    /// A numeric literal does not fit the expected number type.
    #[error("{location}: invalid number `{literal}`")]
    InvalidNumber { literal: String, location: Location },

    #[error("{location}: unknown attribute `{key}`")]
    UnknownAttribute { key: String, location: Location },

    /// A constant expression evaluated to NaN.
    #[error("{location}: expression does not evaluate to a number")]
    NotANumber { location: Location },

    #[error("{location}: {source}")]
    InvalidRange {
        #[source]
        source: RangeError,
        location: Location,
    },

    /// An attribute that can never apply to the declaration shape it precedes.
    #[error("{location}: {source}")]
    InapplicableAttribute {
        #[source]
        source: AttributeError,
        location: Location,
    },
}

impl AstError {
    /// Returns the source location associated with this error.
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            AstError::InvalidToken { location, .. }
            | AstError::UnexpectedToken { location, .. }
            | AstError::MalformedString { location, .. }
            | AstError::InvalidNumber { location, .. }
            | AstError::UnknownAttribute { location, .. }
            | AstError::NotANumber { location }
            | AstError::InvalidRange { location, .. }
            | AstError::InapplicableAttribute { location, .. } => location,
        }
    }
}
