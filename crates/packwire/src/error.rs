use std::{result, str};

use log::debug;
use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for packwire encode and decode sessions.
///
/// Every variant is fatal to the session that produced it. Later operations
/// on a failed session return [`Error::SessionFailed`].
#[derive(Debug, Error)]
pub enum Error {
    // Decode errors
    #[error("Buffer underrun: {requested} byte(s) requested at offset {offset}, buffer length {len}")]
    BufferUnderrun {
        offset: usize,
        requested: usize,
        len: usize,
    },

    #[error("Unknown discriminant {discriminant} for union {type_name}")]
    UnknownDiscriminant {
        type_name: &'static str,
        discriminant: u64,
    },

    #[error("Unrecognized value {value} for enum {type_name}")]
    UnrecognizedEnumValue {
        type_name: &'static str,
        value: i128,
    },

    #[error("Protocol mismatch: {remaining} trailing byte(s) left unread at offset {position}")]
    TrailingBytes { position: usize, remaining: usize },

    #[error("Invalid UTF-8 in string at offset {offset}: {source}")]
    InvalidUtf8 {
        offset: usize,
        source: str::Utf8Error,
    },

    // Raised on both sides
    #[error("Nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("Session already failed and can't be reused")]
    SessionFailed,

    #[error("Length {len} does not fit the 4-byte length prefix")]
    LengthOverflow { len: usize },

    #[error("String length {len} exceeds limit of {max} bytes")]
    StringTooLong { len: usize, max: usize },

    #[error("Sequence length {len} exceeds limit of {max} elements")]
    SequenceTooLong { len: usize, max: usize },
}

impl Error {
    /// Rejects a union discriminant that matches no alternative of `type_name`.
    pub fn unknown_discriminant(type_name: &'static str, discriminant: u64) -> Self {
        debug!("Rejected discriminant {discriminant} for union {type_name}.");
        Self::UnknownDiscriminant {
            type_name,
            discriminant,
        }
    }

    /// Rejects an integer that matches no constant of enum `type_name`.
    pub fn unrecognized_enum_value(type_name: &'static str, value: i128) -> Self {
        debug!("Rejected value {value} for enum {type_name}.");
        Self::UnrecognizedEnumValue { type_name, value }
    }

    /// Returns `true` for errors caused by encoder and decoder disagreeing on
    /// the payload layout, as opposed to a malformed or truncated buffer.
    pub fn is_protocol_mismatch(&self) -> bool {
        matches!(
            self,
            Self::TrailingBytes { .. }
                | Self::UnknownDiscriminant { .. }
                | Self::UnrecognizedEnumValue { .. }
        )
    }
}
