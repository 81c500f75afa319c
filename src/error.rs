//! Error types for streaming YAML output.
//!
//! Every writer operation returns [`Result`]. Usage errors are detected
//! deterministically by the writer state machine and surfaced immediately;
//! nothing is retried or repaired.
//!
//! ## Error Categories
//!
//! - **End of stream**: a write after the writer was finalized, or after the
//!   single top-level value was completed
//! - **Nesting violations**: a mapping operation while a sequence is open (or
//!   nothing is open), and vice versa
//! - **Encoding**: an encoding specifier that does not resolve to UTF-8,
//!   UTF-16LE or UTF-16BE
//! - **I/O and emitter failures**: the sink rejected a write, or the emitter
//!   received an event sequence it cannot express
//!
//! ## Examples
//!
//! ```rust
//! use yaml_write_stream::{from_stream, Encoding, Error};
//!
//! let mut out = Vec::new();
//! let mut writer = from_stream(&mut out, Encoding::Utf8).unwrap();
//! writer.write_sequence().unwrap();
//!
//! let err = writer.close_map().unwrap_err();
//! assert!(matches!(err, Error::NotInMapping));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while writing a YAML stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The writer was finalized, or its top-level value is already complete.
    #[error("end of stream")]
    EndOfStream,

    /// The operation needs an open mapping on top of the stack.
    #[error("not currently writing a map")]
    NotInMapping,

    /// The operation needs an open sequence on top of the stack.
    #[error("not currently writing a sequence")]
    NotInSequence,

    /// The encoding specifier is unknown or not one of UTF-8, UTF-16LE, UTF-16BE.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// IO error while writing to the sink
    #[error("IO error: {0}")]
    Io(String),

    /// The emitter received an event it cannot place in the document.
    #[error("Emitter error: {0}")]
    Emitter(String),

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an I/O error for sink write or flush failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an emitter error for event sequences the emitter rejects.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_write_stream::Error;
    ///
    /// let err = Error::emitter("mapping key must be a scalar");
    /// assert!(err.to_string().contains("mapping key"));
    /// ```
    pub fn emitter(msg: &str) -> Self {
        Error::Emitter(msg.to_string())
    }

    /// Creates an unsupported encoding error naming the rejected specifier.
    pub fn unsupported_encoding<T: fmt::Display>(spec: T) -> Self {
        Error::UnsupportedEncoding(spec.to_string())
    }

    /// Creates an unsupported type error for values that cannot be streamed.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
