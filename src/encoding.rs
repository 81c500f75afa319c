//! Output encoding negotiation.
//!
//! The writer can produce UTF-8, UTF-16LE or UTF-16BE. Callers may name the
//! encoding several ways, all funnelled through [`IntoEncoding`]:
//!
//! - an [`Encoding`] value
//! - a name (`"UTF-8"`, `"utf16le"`), a locale identifier (`"en_US.UTF-8"`)
//!   or a Windows codepage (`"CP65001"`)
//! - an emitter-level token (`1`, `2`, `3`, the libyaml numbering)
//!
//! ```rust
//! use yaml_write_stream::{Encoding, IntoEncoding};
//!
//! assert_eq!("UTF-16BE".into_encoding().unwrap(), Encoding::Utf16Be);
//! assert_eq!("de_DE.utf8@euro".into_encoding().unwrap(), Encoding::Utf8);
//! assert_eq!(2u32.into_encoding().unwrap(), Encoding::Utf16Le);
//! assert!("US-ASCII".into_encoding().is_err());
//! ```

use crate::{Error, Result};
use std::fmt;

/// An encoding the block emitter can write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl Encoding {
    /// Returns the canonical name of this encoding.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
        }
    }

    /// Returns the emitter-level token for this encoding.
    #[must_use]
    pub const fn token(&self) -> u32 {
        match self {
            Encoding::Utf8 => 1,
            Encoding::Utf16Le => 2,
            Encoding::Utf16Be => 3,
        }
    }

    /// Resolves an emitter-level token.
    ///
    /// Token `0` ("any encoding") is rejected; the caller must pick one.
    pub fn from_token(token: u32) -> Result<Self> {
        match token {
            1 => Ok(Encoding::Utf8),
            2 => Ok(Encoding::Utf16Le),
            3 => Ok(Encoding::Utf16Be),
            other => Err(Error::unsupported_encoding(format!("token {}", other))),
        }
    }

    /// Resolves an encoding name, locale identifier or codepage.
    pub fn from_name(spec: &str) -> Result<Self> {
        // "en_US.UTF-8@euro" -> "UTF-8"
        let charset = match spec.split_once('.') {
            Some((_, rest)) => rest,
            None => spec,
        };
        let charset = charset.split('@').next().unwrap_or(charset);

        let normalized: String = charset
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match normalized.as_str() {
            "UTF8" | "CP65001" => Ok(Encoding::Utf8),
            "UTF16LE" | "CP1200" => Ok(Encoding::Utf16Le),
            "UTF16BE" | "CP1201" => Ok(Encoding::Utf16Be),
            _ => Err(Error::unsupported_encoding(spec)),
        }
    }

    /// Bytes that open a stream in this encoding.
    #[must_use]
    pub const fn byte_order_mark(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[],
            Encoding::Utf16Le => &[0xFF, 0xFE],
            Encoding::Utf16Be => &[0xFE, 0xFF],
        }
    }

    /// Appends `text` to `out` in this encoding.
    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) {
        match self {
            Encoding::Utf8 => out.extend_from_slice(text.as_bytes()),
            Encoding::Utf16Le => {
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
            }
            Encoding::Utf16Be => {
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can be negotiated into an [`Encoding`].
pub trait IntoEncoding {
    fn into_encoding(self) -> Result<Encoding>;
}

impl IntoEncoding for Encoding {
    fn into_encoding(self) -> Result<Encoding> {
        Ok(self)
    }
}

impl IntoEncoding for &str {
    fn into_encoding(self) -> Result<Encoding> {
        Encoding::from_name(self)
    }
}

impl IntoEncoding for String {
    fn into_encoding(self) -> Result<Encoding> {
        Encoding::from_name(&self)
    }
}

impl IntoEncoding for &String {
    fn into_encoding(self) -> Result<Encoding> {
        Encoding::from_name(self)
    }
}

impl IntoEncoding for u32 {
    fn into_encoding(self) -> Result<Encoding> {
        Encoding::from_token(self)
    }
}
