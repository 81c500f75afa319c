//! Configuration options for the block emitter.
//!
//! ## Examples
//!
//! ```rust
//! use yaml_write_stream::{from_stream_with_options, Encoding, WriterOptions};
//!
//! let options = WriterOptions::new()
//!     .with_indent(4)
//!     .with_encoding(Encoding::Utf8);
//!
//! let mut out = Vec::new();
//! {
//!     let mut writer = from_stream_with_options(&mut out, options).unwrap();
//!     writer.write_map().unwrap();
//!     writer.write_keyed_map("outer").unwrap();
//!     writer.write_key_value("inner", 1).unwrap();
//!     writer.close().unwrap();
//! }
//! assert_eq!(String::from_utf8(out).unwrap(), "outer:\n    inner: 1\n");
//! ```

use crate::Encoding;

/// Configuration options for YAML output.
///
/// # Examples
///
/// ```rust
/// use yaml_write_stream::{Encoding, WriterOptions};
///
/// let options = WriterOptions::new();
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.encoding, Encoding::Utf8);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WriterOptions {
    /// Spaces per nested mapping level.
    pub indent: usize,
    pub encoding: Encoding,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            indent: 2,
            encoding: Encoding::default(),
        }
    }
}

impl WriterOptions {
    /// Creates default options (2-space indent, UTF-8).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size for nested mappings.
    ///
    /// Values below 1 are raised to 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_write_stream::WriterOptions;
    ///
    /// assert_eq!(WriterOptions::new().with_indent(4).indent, 4);
    /// assert_eq!(WriterOptions::new().with_indent(0).indent, 1);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Sets the output encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}
