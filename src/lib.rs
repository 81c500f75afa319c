//! # yaml_write_stream
//!
//! Incremental, block-style YAML output for documents that are too large or
//! too dynamic to build in memory first.
//!
//! Content is written as it is produced: each mapping entry or sequence
//! element goes straight to the underlying [`std::io::Write`] sink. Two
//! writer façades share one nesting tracker and one emitter:
//!
//! - [`StatefulWriter`]: the caller opens and closes containers explicitly.
//!   Mismatched calls report [`Error::NotInMapping`] or
//!   [`Error::NotInSequence`] instead of producing a broken document.
//! - [`CallbackWriter`]: every container is scoped to a handler, so nesting
//!   is correct by construction.
//!
//! ## Quick Start
//!
//! ```rust
//! use yaml_write_stream::{from_stream, Encoding};
//!
//! let mut out = Vec::new();
//! {
//!     let mut writer = from_stream(&mut out, Encoding::Utf8).unwrap();
//!     writer.write_map().unwrap();
//!     writer.write_key_value("name", "Alice").unwrap();
//!     writer.write_keyed_sequence("scores").unwrap();
//!     writer.write_element(98).unwrap();
//!     writer.write_element(87.5).unwrap();
//!     writer.close().unwrap();
//! }
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "name: \"Alice\"\nscores:\n- 98\n- 87.5\n"
//! );
//! ```
//!
//! ### Callback style
//!
//! ```rust
//! use yaml_write_stream::from_stream_with;
//!
//! let out = from_stream_with(Vec::new(), "UTF-8", |writer| {
//!     writer.write_map(|map| {
//!         map.write_key_value("abc", 7)?;
//!         map.write_sequence("tags", |seq| seq.write_element("x"))
//!     })
//! })
//! .unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "abc: 7\ntags:\n- \"x\"\n");
//! ```
//!
//! ### Serde
//!
//! Any `T: Serialize` whose top level is a struct, map, sequence or tuple can
//! be streamed with [`to_writer`] or [`to_string`].
//!
//! ## Quoting
//!
//! Strings supplied by the caller are always double-quoted, so they read
//! back as strings. Numbers, booleans and nulls are written plain. An empty
//! string is written as `""`; a null as nothing at all.
//!
//! ## Encodings
//!
//! Output may be UTF-8, UTF-16LE or UTF-16BE, selected by [`Encoding`], by
//! name (`"UTF-16LE"`, `"en_US.UTF-8"`, ...) or by numeric token. UTF-16
//! output starts with a byte order mark.

pub mod callback;
pub mod emitter;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod macros;
pub mod map;
pub mod options;
pub mod scalar;
pub mod ser;
pub mod stateful;
pub mod value;

pub use callback::{CallbackWriter, MapWriter, SequenceWriter};
pub use emitter::{BlockEmitter, Emitter};
pub use encoding::{Encoding, IntoEncoding};
pub use error::{Error, Result};
pub use map::Mapping;
pub use options::WriterOptions;
pub use scalar::{Scalar, ScalarStyle};
pub use ser::Serializer;
pub use stateful::StatefulWriter;
pub use value::{Number, Value};

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// Starts a stateful writer on `sink`.
///
/// `encoding` may be an [`Encoding`], an encoding name or a numeric token.
///
/// # Errors
///
/// Returns [`Error::UnsupportedEncoding`] if `encoding` is not recognized,
/// or an I/O error if the byte order mark cannot be written.
pub fn from_stream<W, T>(sink: W, encoding: T) -> Result<StatefulWriter<BlockEmitter<W>>>
where
    W: io::Write,
    T: IntoEncoding,
{
    let encoding = encoding.into_encoding()?;
    from_stream_with_options(sink, WriterOptions::new().with_encoding(encoding))
}

/// Starts a stateful writer on `sink` with custom options.
///
/// # Errors
///
/// Returns an error if the stream cannot be started.
pub fn from_stream_with_options<W>(
    sink: W,
    options: WriterOptions,
) -> Result<StatefulWriter<BlockEmitter<W>>>
where
    W: io::Write,
{
    let emitter = start(sink, &options)?;
    Ok(StatefulWriter::new(emitter))
}

/// Runs `handler` against a callback writer on `sink`, then closes it.
///
/// The writer is closed after the handler returns unless the handler closed
/// it already. The sink is handed back once the document is complete.
///
/// # Errors
///
/// Returns [`Error::UnsupportedEncoding`] for an unrecognized encoding, or
/// the first error raised by the handler or while closing.
pub fn from_stream_with<W, T, F>(sink: W, encoding: T, handler: F) -> Result<W>
where
    W: io::Write,
    T: IntoEncoding,
    F: FnOnce(&mut CallbackWriter<BlockEmitter<W>>) -> Result<()>,
{
    let encoding = encoding.into_encoding()?;
    scoped_with_options(sink, WriterOptions::new().with_encoding(encoding), handler)
}

/// Like [`from_stream_with`], with custom options.
///
/// # Errors
///
/// Returns the first error raised by the handler or while closing.
pub fn scoped_with_options<W, F>(sink: W, options: WriterOptions, handler: F) -> Result<W>
where
    W: io::Write,
    F: FnOnce(&mut CallbackWriter<BlockEmitter<W>>) -> Result<()>,
{
    let mut writer = CallbackWriter::new(start(sink, &options)?);
    handler(&mut writer)?;
    if !writer.is_closed() {
        writer.close()?;
    }
    Ok(writer.into_emitter().into_inner())
}

/// Creates (or truncates) the file at `path` and starts a stateful writer
/// on it.
///
/// # Errors
///
/// Returns an error if the encoding is unsupported or the file cannot be
/// created.
pub fn open<P, T>(path: P, encoding: T) -> Result<StatefulWriter<BlockEmitter<BufWriter<File>>>>
where
    P: AsRef<Path>,
    T: IntoEncoding,
{
    let encoding = encoding.into_encoding()?;
    let file = File::create(path)?;
    from_stream(BufWriter::new(file), encoding)
}

/// Creates (or truncates) the file at `path` and fills it through a callback
/// writer.
///
/// # Errors
///
/// Returns an error if the encoding is unsupported, the file cannot be
/// created, or the handler fails.
pub fn open_with<P, T, F>(path: P, encoding: T, handler: F) -> Result<()>
where
    P: AsRef<Path>,
    T: IntoEncoding,
    F: FnOnce(&mut CallbackWriter<BlockEmitter<BufWriter<File>>>) -> Result<()>,
{
    let encoding = encoding.into_encoding()?;
    let file = File::create(path)?;
    from_stream_with(BufWriter::new(file), encoding, handler)?;
    Ok(())
}

/// Serialize any `T: Serialize` to a writer as a YAML document.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use yaml_write_stream::to_writer;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x: 1\ny: 2\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for a top-level scalar or a non-scalar
/// map key, or an I/O error if writing fails.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, WriterOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// Output is streamed as the value is walked. If serialization fails, the
/// document is left unfinished: the sink holds only what was written before
/// the failure.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: WriterOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let mut stateful = from_stream_with_options(writer, options)?;
    if let Err(err) = value.serialize(Serializer::new(&mut stateful)) {
        stateful.abandon();
        return Err(err);
    }
    stateful.close()
}

/// Serialize any `T: Serialize` to a UTF-8 YAML string.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use yaml_write_stream::to_string;
///
/// let mut map = BTreeMap::new();
/// map.insert("enabled", true);
/// assert_eq!(to_string(&map).unwrap(), "enabled: true\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(128);
    to_writer(&mut buffer, value)?;
    String::from_utf8(buffer).map_err(Error::custom)
}

fn start<W: io::Write>(sink: W, options: &WriterOptions) -> Result<BlockEmitter<W>> {
    let mut emitter = BlockEmitter::with_options(sink, options);
    emitter.start_stream(options.encoding)?;
    emitter.start_document()?;
    Ok(emitter)
}
