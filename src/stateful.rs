//! The stateful writer: explicit open and close calls.
//!
//! The caller opens containers with `write_map` / `write_sequence` (or their
//! keyed forms inside a mapping) and closes them with `close_map` /
//! `close_sequence`. Every call is checked against the frame stack, so
//! malformed nesting is reported instead of producing a broken document.
//!
//! ```rust
//! use yaml_write_stream::{from_stream, Encoding};
//!
//! let mut out = Vec::new();
//! {
//!     let mut writer = from_stream(&mut out, Encoding::Utf8).unwrap();
//!     writer.write_sequence().unwrap();
//!     writer.write_element("abc").unwrap();
//!     writer.write_map().unwrap();
//!     writer.write_key_value("def", "ghi").unwrap();
//!     // closes the mapping, then the sequence
//!     writer.close().unwrap();
//! }
//! assert_eq!(String::from_utf8(out).unwrap(), "- \"abc\"\n- def: \"ghi\"\n");
//! ```

use crate::emitter::{write_scalar, BlockEmitter, Emitter};
use crate::frame::{ContainerKind, FrameStack};
use crate::scalar::{Role, Scalar};
use crate::{Error, Result};

/// A writer whose nesting is managed by explicit calls.
///
/// The emitter handed to [`StatefulWriter::new`] must already have started
/// its stream and document; [`crate::from_stream`] does this for you.
///
/// Dropping a writer that was never closed finalizes it, ignoring errors.
/// Call [`StatefulWriter::close`] or [`StatefulWriter::into_emitter`] to
/// observe them.
pub struct StatefulWriter<E: Emitter> {
    // `None` only once `into_emitter` has taken it
    emitter: Option<E>,
    stack: FrameStack,
    closed: bool,
    wrote_anything: bool,
}

impl<E: Emitter> StatefulWriter<E> {
    pub fn new(emitter: E) -> Self {
        StatefulWriter {
            emitter: Some(emitter),
            stack: FrameStack::new(),
            closed: false,
            wrote_anything: false,
        }
    }

    /// Opens a mapping at the root or as the next sequence element.
    pub fn write_map(&mut self) -> Result<()> {
        self.open(None, ContainerKind::Mapping)
    }

    /// Opens a mapping as the value of `key` in the current mapping.
    pub fn write_keyed_map<'k>(&mut self, key: impl Into<Scalar<'k>>) -> Result<()> {
        self.open(Some(key.into()), ContainerKind::Mapping)
    }

    /// Opens a sequence at the root or as the next sequence element.
    pub fn write_sequence(&mut self) -> Result<()> {
        self.open(None, ContainerKind::Sequence)
    }

    /// Opens a sequence as the value of `key` in the current mapping.
    pub fn write_keyed_sequence<'k>(&mut self, key: impl Into<Scalar<'k>>) -> Result<()> {
        self.open(Some(key.into()), ContainerKind::Sequence)
    }

    /// Writes one scalar entry into the open mapping.
    pub fn write_key_value<'k, 'v>(
        &mut self,
        key: impl Into<Scalar<'k>>,
        value: impl Into<Scalar<'v>>,
    ) -> Result<()> {
        self.check_eos()?;
        if !self.in_map() {
            return Err(Error::NotInMapping);
        }
        let emitter = live(&mut self.emitter)?;
        write_scalar(emitter, &key.into(), Role::Key)?;
        write_scalar(emitter, &value.into(), Role::Value)?;
        self.wrote_anything = true;
        Ok(())
    }

    /// Writes one scalar element into the open sequence.
    pub fn write_element<'v>(&mut self, value: impl Into<Scalar<'v>>) -> Result<()> {
        self.check_eos()?;
        if !self.in_sequence() {
            return Err(Error::NotInSequence);
        }
        write_scalar(live(&mut self.emitter)?, &value.into(), Role::Value)?;
        self.wrote_anything = true;
        Ok(())
    }

    pub fn close_map(&mut self) -> Result<()> {
        self.check_eos()?;
        self.stack.close(live(&mut self.emitter)?, ContainerKind::Mapping)
    }

    pub fn close_sequence(&mut self) -> Result<()> {
        self.check_eos()?;
        self.stack.close(live(&mut self.emitter)?, ContainerKind::Sequence)
    }

    /// Finalizes the document.
    ///
    /// Containers still open are closed innermost first. If nothing was
    /// written, an empty placeholder scalar keeps the document valid. The
    /// sink is flushed once; any later call fails with [`Error::EndOfStream`].
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::EndOfStream);
        }
        self.closed = true;

        let emitter = live(&mut self.emitter)?;
        while self.stack.close_top(emitter)?.is_some() {}
        if !self.wrote_anything {
            write_scalar(emitter, &Scalar::Null, Role::Value)?;
        }
        emitter.end_document()?;
        emitter.end_stream()
    }

    /// Finalizes the document unless it is already closed, then hands back
    /// the emitter.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while closing.
    pub fn into_emitter(mut self) -> Result<E> {
        if !self.closed {
            self.close()?;
        }
        self.emitter.take().ok_or(Error::EndOfStream)
    }

    /// Stops the writer without finalizing the document, so dropping it
    /// writes nothing more.
    pub(crate) fn abandon(&mut self) {
        self.closed = true;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether no more content can be written: the writer is closed, or its
    /// top-level value has been written and closed.
    #[must_use]
    pub fn is_eos(&self) -> bool {
        self.closed || (self.wrote_anything && self.stack.is_empty())
    }

    #[must_use]
    pub fn in_map(&self) -> bool {
        self.stack.top_kind() == Some(ContainerKind::Mapping)
    }

    #[must_use]
    pub fn in_sequence(&self) -> bool {
        self.stack.top_kind() == Some(ContainerKind::Sequence)
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn emitter(&self) -> Option<&E> {
        self.emitter.as_ref()
    }

    fn check_eos(&self) -> Result<()> {
        if self.is_eos() {
            Err(Error::EndOfStream)
        } else {
            Ok(())
        }
    }

    fn open(&mut self, key: Option<Scalar<'_>>, kind: ContainerKind) -> Result<()> {
        self.check_eos()?;
        match (key, self.stack.top_kind()) {
            (Some(key), Some(ContainerKind::Mapping)) => {
                write_scalar(live(&mut self.emitter)?, &key, Role::Key)?;
            }
            (Some(_), _) => return Err(Error::NotInMapping),
            (None, Some(ContainerKind::Mapping)) => return Err(Error::NotInSequence),
            (None, _) => {}
        }
        self.stack.open(live(&mut self.emitter)?, kind)?;
        self.wrote_anything = true;
        Ok(())
    }
}

impl<W: std::io::Write> StatefulWriter<BlockEmitter<W>> {
    /// Finalizes the document unless it is already closed, then hands back
    /// the sink.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while closing.
    pub fn into_inner(self) -> Result<W> {
        Ok(self.into_emitter()?.into_inner())
    }
}

fn live<E>(emitter: &mut Option<E>) -> Result<&mut E> {
    emitter.as_mut().ok_or(Error::EndOfStream)
}

impl<E: Emitter> Drop for StatefulWriter<E> {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.close();
        }
    }
}
