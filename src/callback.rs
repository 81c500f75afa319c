//! The callback writer: containers scoped to a handler call.
//!
//! Opening a container takes a handler. The handler receives a child writer
//! bound to that container, and the container is closed when the handler
//! returns. A child writer cannot outlive its handler, so containers can
//! neither be left open nor closed out of order.
//!
//! ```rust
//! use yaml_write_stream::{from_stream_with, Encoding};
//!
//! let out = from_stream_with(Vec::new(), Encoding::Utf8, |writer| {
//!     writer.write_sequence(|seq| {
//!         seq.write_element("abc")?;
//!         seq.write_map(|map| map.write_key_value("def", "ghi"))
//!     })
//! })
//! .unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "- \"abc\"\n- def: \"ghi\"\n");
//! ```

use crate::emitter::{write_scalar, Emitter};
use crate::frame::{ContainerKind, FrameStack};
use crate::scalar::{Role, Scalar};
use crate::{Error, Result};

/// The root of a callback-style document.
///
/// Only a single top-level mapping or sequence may be written.
pub struct CallbackWriter<E: Emitter> {
    emitter: E,
    stack: FrameStack,
    wrote_anything: bool,
    closed: bool,
}

impl<E: Emitter> CallbackWriter<E> {
    /// Wraps an emitter whose stream and document have already been started.
    pub fn new(emitter: E) -> Self {
        CallbackWriter {
            emitter,
            stack: FrameStack::new(),
            wrote_anything: false,
            closed: false,
        }
    }

    /// Writes the top-level mapping, filled in by `handler`.
    pub fn write_map<F>(&mut self, handler: F) -> Result<()>
    where
        F: FnOnce(&mut MapWriter<'_, E>) -> Result<()>,
    {
        self.check_eos()?;
        self.wrote_anything = true;
        scoped_map(&mut self.emitter, &mut self.stack, handler)
    }

    /// Writes the top-level sequence, filled in by `handler`.
    pub fn write_sequence<F>(&mut self, handler: F) -> Result<()>
    where
        F: FnOnce(&mut SequenceWriter<'_, E>) -> Result<()>,
    {
        self.check_eos()?;
        self.wrote_anything = true;
        scoped_sequence(&mut self.emitter, &mut self.stack, handler)
    }

    /// Finalizes the document, writing an empty placeholder if nothing was
    /// written. A second call fails with [`Error::EndOfStream`].
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::EndOfStream);
        }
        self.closed = true;
        if !self.wrote_anything {
            write_scalar(&mut self.emitter, &Scalar::Null, Role::Value)?;
        }
        self.emitter.end_document()?;
        self.emitter.end_stream()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the top-level value has been written or the writer is closed.
    #[must_use]
    pub fn is_eos(&self) -> bool {
        self.closed || self.wrote_anything
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }

    fn check_eos(&self) -> Result<()> {
        if self.is_eos() {
            Err(Error::EndOfStream)
        } else {
            Ok(())
        }
    }
}

/// Writer for the entries of one mapping.
pub struct MapWriter<'a, E: Emitter> {
    emitter: &'a mut E,
    stack: &'a mut FrameStack,
}

impl<'a, E: Emitter> MapWriter<'a, E> {
    pub fn write_key_value<'k, 'v>(
        &mut self,
        key: impl Into<Scalar<'k>>,
        value: impl Into<Scalar<'v>>,
    ) -> Result<()> {
        write_scalar(&mut *self.emitter, &key.into(), Role::Key)?;
        write_scalar(&mut *self.emitter, &value.into(), Role::Value)
    }

    /// Writes a nested mapping under `key`.
    pub fn write_map<'k, F>(&mut self, key: impl Into<Scalar<'k>>, handler: F) -> Result<()>
    where
        F: FnOnce(&mut MapWriter<'_, E>) -> Result<()>,
    {
        write_scalar(&mut *self.emitter, &key.into(), Role::Key)?;
        scoped_map(&mut *self.emitter, &mut *self.stack, handler)
    }

    /// Writes a nested sequence under `key`.
    pub fn write_sequence<'k, F>(&mut self, key: impl Into<Scalar<'k>>, handler: F) -> Result<()>
    where
        F: FnOnce(&mut SequenceWriter<'_, E>) -> Result<()>,
    {
        write_scalar(&mut *self.emitter, &key.into(), Role::Key)?;
        scoped_sequence(&mut *self.emitter, &mut *self.stack, handler)
    }

    /// Number of containers open around this writer, its own included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }
}

/// Writer for the elements of one sequence.
pub struct SequenceWriter<'a, E: Emitter> {
    emitter: &'a mut E,
    stack: &'a mut FrameStack,
}

impl<'a, E: Emitter> SequenceWriter<'a, E> {
    pub fn write_element<'v>(&mut self, value: impl Into<Scalar<'v>>) -> Result<()> {
        write_scalar(&mut *self.emitter, &value.into(), Role::Value)
    }

    /// Writes a nested mapping as the next element.
    pub fn write_map<F>(&mut self, handler: F) -> Result<()>
    where
        F: FnOnce(&mut MapWriter<'_, E>) -> Result<()>,
    {
        scoped_map(&mut *self.emitter, &mut *self.stack, handler)
    }

    /// Writes a nested sequence as the next element.
    pub fn write_sequence<F>(&mut self, handler: F) -> Result<()>
    where
        F: FnOnce(&mut SequenceWriter<'_, E>) -> Result<()>,
    {
        scoped_sequence(&mut *self.emitter, &mut *self.stack, handler)
    }

    /// Number of containers open around this writer, its own included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }
}

// The frame is closed whether or not the handler succeeded; the handler's
// error takes precedence.
fn scoped_map<E, F>(emitter: &mut E, stack: &mut FrameStack, handler: F) -> Result<()>
where
    E: Emitter,
    F: FnOnce(&mut MapWriter<'_, E>) -> Result<()>,
{
    stack.open(emitter, ContainerKind::Mapping)?;
    let result = handler(&mut MapWriter {
        emitter: &mut *emitter,
        stack: &mut *stack,
    });
    let closed = stack.close(emitter, ContainerKind::Mapping);
    result.and(closed)
}

fn scoped_sequence<E, F>(emitter: &mut E, stack: &mut FrameStack, handler: F) -> Result<()>
where
    E: Emitter,
    F: FnOnce(&mut SequenceWriter<'_, E>) -> Result<()>,
{
    stack.open(emitter, ContainerKind::Sequence)?;
    let result = handler(&mut SequenceWriter {
        emitter: &mut *emitter,
        stack: &mut *stack,
    });
    let closed = stack.close(emitter, ContainerKind::Sequence);
    result.and(closed)
}
