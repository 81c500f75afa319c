//! The container nesting state machine.
//!
//! A [`FrameStack`] tracks the open mappings and sequences of one document.
//! Opening a frame emits its start event; closing emits the matching end
//! event. Frames close strictly last-in, first-out, and a close naming the
//! wrong kind is rejected before anything is emitted.

use crate::emitter::Emitter;
use crate::{Error, Result};

/// The two kinds of container a frame can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Mapping,
    Sequence,
}

impl ContainerKind {
    /// The error raised when an operation needs this kind on top of the stack.
    #[must_use]
    pub fn not_in_error(self) -> Error {
        match self {
            ContainerKind::Mapping => Error::NotInMapping,
            ContainerKind::Sequence => Error::NotInSequence,
        }
    }

    fn emit_start<E: Emitter + ?Sized>(self, emitter: &mut E) -> Result<()> {
        match self {
            ContainerKind::Mapping => emitter.start_mapping(),
            ContainerKind::Sequence => emitter.start_sequence(),
        }
    }

    fn emit_end<E: Emitter + ?Sized>(self, emitter: &mut E) -> Result<()> {
        match self {
            ContainerKind::Mapping => emitter.end_mapping(),
            ContainerKind::Sequence => emitter.end_sequence(),
        }
    }
}

/// Ordered collection of open containers, most recent last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStack {
    frames: Vec<ContainerKind>,
}

impl FrameStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the start event for `kind` and pushes a frame for it.
    pub fn open<E: Emitter + ?Sized>(&mut self, emitter: &mut E, kind: ContainerKind) -> Result<()> {
        kind.emit_start(emitter)?;
        self.frames.push(kind);
        Ok(())
    }

    /// Pops the top frame and emits its end event.
    ///
    /// Fails with the not-in error of `expected` when the stack is empty or
    /// its top frame is of the other kind; the stack is left untouched then.
    pub fn close<E: Emitter + ?Sized>(
        &mut self,
        emitter: &mut E,
        expected: ContainerKind,
    ) -> Result<()> {
        match self.frames.last() {
            Some(kind) if *kind == expected => {
                self.frames.pop();
                expected.emit_end(emitter)
            }
            _ => Err(expected.not_in_error()),
        }
    }

    /// Closes whatever frame is on top, if any, and returns its kind.
    pub fn close_top<E: Emitter + ?Sized>(
        &mut self,
        emitter: &mut E,
    ) -> Result<Option<ContainerKind>> {
        match self.top_kind() {
            Some(kind) => {
                self.close(emitter, kind)?;
                Ok(Some(kind))
            }
            None => Ok(None),
        }
    }

    #[inline]
    #[must_use]
    pub fn top_kind(&self) -> Option<ContainerKind> {
        self.frames.last().copied()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{Event, EventRecorder};

    #[test]
    fn test_open_close_emits_matching_events() {
        let mut recorder = EventRecorder::new();
        let mut stack = FrameStack::new();

        stack.open(&mut recorder, ContainerKind::Sequence).unwrap();
        stack.open(&mut recorder, ContainerKind::Mapping).unwrap();
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top_kind(), Some(ContainerKind::Mapping));

        stack.close(&mut recorder, ContainerKind::Mapping).unwrap();
        stack.close(&mut recorder, ContainerKind::Sequence).unwrap();
        assert!(stack.is_empty());

        assert_eq!(
            recorder.events,
            vec![
                Event::SequenceStart,
                Event::MappingStart,
                Event::MappingEnd,
                Event::SequenceEnd,
            ]
        );
    }

    #[test]
    fn test_close_wrong_kind() {
        let mut recorder = EventRecorder::new();
        let mut stack = FrameStack::new();
        stack.open(&mut recorder, ContainerKind::Mapping).unwrap();

        let err = stack.close(&mut recorder, ContainerKind::Sequence).unwrap_err();
        assert_eq!(err, Error::NotInSequence);
        assert_eq!(stack.depth(), 1);
        assert_eq!(recorder.events, vec![Event::MappingStart]);
    }

    #[test]
    fn test_close_empty_stack() {
        let mut recorder = EventRecorder::new();
        let mut stack = FrameStack::new();
        assert_eq!(
            stack.close(&mut recorder, ContainerKind::Mapping).unwrap_err(),
            Error::NotInMapping
        );
        assert_eq!(
            stack.close(&mut recorder, ContainerKind::Sequence).unwrap_err(),
            Error::NotInSequence
        );
        assert_eq!(stack.close_top(&mut recorder).unwrap(), None);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_close_top_unwinds_lifo() {
        let mut recorder = EventRecorder::new();
        let mut stack = FrameStack::new();
        stack.open(&mut recorder, ContainerKind::Mapping).unwrap();
        stack.open(&mut recorder, ContainerKind::Sequence).unwrap();

        assert_eq!(
            stack.close_top(&mut recorder).unwrap(),
            Some(ContainerKind::Sequence)
        );
        assert_eq!(
            stack.close_top(&mut recorder).unwrap(),
            Some(ContainerKind::Mapping)
        );
        assert_eq!(
            &recorder.events[2..],
            &[Event::SequenceEnd, Event::MappingEnd]
        );
    }
}
