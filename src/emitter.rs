//! The low-level event emitter.
//!
//! Writers never produce bytes themselves. They drive an [`Emitter`] with
//! stream, document, container and scalar events, and the emitter decides the
//! layout. [`BlockEmitter`] is the block-style implementation used by the
//! crate-level entry points; [`EventRecorder`] captures events for inspection.
//!
//! ## Layout
//!
//! ```text
//! name: "Alice"          # mapping entry, value double-quoted
//! tags:                  # sequence under a key is not indented
//! - "admin"
//! address:               # nested mapping indented by `indent`
//!   city: "Paris"
//! roles:
//! - id: 1                # first entry shares the dash line
//!   scope: "all"
//! - []                   # empty containers use flow form
//! note:                  # null renders blank
//! ? "…"                  # keys over 128 characters are explicit
//! : 1
//! ```

use crate::frame::ContainerKind;
use crate::scalar::{render, Role, Scalar, ScalarStyle};
use crate::{Encoding, Error, Result, WriterOptions};
use std::fmt::Write as _;
use std::io;

/// Consumer of YAML serialization events.
///
/// `plain` and `quoted` in [`Emitter::scalar`] state whether the text may be
/// resolved implicitly in plain or quoted form; `style` is the requested
/// presentation. An emitter may fall back to a safer style when the text
/// cannot be presented as requested.
pub trait Emitter {
    fn start_stream(&mut self, encoding: Encoding) -> Result<()>;
    fn end_stream(&mut self) -> Result<()>;
    fn start_document(&mut self) -> Result<()>;
    fn end_document(&mut self) -> Result<()>;
    fn start_mapping(&mut self) -> Result<()>;
    fn end_mapping(&mut self) -> Result<()>;
    fn start_sequence(&mut self) -> Result<()>;
    fn end_sequence(&mut self) -> Result<()>;
    fn scalar(&mut self, text: &str, plain: bool, quoted: bool, style: ScalarStyle) -> Result<()>;
}

impl<E: Emitter + ?Sized> Emitter for &mut E {
    fn start_stream(&mut self, encoding: Encoding) -> Result<()> {
        (**self).start_stream(encoding)
    }

    fn end_stream(&mut self) -> Result<()> {
        (**self).end_stream()
    }

    fn start_document(&mut self) -> Result<()> {
        (**self).start_document()
    }

    fn end_document(&mut self) -> Result<()> {
        (**self).end_document()
    }

    fn start_mapping(&mut self) -> Result<()> {
        (**self).start_mapping()
    }

    fn end_mapping(&mut self) -> Result<()> {
        (**self).end_mapping()
    }

    fn start_sequence(&mut self) -> Result<()> {
        (**self).start_sequence()
    }

    fn end_sequence(&mut self) -> Result<()> {
        (**self).end_sequence()
    }

    fn scalar(&mut self, text: &str, plain: bool, quoted: bool, style: ScalarStyle) -> Result<()> {
        (**self).scalar(text, plain, quoted, style)
    }
}

/// Applies the scalar policy to `scalar` and hands the result to `emitter`.
pub(crate) fn write_scalar<E: Emitter + ?Sized>(
    emitter: &mut E,
    scalar: &Scalar<'_>,
    role: Role,
) -> Result<()> {
    let rendered = render(scalar, role);
    emitter.scalar(&rendered.text, rendered.plain, rendered.quoted, rendered.style)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    InStream,
    InDocument,
    RootComplete,
    DocumentEnded,
    Finished,
    /// The sink reported an error; every later event is rejected.
    Failed,
}

/// Longest key, in characters, written as an implicit `key: value` key.
/// Longer keys use the explicit `? key` form.
const MAX_IMPLICIT_KEY: usize = 128;

#[derive(Debug)]
struct Level {
    kind: ContainerKind,
    /// Column at which this container's lines start.
    indent: usize,
    len: usize,
    expect_value: bool,
}

/// Block-style emitter writing to any [`io::Write`] sink.
///
/// Each event is encoded and handed to the sink as soon as it is received;
/// only the opening of a container is held back until its first child (or
/// its end, for an empty container) decides the layout.
///
/// # Examples
///
/// ```rust
/// use yaml_write_stream::emitter::{BlockEmitter, Emitter};
/// use yaml_write_stream::scalar::ScalarStyle;
/// use yaml_write_stream::Encoding;
///
/// let mut emitter = BlockEmitter::new(Vec::new());
/// emitter.start_stream(Encoding::Utf8).unwrap();
/// emitter.start_document().unwrap();
/// emitter.start_mapping().unwrap();
/// emitter.scalar("foo", true, false, ScalarStyle::Plain).unwrap();
/// emitter.scalar("bar", false, true, ScalarStyle::DoubleQuoted).unwrap();
/// emitter.end_mapping().unwrap();
/// emitter.end_document().unwrap();
/// emitter.end_stream().unwrap();
///
/// assert_eq!(emitter.into_inner(), b"foo: \"bar\"\n");
/// ```
pub struct BlockEmitter<W: io::Write> {
    sink: W,
    indent: usize,
    encoding: Encoding,
    phase: Phase,
    levels: Vec<Level>,
    after_key: bool,
    after_dash: bool,
    pending: String,
    bytes: Vec<u8>,
}

impl<W: io::Write> BlockEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, &WriterOptions::default())
    }

    pub fn with_options(sink: W, options: &WriterOptions) -> Self {
        BlockEmitter {
            sink,
            indent: options.indent.max(1),
            encoding: options.encoding,
            phase: Phase::Idle,
            levels: Vec::new(),
            after_key: false,
            after_dash: false,
            pending: String::with_capacity(128),
            bytes: Vec::with_capacity(128),
        }
    }

    /// The encoding of the current stream.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn expect_phase(&self, expected: Phase, event: &str) -> Result<()> {
        if self.phase == Phase::Failed {
            Err(Error::emitter(&format!(
                "unexpected {} event: the sink failed earlier in the stream",
                event
            )))
        } else if self.phase == expected {
            Ok(())
        } else {
            Err(Error::emitter(&format!(
                "unexpected {} event while {:?}",
                event, self.phase
            )))
        }
    }

    fn expect_node(&self, event: &str) -> Result<()> {
        match self.phase {
            Phase::InDocument => Ok(()),
            Phase::RootComplete => Err(Error::emitter(&format!(
                "unexpected {} event: the document already has its root node",
                event
            ))),
            _ => self.expect_phase(Phase::InDocument, event),
        }
    }

    /// Encodes the buffered text and hands it to the sink.
    fn drain(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        self.bytes.clear();
        self.encoding.encode_into(&self.pending, &mut self.bytes);
        self.pending.clear();
        let written = self.sink.write_all(&self.bytes);
        self.check_io(written)
    }

    /// Marks the stream as failed when the sink returned an error.
    fn check_io(&mut self, result: io::Result<()>) -> Result<()> {
        result.map_err(|err| {
            self.phase = Phase::Failed;
            Error::from(err)
        })
    }

    fn push_indent(&mut self, width: usize) {
        self.pending.extend(std::iter::repeat(' ').take(width));
    }

    /// Positions the cursor for a new child line of the top container.
    fn line_prefix(&mut self) {
        let indent = self.levels.last().map_or(0, |level| level.indent);
        if self.after_key {
            // first child of a container that is a mapping value
            self.after_key = false;
            self.pending.push('\n');
            self.push_indent(indent);
        } else if self.after_dash {
            // first child of a container that is a sequence item
            self.after_dash = false;
        } else {
            self.push_indent(indent);
        }
    }

    fn item_prefix(&mut self) {
        self.line_prefix();
        self.pending.push_str("- ");
        self.after_dash = true;
        if let Some(top) = self.levels.last_mut() {
            top.len += 1;
        }
    }

    fn value_done(&mut self) {
        if let Some(top) = self.levels.last_mut() {
            if top.kind == ContainerKind::Mapping {
                top.expect_value = false;
            }
        }
    }

    fn push_text(&mut self, text: &str, plain: bool) {
        if plain && is_plain_safe(text) {
            self.pending.push_str(text);
        } else {
            push_double_quoted(&mut self.pending, text);
        }
    }

    fn start_container(&mut self, kind: ContainerKind) -> Result<()> {
        let event = match kind {
            ContainerKind::Mapping => "mapping start",
            ContainerKind::Sequence => "sequence start",
        };
        self.expect_node(event)?;

        let parent = self
            .levels
            .last()
            .map(|level| (level.kind, level.indent, level.expect_value));
        let indent = match parent {
            None => 0,
            Some((ContainerKind::Sequence, parent_indent, _)) => {
                self.item_prefix();
                parent_indent + 2
            }
            Some((ContainerKind::Mapping, _, false)) => {
                return Err(Error::emitter("mapping keys must be scalars"));
            }
            Some((ContainerKind::Mapping, parent_indent, true)) => match kind {
                ContainerKind::Mapping => parent_indent + self.indent,
                ContainerKind::Sequence => parent_indent,
            },
        };

        self.levels.push(Level {
            kind,
            indent,
            len: 0,
            expect_value: false,
        });
        self.drain()
    }

    fn end_container(&mut self, kind: ContainerKind) -> Result<()> {
        let event = match kind {
            ContainerKind::Mapping => "mapping end",
            ContainerKind::Sequence => "sequence end",
        };
        self.expect_phase(Phase::InDocument, event)?;
        if self.levels.last().map(|level| level.kind) != Some(kind) {
            return Err(Error::emitter(&format!(
                "{:?} end does not match the open container",
                kind
            )));
        }
        let level = self
            .levels
            .pop()
            .ok_or_else(|| Error::emitter("no open container"))?;
        if level.expect_value {
            return Err(Error::emitter("mapping ended while a key awaits its value"));
        }

        if level.len == 0 {
            if self.after_key {
                self.pending.push(' ');
            }
            self.pending.push_str(match kind {
                ContainerKind::Mapping => "{}",
                ContainerKind::Sequence => "[]",
            });
            self.pending.push('\n');
            self.after_key = false;
            self.after_dash = false;
        }

        self.value_done();
        if self.levels.is_empty() {
            self.phase = Phase::RootComplete;
        }
        self.drain()
    }
}

impl<W: io::Write> Emitter for BlockEmitter<W> {
    fn start_stream(&mut self, encoding: Encoding) -> Result<()> {
        self.expect_phase(Phase::Idle, "stream start")?;
        self.encoding = encoding;
        let written = self.sink.write_all(encoding.byte_order_mark());
        self.check_io(written)?;
        self.phase = Phase::InStream;
        Ok(())
    }

    fn end_stream(&mut self) -> Result<()> {
        match self.phase {
            Phase::InStream | Phase::DocumentEnded => {}
            _ => self.expect_phase(Phase::DocumentEnded, "stream end")?,
        }
        self.drain()?;
        let flushed = self.sink.flush();
        self.check_io(flushed)?;
        self.phase = Phase::Finished;
        Ok(())
    }

    fn start_document(&mut self) -> Result<()> {
        self.expect_phase(Phase::InStream, "document start")?;
        self.phase = Phase::InDocument;
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        match self.phase {
            Phase::RootComplete => {
                self.phase = Phase::DocumentEnded;
                self.drain()
            }
            Phase::InDocument if self.levels.is_empty() => {
                Err(Error::emitter("document ended without a root node"))
            }
            _ => self.expect_phase(Phase::RootComplete, "document end"),
        }
    }

    fn start_mapping(&mut self) -> Result<()> {
        self.start_container(ContainerKind::Mapping)
    }

    fn end_mapping(&mut self) -> Result<()> {
        self.end_container(ContainerKind::Mapping)
    }

    fn start_sequence(&mut self) -> Result<()> {
        self.start_container(ContainerKind::Sequence)
    }

    fn end_sequence(&mut self) -> Result<()> {
        self.end_container(ContainerKind::Sequence)
    }

    fn scalar(&mut self, text: &str, plain: bool, _quoted: bool, style: ScalarStyle) -> Result<()> {
        self.expect_node("scalar")?;
        let plain = plain && style == ScalarStyle::Plain;
        let position = self.levels.last().map(|level| (level.kind, level.expect_value));

        match position {
            None => {
                if plain && text.is_empty() {
                    self.pending.push_str("--- ");
                } else {
                    self.push_text(text, plain);
                }
                self.pending.push('\n');
                self.phase = Phase::RootComplete;
            }
            Some((ContainerKind::Sequence, _)) => {
                self.item_prefix();
                if !(plain && text.is_empty()) {
                    self.push_text(text, plain);
                }
                self.pending.push('\n');
                self.after_dash = false;
            }
            Some((ContainerKind::Mapping, false)) => {
                self.line_prefix();
                let start = self.pending.len();
                if plain && text.is_empty() {
                    self.pending.push('~');
                } else {
                    self.push_text(text, plain);
                }
                if self.pending[start..].chars().count() > MAX_IMPLICIT_KEY {
                    self.pending.insert_str(start, "? ");
                    self.pending.push('\n');
                    let indent = self.levels.last().map_or(0, |level| level.indent);
                    self.push_indent(indent);
                }
                self.pending.push(':');
                self.after_key = true;
                if let Some(top) = self.levels.last_mut() {
                    top.len += 1;
                    top.expect_value = true;
                }
            }
            Some((ContainerKind::Mapping, true)) => {
                self.pending.push(' ');
                if !(plain && text.is_empty()) {
                    self.push_text(text, plain);
                }
                self.pending.push('\n');
                self.after_key = false;
                self.value_done();
            }
        }
        self.drain()
    }
}

/// Whether `text` reads back unchanged when written as a plain block scalar.
fn is_plain_safe(text: &str) -> bool {
    let mut chars = text.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let last = text.chars().next_back().unwrap_or(first);

    if first.is_whitespace() || last.is_whitespace() || last == ':' {
        return false;
    }
    if text.starts_with("---") || text.starts_with("...") {
        return false;
    }
    match first {
        '-' | '?' | ':' => {
            if matches!(chars.next(), None | Some(' ') | Some('\t')) {
                return false;
            }
        }
        ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%'
        | '@' | '`' => return false,
        _ => {}
    }
    if text.contains(": ") || text.contains(" #") {
        return false;
    }
    !text.chars().any(needs_escape)
}

#[inline]
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{FEFF}')
}

fn push_double_quoted(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"), // backspace
            '\u{000C}' => out.push_str("\\f"), // form feed
            '\0' => out.push_str("\\0"),
            c if (c as u32) <= 0xFF && needs_escape(c) => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c if needs_escape(c) => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// One event received by an [`EventRecorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    StreamStart(Encoding),
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    MappingStart,
    MappingEnd,
    SequenceStart,
    SequenceEnd,
    Scalar {
        text: String,
        plain: bool,
        quoted: bool,
        style: ScalarStyle,
    },
}

/// An emitter that records every event instead of writing text.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    pub events: Vec<Event>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Emitter for EventRecorder {
    fn start_stream(&mut self, encoding: Encoding) -> Result<()> {
        self.events.push(Event::StreamStart(encoding));
        Ok(())
    }

    fn end_stream(&mut self) -> Result<()> {
        self.events.push(Event::StreamEnd);
        Ok(())
    }

    fn start_document(&mut self) -> Result<()> {
        self.events.push(Event::DocumentStart);
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        self.events.push(Event::DocumentEnd);
        Ok(())
    }

    fn start_mapping(&mut self) -> Result<()> {
        self.events.push(Event::MappingStart);
        Ok(())
    }

    fn end_mapping(&mut self) -> Result<()> {
        self.events.push(Event::MappingEnd);
        Ok(())
    }

    fn start_sequence(&mut self) -> Result<()> {
        self.events.push(Event::SequenceStart);
        Ok(())
    }

    fn end_sequence(&mut self) -> Result<()> {
        self.events.push(Event::SequenceEnd);
        Ok(())
    }

    fn scalar(&mut self, text: &str, plain: bool, quoted: bool, style: ScalarStyle) -> Result<()> {
        self.events.push(Event::Scalar {
            text: text.to_string(),
            plain,
            quoted,
            style,
        });
        Ok(())
    }
}
