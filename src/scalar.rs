//! Scalar values and the quoting policy applied to them.
//!
//! Quoting is decided by the value, not by the caller, so that parsing the
//! emitted document back yields the same kind of value that was written:
//!
//! | Value | Role | Emitted as |
//! |-------|------|------------|
//! | `""` | any | `""` (double-quoted, otherwise it reads back as null) |
//! | null | any | blank plain scalar |
//! | number | any | plain decimal text |
//! | boolean | any | plain `true` / `false` |
//! | other string | value | double-quoted |
//! | other string | key | plain, unless the whole key is ASCII digits |
//!
//! ```rust
//! use yaml_write_stream::scalar::{render, Role, Scalar, ScalarStyle};
//!
//! let digits = Scalar::from("42");
//! assert_eq!(render(&digits, Role::Key).style, ScalarStyle::DoubleQuoted);
//!
//! let word = Scalar::from("abc");
//! assert_eq!(render(&word, Role::Key).style, ScalarStyle::Plain);
//!
//! let seven = Scalar::from(7);
//! let value = render(&seven, Role::Value);
//! assert_eq!((value.text.as_ref(), value.style), ("7", ScalarStyle::Plain));
//! ```

use std::borrow::Cow;
use std::fmt;

/// An atomic value handed to a writer.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Scalar<'a> {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(Cow<'a, str>),
}

impl<'a> Scalar<'a> {
    /// Returns `true` for null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Returns `true` for integers and floats.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::UInt(_) | Scalar::Float(_))
    }

    /// Detaches the scalar from any borrowed text.
    #[must_use]
    pub fn into_owned(self) -> Scalar<'static> {
        match self {
            Scalar::Null => Scalar::Null,
            Scalar::Bool(b) => Scalar::Bool(b),
            Scalar::Int(i) => Scalar::Int(i),
            Scalar::UInt(u) => Scalar::UInt(u),
            Scalar::Float(f) => Scalar::Float(f),
            Scalar::Str(s) => Scalar::Str(Cow::Owned(s.into_owned())),
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::UInt(u) => write!(f, "{}", u),
            Scalar::Float(v) => f.write_str(&float_text(*v)),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

/// Formats a float so it reads back as a float.
///
/// Whole values keep a trailing `.0`; non-finite values use the YAML spellings.
pub fn float_text(v: f64) -> String {
    if v.is_nan() {
        ".nan".to_string()
    } else if v.is_infinite() {
        (if v > 0.0 { ".inf" } else { "-.inf" }).to_string()
    } else {
        // Debug keeps ".0" on whole numbers and switches to exponents at extremes.
        format!("{:?}", v)
    }
}

macro_rules! scalar_from_int {
    ($variant:ident, $target:ty, $($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar<'_> {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value as $target)
                }
            }
        )*
    };
}

scalar_from_int!(Int, i64, i8, i16, i32, i64, isize);
scalar_from_int!(UInt, u64, u8, u16, u32, u64, usize);

impl From<f32> for Scalar<'_> {
    fn from(value: f32) -> Self {
        Scalar::Float(value as f64)
    }
}

impl From<f64> for Scalar<'_> {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar<'_> {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<char> for Scalar<'_> {
    fn from(value: char) -> Self {
        Scalar::Str(Cow::Owned(value.to_string()))
    }
}

impl From<()> for Scalar<'_> {
    fn from(_: ()) -> Self {
        Scalar::Null
    }
}

impl<'a> From<&'a str> for Scalar<'a> {
    fn from(value: &'a str) -> Self {
        Scalar::Str(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Scalar<'a> {
    fn from(value: &'a String) -> Self {
        Scalar::Str(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for Scalar<'_> {
    fn from(value: String) -> Self {
        Scalar::Str(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Scalar<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Scalar::Str(value)
    }
}

impl<'a, T> From<Option<T>> for Scalar<'a>
where
    T: Into<Scalar<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

/// Where a scalar sits in its mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Key,
    Value,
}

/// Presentation requested from the emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    DoubleQuoted,
}

/// An emission instruction produced by [`render`].
///
/// `plain` and `quoted` say whether the text may resolve implicitly when
/// written plain or quoted; `style` is the presentation to use.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered<'a> {
    pub text: Cow<'a, str>,
    pub plain: bool,
    pub quoted: bool,
    pub style: ScalarStyle,
}

impl<'a> Rendered<'a> {
    fn plain(text: Cow<'a, str>) -> Self {
        Rendered {
            text,
            plain: true,
            quoted: false,
            style: ScalarStyle::Plain,
        }
    }

    fn double_quoted(text: Cow<'a, str>) -> Self {
        Rendered {
            text,
            plain: false,
            quoted: true,
            style: ScalarStyle::DoubleQuoted,
        }
    }
}

/// Decides the text and style of `scalar` in the given role.
#[must_use]
pub fn render<'s>(scalar: &'s Scalar<'_>, role: Role) -> Rendered<'s> {
    match scalar {
        Scalar::Str(s) if s.is_empty() => Rendered::double_quoted(Cow::Borrowed("")),
        Scalar::Null => Rendered::plain(Cow::Borrowed("")),
        Scalar::Int(i) => Rendered::plain(Cow::Owned(i.to_string())),
        Scalar::UInt(u) => Rendered::plain(Cow::Owned(u.to_string())),
        Scalar::Float(f) => Rendered::plain(Cow::Owned(float_text(*f))),
        Scalar::Bool(b) => Rendered::plain(Cow::Borrowed(if *b { "true" } else { "false" })),
        Scalar::Str(s) => match role {
            Role::Value => Rendered::double_quoted(Cow::Borrowed(s.as_ref())),
            Role::Key if is_all_digits(s) => Rendered::double_quoted(Cow::Borrowed(s.as_ref())),
            Role::Key => Rendered::plain(Cow::Borrowed(s.as_ref())),
        },
    }
}

#[inline]
fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
