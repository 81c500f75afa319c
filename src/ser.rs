//! Serde serialization on top of the stateful writer.
//!
//! [`Serializer`] turns any `T: Serialize` into writer calls as it walks the
//! value, so nothing is buffered: each field is on its way to the sink
//! before the next one is visited.
//!
//! | Serde data model | YAML |
//! |------------------|------|
//! | struct, map | mapping |
//! | seq, tuple, tuple struct, bytes | sequence |
//! | `None`, unit | blank (null) |
//! | unit variant | the variant name as a string |
//! | newtype/tuple/struct variant | single-entry mapping keyed by the variant name |
//!
//! The document root must be a container; map keys must be scalars.
//!
//! ```rust
//! use serde::Serialize;
//! use yaml_write_stream::to_string;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x: 1\ny: 2\n");
//! ```
//!
//! The serializer can also stream into a writer the caller is already using:
//!
//! ```rust
//! use serde::Serialize;
//! use yaml_write_stream::{from_stream, Encoding, Serializer};
//!
//! let mut out = Vec::new();
//! {
//!     let mut writer = from_stream(&mut out, Encoding::Utf8).unwrap();
//!     writer.write_sequence().unwrap();
//!     for n in 0..2 {
//!         vec![n, n * 10].serialize(Serializer::new(&mut writer)).unwrap();
//!     }
//!     writer.close().unwrap();
//! }
//! assert_eq!(String::from_utf8(out).unwrap(), "- - 0\n  - 0\n- - 1\n  - 10\n");
//! ```

use crate::emitter::Emitter;
use crate::frame::ContainerKind;
use crate::scalar::Scalar;
use crate::{Error, Result, StatefulWriter};
use serde::ser::{self, Impossible, Serialize};
use std::borrow::Cow;

/// A serializer writing at the current position of a [`StatefulWriter`].
///
/// At the root or inside a sequence it writes one value; mapping entries are
/// written by the serializer itself as it walks structs and maps.
pub struct Serializer<'w, E: Emitter> {
    writer: &'w mut StatefulWriter<E>,
    key: Option<Scalar<'static>>,
}

impl<'w, E: Emitter> Serializer<'w, E> {
    pub fn new(writer: &'w mut StatefulWriter<E>) -> Self {
        Serializer { writer, key: None }
    }

    fn scalar(self, value: Scalar<'_>) -> Result<()> {
        match self.key {
            Some(key) => self.writer.write_key_value(key, value),
            None if self.writer.depth() == 0 => Err(Error::unsupported_type(
                "scalar at the document root; the root must be a map or sequence",
            )),
            None => self.writer.write_element(value),
        }
    }

    fn begin(self, kind: ContainerKind) -> Result<&'w mut StatefulWriter<E>> {
        match (self.key, kind) {
            (Some(key), ContainerKind::Mapping) => self.writer.write_keyed_map(key)?,
            (Some(key), ContainerKind::Sequence) => self.writer.write_keyed_sequence(key)?,
            (None, ContainerKind::Mapping) => self.writer.write_map()?,
            (None, ContainerKind::Sequence) => self.writer.write_sequence()?,
        }
        Ok(self.writer)
    }

    fn compound(self, kind: ContainerKind) -> Result<Compound<'w, E>> {
        Ok(Compound {
            writer: self.begin(kind)?,
            kind,
            in_variant: false,
            key: None,
        })
    }

    /// Opens `{variant: <kind>}`.
    fn variant(self, variant: &'static str, kind: ContainerKind) -> Result<Compound<'w, E>> {
        let writer = self.begin(ContainerKind::Mapping)?;
        match kind {
            ContainerKind::Mapping => writer.write_keyed_map(variant)?,
            ContainerKind::Sequence => writer.write_keyed_sequence(variant)?,
        }
        Ok(Compound {
            writer,
            kind,
            in_variant: true,
            key: None,
        })
    }
}

impl<'w, E: Emitter> ser::Serializer for Serializer<'w, E> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'w, E>;
    type SerializeTuple = Compound<'w, E>;
    type SerializeTupleStruct = Compound<'w, E>;
    type SerializeTupleVariant = Compound<'w, E>;
    type SerializeMap = Compound<'w, E>;
    type SerializeStruct = Compound<'w, E>;
    type SerializeStructVariant = Compound<'w, E>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.scalar(Scalar::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.scalar(Scalar::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.scalar(Scalar::UInt(v))
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.scalar(Scalar::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.scalar(Scalar::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.scalar(Scalar::Str(Cow::Borrowed(v)))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.scalar(Scalar::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let mut map = self.compound(ContainerKind::Mapping)?;
        map.entry(Scalar::from(variant), value)?;
        map.finish()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.compound(ContainerKind::Sequence)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        self.compound(ContainerKind::Sequence)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.compound(ContainerKind::Sequence)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.variant(variant, ContainerKind::Sequence)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.compound(ContainerKind::Mapping)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.compound(ContainerKind::Mapping)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.variant(variant, ContainerKind::Mapping)
    }
}

/// An open mapping or sequence being filled by serde.
pub struct Compound<'w, E: Emitter> {
    writer: &'w mut StatefulWriter<E>,
    kind: ContainerKind,
    in_variant: bool,
    key: Option<Scalar<'static>>,
}

impl<'w, E: Emitter> Compound<'w, E> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(Serializer::new(&mut *self.writer))
    }

    fn entry<T>(&mut self, key: Scalar<'static>, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(Serializer {
            writer: &mut *self.writer,
            key: Some(key),
        })
    }

    fn finish(self) -> Result<()> {
        match self.kind {
            ContainerKind::Mapping => self.writer.close_map()?,
            ContainerKind::Sequence => self.writer.close_sequence()?,
        }
        if self.in_variant {
            self.writer.close_map()?;
        }
        Ok(())
    }
}

impl<'w, E: Emitter> ser::SerializeSeq for Compound<'w, E> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'w, E: Emitter> ser::SerializeTuple for Compound<'w, E> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'w, E: Emitter> ser::SerializeTupleStruct for Compound<'w, E> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'w, E: Emitter> ser::SerializeTupleVariant for Compound<'w, E> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'w, E: Emitter> ser::SerializeMap for Compound<'w, E> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.entry(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'w, E: Emitter> ser::SerializeStruct for Compound<'w, E> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(Scalar::from(key), value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'w, E: Emitter> ser::SerializeStructVariant for Compound<'w, E> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(Scalar::from(key), value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// Serializes a map key into a scalar.
struct KeySerializer;

fn key_must_be_scalar<T>() -> Result<T> {
    Err(Error::unsupported_type("mapping keys must be scalars"))
}

impl ser::Serializer for KeySerializer {
    type Ok = Scalar<'static>;
    type Error = Error;

    type SerializeSeq = Impossible<Scalar<'static>, Error>;
    type SerializeTuple = Impossible<Scalar<'static>, Error>;
    type SerializeTupleStruct = Impossible<Scalar<'static>, Error>;
    type SerializeTupleVariant = Impossible<Scalar<'static>, Error>;
    type SerializeMap = Impossible<Scalar<'static>, Error>;
    type SerializeStruct = Impossible<Scalar<'static>, Error>;
    type SerializeStructVariant = Impossible<Scalar<'static>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(Scalar::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        Ok(Scalar::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        Ok(Scalar::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        Ok(Scalar::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        Ok(Scalar::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        Ok(Scalar::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        Ok(Scalar::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        Ok(Scalar::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        Ok(Scalar::UInt(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        Ok(Scalar::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Ok(Scalar::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Scalar::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Scalar::from(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        key_must_be_scalar()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(Scalar::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(Scalar::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(Scalar::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Scalar::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        key_must_be_scalar()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        key_must_be_scalar()
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        key_must_be_scalar()
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        key_must_be_scalar()
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        key_must_be_scalar()
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        key_must_be_scalar()
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        key_must_be_scalar()
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        key_must_be_scalar()
    }
}

#[cfg(test)]
mod tests {
    use crate::{to_string, Error};
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct User {
        id: u32,
        name: String,
        nickname: Option<String>,
        tags: Vec<String>,
    }

    #[derive(Serialize)]
    enum Shape {
        Unit,
        Circle(f64),
        Rect(u32, u32),
        Named { label: String },
    }

    #[test]
    fn test_struct() {
        let user = User {
            id: 7,
            name: "Alice".to_string(),
            nickname: None,
            tags: vec!["admin".to_string()],
        };
        assert_eq!(
            to_string(&user).unwrap(),
            "id: 7\nname: \"Alice\"\nnickname: \ntags:\n- \"admin\"\n"
        );
    }

    #[test]
    fn test_enum_variants() {
        let shapes = vec![
            Shape::Unit,
            Shape::Circle(1.5),
            Shape::Rect(2, 3),
            Shape::Named {
                label: "box".to_string(),
            },
        ];
        assert_eq!(
            to_string(&shapes).unwrap(),
            "- \"Unit\"\n- Circle: 1.5\n- Rect:\n  - 2\n  - 3\n- Named:\n    label: \"box\"\n"
        );
    }

    #[test]
    fn test_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(22, "twenty-two");
        assert_eq!(to_string(&map).unwrap(), "1: \"one\"\n22: \"twenty-two\"\n");

        let mut map = BTreeMap::new();
        map.insert("42".to_string(), true);
        assert_eq!(to_string(&map).unwrap(), "\"42\": true\n");
    }

    #[test]
    fn test_rejects_root_scalar() {
        assert!(matches!(to_string(&5), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_rejects_container_key() {
        let mut map = BTreeMap::new();
        map.insert(vec![1], 2);
        assert!(matches!(to_string(&map), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_empty_collections() {
        let empty: Vec<u8> = Vec::new();
        assert_eq!(to_string(&empty).unwrap(), "[]\n");
        assert_eq!(to_string(&((), Some(1))).unwrap(), "- \n- 1\n");
    }
}
