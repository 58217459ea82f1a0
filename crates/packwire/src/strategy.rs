use crate::{Reader, Result, Writer};

/// Encoding strategy a type resolves to.
///
/// Enumerated constants resolve to [`Strategy::Primitive`]: they are written
/// as a primitive of their storage width. See [`Enumerated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Fixed-width little-endian scalar.
    Primitive,
    /// 4-byte byte-count prefix followed by UTF-8 bytes.
    String,
    /// Fields in declaration order, no tags or padding.
    Composite,
    /// Discriminant followed by the active alternative.
    DiscriminatedUnion,
    /// 4-byte element-count prefix followed by the elements.
    Sequence,
}

impl Strategy {
    #[inline]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive)
    }

    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    #[inline]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Composite)
    }

    #[inline]
    pub const fn is_union(&self) -> bool {
        matches!(self, Self::DiscriminatedUnion)
    }

    #[inline]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence)
    }

    /// Returns `true` if the encoding starts with a 4-byte length prefix.
    #[inline]
    pub const fn is_length_prefixed(&self) -> bool {
        matches!(self, Self::String | Self::Sequence)
    }
}

/// Types that can be written to a [`Writer`].
///
/// `STRATEGY` is fixed per type at compile time. A type has exactly one
/// implementation, which is what [`Decode`] builds on, so both directions
/// always agree on how a type is encoded.
pub trait Encode {
    const STRATEGY: Strategy;

    fn encode(&self, writer: &mut Writer<'_>) -> Result<()>;
}

/// Types that can be read back from a [`Reader`].
///
/// `decode` must consume exactly the bytes `encode` produced, in the same
/// order.
pub trait Decode: Encode + Sized {
    fn decode(reader: &mut Reader<'_>) -> Result<Self>;
}

/// Types that round-trip through the codec.
pub trait Wire: Encode + Decode {}

impl<T> Wire for T where T: Encode + Decode {}

/// One field of a composite or of a union alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Declared name, or the position for tuple-like fields.
    pub name: &'static str,
    pub strategy: Strategy,
}

impl Field {
    pub const fn new(name: &'static str, strategy: Strategy) -> Self {
        Self { name, strategy }
    }
}

/// Ordered field metadata of a composite type.
pub trait Composite: Encode {
    const NAME: &'static str;
    /// Fields in encoding order.
    const FIELDS: &'static [Field];
}

/// One declared constant of an enumerated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    pub name: &'static str,
    pub value: i128,
}

impl Constant {
    pub const fn new(name: &'static str, value: i128) -> Self {
        Self { name, value }
    }
}

/// Fieldless enums encoded as their integer representation.
pub trait Enumerated: Encode {
    /// Storage width on the wire.
    type Repr: Wire;

    const NAME: &'static str;
    const CONSTANTS: &'static [Constant];

    /// Returns the constant declared with `value`, if any.
    fn constant(value: i128) -> Option<&'static Constant> {
        Self::CONSTANTS.iter().find(|c| c.value == value)
    }
}

/// One alternative of a discriminated union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative {
    pub name: &'static str,
    pub discriminant: u64,
    /// Payload fields in encoding order, empty for unit alternatives.
    pub fields: &'static [Field],
}

impl Alternative {
    pub const fn new(name: &'static str, discriminant: u64, fields: &'static [Field]) -> Self {
        Self {
            name,
            discriminant,
            fields,
        }
    }
}

/// Closed set of alternatives selected by a leading discriminant.
pub trait DiscriminatedUnion: Encode {
    /// Discriminant width on the wire.
    type Discriminant: Wire;

    const NAME: &'static str;
    const ALTERNATIVES: &'static [Alternative];

    /// Discriminant of the active alternative.
    fn discriminant(&self) -> u64;

    /// Returns the active alternative's metadata.
    fn alternative(&self) -> Option<&'static Alternative> {
        let discriminant = self.discriminant();
        Self::ALTERNATIVES
            .iter()
            .find(|alt| alt.discriminant == discriminant)
    }
}
