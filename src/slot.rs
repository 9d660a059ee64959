//! Destination slots and the declarative field tables that drive decoding.
//!
//! Rust has no runtime reflection, so the decode engine never inspects a
//! destination type directly. Instead, every decodable destination exposes a
//! [`Slot`] view of itself through the [`Bind`] trait: a tagged, mutable
//! borrow that tells the dispatcher what kind of value the destination
//! expects and where to write it. Struct destinations additionally publish a
//! [`FieldTable`] — a small declarative table mapping each field's source key
//! (and optional dynamic selector) onto the field's slot.
//!
//! The engine operates purely on slots and field tables; it has no knowledge
//! of concrete destination types beyond these traits.
//!
//! # Examples
//!
//! ```
//! use treebind::{Bind, Field, FieldTable, Slot};
//!
//! #[derive(Default)]
//! struct Endpoint {
//!     host: String,
//!     port: i64,
//!     aliases: Vec<String>,
//! }
//!
//! impl FieldTable for Endpoint {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("host", self.host.slot()),
//!             Field::new("port", self.port.slot()),
//!             Field::new("aliases", self.aliases.slot()),
//!         ]
//!     }
//! }
//! treebind::bind_mapping!(Endpoint);
//! ```

use thiserror::Error;

/// A typed, writable view of one destination location.
///
/// Slots are produced on demand by [`Bind::slot`] and consumed by the
/// dispatcher; each slot is written at most once per decode of the node it
/// was produced for.
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Int(IntSlot<'a>),
    Uint(UintSlot<'a>),
    Float(FloatSlot<'a>),
    Str(&'a mut String),
    /// An `Option<T>` destination; `null` clears it, anything else decodes
    /// into a freshly materialized inner value.
    Optional(&'a mut dyn OptionalSlot),
    /// A growable (`Vec<T>`) or fixed-length (`[T; N]`) sequence destination.
    Sequence(&'a mut dyn SequenceSlot),
    /// A struct destination decoded from a mapping via its [`FieldTable`].
    Mapping(&'a mut dyn FieldTable),
    /// A destination whose concrete shape is chosen at decode time from a
    /// discriminator value in the document.
    Dynamic(&'a mut dyn DynamicVariant),
    /// An inert destination that accepts any node and writes nothing. Used
    /// for unresolved dynamic payload placeholders.
    Ignore,
}

impl Slot<'_> {
    /// Name of the destination kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Slot::Bool(_) => "bool",
            Slot::Int(_) => "integer",
            Slot::Uint(_) => "unsigned integer",
            Slot::Float(_) => "float",
            Slot::Str(_) => "string",
            Slot::Optional(_) => "optional",
            Slot::Sequence(_) => "sequence",
            Slot::Mapping(_) => "mapping",
            Slot::Dynamic(_) => "dynamic",
            Slot::Ignore => "ignored",
        }
    }
}

/// A scalar value did not fit the destination's width.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value {value} does not fit in {target}")]
pub struct OutOfRange {
    pub value: i128,
    pub target: &'static str,
}

/// Width-generalized signed integer slot.
///
/// All signed widths decode from the same `integer` leaf kind; narrowing is
/// checked and overflow is a value error, never a wrap.
pub enum IntSlot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
}

impl IntSlot<'_> {
    pub fn set(self, value: i64) -> Result<(), OutOfRange> {
        let out_of_range = |target| OutOfRange {
            value: value as i128,
            target,
        };
        match self {
            IntSlot::I8(slot) => *slot = i8::try_from(value).map_err(|_| out_of_range("i8"))?,
            IntSlot::I16(slot) => *slot = i16::try_from(value).map_err(|_| out_of_range("i16"))?,
            IntSlot::I32(slot) => *slot = i32::try_from(value).map_err(|_| out_of_range("i32"))?,
            IntSlot::I64(slot) => *slot = value,
            IntSlot::Isize(slot) => {
                *slot = isize::try_from(value).map_err(|_| out_of_range("isize"))?
            }
        }
        Ok(())
    }
}

/// Width-generalized unsigned integer slot.
pub enum UintSlot<'a> {
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
}

impl UintSlot<'_> {
    pub fn set(self, value: u64) -> Result<(), OutOfRange> {
        let out_of_range = |target| OutOfRange {
            value: value as i128,
            target,
        };
        match self {
            UintSlot::U8(slot) => *slot = u8::try_from(value).map_err(|_| out_of_range("u8"))?,
            UintSlot::U16(slot) => *slot = u16::try_from(value).map_err(|_| out_of_range("u16"))?,
            UintSlot::U32(slot) => *slot = u32::try_from(value).map_err(|_| out_of_range("u32"))?,
            UintSlot::U64(slot) => *slot = value,
            UintSlot::Usize(slot) => {
                *slot = usize::try_from(value).map_err(|_| out_of_range("usize"))?
            }
        }
        Ok(())
    }
}

/// Floating-point slot; `f32` destinations take the nearest representable
/// value.
pub enum FloatSlot<'a> {
    F32(&'a mut f32),
    F64(&'a mut f64),
}

impl FloatSlot<'_> {
    pub fn set(self, value: f64) {
        match self {
            FloatSlot::F32(slot) => *slot = value as f32,
            FloatSlot::F64(slot) => *slot = value,
        }
    }
}

/// One entry of a struct's declarative field table.
///
/// `key` names the source key looked up in the mapping node. An empty key
/// models a missing source-key declaration and is reported as a structural
/// error for that field without aborting its siblings.
pub struct Field<'a> {
    pub key: &'static str,
    /// Selector key for dynamic fields: the name of a sibling key inside the
    /// field's own source mapping whose string value picks the concrete
    /// variant.
    pub dynamic: Option<&'static str>,
    pub slot: Slot<'a>,
    /// Set when [`Field::from_tag`] met a declaration it could not parse;
    /// reported as a structural error for this field only.
    pub(crate) invalid_spec: Option<&'static str>,
}

impl<'a> Field<'a> {
    pub fn new(key: &'static str, slot: Slot<'a>) -> Self {
        Field {
            key,
            dynamic: None,
            slot,
            invalid_spec: None,
        }
    }

    /// Declares a dynamic field: before decoding, the engine reads
    /// `selector` from the field's source mapping and hands the string to
    /// [`DynamicVariant::resolve_variant`].
    pub fn dynamic(key: &'static str, selector: &'static str, slot: Slot<'a>) -> Self {
        Field {
            key,
            dynamic: Some(selector),
            slot,
            invalid_spec: None,
        }
    }

    /// Convenience for nesting a plain struct destination.
    pub fn nested(key: &'static str, table: &'a mut dyn FieldTable) -> Self {
        Field::new(key, Slot::Mapping(table))
    }

    /// Builds a field from the compact tag syntax: `key` or
    /// `key,dynamic=selector`.
    ///
    /// A declaration after the comma that is not `dynamic=<selector>` marks
    /// the field malformed; the decoder reports it without aborting sibling
    /// fields.
    pub fn from_tag(tag: &'static str, slot: Slot<'a>) -> Self {
        match tag.split_once(',') {
            None => Field::new(tag, slot),
            Some((key, spec)) => match spec.strip_prefix("dynamic=") {
                Some(selector) if !selector.is_empty() => Field::dynamic(key, selector, slot),
                _ => Field {
                    key,
                    dynamic: None,
                    slot,
                    invalid_spec: Some(spec),
                },
            },
        }
    }
}

/// Declarative table of a struct destination's fields.
///
/// Declaration order is preserved: the decoder visits fields in the order
/// returned here, and error accumulation follows that order.
pub trait FieldTable {
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// The dynamic-resolution capability.
///
/// Implemented by destinations whose concrete payload shape depends on a
/// discriminator string found in the document itself. `resolve_variant`
/// mutates the placeholder into the concrete variant for `discriminator`
/// before the generic decode recurses into the field. An unknown
/// discriminator should leave the placeholder inert (its payload slot
/// becomes [`Slot::Ignore`]); the engine does not validate discriminators
/// against a closed set.
pub trait DynamicVariant: FieldTable {
    fn resolve_variant(&mut self, discriminator: &str);
}

/// Slot protocol for `Option<T>` destinations.
pub trait OptionalSlot {
    /// Leave the destination empty (`null` source).
    fn clear(&mut self);
    /// Ensure an inner value exists and return its slot.
    fn materialize(&mut self) -> Slot<'_>;
}

impl<T: Bind + Default> OptionalSlot for Option<T> {
    fn clear(&mut self) {
        *self = None;
    }

    fn materialize(&mut self) -> Slot<'_> {
        self.get_or_insert_with(T::default).slot()
    }
}

/// Slot protocol for sequence destinations.
pub trait SequenceSlot {
    /// `Some(n)` for fixed-length destinations; source sequences longer than
    /// `n` are rejected before any element decodes.
    fn fixed_capacity(&self) -> Option<usize>;
    /// Size the destination for `len` elements. Growable destinations are
    /// resized to exactly `len` with default values; fixed-length
    /// destinations keep their zero-valued tail.
    fn prepare(&mut self, len: usize);
    /// Slot of the element at `index`. Callers only pass indices admitted by
    /// `fixed_capacity` / `prepare`.
    fn slot_at(&mut self, index: usize) -> Slot<'_>;
}

impl<T: Bind + Default> SequenceSlot for Vec<T> {
    fn fixed_capacity(&self) -> Option<usize> {
        None
    }

    fn prepare(&mut self, len: usize) {
        self.resize_with(len, T::default);
    }

    fn slot_at(&mut self, index: usize) -> Slot<'_> {
        self[index].slot()
    }
}

impl<T: Bind + Default, const N: usize> SequenceSlot for [T; N] {
    fn fixed_capacity(&self) -> Option<usize> {
        Some(N)
    }

    fn prepare(&mut self, _len: usize) {}

    fn slot_at(&mut self, index: usize) -> Slot<'_> {
        self[index].slot()
    }
}

/// Types that can expose a [`Slot`] view of themselves.
///
/// Implementations exist for every scalar width, `String`, `Option<T>`,
/// `Vec<T>` and `[T; N]`. Struct destinations implement [`FieldTable`] and
/// get their `Bind` impl from [`bind_mapping!`](crate::bind_mapping);
/// dynamic destinations use [`bind_dynamic!`](crate::bind_dynamic).
pub trait Bind {
    fn slot(&mut self) -> Slot<'_>;
}

impl Bind for bool {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Bool(self)
    }
}

impl Bind for String {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Str(self)
    }
}

macro_rules! bind_scalar {
    ($slot:ident, $inner:ident: $($ty:ty => $width:ident),+ $(,)?) => {
        $(
            impl Bind for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$slot($inner::$width(self))
                }
            }
        )+
    };
}

bind_scalar!(Int, IntSlot: i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
bind_scalar!(Uint, UintSlot: u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);
bind_scalar!(Float, FloatSlot: f32 => F32, f64 => F64);

impl<T: Bind + Default> Bind for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Optional(self)
    }
}

impl<T: Bind + Default> Bind for Vec<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}

impl<T: Bind + Default, const N: usize> Bind for [T; N] {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}

/// Generates the [`Bind`] impl for struct destinations that implement
/// [`FieldTable`].
#[macro_export]
macro_rules! bind_mapping {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Bind for $ty {
                fn slot(&mut self) -> $crate::Slot<'_> {
                    $crate::Slot::Mapping(self)
                }
            }
        )+
    };
}

/// Generates the [`Bind`] impl for destinations that implement
/// [`DynamicVariant`].
#[macro_export]
macro_rules! bind_dynamic {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Bind for $ty {
                fn slot(&mut self) -> $crate::Slot<'_> {
                    $crate::Slot::Dynamic(self)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_slot_checks_narrowing() {
        let mut small: i8 = 0;
        assert_eq!(IntSlot::I8(&mut small).set(42), Ok(()));
        assert_eq!(small, 42);

        let err = IntSlot::I8(&mut small).set(300).unwrap_err();
        assert_eq!(err.to_string(), "value 300 does not fit in i8");
        assert_eq!(small, 42);
    }

    #[test]
    fn uint_slot_checks_narrowing() {
        let mut port: u16 = 0;
        assert_eq!(UintSlot::U16(&mut port).set(8080), Ok(()));
        assert_eq!(port, 8080);
        assert!(UintSlot::U16(&mut port).set(70_000).is_err());
    }

    #[test]
    fn from_tag_parses_the_compact_syntax() {
        let mut name = String::new();
        let field = Field::from_tag("name", name.slot());
        assert_eq!(field.key, "name");
        assert_eq!(field.dynamic, None);

        let mut count: i64 = 0;
        let field = Field::from_tag("dynelement,dynamic=type", count.slot());
        assert_eq!(field.key, "dynelement");
        assert_eq!(field.dynamic, Some("type"));
        assert_eq!(field.invalid_spec, None);

        let mut flag = false;
        let field = Field::from_tag("field,omitempty", flag.slot());
        assert_eq!(field.key, "field");
        assert_eq!(field.dynamic, None);
        assert_eq!(field.invalid_spec, Some("omitempty"));
    }

    #[test]
    fn optional_slot_materializes_and_clears() {
        let mut value: Option<String> = None;
        match value.materialize() {
            Slot::Str(inner) => *inner = "hello".into(),
            _ => panic!("expected string slot"),
        }
        assert_eq!(value.as_deref(), Some("hello"));

        value.clear();
        assert!(value.is_none());
    }

    #[test]
    fn vec_prepare_resizes_to_exact_length() {
        let mut items: Vec<i64> = vec![1, 2, 3, 4, 5];
        SequenceSlot::prepare(&mut items, 2);
        assert_eq!(items, vec![1, 2]);
        SequenceSlot::prepare(&mut items, 4);
        assert_eq!(items, vec![1, 2, 0, 0]);
    }

    #[test]
    fn array_reports_fixed_capacity() {
        let mut arr = [0i64; 3];
        assert_eq!(SequenceSlot::fixed_capacity(&arr), Some(3));
        match SequenceSlot::slot_at(&mut arr, 1) {
            Slot::Int(slot) => slot.set(7).unwrap(),
            _ => panic!("expected integer slot"),
        }
        assert_eq!(arr, [0, 7, 0]);
    }
}
