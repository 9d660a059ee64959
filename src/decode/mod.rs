//! The decode engine: type-directed dispatch over value trees and slots.
//!
//! Control flow is a pure, synchronous, depth-first walk. The dispatcher
//! routes on the destination slot's kind; the struct-from-mapping decoder
//! re-enters it for every field, and the sequence decoder for every element.
//! Errors merge upward into one [`DecodeReport`](crate::DecodeReport) per
//! top-level call, so a single pass surfaces every defect in a document.
//!
//! Entry points: [`decode_value`] for an already-parsed tree,
//! [`from_yaml_str`] / [`from_json_str`] for textual documents (both formats
//! are normalized to the same [`Value`] tree before the engine runs).

mod dynamic;
mod mapping;
mod scalar;
mod sequence;

use tracing::instrument;

use crate::report::{BindError, DecodeReport};
use crate::slot::{Bind, Slot};
use crate::value::Value;

/// Decode an already-parsed value tree into `destination`.
///
/// Returns the full decode report; an empty report means success. Partial
/// mutation is not rolled back on failure, so the destination is only valid
/// once the report is confirmed empty.
///
/// # Examples
///
/// ```
/// use treebind::{Bind, Field, FieldTable, Value, decode_value};
///
/// #[derive(Default)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// impl FieldTable for Person {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::new("name", self.name.slot()),
///             Field::new("age", self.age.slot()),
///         ]
///     }
/// }
/// treebind::bind_mapping!(Person);
///
/// let tree: Value = serde_json::from_str(r#"{"name": "a", "age": 3}"#).unwrap();
/// let mut person = Person::default();
/// let report = decode_value(&tree, &mut person);
/// assert!(report.is_empty());
/// assert_eq!(person.name, "a");
/// assert_eq!(person.age, 3);
/// ```
#[instrument(level = "debug", skip_all)]
pub fn decode_value<T: Bind + ?Sized>(root: &Value, destination: &mut T) -> DecodeReport {
    let mut report = DecodeReport::new();
    dispatch("", root, destination.slot(), &mut report);
    report
}

/// Parse a YAML document and decode it into `destination`.
#[instrument(level = "debug", skip_all)]
pub fn from_yaml_str<T: Bind>(input: &str, destination: &mut T) -> Result<(), BindError> {
    let tree: Value = serde_yaml::from_str(input)?;
    decode_value(&tree, destination)
        .into_result()
        .map_err(|report| BindError::Rejected { report })
}

/// Parse a JSON document and decode it into `destination`.
#[instrument(level = "debug", skip_all)]
pub fn from_json_str<T: Bind>(input: &str, destination: &mut T) -> Result<(), BindError> {
    let tree: Value = serde_json::from_str(input)?;
    decode_value(&tree, destination)
        .into_result()
        .map_err(|report| BindError::Rejected { report })
}

/// Route one node to the decoder for `slot`'s kind.
///
/// `path` is the diagnostic breadcrumb of the current location (empty at the
/// root). A `null` node is accepted only by destinations with an empty
/// state: optionals are cleared, sequences and inert placeholders are left
/// untouched; everything else records a value error.
pub(crate) fn dispatch(path: &str, node: &Value, slot: Slot<'_>, report: &mut DecodeReport) {
    if node.is_null() {
        match slot {
            Slot::Optional(optional) => optional.clear(),
            Slot::Sequence(_) | Slot::Ignore => {}
            _ => report.value(path, "input is null"),
        }
        return;
    }

    match slot {
        Slot::Bool(slot) => scalar::decode_bool(path, node, slot, report),
        Slot::Int(slot) => scalar::decode_int(path, node, slot, report),
        Slot::Uint(slot) => scalar::decode_uint(path, node, slot, report),
        Slot::Float(slot) => scalar::decode_float(path, node, slot, report),
        Slot::Str(slot) => scalar::decode_string(path, node, slot, report),
        Slot::Optional(optional) => dispatch(path, node, optional.materialize(), report),
        Slot::Sequence(slot) => sequence::decode_sequence(path, node, slot, report),
        Slot::Mapping(table) => mapping::decode_mapping(path, node, table, report),
        Slot::Dynamic(variant) => mapping::decode_mapping(path, node, variant, report),
        Slot::Ignore => {}
    }
}

/// Breadcrumb for a struct field: `base.key`, or just `key` at the root.
pub(crate) fn path_child(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_owned()
    } else {
        format!("{base}.{key}")
    }
}

/// Breadcrumb for a sequence element: `base[index]`.
pub(crate) fn path_index(base: &str, index: usize) -> String {
    format!("{base}[{index}]")
}
