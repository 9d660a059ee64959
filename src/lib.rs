//! # Treebind: strict value-tree binding for configuration
//!
//! Treebind decodes an untyped, dynamically-shaped value tree — the output
//! of parsing a YAML or JSON document — into a statically-typed destination
//! structure, guided by per-field declarations that name the source key and,
//! optionally, mark the field as a discriminated union whose concrete
//! variant is chosen at decode time from a sibling value in the document.
//!
//! ## Core concepts
//!
//! - **Value tree**: the normalized, parsed document ([`Value`])
//! - **Slots**: typed, writable views of destination locations ([`Slot`], [`Bind`])
//! - **Field tables**: declarative per-struct key ↔ slot tables ([`FieldTable`])
//! - **Dynamic variants**: document-driven variant selection ([`DynamicVariant`])
//! - **Decode report**: exhaustive, non-short-circuiting diagnostics ([`DecodeReport`])
//!
//! ## Quick start
//!
//! ```
//! use treebind::{Bind, Field, FieldTable, from_yaml_str};
//!
//! #[derive(Default, Debug)]
//! struct ServerConfig {
//!     name: String,
//!     port: i64,
//!     tags: Vec<String>,
//!     comment: Option<String>,
//! }
//!
//! impl FieldTable for ServerConfig {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("name", self.name.slot()),
//!             Field::new("port", self.port.slot()),
//!             Field::new("tags", self.tags.slot()),
//!             Field::new("comment", self.comment.slot()),
//!         ]
//!     }
//! }
//! treebind::bind_mapping!(ServerConfig);
//!
//! let mut config = ServerConfig::default();
//! from_yaml_str(
//!     "name: api\nport: 8080\ntags: [edge, internal]\ncomment: ~\n",
//!     &mut config,
//! )
//! .unwrap();
//!
//! assert_eq!(config.name, "api");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.tags, vec!["edge".to_string(), "internal".to_string()]);
//! assert_eq!(config.comment, None);
//! ```
//!
//! ## Strictness
//!
//! Scalar decoding requires the exact kind match between the tree leaf and
//! the destination: an integer leaf never fills a float destination and vice
//! versa. Missing keys, unused keys, kind mismatches and out-of-range values
//! are all collected into one [`DecodeReport`] per decode call instead of
//! failing at the first defect, so a document can be fixed in a single
//! edit cycle. A non-empty report means "configuration rejected — do not
//! proceed"; fields decoded before a later failure stay populated.
//!
//! ## Dynamic fields
//!
//! A field declared with [`Field::dynamic`] names a *selector key*. Before
//! decoding the field, the engine reads that key from the field's own source
//! mapping (or from every element, for sequences of dynamic elements) and
//! hands the string to the destination's
//! [`resolve_variant`](DynamicVariant::resolve_variant), which swaps the
//! placeholder payload for the concrete variant. See `tests/dynamic.rs` for
//! a complete worked example.
//!
//! ## Module guide
//!
//! - [`value`] - Normalized value tree and parsing
//! - [`slot`] - Slots, binding traits, and field tables
//! - [`decode`] - The decode engine and entry points
//! - [`report`] - Error accumulation and the public error type
//! - [`telemetry`] - Optional tracing bootstrap

pub mod decode;
pub mod report;
pub mod slot;
pub mod telemetry;
pub mod value;

pub use decode::{decode_value, from_json_str, from_yaml_str};
pub use report::{BindError, DecodeError, DecodeReport, ErrorKind};
pub use slot::{
    Bind, DynamicVariant, Field, FieldTable, FloatSlot, IntSlot, OptionalSlot, OutOfRange,
    SequenceSlot, Slot, UintSlot,
};
pub use value::{Value, ValueKind};
