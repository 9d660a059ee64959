//! Struct-from-mapping decoder: the core binding algorithm.
//!
//! Maps a mapping node's keys onto a destination's declared field slots, in
//! declaration order, recursing through the dispatcher for every field.
//! Decoding continues past per-field failures so that one pass surfaces
//! every defect: a user should be able to fix a document without repeated
//! decode/edit cycles.
//!
//! Keys present in the source but consumed by no field are a reportable
//! hazard (they are usually typos), collected into a single aggregate error
//! with the keys in lexicographic order.

use std::collections::BTreeSet;

use tracing::trace;

use crate::report::DecodeReport;
use crate::slot::FieldTable;
use crate::value::Value;

use super::{dispatch, dynamic, path_child};

pub(crate) fn decode_mapping(
    path: &str,
    node: &Value,
    table: &mut dyn FieldTable,
    report: &mut DecodeReport,
) {
    let entries = match node {
        Value::Mapping(entries) => entries,
        other => {
            report.structural(path, format!("expected a mapping, got {}", other.kind()));
            return;
        }
    };

    // Sorted so the unused-key report below is deterministic.
    let mut unused: BTreeSet<&str> = entries.keys().map(String::as_str).collect();

    for field in table.fields() {
        if field.key.is_empty() {
            report.structural(path, "missing source key declaration for field");
            continue;
        }
        if let Some(spec) = field.invalid_spec {
            report.structural(
                path,
                format!("invalid dynamic selector declaration: {spec}"),
            );
            continue;
        }

        let Some(child) = entries.get(field.key) else {
            report.value(path, format!("missing key: {}", field.key));
            continue;
        };
        unused.remove(field.key);

        let child_path = path_child(path, field.key);
        trace!(path = child_path.as_str(), "decoding field");

        let slot = match field.dynamic {
            Some(selector) => {
                match dynamic::resolve_field(&child_path, child, selector, field.slot, report) {
                    Some(resolved) => resolved,
                    // Resolution failed in a way that makes decoding this
                    // field meaningless; its errors are already recorded.
                    None => continue,
                }
            }
            None => field.slot,
        };

        dispatch(&child_path, child, slot, report);
    }

    if !unused.is_empty() {
        let keys: Vec<&str> = unused.into_iter().collect();
        report.value(path, format!("unused keys: {}", keys.join(", ")));
    }
}
