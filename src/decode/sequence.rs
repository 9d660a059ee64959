//! Sequence decoder for growable and fixed-length destinations.

use tracing::trace;

use crate::report::DecodeReport;
use crate::slot::SequenceSlot;
use crate::value::Value;

use super::{dispatch, path_index};

/// Decode a sequence node element by element.
///
/// Fixed-length destinations reject source sequences longer than their
/// capacity before any element decodes; shorter sources leave the tail
/// zero-valued. Growable destinations are resized to exactly the source
/// length. One element's failure never prevents decoding of the rest; every
/// per-element error lands in the report.
pub(crate) fn decode_sequence(
    path: &str,
    node: &Value,
    slot: &mut dyn SequenceSlot,
    report: &mut DecodeReport,
) {
    let items = match node {
        Value::Sequence(items) => items,
        other => {
            report.structural(
                path,
                format!("source data must be a sequence, got {}", other.kind()),
            );
            return;
        }
    };

    if let Some(capacity) = slot.fixed_capacity()
        && items.len() > capacity
    {
        report.value(
            path,
            format!(
                "expected source data with length at most {capacity}, got {}",
                items.len()
            ),
        );
        return;
    }

    trace!(path, len = items.len(), "decoding sequence");
    slot.prepare(items.len());
    for (index, item) in items.iter().enumerate() {
        let element_path = path_index(path, index);
        dispatch(&element_path, item, slot.slot_at(index), report);
    }
}
