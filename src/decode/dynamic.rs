//! Dynamic variant resolution.
//!
//! Some fields hold values whose concrete shape is not knowable statically:
//! it depends on a discriminator string found in the configuration itself.
//! The engine cannot know the mapping from discriminator to shape, so the
//! destination supplies it through the
//! [`DynamicVariant`](crate::DynamicVariant) capability, invoked here before
//! the generic decode recurses into the field.
//!
//! A dynamic field's source value must be a mapping, or a sequence of
//! mappings when the field is itself a sequence of dynamically-typed
//! elements. Unknown discriminators are not validated by the engine; the
//! capability is expected to leave its placeholder inert for them.

use tracing::debug;

use crate::report::DecodeReport;
use crate::slot::Slot;
use crate::value::Value;

use super::path_index;

/// Resolve the variant(s) behind a dynamic field, returning the slot the
/// generic decode should proceed with, or `None` when decoding the field
/// would be meaningless (errors are already recorded).
pub(crate) fn resolve_field<'s>(
    path: &str,
    node: &Value,
    selector: &str,
    slot: Slot<'s>,
    report: &mut DecodeReport,
) -> Option<Slot<'s>> {
    match slot {
        Slot::Dynamic(variant) => {
            let Some(entries) = node.as_mapping() else {
                report.structural(
                    path,
                    format!("dynamic field expects a mapping, got {}", node.kind()),
                );
                return None;
            };
            let discriminator = read_discriminator(path, entries, selector, report)?;
            debug!(path, discriminator = discriminator.as_str(), "resolving dynamic variant");
            variant.resolve_variant(&discriminator);
            Some(Slot::Dynamic(variant))
        }
        Slot::Sequence(sequence) => {
            let Some(items) = node.as_sequence() else {
                report.structural(
                    path,
                    format!(
                        "dynamic field expects a sequence of mappings, got {}",
                        node.kind()
                    ),
                );
                return None;
            };

            if let Some(capacity) = sequence.fixed_capacity()
                && items.len() > capacity
            {
                // Leave the length diagnostics to the sequence decoder.
                return Some(Slot::Sequence(sequence));
            }

            // The destination is grown up front so each element's variant can
            // be resolved in place before the generic decode revisits it.
            sequence.prepare(items.len());
            for (index, item) in items.iter().enumerate() {
                let element_path = path_index(path, index);
                let Some(entries) = item.as_mapping() else {
                    report.structural(
                        &element_path,
                        format!("dynamic element must be a mapping, got {}", item.kind()),
                    );
                    continue;
                };
                let Some(discriminator) =
                    read_discriminator(&element_path, entries, selector, report)
                else {
                    continue;
                };
                match sequence.slot_at(index) {
                    Slot::Dynamic(variant) => {
                        debug!(
                            path = element_path.as_str(),
                            discriminator = discriminator.as_str(),
                            "resolving dynamic variant"
                        );
                        variant.resolve_variant(&discriminator);
                    }
                    other => {
                        report.structural(
                            &element_path,
                            format!(
                                "field declared dynamic but its {} element cannot resolve variants",
                                other.kind_name()
                            ),
                        );
                    }
                }
            }
            Some(Slot::Sequence(sequence))
        }
        other => {
            report.structural(
                path,
                format!(
                    "field declared dynamic but its {} destination cannot resolve variants",
                    other.kind_name()
                ),
            );
            None
        }
    }
}

fn read_discriminator(
    path: &str,
    entries: &rustc_hash::FxHashMap<String, Value>,
    selector: &str,
    report: &mut DecodeReport,
) -> Option<String> {
    match entries.get(selector) {
        Some(Value::String(discriminator)) => Some(discriminator.clone()),
        Some(other) => {
            report.value(
                path,
                format!(
                    "discriminator key '{selector}' must be a string, got {}",
                    other.kind()
                ),
            );
            None
        }
        None => {
            report.value(path, format!("discriminator key not found: {selector}"));
            None
        }
    }
}
