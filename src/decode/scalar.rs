//! Scalar decoders: one per leaf kind, exact kind match only.
//!
//! No implicit widening and no cross-kind coercion: an integer leaf never
//! fills a float destination, nor the reverse. Silent numeric coercion is a
//! classic source of config-loading bugs, so schema drift fails loudly here.

use crate::report::DecodeReport;
use crate::slot::{FloatSlot, IntSlot, UintSlot};
use crate::value::Value;

fn mismatch(expected: &str, actual: &Value) -> String {
    format!(
        "expected {expected}, got unconvertible kind {}, value: '{actual}'",
        actual.kind()
    )
}

pub(crate) fn decode_bool(path: &str, node: &Value, slot: &mut bool, report: &mut DecodeReport) {
    match node {
        Value::Bool(v) => *slot = *v,
        other => report.value(path, mismatch("bool", other)),
    }
}

pub(crate) fn decode_int(path: &str, node: &Value, slot: IntSlot<'_>, report: &mut DecodeReport) {
    match node {
        Value::Int(v) => {
            if let Err(err) = slot.set(*v) {
                report.value(path, err.to_string());
            }
        }
        other => report.value(path, mismatch("integer", other)),
    }
}

pub(crate) fn decode_uint(path: &str, node: &Value, slot: UintSlot<'_>, report: &mut DecodeReport) {
    match node {
        Value::Uint(v) => {
            if let Err(err) = slot.set(*v) {
                report.value(path, err.to_string());
            }
        }
        other => report.value(path, mismatch("unsigned integer", other)),
    }
}

pub(crate) fn decode_float(
    path: &str,
    node: &Value,
    slot: FloatSlot<'_>,
    report: &mut DecodeReport,
) {
    match node {
        Value::Float(v) => slot.set(*v),
        other => report.value(path, mismatch("float", other)),
    }
}

pub(crate) fn decode_string(
    path: &str,
    node: &Value,
    slot: &mut String,
    report: &mut DecodeReport,
) {
    match node {
        Value::String(v) => v.clone_into(slot),
        other => report.value(path, mismatch("string", other)),
    }
}
