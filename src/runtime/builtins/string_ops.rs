use std::num::IntErrorKind;

use crate::runtime::{
    Runtime,
    error::RtResult,
    heap::{EnvRef, ValueRef},
};

use super::helpers::{arg_int, arg_string, arg_string_pair, type_error};

/// Length in bytes.
pub(super) fn builtin_string_length(rt: &mut Runtime, _env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let len = arg_string(rt, arg, "string_length", "string_length(s)")?.len();
    rt.int(len as i64)
}

pub(super) fn builtin_string_concat(rt: &mut Runtime, _env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let (mut left, right) = arg_string_pair(rt, arg, "string_concat", "string_concat [a; b]")?;
    left.push_str(&right);
    rt.string(left)
}

pub(super) fn builtin_int_to_string(rt: &mut Runtime, _env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let n = arg_int(rt, arg, "int_to_string", "int_to_string(n)")?;
    rt.string(n.to_string())
}

/// Decimal parse with C `strtoll` rules.
///
/// Leading whitespace and a sign are accepted and anything after the digits
/// is an error. Out-of-range values clamp to the `Int` bounds. Only the
/// empty string reads as 0; whitespace alone is not a number.
pub(super) fn builtin_string_to_int(rt: &mut Runtime, _env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let raw = arg_string(rt, arg, "string_to_int", "string_to_int(s)")?;
    let parsed = if raw.is_empty() { Some(0) } else { parse_decimal(raw) };
    match parsed {
        Some(n) => rt.int(n),
        None => Err(type_error(
            "string_to_int",
            "a decimal integer",
            &format!("{:?}", raw),
            "string_to_int(s)",
        )),
    }
}

fn parse_decimal(raw: &str) -> Option<i64> {
    let digits = raw.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    match digits.parse::<i64>() {
        Ok(n) => Some(n),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}
