use crate::runtime::{
    Runtime,
    error::{RtResult, RuntimeError},
    heap::ValueRef,
    value::Value,
};

pub(super) fn format_hint(signature: &str) -> String {
    format!(" (usage: {})", signature)
}

pub(super) fn type_error(name: &str, expected: &str, got: &str, signature: &str) -> RuntimeError {
    RuntimeError::TypeMismatch(format!(
        "{} expected {}, got {}{}",
        name,
        expected,
        got,
        format_hint(signature)
    ))
}

pub(super) fn arg_string<'a>(
    rt: &'a Runtime,
    arg: ValueRef,
    name: &str,
    signature: &str,
) -> RtResult<&'a str> {
    match rt.value(arg)? {
        Value::String(s) => Ok(s.as_str()),
        other => Err(type_error(name, "String", other.type_name(), signature)),
    }
}

pub(super) fn arg_int(rt: &Runtime, arg: ValueRef, name: &str, signature: &str) -> RtResult<i64> {
    match rt.value(arg)? {
        Value::Int(n) => Ok(*n),
        other => Err(type_error(name, "Int", other.type_name(), signature)),
    }
}

/// Two-argument builtins take their arguments as a list of at least two
/// elements. Extra elements are ignored.
pub(super) fn arg_pair(
    rt: &Runtime,
    arg: ValueRef,
    name: &str,
    signature: &str,
) -> RtResult<(ValueRef, ValueRef)> {
    match rt.value(arg)? {
        Value::List(items) if items.len() >= 2 => Ok((items[0], items[1])),
        Value::List(items) => Err(type_error(
            name,
            "a list of two arguments",
            &format!("a list of {}", items.len()),
            signature,
        )),
        other => Err(type_error(name, "List", other.type_name(), signature)),
    }
}

/// Both elements of a two-string argument list, copied out of the heap.
pub(super) fn arg_string_pair(
    rt: &Runtime,
    arg: ValueRef,
    name: &str,
    signature: &str,
) -> RtResult<(String, String)> {
    let (first, second) = arg_pair(rt, arg, name, signature)?;
    Ok((
        arg_string(rt, first, name, signature)?.to_string(),
        arg_string(rt, second, name, signature)?.to_string(),
    ))
}
