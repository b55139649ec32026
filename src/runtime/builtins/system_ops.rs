use std::process;

use crate::runtime::{
    Runtime,
    error::RtResult,
    heap::{EnvRef, ValueRef},
    value::Value,
};

/// The recorded process arguments as a list of strings.
pub(super) fn builtin_system_args(rt: &mut Runtime, _env: EnvRef, _arg: ValueRef) -> RtResult<ValueRef> {
    let args = rt.system_args().to_vec();
    let mut items = Vec::with_capacity(args.len());
    for arg in args {
        match rt.string(arg) {
            Ok(item) => items.push(item),
            Err(err) => {
                rt.release_all(&items)?;
                return Err(err);
            }
        }
    }
    let list = rt.list_from_values(&items);
    rt.release_all(&items)?;
    list
}

/// Exit code carried by `arg`: the Int itself, 0 for anything else.
pub(super) fn exit_code(rt: &Runtime, arg: ValueRef) -> i32 {
    match rt.value(arg) {
        Ok(Value::Int(n)) => *n as i32,
        _ => 0,
    }
}

/// Terminates the process. The runtime is shut down first so leaks are
/// still reported.
pub(super) fn builtin_system_exit(rt: &mut Runtime, _env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let code = exit_code(rt, arg);
    tracing::debug!(code, "system_exit");
    rt.shutdown();
    process::exit(code)
}
