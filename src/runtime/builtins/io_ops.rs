use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

use crate::runtime::{
    Runtime,
    error::{RtResult, RuntimeError},
    heap::{EnvRef, ValueRef},
};

use super::helpers::{arg_string, arg_string_pair};

pub(super) fn builtin_print(rt: &mut Runtime, _env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let stdout = io::stdout();
    print_to(rt, arg, &mut stdout.lock())?;
    rt.unit()
}

/// Writes the rendered value and a newline to `out`.
pub(super) fn print_to(rt: &Runtime, arg: ValueRef, out: &mut impl Write) -> RtResult<()> {
    let text = rt.display(arg)?;
    writeln!(out, "{}", text)
        .and_then(|()| out.flush())
        .map_err(|e| RuntimeError::InvalidFunctionCall(format!("print: {}", e)))
}

/// One line of standard input without its line terminator. End of input
/// reads as the empty string.
pub(super) fn builtin_read(rt: &mut Runtime, _env: EnvRef, _arg: ValueRef) -> RtResult<ValueRef> {
    let stdin = io::stdin();
    let line = read_line_from(&mut stdin.lock());
    rt.string(line)
}

pub(super) fn read_line_from(input: &mut impl BufRead) -> String {
    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return String::new();
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Whole file as a string. A file that cannot be read yields "".
pub(super) fn builtin_read_file(rt: &mut Runtime, _env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let path = arg_string(rt, arg, "read_file", "read_file(path)")?;
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::debug!(path, %err, "read_file failed");
            String::new()
        }
    };
    rt.string(content)
}

/// Takes `[path; content]` and answers whether the write succeeded.
pub(super) fn builtin_write_file(rt: &mut Runtime, _env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let (path, content) = arg_string_pair(rt, arg, "write_file", "write_file [path; content]")?;
    let written = match fs::write(&path, content) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(path = %path, %err, "write_file failed");
            false
        }
    };
    rt.bool(written)
}

pub(super) fn builtin_file_exists(rt: &mut Runtime, _env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let exists = Path::new(arg_string(rt, arg, "file_exists", "file_exists(path)")?).is_file();
    rt.bool(exists)
}
