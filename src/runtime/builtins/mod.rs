use crate::runtime::{
    Runtime, builtin_function::BuiltinFunction, error::RtResult, heap::EnvRef,
};

mod helpers;
mod io_ops;
mod string_ops;
mod system_ops;

use io_ops::{
    builtin_file_exists, builtin_print, builtin_read, builtin_read_file, builtin_write_file,
};
use string_ops::{
    builtin_int_to_string, builtin_string_concat, builtin_string_length, builtin_string_to_int,
};
use system_ops::{builtin_system_args, builtin_system_exit};

/// All built-in functions, in installation order.
pub static BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "print",
        func: builtin_print,
    },
    BuiltinFunction {
        name: "read",
        func: builtin_read,
    },
    BuiltinFunction {
        name: "read_file",
        func: builtin_read_file,
    },
    BuiltinFunction {
        name: "write_file",
        func: builtin_write_file,
    },
    BuiltinFunction {
        name: "file_exists",
        func: builtin_file_exists,
    },
    BuiltinFunction {
        name: "system_args",
        func: builtin_system_args,
    },
    BuiltinFunction {
        name: "system_exit",
        func: builtin_system_exit,
    },
    BuiltinFunction {
        name: "string_length",
        func: builtin_string_length,
    },
    BuiltinFunction {
        name: "string_concat",
        func: builtin_string_concat,
    },
    BuiltinFunction {
        name: "int_to_string",
        func: builtin_int_to_string,
    },
    BuiltinFunction {
        name: "string_to_int",
        func: builtin_string_to_int,
    },
];

pub fn get_builtin(name: &str) -> Option<&'static BuiltinFunction> {
    BUILTINS.iter().find(|b| b.name == name)
}

impl Runtime {
    /// Binds every builtin into `env` as a named function value.
    ///
    /// The functions close over a separate empty root scope rather than
    /// `env`, so installing them never makes `env` own itself.
    pub fn install_builtins(&mut self, env: EnvRef) -> RtResult<()> {
        let result = self.bind_builtins(env);
        self.checked(result)
    }

    fn bind_builtins(&mut self, env: EnvRef) -> RtResult<()> {
        self.scope(env)?;
        let closure = self.alloc_scope(None)?;
        let mut outcome = Ok(());
        for builtin in BUILTINS {
            outcome = self
                .function_create(builtin.func, closure, Some(builtin.name))
                .and_then(|function| {
                    let bound = self.env_bind(env, builtin.name, function);
                    self.release(function)?;
                    bound
                });
            if outcome.is_err() {
                break;
            }
        }
        self.heap.release(closure.0)?;
        tracing::debug!(count = BUILTINS.len(), "builtins installed");
        outcome
    }
}
