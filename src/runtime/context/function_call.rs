use crate::runtime::{
    error::{RtResult, RuntimeError},
    heap::{EnvRef, ValueRef},
    value::Value,
    NativeFn,
};

use super::Runtime;

impl Runtime {
    /// Calls `func` with a single argument.
    ///
    /// The closure environment is held for the duration of the call, so the
    /// native code may release the function value itself without pulling the
    /// scope out from under its own frame.
    pub fn function_call(&mut self, func: ValueRef, arg: ValueRef) -> RtResult<ValueRef> {
        let result = self.invoke(func, arg);
        self.checked(result)
    }

    /// Calls a curried function with `args`, one argument at a time.
    ///
    /// Each intermediate result must itself be a function. With no
    /// arguments the function is returned with one more owner.
    pub fn apply(&mut self, func: ValueRef, args: &[ValueRef]) -> RtResult<ValueRef> {
        let result = self.apply_curried(func, args);
        self.checked(result)
    }

    pub fn function_name(&self, func: ValueRef) -> RtResult<Option<String>> {
        match self.value(func)? {
            Value::Function(function) => Ok(function.name.clone()),
            other => Err(RuntimeError::expected(
                "function_name",
                "Function",
                other.type_name(),
            )),
        }
    }

    fn callee(&self, func: ValueRef) -> RtResult<(NativeFn, EnvRef)> {
        match self.value(func)? {
            Value::Function(function) => Ok((function.code, function.closure)),
            other => Err(RuntimeError::InvalidFunctionCall(format!(
                "cannot call a value of type {}",
                other.type_name()
            ))),
        }
    }

    fn invoke(&mut self, func: ValueRef, arg: ValueRef) -> RtResult<ValueRef> {
        let (code, closure) = self.callee(func)?;
        self.value(arg)?;
        self.heap.retain(closure.0)?;
        let result = code(self, closure, arg);
        self.heap.release(closure.0)?;
        result
    }

    fn apply_curried(&mut self, func: ValueRef, args: &[ValueRef]) -> RtResult<ValueRef> {
        self.heap.retain(func.0)?;
        let mut current = func;
        for arg in args {
            let next = self.invoke(current, *arg);
            self.heap.release(current.0)?;
            current = next?;
        }
        Ok(current)
    }
}
