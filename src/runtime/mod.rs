//! Runtime core: values, memory, scopes, collections and the object system.
//!
//! # Ownership Model
//! Every value and every scope lives in a slot of the reference-counted
//! [`heap::RcHeap`] and is addressed through a `Copy` handle. The heap, not
//! the handle, tracks ownership:
//! - Every operation that returns a handle returns an owned one. The caller
//!   gives it back with `release` / `env_release`.
//! - Arguments are borrowed. An operation that stores an argument (a list
//!   element, a record field, a binding, a closure) takes its own count.
//! - Releasing the last count tears the object down and releases what it
//!   owned, without recursion.
//!
//! # Cycles
//! Reference counting does not reclaim cycles. Lists, constructors and
//! function values cannot form one on their own, but a function bound into
//! the scope it closes over can, and so can an array, record or ref that is
//! made to contain itself. Bind recursive functions with
//! `env_bind_recursive`, or break the cycle with `env_clear` before the
//! last release. `Runtime::shutdown` reports whatever is still live.

pub mod builtin_function;
pub mod builtins;
pub mod class;
pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod heap;
pub mod leak_detector;
pub mod value;

pub use context::Runtime;
pub use error::{ErrorStatus, RtResult, RuntimeError};
pub use heap::{EnvRef, ValueRef};

/// Entry point of a function value: `(runtime, closure scope, argument)`.
///
/// Multi-argument functions are curried.
pub type NativeFn = fn(&mut Runtime, EnvRef, ValueRef) -> RtResult<ValueRef>;

/// Entry point of a method: `(runtime, method scope, arguments)`.
pub type MethodFn = fn(&mut Runtime, EnvRef, &[ValueRef]) -> RtResult<ValueRef>;
