//! Embedded runtime for the Luoyan language.
//!
//! Compiled programs drive a [`Runtime`] through its value, scope,
//! collection and object operations. See [`runtime`] for the ownership
//! rules every operation follows.

pub mod runtime;

pub use runtime::{
    EnvRef, ErrorStatus, MethodFn, NativeFn, RtResult, Runtime, RuntimeError, ValueRef,
    config::RuntimeConfig,
};
