use crate::runtime::{
    config::RuntimeConfig,
    environment::Scope,
    error::{ErrorStatus, RtResult, RuntimeError},
    heap::{EnvRef, Handle, HeapObject, RcHeap, ValueRef},
    leak_detector::LeakStats,
    value::Value,
};

mod array_ops;
mod binary_ops;
mod class_ops;
mod comparison_ops;
mod constructors;
mod display;
mod env_ops;
mod function_call;
mod list_ops;
mod memory;
mod record_ops;
mod ref_ops;

/// Explicit runtime context.
///
/// Owns the heap, the class registry, the global method environment and the
/// recorded process arguments. Everything that used to be ambient process
/// state is reachable only through this value, and `shutdown` gives all of it
/// back deterministically.
#[derive(Debug)]
pub struct Runtime {
    pub(crate) heap: RcHeap,
    config: RuntimeConfig,
    class_registry: Option<ValueRef>,
    global_env: Option<EnvRef>,
    system_args: Vec<String>,
    last_error: ErrorStatus,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            heap: RcHeap::with_limit(config.max_live_values),
            config,
            class_registry: None,
            global_env: None,
            system_args: Vec::new(),
            last_error: ErrorStatus::Ok,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Status recorded by the most recent failing operation.
    ///
    /// Successful operations leave the status untouched.
    pub fn last_error(&self) -> ErrorStatus {
        self.last_error
    }

    pub fn clear_error(&mut self) {
        self.last_error = ErrorStatus::Ok;
    }

    /// Lets native code report a failure through the status channel.
    pub fn set_error(&mut self, status: ErrorStatus) {
        self.last_error = status;
    }

    pub fn heap(&self) -> &RcHeap {
        &self.heap
    }

    pub fn live_count(&self) -> usize {
        self.heap.live_count()
    }

    pub fn stats(&self) -> LeakStats {
        self.heap.stats()
    }

    pub fn set_system_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_args = args.into_iter().map(Into::into).collect();
    }

    pub fn system_args(&self) -> &[String] {
        &self.system_args
    }

    /// Releases the class registry and the global method environment.
    ///
    /// Returns the number of heap objects still alive afterwards; anything
    /// non-zero is owned by a caller that never released it, or by a cycle.
    pub fn shutdown(&mut self) -> usize {
        if let Some(registry) = self.class_registry.take() {
            if let Err(err) = self.heap.release(registry.0) {
                tracing::warn!(%err, "class registry release failed");
            }
        }
        if let Some(env) = self.global_env.take() {
            if let Err(err) = self.heap.release(env.0) {
                tracing::warn!(%err, "global environment release failed");
            }
        }

        let live = self.heap.live_count();
        if live > 0 {
            tracing::warn!(live, stats = ?self.heap.stats(), "values alive at shutdown");
        }
        live
    }

    /// Records the status of a failed operation and passes the result through.
    pub(crate) fn checked<T>(&mut self, result: RtResult<T>) -> RtResult<T> {
        if let Err(err) = &result {
            tracing::debug!(code = err.code().code, %err, "runtime error");
            self.last_error = err.status();
        }
        result
    }

    pub(crate) fn value(&self, v: ValueRef) -> RtResult<&Value> {
        match self.heap.get(v.0)? {
            HeapObject::Value(value) => Ok(value),
            HeapObject::Environment(_) => Err(RuntimeError::TypeMismatch(
                "expected a value, found an environment".to_string(),
            )),
        }
    }

    pub(crate) fn value_mut(&mut self, v: ValueRef) -> RtResult<&mut Value> {
        match self.heap.get_mut(v.0)? {
            HeapObject::Value(value) => Ok(value),
            HeapObject::Environment(_) => Err(RuntimeError::TypeMismatch(
                "expected a value, found an environment".to_string(),
            )),
        }
    }

    pub(crate) fn scope(&self, env: EnvRef) -> RtResult<&Scope> {
        match self.heap.get(env.0)? {
            HeapObject::Environment(scope) => Ok(scope),
            HeapObject::Value(value) => Err(RuntimeError::TypeMismatch(format!(
                "expected an environment, found {}",
                value.type_name()
            ))),
        }
    }

    pub(crate) fn scope_mut(&mut self, env: EnvRef) -> RtResult<&mut Scope> {
        match self.heap.get_mut(env.0)? {
            HeapObject::Environment(scope) => Ok(scope),
            HeapObject::Value(value) => Err(RuntimeError::TypeMismatch(format!(
                "expected an environment, found {}",
                value.type_name()
            ))),
        }
    }

    /// Allocates a value that owns no handles.
    pub(crate) fn alloc_value(&mut self, value: Value) -> RtResult<ValueRef> {
        self.heap.alloc(HeapObject::Value(value)).map(ValueRef)
    }

    /// Allocates `object` after taking one count on every child it holds.
    ///
    /// The children are borrowed from the caller, who keeps its own counts.
    /// If the allocation fails the counts are given back.
    pub(crate) fn alloc_retaining(&mut self, object: HeapObject) -> RtResult<Handle> {
        let mut children = Vec::new();
        object.push_children(&mut children);
        for (taken, child) in children.iter().enumerate() {
            if let Err(err) = self.heap.retain(*child) {
                for undo in &children[..taken] {
                    self.heap.release(*undo)?;
                }
                return Err(err);
            }
        }
        match self.heap.alloc(object) {
            Ok(handle) => Ok(handle),
            Err(err) => {
                for child in &children {
                    self.heap.release(*child)?;
                }
                Err(err)
            }
        }
    }

    pub(crate) fn alloc_compound(&mut self, value: Value) -> RtResult<ValueRef> {
        self.alloc_retaining(HeapObject::Value(value)).map(ValueRef)
    }

    pub(crate) fn alloc_scope(&mut self, parent: Option<EnvRef>) -> RtResult<EnvRef> {
        if let Some(parent) = parent {
            self.scope(parent)?;
        }
        self.alloc_retaining(HeapObject::Environment(Scope::new(parent)))
            .map(EnvRef)
    }

    /// Registry record, created on first use.
    pub(crate) fn ensure_class_registry(&mut self) -> RtResult<ValueRef> {
        if let Some(registry) = self.class_registry {
            return Ok(registry);
        }
        let registry = self.alloc_value(Value::Record(Vec::new()))?;
        self.class_registry = Some(registry);
        Ok(registry)
    }

    pub(crate) fn global_env(&self) -> Option<EnvRef> {
        self.global_env
    }

    pub(crate) fn replace_global_env(&mut self, env: Option<EnvRef>) -> Option<EnvRef> {
        std::mem::replace(&mut self.global_env, env)
    }
}

#[cfg(test)]
mod class_ops_test;
#[cfg(test)]
mod function_call_test;
#[cfg(test)]
mod list_ops_test;
