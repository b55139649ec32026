use crate::runtime::{
    environment::{Binding, BindingSlot},
    error::{RtResult, RuntimeError},
    heap::{EnvRef, ValueRef},
};

use super::Runtime;

impl Runtime {
    /// New empty scope. The parent, if any, is retained by the new scope.
    pub fn env_create(&mut self, parent: Option<EnvRef>) -> RtResult<EnvRef> {
        let result = self.alloc_scope(parent);
        self.checked(result)
    }

    pub fn env_retain(&mut self, env: EnvRef) -> RtResult<EnvRef> {
        let result = self
            .scope(env)
            .map(|_| ())
            .and_then(|()| self.heap.retain(env.0))
            .map(|()| env);
        self.checked(result)
    }

    /// Drops an owner of `env`. At zero every strong binding is released,
    /// followed by the parent scope.
    pub fn env_release(&mut self, env: EnvRef) -> RtResult<()> {
        let result = self
            .scope(env)
            .map(|_| ())
            .and_then(|()| self.heap.release(env.0))
            .map(|_| ());
        self.checked(result)
    }

    /// Binds `name` to `value` in `env` itself, never in a parent.
    ///
    /// An existing local binding is replaced in place; otherwise a new
    /// binding is added. The scope takes its own count on `value`.
    pub fn env_bind(&mut self, env: EnvRef, name: &str, value: ValueRef) -> RtResult<()> {
        let result = self.bind_slot(env, name, value, BindingSlot::Strong(value));
        self.checked(result)
    }

    /// Binds `name` to `value` without owning it.
    ///
    /// Meant for a function bound into the scope it closes over: a strong
    /// binding there forms a cycle that reference counting never reclaims.
    /// Once every other owner releases `value`, looking `name` up fails with
    /// an undefined-variable error.
    pub fn env_bind_recursive(&mut self, env: EnvRef, name: &str, value: ValueRef) -> RtResult<()> {
        let result = self.bind_slot(env, name, value, BindingSlot::Weak(value));
        self.checked(result)
    }

    /// Looks `name` up in `env` and then in each parent in turn.
    ///
    /// Returns an owned reference to the bound value.
    pub fn env_lookup(&mut self, env: EnvRef, name: &str) -> RtResult<ValueRef> {
        let result = self.resolve(env, name).and_then(|value| {
            self.heap.retain(value.0)?;
            Ok(value)
        });
        self.checked(result)
    }

    /// Whether `name` resolves from `env` without error.
    pub fn env_contains(&self, env: EnvRef, name: &str) -> bool {
        self.resolve(env, name).is_ok()
    }

    /// Drops every local binding of `env`, releasing the strong ones.
    ///
    /// This is the explicit way to break a cycle created with `env_bind`
    /// when a closure captured the scope it is bound in.
    pub fn env_clear(&mut self, env: EnvRef) -> RtResult<()> {
        let result = self.clear_scope(env);
        self.checked(result)
    }

    /// Owned reference to the parent scope, if any.
    pub fn env_parent(&mut self, env: EnvRef) -> RtResult<Option<EnvRef>> {
        let result = self.scope(env).map(|scope| scope.parent()).and_then(|parent| {
            if let Some(parent) = parent {
                self.heap.retain(parent.0)?;
            }
            Ok(parent)
        });
        self.checked(result)
    }

    /// Number of bindings held directly by `env`.
    pub fn env_len(&self, env: EnvRef) -> RtResult<usize> {
        self.scope(env).map(|scope| scope.len())
    }

    fn bind_slot(
        &mut self,
        env: EnvRef,
        name: &str,
        value: ValueRef,
        slot: BindingSlot,
    ) -> RtResult<()> {
        self.scope(env)?;
        self.value(value)?;
        if let BindingSlot::Strong(value) = slot {
            self.heap.retain(value.0)?;
        }

        let scope = self.scope_mut(env)?;
        let previous = match scope.find_mut(name) {
            Some(binding) => Some(std::mem::replace(&mut binding.slot, slot)),
            None => {
                scope.bindings.push(Binding {
                    name: name.to_string(),
                    slot,
                });
                None
            }
        };

        if let Some(BindingSlot::Strong(old)) = previous {
            self.heap.release(old.0)?;
        }
        Ok(())
    }

    /// Borrowed lookup. Walks the chain iteratively so deep scope chains
    /// cost no native stack.
    pub(crate) fn resolve(&self, env: EnvRef, name: &str) -> RtResult<ValueRef> {
        let mut current = Some(env);
        while let Some(env) = current {
            let scope = self.scope(env)?;
            match scope.find(name) {
                Some(BindingSlot::Strong(value)) => return Ok(value),
                Some(BindingSlot::Weak(value)) if self.heap.is_live(value.0) => return Ok(value),
                Some(BindingSlot::Weak(_)) => {
                    return Err(RuntimeError::UndefinedVariable(name.to_string()));
                }
                None => current = scope.parent(),
            }
        }
        Err(RuntimeError::UndefinedVariable(name.to_string()))
    }

    fn clear_scope(&mut self, env: EnvRef) -> RtResult<()> {
        let bindings = std::mem::take(&mut self.scope_mut(env)?.bindings);
        let mut first_error = None;
        for binding in bindings {
            if let BindingSlot::Strong(value) = binding.slot {
                if let Err(err) = self.heap.release(value.0) {
                    first_error.get_or_insert(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
