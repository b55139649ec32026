use std::rc::Rc;

use crate::runtime::{
    MethodFn,
    class::{Class, Method, Object},
    error::{RtResult, RuntimeError},
    heap::{EnvRef, ValueRef},
    value::Value,
};

use super::Runtime;

/// Name under which a method sees its receiver. Classes may not use it as a
/// field name.
const RECEIVER_BINDING: &str = "self";

/// What dispatch needs from an object, copied out of the heap so the method
/// body can freely mutate it.
struct Receiver {
    method: Rc<Method>,
    class: ValueRef,
    fields: Vec<ValueRef>,
}

impl Runtime {
    /// Defines class `name` and registers it under that name.
    ///
    /// A field named `self` is rejected with a type mismatch.
    ///
    /// Registering a name a second time replaces the registry entry. Objects
    /// built from the earlier class keep working; they hold their own
    /// reference to it.
    pub fn class_create(
        &mut self,
        name: &str,
        superclass: Option<&str>,
        field_names: &[&str],
    ) -> RtResult<ValueRef> {
        let result = self.define_class(name, superclass, field_names);
        self.checked(result)
    }

    /// Appends a method to `class`.
    ///
    /// Existing objects are unaffected: they dispatch through the method
    /// list captured when they were created.
    pub fn class_add_method(
        &mut self,
        class: ValueRef,
        name: &str,
        implementation: MethodFn,
        param_names: &[&str],
    ) -> RtResult<()> {
        let result = self.class_mut(class, "class_add_method").map(|class| {
            class.methods.push(Rc::new(Method {
                name: name.to_string(),
                implementation,
                param_names: param_names.iter().map(|p| p.to_string()).collect(),
            }));
        });
        self.checked(result)
    }

    /// Owned reference to the class registered as `name`.
    pub fn class_lookup(&mut self, name: &str) -> RtResult<ValueRef> {
        let result = self
            .registered_class(name)
            .and_then(|class| self.heap.retain(class.0).map(|()| class));
        self.checked(result)
    }

    pub fn class_name(&self, class: ValueRef) -> RtResult<String> {
        self.class_ref(class, "class_name").map(|class| class.name.clone())
    }

    pub fn class_superclass(&self, class: ValueRef) -> RtResult<Option<String>> {
        self.class_ref(class, "class_superclass")
            .map(|class| class.superclass.clone())
    }

    pub fn class_field_names(&self, class: ValueRef) -> RtResult<Vec<String>> {
        self.class_ref(class, "class_field_names")
            .map(|class| class.field_names.clone())
    }

    /// Instantiates the class registered as `class_name`.
    ///
    /// `field_values` line up with the class's field names. With
    /// `strict_field_arity` the counts must match exactly.
    pub fn object_create(&mut self, class_name: &str, field_values: &[ValueRef]) -> RtResult<ValueRef> {
        let result = self.instantiate(class_name, field_values);
        self.checked(result)
    }

    pub fn object_class_name(&self, object: ValueRef) -> RtResult<String> {
        self.object_ref(object, "object_class_name")
            .map(|object| object.class_name.clone())
    }

    /// Owned reference to the object's field `name`.
    pub fn object_field(&mut self, object: ValueRef, name: &str) -> RtResult<ValueRef> {
        let result = self.field_of(object, name).and_then(|value| {
            self.heap.retain(value.0)?;
            Ok(value)
        });
        self.checked(result)
    }

    /// Installs the scope every method environment is parented to.
    ///
    /// The runtime keeps its own count on `env` until it is replaced or the
    /// runtime shuts down.
    pub fn set_global_env(&mut self, env: Option<EnvRef>) -> RtResult<()> {
        let result = self.install_global_env(env);
        self.checked(result)
    }

    /// Invokes method `name` on `object`.
    ///
    /// The method body runs in a fresh scope whose parent is the global
    /// method environment. `self` is bound to the receiver, then each field
    /// is bound under its declared name. The scope is released on return.
    #[tracing::instrument(level = "debug", skip(self, args), fields(argc = args.len()))]
    pub fn method_call(&mut self, object: ValueRef, name: &str, args: &[ValueRef]) -> RtResult<ValueRef> {
        let result = self.dispatch(object, name, args);
        self.checked(result)
    }

    fn define_class(
        &mut self,
        name: &str,
        superclass: Option<&str>,
        field_names: &[&str],
    ) -> RtResult<ValueRef> {
        if field_names.contains(&RECEIVER_BINDING) {
            return Err(RuntimeError::TypeMismatch(format!(
                "class {}: field name `{}` is reserved for the receiver",
                name, RECEIVER_BINDING
            )));
        }
        let registry = self.ensure_class_registry()?;
        let class = self.alloc_value(Value::Class(Class {
            name: name.to_string(),
            superclass: superclass.map(str::to_string),
            field_names: field_names.iter().map(|f| f.to_string()).collect(),
            methods: Vec::new(),
        }))?;

        if self.find_field(registry, name, "class_create")?.is_some() {
            tracing::warn!(class = name, "class re-registered, replacing previous definition");
        }
        if let Err(err) = self.upsert_field(registry, name, class) {
            self.heap.release(class.0)?;
            return Err(err);
        }
        tracing::debug!(class = name, fields = field_names.len(), "class registered");
        Ok(class)
    }

    fn registered_class(&mut self, name: &str) -> RtResult<ValueRef> {
        let registry = self.ensure_class_registry()?;
        let found = self.find_field(registry, name, "class_lookup")?;
        match found.map(|class| (class, self.value(class))) {
            Some((class, Ok(Value::Class(_)))) => Ok(class),
            _ => Err(RuntimeError::UndefinedVariable(name.to_string())),
        }
    }

    fn class_ref(&self, class: ValueRef, op: &str) -> RtResult<&Class> {
        match self.value(class)? {
            Value::Class(class) => Ok(class),
            other => Err(RuntimeError::expected(op, "Class", other.type_name())),
        }
    }

    fn class_mut(&mut self, class: ValueRef, op: &str) -> RtResult<&mut Class> {
        match self.value_mut(class)? {
            Value::Class(class) => Ok(class),
            other => Err(RuntimeError::expected(op, "Class", other.type_name())),
        }
    }

    fn object_ref(&self, object: ValueRef, op: &str) -> RtResult<&Object> {
        match self.value(object)? {
            Value::Object(object) => Ok(object),
            other => Err(RuntimeError::expected(op, "Object", other.type_name())),
        }
    }

    fn instantiate(&mut self, class_name: &str, field_values: &[ValueRef]) -> RtResult<ValueRef> {
        let class_ref = self.registered_class(class_name)?;
        for value in field_values {
            self.value(*value)?;
        }

        let class = self.class_ref(class_ref, "object_create")?;
        if self.config().strict_field_arity && class.field_names.len() != field_values.len() {
            return Err(RuntimeError::TypeMismatch(format!(
                "class {} has {} fields, got {} values",
                class_name,
                class.field_names.len(),
                field_values.len()
            )));
        }
        let methods = class.methods.clone();

        self.alloc_compound(Value::Object(Object {
            class_name: class_name.to_string(),
            class: class_ref,
            fields: field_values.to_vec(),
            methods,
        }))
    }

    fn field_of(&self, object: ValueRef, name: &str) -> RtResult<ValueRef> {
        let instance = self.object_ref(object, "object_field")?;
        let class = self.class_ref(instance.class, "object_field")?;
        class
            .field_names
            .iter()
            .zip(&instance.fields)
            .find(|(field, _)| *field == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| RuntimeError::FieldNotFound(name.to_string()))
    }

    fn install_global_env(&mut self, env: Option<EnvRef>) -> RtResult<()> {
        if let Some(env) = env {
            self.scope(env)?;
            self.heap.retain(env.0)?;
        }
        if let Some(previous) = self.replace_global_env(env) {
            self.heap.release(previous.0)?;
        }
        Ok(())
    }

    fn receiver(&self, object: ValueRef, name: &str) -> RtResult<Receiver> {
        let instance = self.object_ref(object, "method_call")?;
        let method = instance.find_method(name).cloned().ok_or_else(|| {
            RuntimeError::FieldNotFound(format!("{}.{}", instance.class_name, name))
        })?;
        Ok(Receiver {
            method,
            class: instance.class,
            fields: instance.fields.clone(),
        })
    }

    fn dispatch(&mut self, object: ValueRef, name: &str, args: &[ValueRef]) -> RtResult<ValueRef> {
        let receiver = self.receiver(object, name)?;
        let method = &receiver.method;
        if self.config().enforce_method_arity && method.param_count() != args.len() {
            return Err(RuntimeError::InvalidFunctionCall(format!(
                "method {} expects {} arguments, got {}",
                name,
                method.param_count(),
                args.len()
            )));
        }

        let parent = self.global_env();
        let env = self.alloc_scope(parent)?;
        let outcome = self
            .bind_receiver(env, object, &receiver)
            .and_then(|()| (method.implementation)(self, env, args));
        self.heap.release(env.0)?;
        tracing::debug!(method = name, ok = outcome.is_ok(), "method returned");
        outcome
    }

    fn bind_receiver(&mut self, env: EnvRef, object: ValueRef, receiver: &Receiver) -> RtResult<()> {
        self.env_bind(env, RECEIVER_BINDING, object)?;
        let field_names = self.class_field_names(receiver.class)?;
        for (field, value) in field_names.iter().zip(&receiver.fields) {
            self.env_bind(env, field, *value)?;
        }
        Ok(())
    }
}
