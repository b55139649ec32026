use crate::runtime::{
    NativeFn,
    error::{RtResult, RuntimeError},
    heap::{EnvRef, ValueRef},
    value::{Constructor, Function, Value},
};

use super::Runtime;

impl Runtime {
    pub fn int(&mut self, value: i64) -> RtResult<ValueRef> {
        let result = self.alloc_value(Value::Int(value));
        self.checked(result)
    }

    pub fn float(&mut self, value: f64) -> RtResult<ValueRef> {
        let result = self.alloc_value(Value::Float(value));
        self.checked(result)
    }

    pub fn string(&mut self, value: impl Into<String>) -> RtResult<ValueRef> {
        let result = self.alloc_value(Value::String(value.into()));
        self.checked(result)
    }

    pub fn bool(&mut self, value: bool) -> RtResult<ValueRef> {
        let result = self.alloc_value(Value::Bool(value));
        self.checked(result)
    }

    pub fn unit(&mut self) -> RtResult<ValueRef> {
        let result = self.alloc_value(Value::Unit);
        self.checked(result)
    }

    pub fn list_empty(&mut self) -> RtResult<ValueRef> {
        let result = self.alloc_value(Value::List(Vec::new()));
        self.checked(result)
    }

    /// Builds a list holding `items` in order. Each item is retained.
    pub fn list_from_values(&mut self, items: &[ValueRef]) -> RtResult<ValueRef> {
        let result = self.alloc_compound(Value::List(items.to_vec()));
        self.checked(result)
    }

    pub fn record_create(&mut self) -> RtResult<ValueRef> {
        let result = self.alloc_value(Value::Record(Vec::new()));
        self.checked(result)
    }

    pub fn record_empty(&mut self) -> RtResult<ValueRef> {
        self.record_create()
    }

    pub fn array_empty(&mut self) -> RtResult<ValueRef> {
        self.array_create(0)
    }

    /// Empty array with room for `capacity` elements.
    ///
    /// A capacity that cannot be reserved is an out-of-memory error.
    pub fn array_create(&mut self, capacity: usize) -> RtResult<ValueRef> {
        let mut items = Vec::new();
        let result = match items.try_reserve(capacity) {
            Ok(()) => self.alloc_value(Value::Array(items)),
            Err(err) => Err(RuntimeError::OutOfMemory(format!(
                "array_create: cannot reserve {} elements: {}",
                capacity, err
            ))),
        };
        self.checked(result)
    }

    /// Array holding `values` in order. Each value is retained.
    pub fn array_from_values(&mut self, values: &[ValueRef]) -> RtResult<ValueRef> {
        let result = self.alloc_compound(Value::Array(values.to_vec()));
        self.checked(result)
    }

    /// Mutable cell initialized with `value`, which is retained.
    pub fn ref_create(&mut self, value: ValueRef) -> RtResult<ValueRef> {
        let result = self.alloc_compound(Value::Ref(value));
        self.checked(result)
    }

    /// Function value closing over `closure`, which is retained.
    pub fn function_create(
        &mut self,
        code: NativeFn,
        closure: EnvRef,
        name: Option<&str>,
    ) -> RtResult<ValueRef> {
        let result = self.scope(closure).map(|_| ()).and_then(|()| {
            self.alloc_compound(Value::Function(Function {
                code,
                closure,
                name: name.map(str::to_string),
            }))
        });
        self.checked(result)
    }

    /// Variant constructor `name` applied to `payload`, which is retained.
    pub fn constructor_create(&mut self, name: &str, payload: ValueRef) -> RtResult<ValueRef> {
        let result = self.alloc_compound(Value::Constructor(Constructor {
            name: name.to_string(),
            payload,
        }));
        self.checked(result)
    }

    pub fn constructor_name(&self, v: ValueRef) -> RtResult<String> {
        match self.value(v)? {
            Value::Constructor(constructor) => Ok(constructor.name.clone()),
            other => Err(RuntimeError::expected(
                "constructor_name",
                "Constructor",
                other.type_name(),
            )),
        }
    }

    /// Owned reference to the constructor's payload.
    pub fn constructor_payload(&mut self, v: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .payload_of(v)
            .and_then(|payload| self.heap.retain(payload.0).map(|()| payload));
        self.checked(result)
    }

    fn payload_of(&self, v: ValueRef) -> RtResult<ValueRef> {
        match self.value(v)? {
            Value::Constructor(constructor) => Ok(constructor.payload),
            other => Err(RuntimeError::expected(
                "constructor_payload",
                "Constructor",
                other.type_name(),
            )),
        }
    }

    /// Reads an `Int` without allocating.
    pub fn as_int(&self, v: ValueRef) -> RtResult<i64> {
        match self.value(v)? {
            Value::Int(n) => Ok(*n),
            other => Err(RuntimeError::expected("as_int", "Int", other.type_name())),
        }
    }

    pub fn as_float(&self, v: ValueRef) -> RtResult<f64> {
        match self.value(v)? {
            Value::Float(f) => Ok(*f),
            other => Err(RuntimeError::expected("as_float", "Float", other.type_name())),
        }
    }

    pub fn as_bool(&self, v: ValueRef) -> RtResult<bool> {
        match self.value(v)? {
            Value::Bool(b) => Ok(*b),
            other => Err(RuntimeError::expected("as_bool", "Bool", other.type_name())),
        }
    }

    pub fn as_str(&self, v: ValueRef) -> RtResult<&str> {
        match self.value(v)? {
            Value::String(s) => Ok(s.as_str()),
            other => Err(RuntimeError::expected("as_str", "String", other.type_name())),
        }
    }
}
