use std::cmp::Ordering;

use crate::runtime::{
    error::{RtResult, RuntimeError},
    heap::ValueRef,
    value::Value,
};

use super::Runtime;

impl Runtime {
    /// Value equality without allocating.
    ///
    /// Scalars compare by content and never across kinds, so `Int(1)` and
    /// `Float(1.0)` are different. Every other kind compares by identity.
    pub fn equals(&self, a: ValueRef, b: ValueRef) -> RtResult<bool> {
        let left = self.value(a)?;
        let right = self.value(b)?;
        Ok(left.scalar_eq(right).unwrap_or(a == b))
    }

    pub fn equal(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .equals(a, b)
            .and_then(|eq| self.alloc_value(Value::Bool(eq)));
        self.checked(result)
    }

    pub fn not_equal(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .equals(a, b)
            .and_then(|eq| self.alloc_value(Value::Bool(!eq)));
        self.checked(result)
    }

    pub fn less_than(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        self.ordering("compare", a, b, Ordering::is_lt)
    }

    pub fn less_equal(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        self.ordering("compare", a, b, Ordering::is_le)
    }

    pub fn greater_than(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        self.ordering("compare", a, b, Ordering::is_gt)
    }

    pub fn greater_equal(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        self.ordering("compare", a, b, Ordering::is_ge)
    }

    pub fn logical_and(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .bools("and", a, b)
            .and_then(|(l, r)| self.alloc_value(Value::Bool(l && r)));
        self.checked(result)
    }

    pub fn logical_or(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .bools("or", a, b)
            .and_then(|(l, r)| self.alloc_value(Value::Bool(l || r)));
        self.checked(result)
    }

    pub fn logical_not(&mut self, a: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .value(a)
            .and_then(|value| match value {
                Value::Bool(b) => Ok(*b),
                other => Err(RuntimeError::expected("not", "Bool", other.type_name())),
            })
            .and_then(|b| self.alloc_value(Value::Bool(!b)));
        self.checked(result)
    }

    fn ordering(
        &mut self,
        verb: &str,
        a: ValueRef,
        b: ValueRef,
        accept: fn(Ordering) -> bool,
    ) -> RtResult<ValueRef> {
        let result = self
            .compare_numbers(verb, a, b)
            .and_then(|ordering| self.alloc_value(Value::Bool(ordering.is_some_and(accept))));
        self.checked(result)
    }

    /// Numeric ordering with Int/Float promotion. `None` when a NaN is
    /// involved, which makes every ordering test false.
    fn compare_numbers(&self, verb: &str, a: ValueRef, b: ValueRef) -> RtResult<Option<Ordering>> {
        let left = self.value(a)?;
        let right = self.value(b)?;
        match (left, right) {
            (Value::Int(l), Value::Int(r)) => Ok(Some(l.cmp(r))),
            (Value::Float(l), Value::Float(r)) => Ok(l.partial_cmp(r)),
            (Value::Int(l), Value::Float(r)) => Ok((*l as f64).partial_cmp(r)),
            (Value::Float(l), Value::Int(r)) => Ok(l.partial_cmp(&(*r as f64))),
            _ => Err(RuntimeError::invalid_operands(
                verb,
                left.type_name(),
                right.type_name(),
            )),
        }
    }

    fn bools(&self, verb: &str, a: ValueRef, b: ValueRef) -> RtResult<(bool, bool)> {
        match (self.value(a)?, self.value(b)?) {
            (Value::Bool(l), Value::Bool(r)) => Ok((*l, *r)),
            (left, right) => Err(RuntimeError::invalid_operands(
                verb,
                left.type_name(),
                right.type_name(),
            )),
        }
    }
}
