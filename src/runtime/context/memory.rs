use crate::runtime::{
    error::RtResult,
    heap::ValueRef,
    value::{Value, ValueKind},
};

use super::Runtime;

impl Runtime {
    /// Adds an owner to `v` and hands the same handle back.
    pub fn retain(&mut self, v: ValueRef) -> RtResult<ValueRef> {
        let result = self.heap.retain(v.0).map(|()| v);
        self.checked(result)
    }

    /// Drops an owner of `v`. At zero the value and every child it owned
    /// exclusively are freed. Releasing a value that is already gone is an
    /// error and leaves the heap untouched.
    pub fn release(&mut self, v: ValueRef) -> RtResult<()> {
        let result = self.heap.release(v.0).map(|_| ());
        self.checked(result)
    }

    /// Releases every handle in `values`, reporting the first failure.
    pub fn release_all(&mut self, values: &[ValueRef]) -> RtResult<()> {
        let mut first_error = None;
        for value in values {
            if let Err(err) = self.release(*value) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn ref_count(&self, v: ValueRef) -> RtResult<u32> {
        self.heap.ref_count(v.0)
    }

    pub fn is_live(&self, v: ValueRef) -> bool {
        self.heap.is_live(v.0)
    }

    pub fn kind_of(&self, v: ValueRef) -> RtResult<ValueKind> {
        self.value(v).map(Value::kind)
    }

    /// Independent copy for scalars, shared handle for everything else.
    ///
    /// Lists, records, arrays, refs, functions, constructors, classes and
    /// objects are not deep-copied: the result is `v` with one more owner.
    pub fn copy(&mut self, v: ValueRef) -> RtResult<ValueRef> {
        let result = self.copy_value(v);
        self.checked(result)
    }

    fn copy_value(&mut self, v: ValueRef) -> RtResult<ValueRef> {
        match self.scalar_copy(v)? {
            Some(copied) => self.alloc_value(copied),
            None => {
                self.heap.retain(v.0)?;
                Ok(v)
            }
        }
    }

    fn scalar_copy(&self, v: ValueRef) -> RtResult<Option<Value>> {
        Ok(match self.value(v)? {
            Value::Int(n) => Some(Value::Int(*n)),
            Value::Float(f) => Some(Value::Float(*f)),
            Value::String(s) => Some(Value::String(s.clone())),
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::Unit => Some(Value::Unit),
            _ => None,
        })
    }
}
