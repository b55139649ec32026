use crate::runtime::{
    error::{RtResult, RuntimeError},
    heap::ValueRef,
    value::Value,
};

use super::Runtime;

impl Runtime {
    /// Owned reference to the cell's current content.
    pub fn ref_get(&mut self, cell: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .ref_content(cell, "ref_get")
            .and_then(|content| self.heap.retain(content.0).map(|()| content));
        self.checked(result)
    }

    /// Stores `value` in the cell and releases the previous content.
    pub fn ref_set(&mut self, cell: ValueRef, value: ValueRef) -> RtResult<()> {
        let result = self.store(cell, value);
        self.checked(result)
    }

    fn ref_content(&self, cell: ValueRef, op: &str) -> RtResult<ValueRef> {
        match self.value(cell)? {
            Value::Ref(content) => Ok(*content),
            other => Err(RuntimeError::expected(op, "Ref", other.type_name())),
        }
    }

    fn store(&mut self, cell: ValueRef, value: ValueRef) -> RtResult<()> {
        self.ref_content(cell, "ref_set")?;
        self.value(value)?;
        self.heap.retain(value.0)?;
        let previous = match self.value_mut(cell)? {
            Value::Ref(content) => std::mem::replace(content, value),
            _ => value,
        };
        self.heap.release(previous.0)?;
        Ok(())
    }
}
