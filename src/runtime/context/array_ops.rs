use crate::runtime::{
    error::{RtResult, RuntimeError},
    heap::ValueRef,
    value::Value,
};

use super::Runtime;

impl Runtime {
    pub fn array_length(&mut self, array: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .array_items(array, "array_length")
            .map(|items| items.len() as i64)
            .and_then(|len| self.alloc_value(Value::Int(len)));
        self.checked(result)
    }

    pub fn array_len(&self, array: ValueRef) -> RtResult<usize> {
        self.array_items(array, "array_len").map(<[ValueRef]>::len)
    }

    /// Appends `value` in place.
    pub fn array_push(&mut self, array: ValueRef, value: ValueRef) -> RtResult<()> {
        let result = self.push_item(array, value);
        self.checked(result)
    }

    /// Owned reference to the element at the `Int` value `index`.
    pub fn array_get(&mut self, array: ValueRef, index: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .int_index(index, "array_get")
            .and_then(|index| self.element(array, index, "array_get"))
            .and_then(|item| self.heap.retain(item.0).map(|()| item));
        self.checked(result)
    }

    /// Replaces the element at `index` in place.
    pub fn array_set(&mut self, array: ValueRef, index: usize, value: ValueRef) -> RtResult<()> {
        let result = self.replace_item(array, index, value);
        self.checked(result)
    }

    /// Copy of `array` with the element at the `Int` value `index`
    /// replaced. `array` is unchanged.
    pub fn array_update(&mut self, array: ValueRef, index: ValueRef, value: ValueRef) -> RtResult<ValueRef> {
        let result = self.copy_with_item(array, index, value);
        self.checked(result)
    }

    pub(crate) fn array_items(&self, array: ValueRef, op: &str) -> RtResult<&[ValueRef]> {
        match self.value(array)? {
            Value::Array(items) => Ok(items.as_slice()),
            other => Err(RuntimeError::expected(op, "Array", other.type_name())),
        }
    }

    fn int_index(&self, index: ValueRef, op: &str) -> RtResult<i64> {
        match self.value(index)? {
            Value::Int(n) => Ok(*n),
            other => Err(RuntimeError::expected(op, "Int index", other.type_name())),
        }
    }

    fn element(&self, array: ValueRef, index: i64, op: &str) -> RtResult<ValueRef> {
        let items = self.array_items(array, op)?;
        usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i).copied())
            .ok_or_else(|| out_of_bounds(op, index, items.len()))
    }

    fn push_item(&mut self, array: ValueRef, value: ValueRef) -> RtResult<()> {
        self.array_items(array, "array_push")?;
        self.value(value)?;
        self.heap.retain(value.0)?;
        if let Value::Array(items) = self.value_mut(array)? {
            items.push(value);
        }
        Ok(())
    }

    fn replace_item(&mut self, array: ValueRef, index: usize, value: ValueRef) -> RtResult<()> {
        let len = self.array_items(array, "array_set")?.len();
        if index >= len {
            return Err(out_of_bounds("array_set", index as i64, len));
        }
        self.value(value)?;
        self.heap.retain(value.0)?;
        let previous = match self.value_mut(array)? {
            Value::Array(items) => std::mem::replace(&mut items[index], value),
            _ => value,
        };
        self.heap.release(previous.0)?;
        Ok(())
    }

    fn copy_with_item(&mut self, array: ValueRef, index: ValueRef, value: ValueRef) -> RtResult<ValueRef> {
        let index = self.int_index(index, "array_update")?;
        self.element(array, index, "array_update")?;
        self.value(value)?;
        let mut items = self.array_items(array, "array_update")?.to_vec();
        // `element` succeeded, so the index is in range.
        items[index as usize] = value;
        self.alloc_compound(Value::Array(items))
    }
}

fn out_of_bounds(op: &str, index: i64, len: usize) -> RuntimeError {
    RuntimeError::InvalidFunctionCall(format!(
        "{}: index {} out of bounds for array of length {}",
        op, index, len
    ))
}
