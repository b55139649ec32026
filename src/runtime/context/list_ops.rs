use crate::runtime::{
    error::{RtResult, RuntimeError},
    heap::ValueRef,
    value::Value,
};

use super::Runtime;

impl Runtime {
    /// Prepends `head` to `tail`.
    ///
    /// The result does not share structure with `tail`: every element of
    /// `tail` gets a fresh node in the new list, so `cons` costs O(len).
    pub fn list_cons(&mut self, head: ValueRef, tail: ValueRef) -> RtResult<ValueRef> {
        let result = self.value(head).map(|_| ()).and_then(|()| {
            let rest = self.list_items(tail, "list_cons")?;
            let mut items = Vec::with_capacity(rest.len() + 1);
            items.push(head);
            items.extend_from_slice(rest);
            self.alloc_compound(Value::List(items))
        });
        self.checked(result)
    }

    /// First element. Fails on the empty list.
    pub fn list_head(&mut self, list: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .list_items(list, "list_head")
            .and_then(|items| {
                items.first().copied().ok_or_else(|| {
                    RuntimeError::InvalidFunctionCall("head of an empty list".to_string())
                })
            })
            .and_then(|head| self.heap.retain(head.0).map(|()| head));
        self.checked(result)
    }

    /// Fresh list of every element after the first. The tail of the empty
    /// list is the empty list.
    pub fn list_tail(&mut self, list: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .list_items(list, "list_tail")
            .map(|items| items.get(1..).unwrap_or_default().to_vec())
            .and_then(|rest| self.alloc_compound(Value::List(rest)));
        self.checked(result)
    }

    pub fn list_is_empty(&mut self, list: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .list_items(list, "list_is_empty")
            .map(|items| items.is_empty())
            .and_then(|empty| self.alloc_value(Value::Bool(empty)));
        self.checked(result)
    }

    pub fn list_length(&mut self, list: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .list_items(list, "list_length")
            .map(|items| items.len() as i64)
            .and_then(|len| self.alloc_value(Value::Int(len)));
        self.checked(result)
    }

    /// Length without allocating.
    pub fn list_len(&self, list: ValueRef) -> RtResult<usize> {
        self.list_items(list, "list_len").map(<[ValueRef]>::len)
    }

    /// Borrowed view of a list's elements, head first.
    pub(crate) fn list_items(&self, list: ValueRef, op: &str) -> RtResult<&[ValueRef]> {
        match self.value(list)? {
            Value::List(items) => Ok(items.as_slice()),
            other => Err(RuntimeError::expected(op, "List", other.type_name())),
        }
    }
}
