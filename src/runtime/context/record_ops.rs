use crate::runtime::{
    error::{RtResult, RuntimeError},
    heap::ValueRef,
    value::{RecordField, Value},
};

use super::Runtime;

impl Runtime {
    /// Sets `name` on `record` in place, adding the field if it is new.
    pub fn record_set_field(&mut self, record: ValueRef, name: &str, value: ValueRef) -> RtResult<()> {
        let result = self.upsert_field(record, name, value);
        self.checked(result)
    }

    /// Owned reference to the value of field `name`.
    pub fn record_get_field(&mut self, record: ValueRef, name: &str) -> RtResult<ValueRef> {
        let result = self
            .find_field(record, name, "record_get_field")
            .and_then(|found| found.ok_or_else(|| RuntimeError::FieldNotFound(name.to_string())))
            .and_then(|value| self.heap.retain(value.0).map(|()| value));
        self.checked(result)
    }

    /// `Bool` telling whether `record` has field `name`.
    ///
    /// Anything that is not a record simply has no fields; only a failed
    /// allocation is reported as an error.
    pub fn record_has_field(&mut self, record: ValueRef, name: &str) -> RtResult<ValueRef> {
        let present = matches!(self.find_field(record, name, "record_has_field"), Ok(Some(_)));
        let result = self.alloc_value(Value::Bool(present));
        self.checked(result)
    }

    /// Copy of `record` with `name` set to `value`. `record` is unchanged.
    pub fn record_update(&mut self, record: ValueRef, name: &str, value: ValueRef) -> RtResult<ValueRef> {
        let result = self.copy_with_field(record, name, value);
        self.checked(result)
    }

    pub fn record_field_count(&self, record: ValueRef) -> RtResult<usize> {
        self.record_fields(record, "record_field_count").map(<[RecordField]>::len)
    }

    /// Field names, newest first.
    pub fn record_field_names(&self, record: ValueRef) -> RtResult<Vec<String>> {
        self.record_fields(record, "record_field_names")
            .map(|fields| fields.iter().map(|field| field.name.clone()).collect())
    }

    pub(crate) fn record_fields(&self, record: ValueRef, op: &str) -> RtResult<&[RecordField]> {
        match self.value(record)? {
            Value::Record(fields) => Ok(fields.as_slice()),
            other => Err(RuntimeError::expected(op, "Record", other.type_name())),
        }
    }

    /// Borrowed lookup; `Ok(None)` when the record lacks the field.
    pub(crate) fn find_field(&self, record: ValueRef, name: &str, op: &str) -> RtResult<Option<ValueRef>> {
        self.record_fields(record, op).map(|fields| {
            fields
                .iter()
                .find(|field| field.name == name)
                .map(|field| field.value)
        })
    }

    /// In-place upsert. New fields go first; a replaced value is released.
    pub(crate) fn upsert_field(&mut self, record: ValueRef, name: &str, value: ValueRef) -> RtResult<()> {
        self.record_fields(record, "record_set_field")?;
        self.value(value)?;
        self.heap.retain(value.0)?;

        let Value::Record(fields) = self.value_mut(record)? else {
            return Err(RuntimeError::expected("record_set_field", "Record", "another value"));
        };
        let previous = match fields.iter().position(|field| field.name == name) {
            Some(at) => Some(std::mem::replace(&mut fields[at].value, value)),
            None => {
                fields.insert(
                    0,
                    RecordField {
                        name: name.to_string(),
                        value,
                    },
                );
                None
            }
        };

        if let Some(old) = previous {
            self.heap.release(old.0)?;
        }
        Ok(())
    }

    fn copy_with_field(&mut self, record: ValueRef, name: &str, value: ValueRef) -> RtResult<ValueRef> {
        self.value(value)?;
        let fields = self.record_fields(record, "record_update")?;
        let mut replaced = false;
        let mut copied: Vec<RecordField> = fields
            .iter()
            .map(|field| {
                let value = if field.name == name {
                    replaced = true;
                    value
                } else {
                    field.value
                };
                RecordField {
                    name: field.name.clone(),
                    value,
                }
            })
            .collect();
        if !replaced {
            copied.insert(
                0,
                RecordField {
                    name: name.to_string(),
                    value,
                },
            );
        }
        self.alloc_compound(Value::Record(copied))
    }
}
