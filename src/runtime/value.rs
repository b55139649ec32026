use std::fmt;

use crate::runtime::{
    NativeFn,
    class::{Class, Object},
    heap::{EnvRef, Handle, ValueRef},
};

/// Runtime datum stored in a heap slot.
///
/// ## Memory Management Model
///
/// Every value, scalar or not, occupies its own reference-counted heap slot
/// and is addressed through a [`ValueRef`]. Children of compound values are
/// themselves handles; the owning value holds one count on each of them and
/// gives it back when it is torn down.
///
/// Strings own their buffer outright. The value's slot count is the only
/// count; there is no separate count on the byte buffer.
#[derive(Debug)]
pub enum Value {
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Boolean value.
    Bool(bool),
    /// The unit value `()`.
    Unit,
    /// Immutable list, head first. Length is the vector length.
    List(Vec<ValueRef>),
    /// Mutable, index-addressed buffer.
    Array(Vec<ValueRef>),
    /// Named fields. The most recently added field comes first.
    Record(Vec<RecordField>),
    /// Single mutable cell.
    Ref(ValueRef),
    /// Native code plus captured environment.
    Function(Function),
    /// Variant constructor applied to a payload.
    Constructor(Constructor),
    /// Class definition.
    Class(Class),
    /// Class instance.
    Object(Object),
}

/// Discriminant of [`Value`], used for diagnostics and heap statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    String,
    Bool,
    Unit,
    List,
    Array,
    Record,
    Ref,
    Function,
    Constructor,
    Class,
    Object,
}

impl ValueKind {
    /// Canonical type label used in error messages.
    ///
    /// These labels are user-visible and are expected to remain stable.
    pub fn label(self) -> &'static str {
        match self {
            ValueKind::Int => "Int",
            ValueKind::Float => "Float",
            ValueKind::String => "String",
            ValueKind::Bool => "Bool",
            ValueKind::Unit => "Unit",
            ValueKind::List => "List",
            ValueKind::Array => "Array",
            ValueKind::Record => "Record",
            ValueKind::Ref => "Ref",
            ValueKind::Function => "Function",
            ValueKind::Constructor => "Constructor",
            ValueKind::Class => "Class",
            ValueKind::Object => "Object",
        }
    }

    /// Scalars are copied by `copy`; every other kind is shared.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            ValueKind::Int | ValueKind::Float | ValueKind::String | ValueKind::Bool | ValueKind::Unit
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct RecordField {
    pub name: String,
    pub value: ValueRef,
}

pub struct Function {
    pub code: NativeFn,
    pub closure: EnvRef,
    pub name: Option<String>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Function({}, closure={:?})",
            self.name.as_deref().unwrap_or("anonymous"),
            self.closure
        )
    }
}

#[derive(Debug)]
pub struct Constructor {
    pub name: String,
    pub payload: ValueRef,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Bool(_) => ValueKind::Bool,
            Value::Unit => ValueKind::Unit,
            Value::List(_) => ValueKind::List,
            Value::Array(_) => ValueKind::Array,
            Value::Record(_) => ValueKind::Record,
            Value::Ref(_) => ValueKind::Ref,
            Value::Function(_) => ValueKind::Function,
            Value::Constructor(_) => ValueKind::Constructor,
            Value::Class(_) => ValueKind::Class,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().label()
    }

    /// Appends every handle this value holds a count on.
    pub(crate) fn push_children(&self, out: &mut Vec<Handle>) {
        match self {
            Value::Int(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Bool(_)
            | Value::Unit
            | Value::Class(_) => {}
            Value::List(items) | Value::Array(items) => {
                out.extend(items.iter().map(|item| item.0))
            }
            Value::Record(fields) => out.extend(fields.iter().map(|field| field.value.0)),
            Value::Ref(cell) => out.push(cell.0),
            Value::Function(function) => out.push(function.closure.0),
            Value::Constructor(constructor) => out.push(constructor.payload.0),
            Value::Object(object) => {
                out.push(object.class.0);
                out.extend(object.fields.iter().map(|field| field.0));
            }
        }
    }

    /// Structural equality for scalars. `None` means the kinds are not
    /// scalar and identity decides.
    pub(crate) fn scalar_eq(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Int(l), Value::Int(r)) => Some(l == r),
            (Value::Float(l), Value::Float(r)) => Some(l == r),
            (Value::String(l), Value::String(r)) => Some(l == r),
            (Value::Bool(l), Value::Bool(r)) => Some(l == r),
            (Value::Unit, Value::Unit) => Some(true),
            _ if self.kind() != other.kind() => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Int(1).type_name(), "Int");
        assert_eq!(Value::Float(1.0).type_name(), "Float");
        assert_eq!(Value::Bool(true).type_name(), "Bool");
        assert_eq!(Value::String("x".into()).type_name(), "String");
        assert_eq!(Value::Unit.type_name(), "Unit");
        assert_eq!(Value::List(vec![]).type_name(), "List");
        assert_eq!(Value::Array(vec![]).type_name(), "Array");
        assert_eq!(Value::Record(vec![]).type_name(), "Record");
    }

    #[test]
    fn test_scalar_kinds() {
        assert!(ValueKind::String.is_scalar());
        assert!(ValueKind::Unit.is_scalar());
        assert!(!ValueKind::List.is_scalar());
        assert!(!ValueKind::Object.is_scalar());
    }

    #[test]
    fn test_scalar_eq() {
        assert_eq!(Value::Int(3).scalar_eq(&Value::Int(3)), Some(true));
        assert_eq!(Value::Int(3).scalar_eq(&Value::Float(3.0)), Some(false));
        assert_eq!(
            Value::String("a".into()).scalar_eq(&Value::String("a".into())),
            Some(true)
        );
        assert_eq!(Value::Unit.scalar_eq(&Value::Unit), Some(true));
        assert_eq!(Value::List(vec![]).scalar_eq(&Value::Unit), Some(false));
        assert_eq!(Value::List(vec![]).scalar_eq(&Value::List(vec![])), None);
    }
}
