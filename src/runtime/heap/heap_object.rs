use std::fmt;

use crate::runtime::{
    environment::Scope,
    heap::Handle,
    value::{Value, ValueKind},
};

/// Objects that live on the reference-counted heap.
#[derive(Debug)]
pub enum HeapObject {
    Value(Value),
    Environment(Scope),
}

/// Classification of heap objects for statistics and leak reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapKind {
    Value(ValueKind),
    Environment,
}

impl HeapObject {
    pub fn kind(&self) -> HeapKind {
        match self {
            HeapObject::Value(value) => HeapKind::Value(value.kind()),
            HeapObject::Environment(_) => HeapKind::Environment,
        }
    }

    pub(crate) fn push_children(&self, out: &mut Vec<Handle>) {
        match self {
            HeapObject::Value(value) => value.push_children(out),
            HeapObject::Environment(scope) => scope.push_children(out),
        }
    }
}

impl HeapKind {
    pub fn label(self) -> &'static str {
        match self {
            HeapKind::Value(kind) => kind.label(),
            HeapKind::Environment => "Environment",
        }
    }
}

impl fmt::Display for HeapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
