use crate::runtime::heap::{EnvRef, Handle, ValueRef};

/// One lexical scope.
///
/// Bindings are searched newest first. A name appears at most once per
/// scope: rebinding replaces the existing entry in place.
#[derive(Debug, Default)]
pub struct Scope {
    pub(crate) bindings: Vec<Binding>,
    pub(crate) parent: Option<EnvRef>,
}

#[derive(Debug)]
pub struct Binding {
    pub name: String,
    pub slot: BindingSlot,
}

/// How a binding holds its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSlot {
    /// The scope owns one count on the value.
    Strong(ValueRef),
    /// Back-reference that owns nothing. Used for a recursive function bound
    /// into the scope it closes over, which would otherwise keep itself alive.
    Weak(ValueRef),
}

impl BindingSlot {
    pub fn value(self) -> ValueRef {
        match self {
            BindingSlot::Strong(value) | BindingSlot::Weak(value) => value,
        }
    }
}

impl Scope {
    pub(crate) fn new(parent: Option<EnvRef>) -> Self {
        Self {
            bindings: Vec::new(),
            parent,
        }
    }

    pub fn parent(&self) -> Option<EnvRef> {
        self.parent
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn find(&self, name: &str) -> Option<BindingSlot> {
        self.bindings
            .iter()
            .rev()
            .find(|binding| binding.name == name)
            .map(|binding| binding.slot)
    }

    pub(crate) fn find_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.bindings
            .iter_mut()
            .rev()
            .find(|binding| binding.name == name)
    }

    /// Appends every handle this scope holds a count on.
    pub(crate) fn push_children(&self, out: &mut Vec<Handle>) {
        for binding in &self.bindings {
            if let BindingSlot::Strong(value) = binding.slot {
                out.push(value.0);
            }
        }
        if let Some(parent) = self.parent {
            out.push(parent.0);
        }
    }
}
