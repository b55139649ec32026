use std::{fmt, rc::Rc};

use crate::runtime::{MethodFn, heap::ValueRef};

/// Class definition: a flat set of field names and methods.
///
/// The superclass name is recorded for reflection only. Dispatch never walks
/// to a superclass.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub superclass: Option<String>,
    pub field_names: Vec<String>,
    pub methods: Vec<Rc<Method>>,
}

impl Class {
    /// First method registered under `name`.
    pub fn find_method(&self, name: &str) -> Option<&Rc<Method>> {
        self.methods.iter().find(|method| method.name == name)
    }
}

/// Method shared between a class and every object built from it.
///
/// Objects clone the `Rc`, so a method stays valid for as long as any object
/// can still dispatch to it, independently of the class value's lifetime.
pub struct Method {
    pub name: String,
    pub implementation: MethodFn,
    pub param_names: Vec<String>,
}

impl Method {
    pub fn param_count(&self) -> usize {
        self.param_names.len()
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({}/{})", self.name, self.param_count())
    }
}

/// Class instance.
///
/// `fields` is positionally aligned with the class's `field_names`. `methods`
/// is a snapshot of the class's method list taken at construction; methods
/// added to the class later are not visible to existing objects.
#[derive(Debug)]
pub struct Object {
    pub class_name: String,
    pub class: ValueRef,
    pub fields: Vec<ValueRef>,
    pub methods: Vec<Rc<Method>>,
}

impl Object {
    /// First method in the snapshot registered under `name`.
    pub fn find_method(&self, name: &str) -> Option<&Rc<Method>> {
        self.methods.iter().find(|method| method.name == name)
    }
}
