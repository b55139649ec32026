use crate::runtime::{heap::HeapKind, value::ValueKind};

/// Per-kind count of live heap objects.
///
/// Every allocation bumps the counter for its kind and every teardown lowers
/// it again, so a non-zero field after shutdown points at the kind of object
/// that leaked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeakStats {
    pub scalars: usize,
    pub lists: usize,
    pub arrays: usize,
    pub records: usize,
    pub refs: usize,
    pub functions: usize,
    pub constructors: usize,
    pub classes: usize,
    pub objects: usize,
    pub environments: usize,
}

impl LeakStats {
    pub(crate) fn record_alloc(&mut self, kind: HeapKind) {
        *self.counter(kind) += 1;
    }

    pub(crate) fn record_free(&mut self, kind: HeapKind) {
        let counter = self.counter(kind);
        *counter = counter.saturating_sub(1);
    }

    pub fn total(&self) -> usize {
        self.scalars
            + self.lists
            + self.arrays
            + self.records
            + self.refs
            + self.functions
            + self.constructors
            + self.classes
            + self.objects
            + self.environments
    }

    fn counter(&mut self, kind: HeapKind) -> &mut usize {
        match kind {
            HeapKind::Environment => &mut self.environments,
            HeapKind::Value(kind) => match kind {
                ValueKind::Int
                | ValueKind::Float
                | ValueKind::String
                | ValueKind::Bool
                | ValueKind::Unit => &mut self.scalars,
                ValueKind::List => &mut self.lists,
                ValueKind::Array => &mut self.arrays,
                ValueKind::Record => &mut self.records,
                ValueKind::Ref => &mut self.refs,
                ValueKind::Function => &mut self.functions,
                ValueKind::Constructor => &mut self.constructors,
                ValueKind::Class => &mut self.classes,
                ValueKind::Object => &mut self.objects,
            },
        }
    }
}
