use crate::runtime::heap::heap_object::HeapObject;

/// A live heap object together with its owner count.
#[derive(Debug)]
pub struct HeapEntry {
    pub(crate) object: HeapObject,
    pub(crate) ref_count: u32,
}

/// Storage cell. `entry` is `None` while the slot sits on the free list.
#[derive(Debug, Default)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) entry: Option<HeapEntry>,
}
