/// Slot address inside the [`RcHeap`](super::RcHeap).
///
/// The generation is bumped every time a slot is freed, so a handle that
/// outlives its value can be told apart from the slot's next occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Handle {
    /// Returns the raw heap slot index backing this handle.
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Reference to a runtime value.
///
/// A `ValueRef` is only an address; ownership is tracked by the heap's
/// reference count. Copying the handle does not retain the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRef(pub(crate) Handle);

/// Reference to an environment scope. Same ownership rules as [`ValueRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvRef(pub(crate) Handle);

impl ValueRef {
    pub fn handle(self) -> Handle {
        self.0
    }
}

impl EnvRef {
    pub fn handle(self) -> Handle {
        self.0
    }
}
