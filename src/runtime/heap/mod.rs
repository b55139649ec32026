pub mod handle;
pub mod heap_entry;
pub mod heap_object;
pub mod rc_heap;

pub use handle::{EnvRef, Handle, ValueRef};
pub use heap_object::{HeapKind, HeapObject};
pub use rc_heap::RcHeap;
