use crate::runtime::{
    error::{RtResult, RuntimeError},
    heap::{
        handle::Handle,
        heap_entry::{HeapEntry, Slot},
        heap_object::HeapObject,
    },
    leak_detector::LeakStats,
};

/// Reference-counted slot heap backing every value and environment.
///
/// Each live slot carries the number of owners of its object. Releasing the
/// last owner tears the object down and releases its children, iteratively,
/// so deep lists or long scope chains cannot overflow the native stack.
///
/// Freed slots bump their generation and are reused through a free list.
/// Handles minted before the free keep the old generation and are rejected
/// from then on, which turns a double release into an error instead of
/// corrupting an unrelated object.
#[derive(Debug, Default)]
pub struct RcHeap {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    live: usize,
    max_live: Option<usize>,
    total_allocations: usize,
    total_frees: usize,
    stats: LeakStats,
}

impl RcHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a heap that refuses to hold more than `limit` live objects.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            max_live: limit,
            ..Self::default()
        }
    }

    /// Allocates `object` with a count of one and returns its handle.
    pub fn alloc(&mut self, object: HeapObject) -> RtResult<Handle> {
        if let Some(limit) = self.max_live {
            if self.live >= limit {
                return Err(RuntimeError::OutOfMemory(format!(
                    "live value limit of {} reached",
                    limit
                )));
            }
        }

        let kind = object.kind();
        let entry = HeapEntry {
            object,
            ref_count: 1,
        };

        let handle = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);
            Handle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = u32::try_from(self.slots.len()).map_err(|_| {
                RuntimeError::OutOfMemory("heap slot index space exhausted".to_string())
            })?;
            self.slots.push(Slot {
                generation: 0,
                entry: Some(entry),
            });
            Handle {
                index,
                generation: 0,
            }
        };

        self.live += 1;
        self.total_allocations += 1;
        self.stats.record_alloc(kind);
        tracing::trace!(index = handle.index, %kind, "alloc");
        Ok(handle)
    }

    /// Returns `true` when `handle` still addresses the object it was minted for.
    pub fn is_live(&self, handle: Handle) -> bool {
        self.entry(handle).is_ok()
    }

    pub fn get(&self, handle: Handle) -> RtResult<&HeapObject> {
        self.entry(handle).map(|entry| &entry.object)
    }

    pub fn get_mut(&mut self, handle: Handle) -> RtResult<&mut HeapObject> {
        self.entry_mut(handle).map(|entry| &mut entry.object)
    }

    pub fn ref_count(&self, handle: Handle) -> RtResult<u32> {
        self.entry(handle).map(|entry| entry.ref_count)
    }

    /// Adds one owner.
    pub fn retain(&mut self, handle: Handle) -> RtResult<()> {
        let entry = self.entry_mut(handle)?;
        entry.ref_count = entry.ref_count.checked_add(1).ok_or_else(|| {
            RuntimeError::OutOfMemory("reference count overflow".to_string())
        })?;
        Ok(())
    }

    /// Drops one owner and tears down everything that becomes unreachable.
    ///
    /// Returns the number of objects freed. Fails without side effects if
    /// `handle` is stale.
    pub fn release(&mut self, handle: Handle) -> RtResult<usize> {
        self.entry(handle)?;

        let mut worklist = Vec::with_capacity(16);
        worklist.push(handle);
        let mut freed = 0;

        while let Some(current) = worklist.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                tracing::warn!(index = current.index, "release of out-of-range child");
                continue;
            };
            if slot.generation != current.generation {
                tracing::warn!(index = current.index, "release of stale child handle");
                continue;
            }
            let Some(entry) = slot.entry.as_mut() else {
                tracing::warn!(index = current.index, "release of freed child handle");
                continue;
            };

            entry.ref_count -= 1;
            if entry.ref_count > 0 {
                continue;
            }

            // Slot is dead from here on: take the object and retire the slot
            // before its children are visited.
            let Some(entry) = slot.entry.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(current.index);
            self.live -= 1;
            self.total_frees += 1;
            freed += 1;

            let kind = entry.object.kind();
            self.stats.record_free(kind);
            tracing::trace!(index = current.index, %kind, "free");

            entry.object.push_children(&mut worklist);
        }

        Ok(freed)
    }

    /// Number of currently live objects.
    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn total_allocations(&self) -> usize {
        self.total_allocations
    }

    pub fn total_frees(&self) -> usize {
        self.total_frees
    }

    /// Number of slots ever created, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn stats(&self) -> LeakStats {
        self.stats
    }

    fn entry(&self, handle: Handle) -> RtResult<&HeapEntry> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
            .ok_or_else(|| stale(handle))
    }

    fn entry_mut(&mut self, handle: Handle) -> RtResult<&mut HeapEntry> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_mut())
            .ok_or_else(|| stale(handle))
    }
}

fn stale(handle: Handle) -> RuntimeError {
    RuntimeError::NullPointer(format!(
        "handle #{}@{} does not refer to a live value",
        handle.index, handle.generation
    ))
}
