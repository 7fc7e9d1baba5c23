use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes. Freed slots are kept on a free list and
/// handed out again before the slot vector grows.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

/// Why [`Arena::try_alloc`] could not store an element.
#[derive(Debug)]
pub(crate) enum AllocError {
    /// The allocator refused to grow the slot vector.
    Reserve(TryReserveError),
    /// Every representable handle is in use.
    Full,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            // Strict less-than keeps every slot index representable as a `Handle`.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    /// Like [`Arena::alloc`], but reports exhaustion instead of aborting or
    /// panicking. On failure the element is handed back untouched.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, (T, AllocError)> {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            return Ok(h);
        }
        if self.slots.len() >= Handle::MAX {
            return Err((element, AllocError::Full));
        }
        // The free list holds at most one entry per slot; reserving it here
        // keeps a later `take` from aborting. It is empty on this path.
        let reserved = self.slots.try_reserve(1).and_then(|()| self.free.try_reserve(self.slots.len() + 1));
        if let Err(e) = reserved {
            return Err((element, AllocError::Reserve(e)));
        }
        self.slots.push(Some(element));
        Ok(Handle::from_index(self.slots.len() - 1))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut arena: Arena<&str> = Arena::new();
        let a = arena.alloc("a");
        let _b = arena.alloc("b");
        assert_eq!(arena.take(a), "a");
        assert_eq!(arena.len(), 1);

        let c = arena.alloc("c");
        assert_eq!(c, a);
        assert_eq!(*arena.get(c), "c");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn try_alloc_reports_full_arena() {
        let mut arena: Arena<u8> = Arena::new();
        for _ in 0..Handle::MAX {
            assert!(arena.try_alloc(0).is_ok());
        }
        match arena.try_alloc(7) {
            Err((element, AllocError::Full)) => assert_eq!(element, 7),
            other => panic!("expected a full arena, got {:?}", other.map_err(|(_, e)| e)),
        }

        // Freeing one slot makes room again.
        let h = Handle::from_index(3);
        arena.take(h);
        assert_eq!(arena.try_alloc(9).ok(), Some(h));
    }

    #[test]
    #[should_panic(expected = "`Arena::alloc()` - arena is at maximum capacity")]
    fn alloc_past_max_panics() {
        let mut arena: Arena<u8> = Arena::new();
        for _ in 0..=Handle::MAX {
            arena.alloc(0);
        }
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_after_take_panics() {
        let mut arena: Arena<u8> = Arena::new();
        let h = arena.alloc(1);
        arena.take(h);
        let _ = arena.get(h);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::TryAlloc(value) => {
                        let handle = arena.try_alloc(value).map_err(|(_, e)| e);
                        prop_assert!(handle.is_ok());
                        if let Ok(handle) = handle {
                            model.push((handle, value));
                        }
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *arena.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        let value1 = arena.take(handle);
                        let (_, value2) = model.swap_remove(index);
                        prop_assert_eq!(value1, value2);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());

                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        TryAlloc(u32),
        GetMut(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            10 => any::<u32>().prop_map(Operation::Alloc),
            10 => any::<u32>().prop_map(Operation::TryAlloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            5 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
