use bumpalo::Bump;

use crate::{Error, Result};

/// Smallest first chunk handed out by [`Arena::for_input`].
pub const MIN_CHUNK_SIZE: usize = 256;

/// Bump pool owning every string, node and pair of a parsed tree.
///
/// Values returned by [`crate::parse`] borrow the arena, so the tree cannot
/// outlive it. Dropping the arena or calling [`Arena::reset`] releases the
/// whole tree at once.
#[derive(Debug, Default)]
pub struct Arena {
    bump: Bump,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Arena whose first chunk is sized from the input length.
    pub fn for_input(len: usize) -> Self {
        Self::with_capacity(len.max(MIN_CHUNK_SIZE))
    }

    /// Arena that refuses to grow past `bytes` of chunk memory.
    pub fn with_allocation_limit(bytes: usize) -> Self {
        let bump = Bump::new();
        bump.set_allocation_limit(Some(bytes));
        Self { bump }
    }

    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Releases every allocation. Chunk memory is kept for reuse.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    pub(crate) fn alloc_str(&self, value: &str) -> Result<&str> {
        self.bump
            .try_alloc_str(value)
            .map(|slot| &*slot)
            .map_err(|_| self.exhausted())
    }

    pub(crate) fn alloc_slice<T: Copy>(&self, items: &[T]) -> Result<&[T]> {
        if items.is_empty() {
            return Ok(&[]);
        }
        self.bump
            .try_alloc_slice_copy(items)
            .map(|slot| &*slot)
            .map_err(|_| self.exhausted())
    }

    fn exhausted(&self) -> Error {
        Error::out_of_memory(self.bump.allocated_bytes())
    }
}
