//! Where [`BlockId`]s come from.

use crate::data::BlockId;
use uuid::Uuid;

/// Hands out block identifiers. Each call must return an identifier not yet returned this run.
pub trait IdSource {
    /// Produce the next identifier.
    fn next_id(&mut self) -> BlockId;
}

impl<T: IdSource + ?Sized> IdSource for Box<T> {
    #[inline]
    fn next_id(&mut self) -> BlockId {
        (**self).next_id()
    }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    #[inline]
    fn next_id(&mut self) -> BlockId {
        (**self).next_id()
    }
}

/// Counts up from a starting value. Reproducible, so plans can be compared byte for byte.
#[derive(Debug, Clone, Default)]
pub struct Sequential {
    next: u128,
}

impl Sequential {
    /// Start counting from `first`.
    pub const fn starting_at(first: u128) -> Self {
        Self { next: first }
    }
}

impl IdSource for Sequential {
    fn next_id(&mut self) -> BlockId {
        let id = BlockId(Uuid::from_u128(self.next));
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    #[inline]
    fn next_id(&mut self) -> BlockId {
        BlockId(Uuid::new_v4())
    }
}
