//! Address newtypes used by the local and global stores.
//!
//! Both addresses are plain `u16` indices: the reference core packs them into a
//! fixed-width slot encoding (see [`crate::slot`]), and a 16-bit index is the largest that
//! still fits three of them alongside a type tag in a small fixed-width record. Keeping
//! them as distinct types (rather than bare `u16`) stops a local address from being passed
//! where a global address is expected, and vice versa — a mistake that would otherwise
//! compile silently.

use std::fmt;

/// An index into a [`crate::local_store::LocalStore`]'s slot vector.
///
/// Only meaningful within the local store that produced it; there is no cross-store
/// validity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LocalAddress(pub u16);

impl LocalAddress {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for LocalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for LocalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An index into a [`crate::global_store::GlobalStore`]'s block vector.
///
/// Stable for the lifetime of the global store: blocks are never removed.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GlobalAddress(pub u16);

impl GlobalAddress {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for GlobalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}

impl fmt::Display for GlobalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_index_as_usize() {
        assert_eq!(LocalAddress(3).index(), 3usize);
        assert_eq!(GlobalAddress(7).index(), 7usize);
    }

    #[test]
    fn debug_format_is_compact() {
        assert_eq!(format!("{:?}", LocalAddress(5)), "L5");
        assert_eq!(format!("{:?}", GlobalAddress(5)), "G5");
    }
}
