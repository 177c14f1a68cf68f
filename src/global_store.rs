//! The global store (§C5, §3.5, §4.4): a vector of blocks, mutated only by the two
//! block-creation operations, with hash-consed deduplication for native blocks.

use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::Arc;

use log::debug;

use crate::address::GlobalAddress;
use crate::block::{Block, ForeignCallback};
use crate::error::GlobalStoreError;
use crate::slot::{BlockType, Slot};

/// Monotonically growing vector of [`Block`]s. Blocks are never removed during a run.
///
/// Reads are safe under single-threaded use only (§5); sharing a global store across
/// threads needs an external mutex. The `PhantomData<Cell<()>>` field opts the type out of
/// the auto-derived `Sync` impl for real — `Block::Foreign`'s callback is `Send + Sync`, so
/// without this marker every field here would be `Sync` and nothing would stop two threads
/// from racing an unsynchronized `&GlobalStore`.
pub struct GlobalStore {
    blocks: Vec<Block>,
    _not_sync: PhantomData<Cell<()>>,
}

impl GlobalStore {
    pub fn new() -> Self {
        GlobalStore {
            blocks: Vec::new(),
            _not_sync: PhantomData,
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, addr: GlobalAddress) -> Result<&Block, GlobalStoreError> {
        self.blocks
            .get(addr.index())
            .ok_or(GlobalStoreError::UnknownBlock(addr))
    }

    /// Register a native block, deduplicating structurally against existing blocks of the
    /// same type — unless `block_type` is `Adt`, whose identity is nominal (§3.3, §8
    /// invariant 6).
    ///
    /// `block_type` must not be `ForeignFunction`; use [`GlobalStore::create_foreign_block`]
    /// for that.
    pub fn create_native_block(&mut self, block_type: BlockType, slots: Arc<[Slot]>) -> GlobalAddress {
        assert_ne!(
            block_type,
            BlockType::ForeignFunction,
            "create_native_block cannot register a foreign block"
        );
        assert!(!slots.is_empty(), "a native block must have at least one prototype slot");

        if block_type != BlockType::Adt {
            if let Some(existing) = self.blocks.iter().position(|block| match block {
                Block::Native {
                    block_type: existing_type,
                    slots: existing_slots,
                } => *existing_type == block_type && existing_slots.as_ref() == slots.as_ref(),
                Block::Foreign { .. } => false,
            }) {
                debug!("global store: hash-consed {block_type:?} block onto G{existing}");
                return GlobalAddress(existing as u16);
            }
        }

        let address = self.append(Block::Native { block_type, slots });
        debug!("global store: registered new {block_type:?} block at {address:?}");
        address
    }

    /// Register a foreign block. Never deduplicated, since foreign blocks carry opaque
    /// closure state that this crate cannot compare for equality.
    pub fn create_foreign_block(&mut self, callback: ForeignCallback) -> GlobalAddress {
        let address = self.append(Block::Foreign { callback });
        debug!("global store: registered new foreign block at {address:?}");
        address
    }

    fn append(&mut self, block: Block) -> GlobalAddress {
        let index = self.blocks.len();
        assert!(
            index <= u16::MAX as usize,
            "global store exhausted its 16-bit address space"
        );
        self.blocks.push(block);
        GlobalAddress(index as u16)
    }
}

impl Default for GlobalStore {
    fn default() -> Self {
        GlobalStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_prototype() -> Arc<[Slot]> {
        Arc::from(vec![Slot::argument(0, 0)])
    }

    #[test]
    fn identical_lambda_prototypes_hash_cons_to_one_address() {
        let mut global = GlobalStore::new();
        let a = global.create_native_block(BlockType::Lambda, identity_prototype());
        let b = global.create_native_block(BlockType::Lambda, identity_prototype());
        assert_eq!(a, b);
        assert_eq!(global.block_count(), 1);
    }

    #[test]
    fn identical_adt_prototypes_stay_nominally_distinct() {
        let mut global = GlobalStore::new();
        let a = global.create_native_block(BlockType::Adt, identity_prototype());
        let b = global.create_native_block(BlockType::Adt, identity_prototype());
        assert_ne!(a, b);
        assert_eq!(global.block_count(), 2);
    }

    #[test]
    fn different_type_with_the_same_slots_does_not_dedup() {
        let mut global = GlobalStore::new();
        let lambda = global.create_native_block(BlockType::Lambda, identity_prototype());
        let pi = global.create_native_block(BlockType::Pi, identity_prototype());
        assert_ne!(lambda, pi);
    }

    #[test]
    fn unknown_block_address_is_an_error_not_a_panic() {
        let global = GlobalStore::new();
        assert_eq!(
            global.block(GlobalAddress(0)).unwrap_err(),
            GlobalStoreError::UnknownBlock(GlobalAddress(0))
        );
    }

    #[test]
    #[should_panic(expected = "at least one prototype slot")]
    fn empty_native_block_is_rejected() {
        let mut global = GlobalStore::new();
        global.create_native_block(BlockType::Lambda, Arc::from(Vec::<Slot>::new()));
    }

    #[test]
    fn foreign_blocks_are_never_deduplicated() {
        let mut global = GlobalStore::new();
        let callback: ForeignCallback = Arc::new(|_, _, _, argument, _| argument.unwrap());
        let a = global.create_foreign_block(callback.clone());
        let b = global.create_foreign_block(callback);
        assert_ne!(a, b);
    }
}
