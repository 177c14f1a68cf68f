//! Blocks (§3.3): the code of one lambda/pi/sigma/ADT, or a foreign callback.

use std::sync::Arc;

use crate::address::{GlobalAddress, LocalAddress};
use crate::global_store::GlobalStore;
use crate::local_store::LocalStore;
use crate::slot::{BlockType, Slot};

/// A foreign callback. Invoking it yields a local address directly.
///
/// The reference core passes a C function pointer plus an opaque `void*` userdata
/// argument through every call. This crate instead captures that state in the closure
/// itself — the idiomatic Rust rendering of the same idea, and one that the type system
/// enforces is only ever accessed from the thread that owns it.
pub type ForeignCallback = Arc<
    dyn Fn(&GlobalStore, &mut LocalStore, GlobalAddress, Option<LocalAddress>, &mut Option<LocalAddress>) -> LocalAddress
        + Send
        + Sync,
>;

/// A reusable piece of code: either a native block (an owned sequence of prototype slots)
/// or a foreign block (a callback).
#[derive(Clone)]
pub enum Block {
    Native {
        block_type: BlockType,
        /// Prototype slots, topologically ordered: a local-address operand in slot `i`
        /// refers only to slots `0..i`. Shared via `Arc` so evaluating a block does not
        /// require copying its prototypes.
        slots: Arc<[Slot]>,
    },
    Foreign {
        callback: ForeignCallback,
    },
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Native { block_type, .. } => *block_type,
            Block::Foreign { .. } => BlockType::ForeignFunction,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Block::Native { .. })
    }
}
