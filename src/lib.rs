//! `slotvm-core` is the intermediate-representation evaluation core of a small
//! dependently-typed functional language. It owns two kinds of state:
//!
//! * a [`global_store`] of reusable code blocks (lambdas, pi-types, sigma-types, algebraic
//!   data types, and foreign callbacks), hash-consed so structurally identical native blocks
//!   share a single address;
//! * a [`local_store`] of evaluation slots produced while reducing an expression, reclaimed
//!   between calls by a scoped [`gc`] (mark-compact, with GC barriers bracketing every
//!   evaluation).
//!
//! The central operation is [`evaluator::evaluate`]: given a callee block, an optional
//! argument slot, and an optional capture chain, it instantiates the block's prototype
//! slots into the local store and returns the address of the result slot.
//!
//! This crate is deliberately narrow. It has no lexer, parser, name resolver, or AST — it
//! is the runtime a frontend targets, not the frontend itself. It does no I/O and reads no
//! environment variables; the one piece of configuration it accepts
//! ([`limits::EvaluatorLimits`]) is constructor-injected.

pub mod address;
pub mod block;
pub mod capture;
pub mod descriptor;
pub mod error;
pub mod evaluator;
pub mod gc;
pub mod global_store;
pub mod limits;
pub mod local_store;
pub mod slot;
pub mod type_check;

pub use crate::address::{GlobalAddress, LocalAddress};
pub use crate::block::{Block, ForeignCallback};
pub use crate::error::{EvaluatorError, GlobalStoreError};
pub use crate::evaluator::{call, evaluate};
pub use crate::global_store::GlobalStore;
pub use crate::limits::EvaluatorLimits;
pub use crate::local_store::LocalStore;
pub use crate::slot::{BlockType, ErrorKind, Slot, SlotType};
