//! The packed slot encoding (§C1) and the slot-type enumeration (§C2 lives in
//! [`crate::descriptor`]).
//!
//! A [`Slot`] is a fixed-width IR instruction: a type tag, three `u16` operands whose
//! meaning is positional (see [`SlotType`]'s doc comments), and a one-bit annotation used
//! transiently by the mark phase of the GC. Slots never carry a payload larger than this —
//! larger values (strings, big integers, …) are addresses into a frontend-owned arena that
//! this core never looks inside.

use strum_macros::{Display, EnumString};

use crate::address::{GlobalAddress, LocalAddress};

/// Identifies why an `Error` slot exists.
///
/// `#[non_exhaustive]` because a frontend is expected to add kinds of its own; matching on
/// this enum outside this crate must always carry a wildcard arm.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, EnumString)]
#[repr(u8)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A prototype slot was `UnresolvedSymbol`, or was itself already `Error`.
    InvalidInstruction,
    /// An argument did not inhabit its declared type.
    TypeChecking,
}

/// The slot-type tag. Dispatch everywhere in this crate is a `match` over this enum rather
/// than dynamic dispatch — the set of kinds is closed and known at compile time.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, EnumString)]
#[repr(u8)]
pub enum SlotType {
    /// The argument bound at call depth `operand0`; `operand1` is the expected type
    /// address. `operand0` is always 0 when freshly materialized by the evaluator (it
    /// records a *relative* depth the frontend is expected to have already resolved to
    /// the current frame).
    Argument,
    /// A value captured from an enclosing scope, `operand0` steps down the capture chain.
    Captured,
    /// The currently executing block, used to build a recursive closure.
    SelfRef,
    /// A placeholder that always degrades to `Error(InvalidInstruction)`.
    UnresolvedSymbol,
    /// A terminal value. `operand0` is an [`ErrorKind`] discriminant.
    Error,
    /// A lambda value/closure.
    Lambda,
    /// A dependent function type (pi type) value.
    Pi,
    /// A dependent pair type (sigma type) value.
    Sigma,
    /// An algebraic data type value. Nominal: see [`crate::global_store`].
    Adt,
    /// A capture cell: `operand0` is `captures` (the next link), `operand1` is `captured`
    /// (the payload). Walked by [`crate::capture::walk_capture_chain`].
    CallCapture,
    /// An application node, carried for frontend use. This core never dispatches on it
    /// specially; as a prototype slot it just falls through to the default
    /// materialization rule in the evaluator.
    Apply,
}

/// The kind of block a native block's `type` tag denotes; also doubles as the discriminant
/// that [`SlotType::Lambda`]/[`SlotType::Pi`]/[`SlotType::Sigma`]/[`SlotType::Adt`]
/// mirror when a block of that kind is evaluated. See
/// [`crate::evaluator::slot_type_for_block`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, EnumString)]
#[repr(u8)]
pub enum BlockType {
    Lambda,
    Pi,
    Sigma,
    Adt,
    ForeignFunction,
}

/// A single packed IR instruction.
///
/// `#[repr(C)]` and plain `u16` fields rather than a bit-packed word: the descriptor
/// tables in [`crate::descriptor`] are the only code that needs to know which operand
/// means what, so nothing else in this crate depends on a tighter physical layout.
#[repr(C)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Slot {
    pub type_: SlotType,
    pub operand0: u16,
    pub operand1: u16,
    pub operand2: u16,
    /// Set by the GC's mark phase; must be `false` outside of a GC cycle. Harmless if
    /// left `true` on a survivor after compaction — callers must not inspect it.
    pub annotation: bool,
}

static_assertions::const_assert!(std::mem::size_of::<Slot>() <= 16);

impl Slot {
    pub fn new(type_: SlotType, operand0: u16, operand1: u16, operand2: u16) -> Self {
        Slot {
            type_,
            operand0,
            operand1,
            operand2,
            annotation: false,
        }
    }

    pub fn error(kind: ErrorKind) -> Self {
        Slot::new(SlotType::Error, kind as u16, 0, 0)
    }

    pub fn argument(depth: u16, expected_type: u16) -> Self {
        Slot::new(SlotType::Argument, depth, expected_type, 0)
    }

    pub fn captured(depth: u16) -> Self {
        Slot::new(SlotType::Captured, depth, 0, 0)
    }

    pub fn call_capture(captures: LocalAddress, captured: LocalAddress) -> Self {
        Slot::new(SlotType::CallCapture, captures.0, captured.0, 0)
    }

    /// The `captures` field of a `CallCapture` slot: the next link in the chain.
    pub fn capture_captures(&self) -> LocalAddress {
        debug_assert_eq!(self.type_, SlotType::CallCapture);
        LocalAddress(self.operand0)
    }

    /// The `captured` field of a `CallCapture` slot: the payload this cell holds.
    pub fn capture_captured(&self) -> LocalAddress {
        debug_assert_eq!(self.type_, SlotType::CallCapture);
        LocalAddress(self.operand1)
    }

    /// Rewrites this slot's operands in place, leaving the type tag and annotation alone.
    /// Used by the GC's compact phase to remap surviving slots.
    pub fn with_operands(mut self, operand0: u16, operand1: u16, operand2: u16) -> Self {
        self.operand0 = operand0;
        self.operand1 = operand1;
        self.operand2 = operand2;
        self
    }

    pub fn is_error(&self) -> bool {
        self.type_ == SlotType::Error
    }

    /// A closure slot referring to `(capture_addr, callee_global_addr, 0)`, as built by
    /// the evaluator's `SelfRef` handling. `kind` must be one of `Lambda`/`Pi`/`Sigma`/
    /// `Adt` — the value kinds this core actually constructs.
    pub fn self_closure(kind: SlotType, capture_addr: LocalAddress, callee: GlobalAddress) -> Self {
        debug_assert!(matches!(
            kind,
            SlotType::Lambda | SlotType::Pi | SlotType::Sigma | SlotType::Adt
        ));
        Slot::new(kind, capture_addr.0, callee.0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_fits_in_a_word_and_a_half() {
        assert!(std::mem::size_of::<Slot>() <= 16);
    }

    #[test]
    fn error_slot_carries_its_kind_in_operand0() {
        let slot = Slot::error(ErrorKind::TypeChecking);
        assert_eq!(slot.type_, SlotType::Error);
        assert_eq!(slot.operand0, ErrorKind::TypeChecking as u16);
        assert!(slot.is_error());
    }

    #[test]
    fn call_capture_accessors_round_trip() {
        let slot = Slot::call_capture(LocalAddress(2), LocalAddress(9));
        assert_eq!(slot.capture_captures(), LocalAddress(2));
        assert_eq!(slot.capture_captured(), LocalAddress(9));
    }
}
