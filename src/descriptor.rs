//! Static slot descriptors (§4.1): two total, constant-time functions over [`SlotType`]
//! that completely govern GC reachability.
//!
//! Both are plain `match` expressions rather than a runtime-built table — the mapping is
//! fixed at compile time and a `match` over a closed `enum` is exactly the "static
//! descriptor table" the design calls for, with the compiler guaranteeing exhaustiveness
//! whenever a new [`SlotType`] variant is added.

use crate::slot::SlotType;

/// Which of a slot's three operand positions is a local-address reference, for the given
/// slot type.
///
/// The assignment for `Lambda`/`Pi`/`Sigma`/`Adt` (operand0 = local address, operand1 =
/// immediate, operand2 = reserved) is this crate's resolution of an open question: the
/// reference source's descriptor table was not available to ground this against, and the
/// chosen assignment is the only one consistent with how the evaluator's `SelfRef`
/// handling builds a closure slot referring to `(capture_addr, callee_global_addr, 0)` —
/// `capture_addr` is a local address, `callee_global_addr` is not. See DESIGN.md.
pub fn operand_is_local_address(slot_type: SlotType, position: u8) -> bool {
    use SlotType::*;
    match (slot_type, position) {
        // Argument: operand0 is a relative call depth (immediate), operand1 is the
        // expected type's local address.
        (Argument, 1) => true,
        (Argument, _) => false,

        // Captured: operand0 is a capture-chain depth (immediate), not an address.
        (Captured, _) => false,

        // SelfRef carries no operands at all.
        (SelfRef, _) => false,

        // UnresolvedSymbol carries no operands.
        (UnresolvedSymbol, _) => false,

        // Error: operand0 is an ErrorKind discriminant (immediate).
        (Error, _) => false,

        // Closure/value constructors: operand0 is the capture-chain head (local address);
        // operand1 is an immediate (often a global block address); operand2 unused.
        (Lambda, 0) | (Pi, 0) | (Sigma, 0) | (Adt, 0) => true,
        (Lambda, _) | (Pi, _) | (Sigma, _) | (Adt, _) => false,

        // CallCapture: both `captures` and `captured` are local addresses.
        (CallCapture, 0) | (CallCapture, 1) => true,
        (CallCapture, _) => false,

        // Apply: frontend-defined application node. Both operands this core cares about
        // resolving follow the same "callee, argument" shape as a call would.
        (Apply, 0) | (Apply, 1) => true,
        (Apply, _) => false,
    }
}

/// Slots of these types are always retained by the GC even without an explicit root mark.
///
/// Only `Error` qualifies: an error is a diagnostic value, and silently dropping it because
/// nothing downstream happens to reference it would hide the reason the last reachable
/// computation failed. Every other slot type is retained only via explicit roots or being
/// transitively reachable from one.
pub fn is_implicit_root(slot_type: SlotType) -> bool {
    matches!(slot_type, SlotType::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SlotType::*;

    #[test]
    fn argument_expected_type_is_the_only_local_address() {
        assert!(operand_is_local_address(Argument, 1));
        assert!(!operand_is_local_address(Argument, 0));
        assert!(!operand_is_local_address(Argument, 2));
    }

    #[test]
    fn captured_has_no_local_address_operands() {
        for position in 0..3 {
            assert!(!operand_is_local_address(Captured, position));
        }
    }

    #[test]
    fn call_capture_both_fields_are_addresses() {
        assert!(operand_is_local_address(CallCapture, 0));
        assert!(operand_is_local_address(CallCapture, 1));
        assert!(!operand_is_local_address(CallCapture, 2));
    }

    #[test]
    fn only_error_is_an_implicit_root() {
        assert!(is_implicit_root(Error));
        assert!(!is_implicit_root(Lambda));
        assert!(!is_implicit_root(Argument));
        assert!(!is_implicit_root(CallCapture));
    }
}
