//! The runtime type-compatibility check (§C7, §4.7).
//!
//! Deliberately minimal, as specified: this core only needs its role in argument binding
//! to be correct (a mismatch must surface as `Error(TypeChecking)`), not a full
//! definitional-equality theory for the frontend's type system.

use crate::address::LocalAddress;
use crate::local_store::LocalStore;
use crate::slot::SlotType;

/// Does the slot at `value` inhabit the type denoted by the slot at `expected_type`?
pub fn is_of_type(local: &LocalStore, value: LocalAddress, expected_type: LocalAddress) -> bool {
    if value == expected_type {
        return true;
    }
    let value_kind = local.slot(value).type_;
    let type_kind = local.slot(expected_type).type_;
    matches!((value_kind, type_kind), (SlotType::Lambda, SlotType::Pi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Slot;

    #[test]
    fn a_slot_always_inhabits_its_own_address() {
        let mut local = LocalStore::new();
        let addr = local.create_slot(Slot::captured(0));
        assert!(is_of_type(&local, addr, addr));
    }

    #[test]
    fn a_lambda_inhabits_a_pi() {
        let mut local = LocalStore::new();
        let pi = local.create_slot(Slot::new(SlotType::Pi, 0, 0, 0));
        let lambda = local.create_slot(Slot::new(SlotType::Lambda, 0, 0, 0));
        assert!(is_of_type(&local, lambda, pi));
    }

    #[test]
    fn a_lambda_does_not_inhabit_a_sigma() {
        let mut local = LocalStore::new();
        let sigma = local.create_slot(Slot::new(SlotType::Sigma, 0, 0, 0));
        let lambda = local.create_slot(Slot::new(SlotType::Lambda, 0, 0, 0));
        assert!(!is_of_type(&local, lambda, sigma));
    }
}
