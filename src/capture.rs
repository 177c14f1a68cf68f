//! Capture-chain walking (§4.6): descending a linked list of `CallCapture` cells to reach
//! a value captured from an enclosing scope.

use crate::address::LocalAddress;
use crate::local_store::LocalStore;
use crate::slot::SlotType;

/// Descend `depth` links along `captures` starting at `start`, then return the `captured`
/// payload of the cell reached. Depth 0 returns `captured` of `start` itself.
///
/// Panics if a non-`CallCapture` slot is encountered mid-walk — per §7, this is an
/// internal invariant violation (the frontend is contracted to only ever point a
/// `Captured` prototype's depth at an actual capture chain).
pub fn walk_capture_chain(local: &LocalStore, start: LocalAddress, depth: u16) -> LocalAddress {
    let mut cell = start;
    for _ in 0..depth {
        let slot = local.slot(cell);
        assert_eq!(
            slot.type_,
            SlotType::CallCapture,
            "walked off the end of a capture chain at {cell:?}: expected CallCapture, found {:?}",
            slot.type_
        );
        cell = slot.capture_captures();
    }
    let slot = local.slot(cell);
    assert_eq!(
        slot.type_,
        SlotType::CallCapture,
        "capture chain walk landed on {cell:?}, which is not a CallCapture: found {:?}",
        slot.type_
    );
    slot.capture_captured()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Slot;

    #[test]
    fn depth_zero_returns_the_starting_cells_payload() {
        let mut local = LocalStore::new();
        let payload = local.create_slot(Slot::captured(0));
        let cell = local.create_slot(Slot::call_capture(LocalAddress(0), payload));
        assert_eq!(walk_capture_chain(&local, cell, 0), payload);
    }

    #[test]
    fn walks_multiple_links_before_reading_the_payload() {
        let mut local = LocalStore::new();
        let inner_payload = local.create_slot(Slot::captured(0));
        let outer_payload = local.create_slot(Slot::captured(1));
        let inner_cell = local.create_slot(Slot::call_capture(LocalAddress(0), inner_payload));
        let outer_cell = local.create_slot(Slot::call_capture(inner_cell, outer_payload));
        assert_eq!(walk_capture_chain(&local, outer_cell, 1), inner_payload);
    }

    #[test]
    #[should_panic(expected = "CallCapture")]
    fn a_non_capture_slot_mid_walk_is_fatal() {
        let mut local = LocalStore::new();
        let not_a_capture = local.create_slot(Slot::captured(0));
        walk_capture_chain(&local, not_a_capture, 0);
    }
}
