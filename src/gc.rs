//! The scoped mark-compact garbage collector (§C4, §4.3).
//!
//! Grounded on MMTk's own `MarkCompactSpace` (`policy/markcompactspace.rs`) and its
//! `plan::markcompact` GC work: mark from roots, then compact in ascending order
//! rewriting forwarding references as it goes. The heap-mapped, multi-threaded machinery
//! of that space (page resources, side metadata, object forwarding words written into
//! live memory) has no counterpart here — this GC runs over a plain `Vec<Slot>` for a
//! single evaluation frame — but the two-phase mark/compact shape and the "descending mark,
//! ascending compact" discipline are carried over directly.

use log::trace;

use crate::address::LocalAddress;
use crate::descriptor::{is_implicit_root, operand_is_local_address};
use crate::slot::Slot;

const NOT_RETAINED: u16 = u16::MAX;

/// Mark-compact the suffix `slots[start..]`, retaining exactly the transitive closure of
/// `roots` (plus anything marked an implicit root by [`is_implicit_root`]), and rewrite
/// `roots` in place to their post-compaction addresses.
///
/// `start` must be `<= slots.len()`; every address in `roots` must be `< slots.len()`. A
/// root below `start` is common (the evaluator binds `Argument` directly to a
/// caller-supplied address that predates this barrier) and is left untouched — it is
/// already stable, owned by an enclosing frame's barrier, not this cycle's concern. Both
/// constraints are upheld by [`crate::local_store::LocalStore`], whose barrier stack is the
/// only caller of this function.
pub fn mark_compact(slots: &mut Vec<Slot>, start: usize, roots: &mut [LocalAddress]) {
    let end = slots.len();
    debug_assert!(start <= end);

    // Phase 1 — mark.
    let mut max_used = start;
    for root in roots.iter() {
        let r = root.index();
        assert!(r < end, "GC root {root:?} points past the end of the local store ({end} slots)");
        if r < start {
            continue;
        }
        max_used = max_used.max(r + 1);
        slots[r].annotation = true;
    }

    if max_used == start {
        // No roots above the barrier: nothing to keep.
        slots.truncate(start);
        return;
    }

    for i in (start..max_used).rev() {
        let slot = slots[i];
        if !(slot.annotation || is_implicit_root(slot.type_)) {
            continue;
        }
        trace!("gc: mark: retaining slot {i} ({:?})", slot.type_);
        for position in 0..3u8 {
            if !operand_is_local_address(slot.type_, position) {
                continue;
            }
            let operand = match position {
                0 => slot.operand0,
                1 => slot.operand1,
                _ => slot.operand2,
            } as usize;
            if operand < start {
                continue;
            }
            slots[operand].annotation = true;
        }
    }

    // Phase 2 — compact.
    let mut remap = vec![NOT_RETAINED; max_used - start];
    let mut final_index = start;
    for i in start..max_used {
        let slot = slots[i];
        if !(slot.annotation || is_implicit_root(slot.type_)) {
            continue;
        }
        let resolve = |position: u8, operand: u16| -> u16 {
            if !operand_is_local_address(slot.type_, position) || (operand as usize) < start {
                // Either not a reference at all, or a reference below the barrier floor —
                // such addresses are untouched by this GC cycle and stay as-is.
                return operand;
            }
            let remapped = remap[operand as usize - start];
            debug_assert_ne!(
                remapped, NOT_RETAINED,
                "slot {i} retained but its dependency at {operand} was not; ascending \
                 compaction requires dependencies to precede dependents"
            );
            remapped
        };
        let rewritten = slot.with_operands(
            resolve(0, slot.operand0),
            resolve(1, slot.operand1),
            resolve(2, slot.operand2),
        );
        slots[final_index] = rewritten;
        remap[i - start] = final_index as u16;
        final_index += 1;
    }

    // Phase 3 — update roots.
    for root in roots.iter_mut() {
        let r = root.index();
        if r < start {
            // Predates this barrier; never marked or moved above, so its address still holds.
            continue;
        }
        let remapped = remap[r - start];
        debug_assert_ne!(remapped, NOT_RETAINED, "root {root:?} was not retained by its own GC");
        *root = LocalAddress(remapped);
    }

    // Phase 4 — truncate.
    slots.truncate(final_index);
}
