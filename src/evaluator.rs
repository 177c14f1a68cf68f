//! The evaluator (§C6, §4.5): instantiates a callee block's prototype slots into the
//! local store, resolving `Argument`, `Captured`, `SelfRef`, and ordinary operands.

use log::trace;

use crate::address::{GlobalAddress, LocalAddress};
use crate::block::Block;
use crate::capture::walk_capture_chain;
use crate::error::EvaluatorError;
use crate::global_store::GlobalStore;
use crate::local_store::LocalStore;
use crate::slot::{BlockType, ErrorKind, Slot, SlotType};
use crate::type_check::is_of_type;

/// Maps a block's own kind to the slot kind it materializes as when evaluated.
/// `ForeignFunction -> Lambda` conflates foreign and native function closures at the value
/// level; the reference core does the same, and this crate preserves it deliberately
/// rather than inventing a distinct value kind nothing asks for.
pub fn slot_type_for_block(block_type: BlockType) -> SlotType {
    match block_type {
        BlockType::Lambda | BlockType::ForeignFunction => SlotType::Lambda,
        BlockType::Pi => SlotType::Pi,
        BlockType::Sigma => SlotType::Sigma,
        BlockType::Adt => SlotType::Adt,
    }
}

/// Instantiate `callee`'s slots into `local`, resolving `argument` and `captured`
/// relative to the current call frame, and return the result's local address.
///
/// `out_final_argument`, when present, receives the local address the `Argument`
/// prototype ultimately bound to (the caller-supplied argument, or a freshly synthesized
/// open `Argument` slot when none was supplied) — remapped to survive the GC cycle this
/// call performs on exit.
pub fn evaluate(
    global: &GlobalStore,
    local: &mut LocalStore,
    callee: GlobalAddress,
    argument: Option<LocalAddress>,
    captured: Option<LocalAddress>,
    out_final_argument: Option<&mut Option<LocalAddress>>,
) -> Result<LocalAddress, EvaluatorError> {
    // Cloning the block is cheap: `Native` holds an `Arc<[Slot]>`, `Foreign` an `Arc<dyn
    // Fn>`. `global` is only ever read during evaluation — a foreign callback recursing
    // through `call`/`evaluate` only needs a shared reference, which is also exactly what
    // `ForeignCallback` hands it.
    let block = global.block(callee)?.clone();

    let depth = local
        .enter_call()
        .map_err(|limit| EvaluatorError::CallDepthExceeded { limit })?;
    local.push_gc_barrier();

    let mut final_argument: Option<LocalAddress> = None;

    let result = match &block {
        Block::Foreign { callback } => callback(global, local, callee, argument, &mut final_argument),
        Block::Native { block_type, slots } => {
            evaluate_native(global, local, *block_type, slots, callee, depth, argument, captured, &mut final_argument)
        }
    };

    local.exit_call();

    let mut roots = match final_argument {
        Some(addr) if out_final_argument.is_some() => vec![result, addr],
        _ => vec![result],
    };
    local.pop_gc_barrier(&mut roots);
    let result = roots[0];
    if let Some(out) = out_final_argument {
        *out = roots.get(1).copied();
    }

    Ok(result)
}

#[allow(clippy::too_many_arguments)]
fn evaluate_native(
    global: &GlobalStore,
    local: &mut LocalStore,
    block_type: BlockType,
    prototypes: &[Slot],
    callee: GlobalAddress,
    call_depth: u32,
    argument: Option<LocalAddress>,
    captured: Option<LocalAddress>,
    final_argument: &mut Option<LocalAddress>,
) -> LocalAddress {
    debug_assert!(!prototypes.is_empty());

    // `remap[i]` is the local address prototype slot `i` was materialized to.
    let mut remap: Vec<LocalAddress> = Vec::with_capacity(prototypes.len());

    for (i, prototype) in prototypes.iter().enumerate() {
        let resolve = |position: u8, operand: u16| -> u16 {
            if crate::descriptor::operand_is_local_address(prototype.type_, position) {
                remap[operand as usize].0
            } else {
                operand
            }
        };
        let operand0 = resolve(0, prototype.operand0);
        let operand1 = resolve(1, prototype.operand1);
        let operand2 = resolve(2, prototype.operand2);

        trace!("evaluate: prototype {i} ({:?}) -> resolved ({operand0}, {operand1}, {operand2})", prototype.type_);

        let materialized = match prototype.type_ {
            SlotType::UnresolvedSymbol | SlotType::Error => {
                let addr = local.create_slot(Slot::error(ErrorKind::InvalidInstruction));
                remap.push(addr);
                break;
            }
            SlotType::Argument => {
                debug_assert_eq!(operand0, 0);
                let expected_type = operand1;
                let bound = match argument {
                    None => local.create_slot(Slot::argument(call_depth - 1, expected_type)),
                    Some(addr) => addr,
                };
                *final_argument = Some(bound);
                if !is_of_type(local, bound, LocalAddress(expected_type)) {
                    let addr = local.create_slot(Slot::error(ErrorKind::TypeChecking));
                    remap.push(addr);
                    break;
                }
                bound
            }
            SlotType::Captured => match captured {
                Some(chain) => walk_capture_chain(local, chain, operand0),
                None => local.create_slot(Slot::captured(operand0)),
            },
            SlotType::SelfRef if call_depth > 1 => {
                let capture_addr = match captured {
                    Some(chain) => walk_capture_chain_to_cell(local, chain, operand0),
                    None => local.create_slot(Slot::captured(0)),
                };
                local.create_slot(Slot::self_closure(slot_type_for_block(block_type), capture_addr, callee))
            }
            _ => local.create_slot(Slot::new(slot_type_for_block(block_type), operand0, operand1, operand2)),
        };
        remap.push(materialized);
    }

    let _ = global; // reserved for SelfRef variants that may one day need to register a block

    *remap
        .last()
        .expect("a native block always materializes at least one slot")
}

/// The `SelfRef` case needs the *cell itself*, not the payload a `Captured` walk would
/// extract — it is building a new capture link whose `captures` field points at this cell.
/// `walk_capture_chain` returns a payload; stepping one short of that (or zero steps, for
/// depth 0) gives the cell.
fn walk_capture_chain_to_cell(local: &LocalStore, start: LocalAddress, depth: u16) -> LocalAddress {
    if depth == 0 {
        return start;
    }
    // Walking depth - 1 steps along `captures` lands on the cell whose own `captures`
    // link is the one `depth` steps down; reuse the same descent as a normal walk.
    let mut cell = start;
    for _ in 0..depth - 1 {
        let slot = local.slot(cell);
        assert_eq!(slot.type_, crate::slot::SlotType::CallCapture);
        cell = slot.capture_captures();
    }
    local.slot(cell).capture_captures()
}

/// `call(callee, argument)` is the common case of [`evaluate`]: an argument, no capture
/// chain, no interest in the final argument out-parameter.
pub fn call(
    global: &GlobalStore,
    local: &mut LocalStore,
    callee: GlobalAddress,
    argument: LocalAddress,
) -> Result<LocalAddress, EvaluatorError> {
    evaluate(global, local, callee, Some(argument), None, None)
}
