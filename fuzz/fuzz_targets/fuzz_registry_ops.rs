#![no_main]
use arbitrary::Arbitrary;
use dao_registry::{DaoRegistry, Principal, RegistryConfig};
use libfuzzer_sys::fuzz_target;

/// Fuzz arbitrary operation sequences against one registry.
///
/// Checks after every step:
/// - A failed operation leaves `state_hash` unchanged
/// - Counter, index, and map agree (unless the counter was reset without a full sweep)
/// - A successful add never leaves the count above the limit

#[derive(Arbitrary, Debug)]
enum Op {
    Add { caller: u8, target: u8 },
    Remove { caller: u8, target: u8 },
    SetLimit { caller: u8, limit: u8 },
    UpdateLimitConditionally { caller: u8, limit: u8 },
    ResetCount { caller: u8 },
    ResetSystem { caller: u8 },
    ClearAt { caller: u8, ordinal: u8 },
    BatchAdd { caller: u8, targets: Vec<u8> },
    BatchRemove { caller: u8, targets: Vec<u8> },
    TogglePause { caller: u8 },
    Delegate { caller: u8, to: u8 },
    Revoke { caller: u8 },
}

#[derive(Arbitrary, Debug)]
struct RegistryInput {
    max_members: u8,
    sweep_slots: u8,
    enforce_pause: bool,
    gate_conditional_limit: bool,
    ops: Vec<Op>,
}

/// Seed 0 is always the admin.
fn principal(seed: u8) -> Principal {
    Principal::from_bytes([seed; 32])
}

fuzz_target!(|input: RegistryInput| {
    // Limit to prevent excessive runtime
    if input.ops.len() > 256 {
        return;
    }

    let config = RegistryConfig {
        max_members: (input.max_members as u64).max(1),
        reset_sweep_slots: (input.sweep_slots as usize).max(1),
        enforce_pause: input.enforce_pause,
        gate_conditional_limit: input.gate_conditional_limit,
        ..Default::default()
    };
    let admin = principal(0);
    let mut registry = DaoRegistry::new(admin, config).unwrap();
    let mut counter_decoupled = false;

    for op in &input.ops {
        let before = registry.state_hash();
        let mut added = false;

        let result = match op {
            Op::Add { caller, target } => {
                added = true;
                registry.add_dao_member(&principal(*caller), principal(*target))
            }
            Op::Remove { caller, target } => {
                registry.remove_dao_member(&principal(*caller), &principal(*target))
            }
            Op::SetLimit { caller, limit } => {
                registry.set_member_limit(&principal(*caller), *limit as u64)
            }
            Op::UpdateLimitConditionally { caller, limit } => {
                registry.update_limit_conditionally(&principal(*caller), *limit as u64)
            }
            Op::ResetCount { caller } => {
                let r = registry.reset_member_count(&principal(*caller));
                counter_decoupled |= r.is_ok();
                r
            }
            Op::ResetSystem { caller } => {
                let r = registry.reset_dao_system(&principal(*caller));
                if let Ok(report) = &r {
                    // Survivors past the window stay active under a zeroed counter
                    counter_decoupled = report.remaining > 0;
                }
                r.map(|_| ())
            }
            Op::ClearAt { caller, ordinal } => registry
                .clear_member_at_index(&principal(*caller), *ordinal as u64)
                .map(|_| ()),
            Op::BatchAdd { caller, targets } => {
                added = true;
                let targets: Vec<Principal> = targets.iter().map(|t| principal(*t)).collect();
                registry.batch_add_members(&principal(*caller), &targets)
            }
            Op::BatchRemove { caller, targets } => {
                let targets: Vec<Principal> = targets.iter().map(|t| principal(*t)).collect();
                registry.batch_remove_members(&principal(*caller), &targets)
            }
            Op::TogglePause { caller } => registry.toggle_pause(&principal(*caller)).map(|_| ()),
            Op::Delegate { caller, to } => {
                registry.delegate_votes(&principal(*caller), principal(*to))
            }
            Op::Revoke { caller } => registry.revoke_delegation(&principal(*caller)).map(|_| ()),
        };

        match result {
            Ok(()) => {
                if added && !counter_decoupled {
                    assert!(registry.current_member_count() <= registry.max_members());
                }
            }
            Err(_) => assert_eq!(registry.state_hash(), before, "failed {:?} mutated state", op),
        }

        if !counter_decoupled {
            assert!(registry.is_consistent(), "inconsistent after {:?}", op);
        }
        assert_eq!(registry.members().len(), registry.store().active_member_count() as usize);
    }
});
