//! Property-based tests for the surface registry.
//!
//! Whatever sequence of create/close/switch operations is applied, exactly
//! one live surface is active, tab ids are never reused, and closing the
//! active tab hands activity back to the primary surface.

use std::collections::HashSet;

use anubis_shell::managers::surface_registry::{SurfaceRegistry, SurfaceRegistryTrait};
use anubis_shell::types::surface::{SurfaceId, TabId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create,
    Close(u64),
    Switch(Option<u64>),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Create),
        (1u64..12).prop_map(Op::Close),
        proptest::option::of(1u64..12).prop_map(Op::Switch),
    ]
}

proptest! {
    #[test]
    fn active_is_always_live(ops in proptest::collection::vec(arb_op(), 0..60)) {
        let mut registry = SurfaceRegistry::new("https://example.com");
        let mut issued: HashSet<TabId> = HashSet::new();

        for op in ops {
            match op {
                Op::Create => {
                    let id = registry.create_tab("https://tab.example");
                    prop_assert!(issued.insert(id), "tab id {} reused", id);
                    prop_assert_eq!(registry.active(), SurfaceId::Tab(id));
                }
                Op::Close(n) => {
                    let id = TabId(n);
                    let was_active = registry.active() == SurfaceId::Tab(id);
                    let closed = registry.close_tab(id).is_some();
                    if closed && was_active {
                        prop_assert_eq!(registry.active(), SurfaceId::Primary);
                    }
                }
                Op::Switch(target) => {
                    let target = target.map(|n| SurfaceId::Tab(TabId(n))).unwrap_or(SurfaceId::Primary);
                    let before = registry.active();
                    match registry.switch_to(target) {
                        Ok(_) => prop_assert_eq!(registry.active(), target),
                        Err(_) => prop_assert_eq!(registry.active(), before),
                    }
                }
            }

            let active = registry.active();
            prop_assert!(registry.contains(active));
            prop_assert!(!registry.background_tabs().iter().any(|t| SurfaceId::Tab(*t) == active));
            prop_assert_eq!(registry.surface_ids().len(), registry.tab_count() + 1);
        }
    }
}
