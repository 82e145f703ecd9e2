//! Property-based tests for the geometry engine and the window manager layout.
//!
//! Layout is a pure function of its inputs, the surface never overlaps the
//! title bar, and a maximized layout always snaps to the work area.

use anubis_shell::managers::window_manager::{WindowManager, WindowManagerTrait};
use anubis_shell::services::geometry_engine::{compute_bounds, CHROME_HEIGHT};
use anubis_shell::types::geometry::{Rect, WindowMode};
use proptest::prelude::*;

fn arb_rect() -> impl Strategy<Value = Rect> {
    (-4000i32..4000, -4000i32..4000, 0u32..8000, 0u32..5000)
        .prop_map(|(x, y, width, height)| Rect::new(x, y, width, height))
}

fn arb_mode() -> impl Strategy<Value = WindowMode> {
    prop_oneof![
        Just(WindowMode::Normal),
        Just(WindowMode::Maximized),
        Just(WindowMode::Fullscreen),
    ]
}

proptest! {
    #[test]
    fn layout_is_deterministic(window in arb_rect(), work in arb_rect(), mode in arb_mode(), chrome in 0u32..200) {
        let a = compute_bounds(window, work, mode, chrome);
        let b = compute_bounds(window, work, mode, chrome);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn surface_sits_below_chrome(window in arb_rect(), work in arb_rect(), mode in arb_mode()) {
        let layout = compute_bounds(window, work, mode, CHROME_HEIGHT);
        prop_assert_eq!(layout.surface.x, 0);
        prop_assert_eq!(layout.surface.y, CHROME_HEIGHT as i32);

        let container = layout.window.unwrap_or(window);
        prop_assert_eq!(layout.surface.width, container.width);
        prop_assert_eq!(layout.surface.height, container.height.saturating_sub(CHROME_HEIGHT));
    }

    #[test]
    fn only_maximized_snaps(window in arb_rect(), work in arb_rect(), mode in arb_mode()) {
        let layout = compute_bounds(window, work, mode, CHROME_HEIGHT);
        if mode == WindowMode::Maximized {
            prop_assert_eq!(layout.window, Some(work));
        } else {
            prop_assert_eq!(layout.window, None);
        }
    }

    #[test]
    fn repeated_layout_is_idempotent(window in arb_rect(), work in arb_rect(), maximized in any::<bool>(), fullscreen in any::<bool>()) {
        let mut manager = WindowManager::new(window);
        manager.set_maximized(maximized);
        manager.set_fullscreen(fullscreen);

        let first = manager.layout(work);
        let bounds_after_first = manager.bounds();
        let second = manager.layout(work);

        prop_assert_eq!(first, second);
        prop_assert_eq!(bounds_after_first, manager.bounds());
    }
}
