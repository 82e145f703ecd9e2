//! Geometry Engine: maps window bounds, display work area and window mode
//! to the bounds of the active surface.
//!
//! Pure and deterministic. The maximized branch also reports the bounds the
//! window itself must be snapped to; the window manager applies that snap.

use crate::types::geometry::{Layout, Rect, WindowMode};

/// Height reserved for the custom title bar, in logical pixels.
pub const CHROME_HEIGHT: u32 = 32;

/// Computes the layout of the active surface for one window state.
pub fn compute_bounds(window: Rect, work_area: Rect, mode: WindowMode, chrome_height: u32) -> Layout {
    match mode {
        WindowMode::Fullscreen => Layout {
            window: None,
            surface: below_chrome(window.width, window.height, chrome_height),
        },
        WindowMode::Maximized => Layout {
            window: Some(work_area),
            surface: below_chrome(work_area.width, work_area.height, chrome_height),
        },
        WindowMode::Normal => Layout {
            window: None,
            surface: below_chrome(window.width, window.height, chrome_height),
        },
    }
}

fn below_chrome(width: u32, height: u32, chrome_height: u32) -> Rect {
    Rect {
        x: 0,
        y: chrome_height as i32,
        width,
        height: height.saturating_sub(chrome_height),
    }
}
