// Anubis Shell state managers
// Managers own in-memory state: the root window, the surface registry and the shortcut table.

pub mod shortcut_manager;
pub mod surface_registry;
pub mod window_manager;
