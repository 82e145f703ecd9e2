// Shared type definitions
// Each submodule defines types used across the controller, services and hosts.

pub mod errors;
pub mod geometry;
pub mod memory;
pub mod settings;
pub mod surface;
pub mod window;
