//! Anubis Shell: a chromeless desktop shell around one game site.
//!
//! The library exposes the view and session lifecycle controller and its
//! services for the binaries and integration tests.

pub mod app;
pub mod command_channel;
pub mod controller;
pub mod host;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
