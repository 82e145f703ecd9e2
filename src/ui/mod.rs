//! Anubis Shell desktop front end.
//!
//! Uses `wry` for the embedded webviews and `tao` for the window:
//! - Windows: WebView2 (Chromium-based; receives the tier's launch switches)
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The title bar and satellite windows are small HTML pages that talk to
//! the controller through wry IPC using the window command wire format.

pub mod shell_app;
