//! Newline-delimited JSON channel into a headless controller.
//!
//! Extracted from the `anubis-shell-ctl` binary so it can be unit-tested.
//! Each inbound line is one [`InboundMessage`]; the reply is every
//! notification and host effect the message caused, in order.
//!
//! Inbound:  `{"type":"command","command":{"cmd":"zoom-in"}}`
//! Outbound: `{"type":"notification","notification":{"event":"zoom-changed","factor":1.1}}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::controller::Controller;
use crate::host::headless::{HeadlessHost, HostCall};
use crate::types::errors::ChannelError;
use crate::types::surface::{SurfaceId, SurfaceSignal};
use crate::types::window::{
    NavigationDecision, Notification, ProcessEvent, WindowCommand, WindowEvent,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    Command { command: WindowCommand },
    Signal { surface: SurfaceId, signal: SurfaceSignal },
    Window { event: WindowEvent },
    Process { event: ProcessEvent },
    WillNavigate { surface: SurfaceId, url: String },
    NewWindow { surface: SurfaceId, url: String },
    /// Fires due timers without waiting for the loop's deadline.
    Tick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    Ready { version: String },
    Notification { notification: Notification },
    Effect { call: HostCall },
    Navigation { surface: SurfaceId, decision: NavigationDecision },
    Error { message: String },
    Closed,
}

/// Parses one inbound line.
pub fn parse_line(line: &str) -> Result<InboundMessage, ChannelError> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| ChannelError::Parse(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| ChannelError::UnknownMessage(e.to_string()))
}

/// Applies one message to the controller and collects what it caused.
pub fn dispatch(
    controller: &mut Controller<HeadlessHost>,
    message: InboundMessage,
) -> Vec<OutboundMessage> {
    let mut out = Vec::new();
    match message {
        InboundMessage::Command { command } => {
            if let Err(e) = controller.handle_command(command) {
                out.push(OutboundMessage::Error {
                    message: e.to_string(),
                });
            }
        }
        InboundMessage::Signal { surface, signal } => {
            controller.handle_surface_signal(surface, signal)
        }
        InboundMessage::Window { event } => controller.handle_window_event(event),
        InboundMessage::Process { event } => controller.handle_process_event(event),
        InboundMessage::WillNavigate { surface, url } => {
            let decision = controller.will_navigate(surface, &url);
            out.push(OutboundMessage::Navigation { surface, decision });
        }
        InboundMessage::NewWindow { surface, url } => {
            controller.new_window_requested(surface, &url)
        }
        InboundMessage::Tick => controller.tick(),
    }
    let mut effects = drain_effects(controller);
    effects.append(&mut out);
    effects
}

/// Parses and dispatches one line. Blank lines produce nothing.
pub fn handle_line(controller: &mut Controller<HeadlessHost>, line: &str) -> Vec<OutboundMessage> {
    if line.trim().is_empty() {
        return Vec::new();
    }
    match parse_line(line) {
        Ok(message) => dispatch(controller, message),
        Err(e) => vec![OutboundMessage::Error {
            message: e.to_string(),
        }],
    }
}

/// Host calls first, then notifications, then `closed` if the controller
/// shut down.
pub fn drain_effects(controller: &mut Controller<HeadlessHost>) -> Vec<OutboundMessage> {
    let host = controller.host_mut();
    let mut out: Vec<OutboundMessage> = host
        .take_calls()
        .into_iter()
        .map(|call| OutboundMessage::Effect { call })
        .collect();
    out.extend(
        host.take_notifications()
            .into_iter()
            .map(|notification| OutboundMessage::Notification { notification }),
    );
    if controller.is_closed() {
        out.push(OutboundMessage::Closed);
    }
    out
}

/// Serializes an outbound message as one line of JSON.
pub fn encode(message: &OutboundMessage) -> String {
    serde_json::to_string(message).unwrap_or_else(|e| {
        serde_json::json!({"type": "error", "message": format!("encode error: {}", e)})
            .to_string()
    })
}
