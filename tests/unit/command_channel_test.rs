use anubis_shell::command_channel::{encode, handle_line, OutboundMessage};
use anubis_shell::controller::Controller;
use anubis_shell::host::headless::{HeadlessHost, HostCall};
use anubis_shell::services::settings_engine::SettingsEngine;
use anubis_shell::types::memory::{MemoryInfo, KIB_PER_GIB};
use anubis_shell::types::surface::SurfaceId;
use anubis_shell::types::window::{NavigationDecision, Notification};
use tempfile::TempDir;

fn controller_in(dir: &TempDir) -> Controller<HeadlessHost> {
    let path = dir.path().join("settings.json").to_string_lossy().to_string();
    let mut engine = SettingsEngine::new(Some(path));
    engine.load_or_default();
    let mut host = HeadlessHost::new();
    host.set_memory(MemoryInfo::new(16 * KIB_PER_GIB, 8 * KIB_PER_GIB));
    let mut controller = Controller::new(host, engine);
    controller.start().unwrap();
    controller.host_mut().take_calls();
    controller.host_mut().take_notifications();
    controller
}

#[test]
fn test_blank_line_is_ignored() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(&dir);
    assert!(handle_line(&mut controller, "   ").is_empty());
}

#[test]
fn test_zoom_command_reports_effect_then_notification() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(&dir);

    let out = handle_line(
        &mut controller,
        r#"{"type":"command","command":{"cmd":"zoom-in"}}"#,
    );

    assert_eq!(
        out,
        vec![
            OutboundMessage::Effect {
                call: HostCall::SetZoom {
                    id: SurfaceId::Primary,
                    factor: 1.1
                }
            },
            OutboundMessage::Notification {
                notification: Notification::ZoomChanged { factor: 1.1 }
            },
        ]
    );
}

#[test]
fn test_will_navigate_reports_decision() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(&dir);

    let out = handle_line(
        &mut controller,
        r#"{"type":"will-navigate","surface":"primary","url":"https://wiki.example.org/"}"#,
    );

    assert_eq!(
        out.last(),
        Some(&OutboundMessage::Navigation {
            surface: SurfaceId::Primary,
            decision: NavigationDecision::Cancel,
        })
    );
    assert!(out.iter().any(|m| matches!(
        m,
        OutboundMessage::Effect {
            call: HostCall::OpenSatellite { .. }
        }
    )));
}

#[test]
fn test_bad_input_yields_error_message() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(&dir);

    let out = handle_line(&mut controller, "{oops");
    assert!(matches!(out.as_slice(), [OutboundMessage::Error { .. }]));

    let out = handle_line(&mut controller, r#"{"type":"command","command":{"cmd":"fly"}}"#);
    assert!(matches!(out.as_slice(), [OutboundMessage::Error { .. }]));
}

#[test]
fn test_close_command_ends_with_closed() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(&dir);

    let out = handle_line(&mut controller, r#"{"type":"command","command":{"cmd":"close"}}"#);

    assert_eq!(out.last(), Some(&OutboundMessage::Closed));
    assert!(out.contains(&OutboundMessage::Effect {
        call: HostCall::CloseWindow
    }));

    let out = handle_line(&mut controller, r#"{"type":"command","command":{"cmd":"reload"}}"#);
    assert_eq!(
        out,
        vec![
            OutboundMessage::Closed,
            OutboundMessage::Error {
                message: "Controller is closed".to_string()
            },
        ]
    );
}

#[test]
fn test_tick_fires_due_recovery() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(&dir);
    handle_line(
        &mut controller,
        r#"{"type":"signal","surface":"primary","signal":{"signal":"render-process-gone","reason":"oom"}}"#,
    );
    controller
        .host_mut()
        .advance(std::time::Duration::from_secs(3));

    let out = handle_line(&mut controller, r#"{"type":"tick"}"#);

    assert!(out.contains(&OutboundMessage::Effect {
        call: HostCall::Reload {
            id: SurfaceId::Primary
        }
    }));
}

#[test]
fn test_encoded_effect_is_tagged() {
    let line = encode(&OutboundMessage::Effect {
        call: HostCall::Reload {
            id: SurfaceId::Primary,
        },
    });
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["type"], "effect");
    assert_eq!(value["call"]["call"], "reload");
}
