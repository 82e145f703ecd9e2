//! Anubis Shell control channel: drives a headless controller over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! In:  {"type":"command","command":{"cmd":"open-external-link","url":"https://discord.gg/x"}}
//! Out: {"type":"effect","call":{"call":"open-external","url":"https://discord.gg/x"}}
//!
//! Timers (recovery reloads, pressure samples, heap probes) fire from the
//! same loop; stdin lines and the next deadline are raced with `select!`.

use std::io::{self, Write};
use std::time::Instant;

use anubis_shell::app::{init_logging, Bootstrap};
use anubis_shell::command_channel::{drain_effects, encode, handle_line, OutboundMessage};
use anubis_shell::controller::Controller;
use anubis_shell::host::headless::HeadlessHost;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

fn emit(messages: &[OutboundMessage]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for message in messages {
        let _ = writeln!(out, "{}", encode(message));
    }
    let _ = out.flush();
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending::<()>().await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let config_path = std::env::var("ANUBIS_SHELL_CONFIG").ok();
    let boot = Bootstrap::prepare(config_path);
    let mut controller = Controller::new(HeadlessHost::with_system_clock(), boot.settings);

    emit(&[OutboundMessage::Ready {
        version: env!("CARGO_PKG_VERSION").to_string(),
    }]);

    if let Err(e) = controller.start() {
        error!(error = %e, "controller failed to start");
        emit(&[OutboundMessage::Error {
            message: e.to_string(),
        }]);
        return;
    }
    emit(&drain_effects(&mut controller));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !controller.is_closed() {
        let deadline = controller.next_deadline();
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => emit(&handle_line(&mut controller, &line)),
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "stdin read failed");
                    break;
                }
            },
            _ = wait_until(deadline) => {
                controller.tick();
                emit(&drain_effects(&mut controller));
            }
        }
    }

    if !controller.is_closed() {
        controller.shutdown();
        emit(&drain_effects(&mut controller));
    }
    info!("control channel closed");
}
