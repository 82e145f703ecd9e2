//! Anubis Shell: a chromeless desktop shell around one game site.
//!
//! Entry point: opens the shell window with the configured game.
//! When built without the `gui` feature, starts the controller on a
//! headless host and prints what it would have done.

#[cfg(feature = "gui")]
fn main() {
    anubis_shell::ui::shell_app::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    use anubis_shell::app::{init_logging, Bootstrap};
    use anubis_shell::command_channel::{drain_effects, encode};
    use anubis_shell::controller::Controller;
    use anubis_shell::host::headless::HeadlessHost;
    use anubis_shell::types::window::WindowEvent;

    init_logging();
    let boot = Bootstrap::prepare(None);
    println!("launch switches: {}", boot.launch_flags.to_arg_string());

    let mut controller = Controller::new(HeadlessHost::new(), boot.settings);
    if let Err(e) = controller.start() {
        eprintln!("failed to start: {}", e);
        std::process::exit(1);
    }
    controller.handle_window_event(WindowEvent::ReadyToShow);
    controller.shutdown();
    for message in drain_effects(&mut controller) {
        println!("{}", encode(&message));
    }
    println!("built without the `gui` feature; use anubis-shell-ctl to drive the controller");
}
