use anubis_shell::host::headless::{HeadlessHost, HostCall};
use anubis_shell::services::config_binder::ConfigBinder;
use anubis_shell::services::settings_engine::SettingsEngine;
use anubis_shell::types::settings::{ConfigOverrides, ThemeMode, DEFAULT_DARK_TINT};
use anubis_shell::types::window::{Notification, SatelliteKind};
use tempfile::TempDir;

fn binder_in(dir: &TempDir, system_dark: bool) -> ConfigBinder {
    let path = dir.path().join("settings.json").to_string_lossy().to_string();
    let mut engine = SettingsEngine::new(Some(path));
    engine.load_or_default();
    ConfigBinder::new(engine, system_dark)
}

fn last_colors(host: &HeadlessHost) -> Option<String> {
    host.notifications().iter().rev().find_map(|n| match n {
        Notification::UpdateColors { color } => Some(color.clone()),
        _ => None,
    })
}

#[test]
fn test_apply_sets_theme_source_and_tint() {
    let dir = TempDir::new().unwrap();
    let mut binder = binder_in(&dir, true);
    let mut host = HeadlessHost::new();

    let outcome = binder
        .apply(
            &mut host,
            &ConfigOverrides {
                theme: Some(ThemeMode::Dark),
                title_bar_color: Some("#123456".to_string()),
                ..Default::default()
            },
            &[],
        )
        .unwrap();

    assert!(outcome.persisted);
    assert!(host
        .calls()
        .contains(&HostCall::SetThemeSource { theme: ThemeMode::Dark }));
    assert_eq!(last_colors(&host).as_deref(), Some("#123456"));
    assert!(binder.is_dark());
}

#[test]
fn test_apply_colors_open_satellites() {
    let dir = TempDir::new().unwrap();
    let mut binder = binder_in(&dir, true);
    let mut host = HeadlessHost::new();

    binder
        .apply(
            &mut host,
            &ConfigOverrides {
                theme: Some(ThemeMode::Light),
                ..Default::default()
            },
            &[SatelliteKind::Settings],
        )
        .unwrap();

    let background = binder.satellite_background().to_string();
    assert_eq!(
        host.calls().last(),
        Some(&HostCall::SetSatelliteBackground {
            kind: SatelliteKind::Settings,
            color: background,
        })
    );
}

#[test]
fn test_invalid_override_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut binder = binder_in(&dir, true);
    let mut host = HeadlessHost::new();

    let result = binder.apply(
        &mut host,
        &ConfigOverrides {
            game_url: Some("ftp://files.example".to_string()),
            ..Default::default()
        },
        &[],
    );

    assert!(result.is_err());
    assert!(host.calls().is_empty());
    assert!(!dir.path().join("settings.json").exists());
}

#[test]
fn test_game_url_change_requests_navigation() {
    let dir = TempDir::new().unwrap();
    let mut binder = binder_in(&dir, true);
    let mut host = HeadlessHost::new();

    let outcome = binder
        .apply(
            &mut host,
            &ConfigOverrides {
                game_url: Some("https://play.example.com/".to_string()),
                ..Default::default()
            },
            &[],
        )
        .unwrap();

    assert_eq!(outcome.navigate_to.as_deref(), Some("https://play.example.com/"));
    assert!(!outcome.relaunch);
}

#[test]
fn test_invalid_stored_tint_falls_back() {
    let dir = TempDir::new().unwrap();
    let binder = binder_in(&dir, true);
    assert_eq!(binder.resolve_tint("definitely not a color"), DEFAULT_DARK_TINT);
}

#[test]
fn test_system_theme_follows_host() {
    let dir = TempDir::new().unwrap();
    let mut binder = binder_in(&dir, true);
    let mut host = HeadlessHost::new();
    host.set_prefers_dark(false);

    binder.refresh_system_theme(&mut host, &[]);

    assert_eq!(binder.config().theme, ThemeMode::System);
    assert!(!binder.is_dark());
}
