//! Property-based tests for SessionConfig serialization and merging.
//!
//! A configuration must survive a JSON round trip unchanged, and merging
//! overrides must touch exactly the fields that are present.

use anubis_shell::types::settings::{ConfigOverrides, PerformanceTier, SessionConfig, ThemeMode};
use proptest::prelude::*;

fn arb_theme_mode() -> impl Strategy<Value = ThemeMode> {
    prop_oneof![
        Just(ThemeMode::Dark),
        Just(ThemeMode::Light),
        Just(ThemeMode::System),
    ]
}

fn arb_tier() -> impl Strategy<Value = PerformanceTier> {
    prop_oneof![
        Just(PerformanceTier::Low),
        Just(PerformanceTier::Balanced),
        Just(PerformanceTier::Maximum),
    ]
}

fn arb_config() -> impl Strategy<Value = SessionConfig> {
    (
        arb_theme_mode(),
        "#[0-9a-f]{6}",
        any::<bool>(),
        "https://[a-z]{3,12}\\.(com|org|gg)/[a-z0-9]{0,8}",
        arb_tier(),
    )
        .prop_map(
            |(theme, title_bar_color, start_fullscreen, game_url, performance_mode)| {
                SessionConfig {
                    theme,
                    title_bar_color,
                    start_fullscreen,
                    game_url,
                    performance_mode,
                }
            },
        )
}

fn arb_overrides() -> impl Strategy<Value = ConfigOverrides> {
    (
        proptest::option::of(arb_theme_mode()),
        proptest::option::of("#[0-9A-F]{6}"),
        proptest::option::of(any::<bool>()),
        proptest::option::of("https://[a-z]{3,12}\\.net/"),
        proptest::option::of(arb_tier()),
    )
        .prop_map(
            |(theme, title_bar_color, start_fullscreen, game_url, performance_mode)| {
                ConfigOverrides {
                    theme,
                    title_bar_color,
                    start_fullscreen,
                    game_url,
                    performance_mode,
                }
            },
        )
}

proptest! {
    #[test]
    fn config_json_roundtrip(config in arb_config()) {
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, config);
    }

    #[test]
    fn merge_touches_only_present_fields(base in arb_config(), overrides in arb_overrides()) {
        let merged = base.merged(&overrides);

        prop_assert_eq!(merged.theme, overrides.theme.unwrap_or(base.theme));
        prop_assert_eq!(
            &merged.title_bar_color,
            overrides.title_bar_color.as_ref().unwrap_or(&base.title_bar_color)
        );
        prop_assert_eq!(
            merged.start_fullscreen,
            overrides.start_fullscreen.unwrap_or(base.start_fullscreen)
        );
        prop_assert_eq!(&merged.game_url, overrides.game_url.as_ref().unwrap_or(&base.game_url));
        prop_assert_eq!(
            merged.performance_mode,
            overrides.performance_mode.unwrap_or(base.performance_mode)
        );
    }

    #[test]
    fn merge_is_idempotent(base in arb_config(), overrides in arb_overrides()) {
        let once = base.merged(&overrides);
        let twice = once.merged(&overrides);
        prop_assert_eq!(once, twice);
    }
}
