use anubis_shell::managers::surface_registry::{SurfaceRegistry, SurfaceRegistryTrait};
use anubis_shell::types::errors::SurfaceError;
use anubis_shell::types::surface::{SurfaceId, SurfaceState, TabId};

const GAME: &str = "https://example.com";

#[test]
fn test_primary_is_active_by_default() {
    let registry = SurfaceRegistry::new(GAME);
    assert_eq!(registry.active(), SurfaceId::Primary);
    assert_eq!(registry.get(SurfaceId::Primary).unwrap().url, GAME);
    assert_eq!(registry.surface_ids(), vec![SurfaceId::Primary]);
}

#[test]
fn test_first_tab_id_is_one() {
    let mut registry = SurfaceRegistry::new(GAME);
    assert_eq!(registry.peek_next_tab_id(), TabId(1));
    assert_eq!(registry.create_tab("https://a.example"), TabId(1));
    assert_eq!(registry.peek_next_tab_id(), TabId(2));
}

#[test]
fn test_create_tab_becomes_active() {
    let mut registry = SurfaceRegistry::new(GAME);
    let id = registry.create_tab("https://a.example");
    assert_eq!(registry.active(), SurfaceId::Tab(id));
    let record = registry.get(SurfaceId::Tab(id)).unwrap();
    assert_eq!(record.url, "https://a.example");
    assert_eq!(record.state, SurfaceState::Created);
    assert_eq!(record.zoom, 1.0);
    assert_eq!(record.frame_rate, 60);
}

#[test]
fn test_closing_background_tab_keeps_active() {
    let mut registry = SurfaceRegistry::new(GAME);
    let a = registry.create_tab("https://a.example");
    let b = registry.create_tab("https://b.example");
    registry.close_tab(a).unwrap();
    assert_eq!(registry.active(), SurfaceId::Tab(b));
    assert_eq!(registry.tab_ids(), vec![b]);
}

#[test]
fn test_close_unknown_tab_is_noop() {
    let mut registry = SurfaceRegistry::new(GAME);
    let a = registry.create_tab("https://a.example");
    assert!(registry.close_tab(TabId(42)).is_none());
    assert_eq!(registry.tab_count(), 1);
    assert_eq!(registry.active(), SurfaceId::Tab(a));
}

#[test]
fn test_background_tabs_exclude_active() {
    let mut registry = SurfaceRegistry::new(GAME);
    let a = registry.create_tab("https://a.example");
    let b = registry.create_tab("https://b.example");
    let c = registry.create_tab("https://c.example");
    registry.switch_to(SurfaceId::Tab(b)).unwrap();
    assert_eq!(registry.background_tabs(), vec![a, c]);

    registry.switch_to(SurfaceId::Primary).unwrap();
    assert_eq!(registry.background_tabs(), vec![a, b, c]);
}

#[test]
fn test_switch_to_closed_tab_fails() {
    let mut registry = SurfaceRegistry::new(GAME);
    let a = registry.create_tab("https://a.example");
    registry.close_tab(a);
    match registry.switch_to(SurfaceId::Tab(a)) {
        Err(SurfaceError::NotFound(id)) => assert_eq!(id, SurfaceId::Tab(a)),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_primary_state_machine_through_recovery() {
    let mut registry = SurfaceRegistry::new(GAME);
    let primary = registry.primary_mut();
    assert!(primary.transition(SurfaceState::Loading));
    assert!(primary.transition(SurfaceState::Ready));
    assert!(primary.transition(SurfaceState::Crashed));
    assert!(!primary.transition(SurfaceState::Ready));
    assert!(primary.transition(SurfaceState::Recovering));
    assert!(primary.transition(SurfaceState::Loading));
    assert_eq!(registry.primary().state, SurfaceState::Loading);
}

#[test]
fn test_drain_all_hides_primary() {
    let mut registry = SurfaceRegistry::new(GAME);
    registry.create_tab("https://a.example");
    registry.drain_all();
    assert_eq!(registry.tab_count(), 0);
    assert!(registry.get(SurfaceId::Primary).is_none());
    assert!(registry.get_mut(SurfaceId::Primary).is_none());
    assert_eq!(registry.primary().state, SurfaceState::Destroyed);
    assert!(registry.drain_all().is_empty());
}
