use std::collections::HashMap;

use tracing::debug;

use crate::types::errors::SurfaceError;
use crate::types::surface::{SurfaceId, SurfaceOptions, SurfaceState, TabId};

/// Controller-side record of one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRecord {
    pub id: SurfaceId,
    pub url: String,
    pub title: String,
    pub state: SurfaceState,
    pub zoom: f64,
    pub frame_rate: u32,
    pub audio_muted: bool,
}

impl SurfaceRecord {
    pub fn new(id: SurfaceId, options: &SurfaceOptions) -> Self {
        Self {
            id,
            url: options.url.clone(),
            title: options.url.clone(),
            state: SurfaceState::Created,
            zoom: options.zoom,
            frame_rate: options.frame_rate,
            audio_muted: options.audio_muted,
        }
    }

    /// Moves to `next` if the lifecycle allows it. Returns whether the state changed.
    pub fn transition(&mut self, next: SurfaceState) -> bool {
        if self.state == next || !self.state.can_transition_to(next) {
            return false;
        }
        debug!(surface = %self.id, from = ?self.state, to = ?next, "surface state");
        self.state = next;
        true
    }

    pub fn is_live(&self) -> bool {
        !self.state.is_destroyed()
    }
}

/// Trait defining the surface registry interface.
pub trait SurfaceRegistryTrait {
    fn create_tab(&mut self, url: &str) -> TabId;
    fn close_tab(&mut self, id: TabId) -> Option<SurfaceRecord>;
    fn switch_to(&mut self, id: SurfaceId) -> Result<bool, SurfaceError>;
    fn active(&self) -> SurfaceId;
    fn get(&self, id: SurfaceId) -> Option<&SurfaceRecord>;
    fn get_mut(&mut self, id: SurfaceId) -> Option<&mut SurfaceRecord>;
    fn contains(&self, id: SurfaceId) -> bool;
    fn tab_ids(&self) -> Vec<TabId>;
    fn background_tabs(&self) -> Vec<TabId>;
    fn tab_count(&self) -> usize;
    fn surface_ids(&self) -> Vec<SurfaceId>;
    fn drain_all(&mut self) -> Vec<SurfaceId>;
}

/// In-memory registry of the primary surface and the external tabs.
///
/// The primary surface is never removed while the window lives; only
/// `drain_all` at window close marks it destroyed. Tab entries are removed
/// the moment their surface is torn down.
pub struct SurfaceRegistry {
    primary: SurfaceRecord,
    tabs: HashMap<TabId, SurfaceRecord>,
    active: SurfaceId,
    next_tab_id: u64,
}

impl SurfaceRegistry {
    pub fn new(primary_url: &str) -> Self {
        Self {
            primary: SurfaceRecord::new(SurfaceId::Primary, &SurfaceOptions::primary(primary_url)),
            tabs: HashMap::new(),
            active: SurfaceId::Primary,
            next_tab_id: 1,
        }
    }

    pub fn primary(&self) -> &SurfaceRecord {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut SurfaceRecord {
        &mut self.primary
    }

    /// The identity the next `create_tab` will hand out.
    pub fn peek_next_tab_id(&self) -> TabId {
        TabId(self.next_tab_id)
    }
}

impl SurfaceRegistryTrait for SurfaceRegistry {
    /// Registers a new tab bound to `url` and makes it active.
    fn create_tab(&mut self, url: &str) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        let record = SurfaceRecord::new(SurfaceId::Tab(id), &SurfaceOptions::tab(url));
        self.tabs.insert(id, record);
        self.active = SurfaceId::Tab(id);
        id
    }

    /// Removes a tab. Unknown ids are a no-op and return `None`.
    /// If the removed tab was active, the primary surface becomes active.
    fn close_tab(&mut self, id: TabId) -> Option<SurfaceRecord> {
        let mut record = self.tabs.remove(&id)?;
        record.transition(SurfaceState::Destroyed);
        if self.active == SurfaceId::Tab(id) {
            self.active = SurfaceId::Primary;
        }
        Some(record)
    }

    /// Makes `id` active. Returns `Ok(false)` if it already was.
    fn switch_to(&mut self, id: SurfaceId) -> Result<bool, SurfaceError> {
        if !self.contains(id) {
            return Err(SurfaceError::NotFound(id));
        }
        if self.active == id {
            return Ok(false);
        }
        self.active = id;
        Ok(true)
    }

    fn active(&self) -> SurfaceId {
        self.active
    }

    fn get(&self, id: SurfaceId) -> Option<&SurfaceRecord> {
        match id {
            SurfaceId::Primary => Some(&self.primary).filter(|r| r.is_live()),
            SurfaceId::Tab(tab) => self.tabs.get(&tab),
        }
    }

    fn get_mut(&mut self, id: SurfaceId) -> Option<&mut SurfaceRecord> {
        match id {
            SurfaceId::Primary => Some(&mut self.primary).filter(|r| r.is_live()),
            SurfaceId::Tab(tab) => self.tabs.get_mut(&tab),
        }
    }

    fn contains(&self, id: SurfaceId) -> bool {
        self.get(id).is_some()
    }

    fn tab_ids(&self) -> Vec<TabId> {
        let mut ids: Vec<TabId> = self.tabs.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Tabs that are not currently active.
    fn background_tabs(&self) -> Vec<TabId> {
        self.tab_ids()
            .into_iter()
            .filter(|id| self.active != SurfaceId::Tab(*id))
            .collect()
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Every live surface, tabs first, primary last.
    fn surface_ids(&self) -> Vec<SurfaceId> {
        let mut ids: Vec<SurfaceId> = self.tab_ids().into_iter().map(SurfaceId::Tab).collect();
        if self.primary.is_live() {
            ids.push(SurfaceId::Primary);
        }
        ids
    }

    /// Removes every tab and marks the primary destroyed. Returns what was live.
    fn drain_all(&mut self) -> Vec<SurfaceId> {
        let ids = self.surface_ids();
        self.tabs.clear();
        self.primary.transition(SurfaceState::Destroyed);
        self.active = SurfaceId::Primary;
        ids
    }
}
