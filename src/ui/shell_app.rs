//! Desktop front end using `wry` + `tao`.
//!
//! Architecture:
//! - One chrome-less `tao` window. A title-bar webview fills the top
//!   `CHROME_HEIGHT` pixels; every surface is a child webview below it, and
//!   only the attached one is visible.
//! - Webview callbacks never touch the controller. They post a
//!   [`ShellEvent`] through the event-loop proxy and the loop dispatches it.
//! - Satellite windows need the event-loop target to be created, so
//!   `open_satellite` queues them and the loop builds them after dispatch.
//! - Renderer crashes, load failures and GPU process loss are not reported
//!   by the system webviews `wry` wraps, so those signals never arrive here.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::Value;
use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event::{Event, StartCause, WindowEvent as TaoWindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Fullscreen, Theme, Window, WindowBuilder, WindowId};
use tracing::{debug, error, info, warn};
use wry::{NewWindowResponse, PageLoadEvent, WebContext, WebView, WebViewBuilder};

use crate::app::{init_logging, Bootstrap};
use crate::controller::Controller;
use crate::host::Host;
use crate::managers::window_manager::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::platform;
use crate::services::geometry_engine::CHROME_HEIGHT;
use crate::services::navigation_policy::{NavigationPolicy, NavigationRoute};
use crate::services::pressure_monitor::sample_system_memory;
use crate::types::errors::HostError;
use crate::types::geometry::Rect;
use crate::types::memory::MemoryInfo;
use crate::types::settings::ThemeMode;
use crate::types::surface::{ClearScope, SurfaceId, SurfaceOptions, SurfaceSignal};
use crate::types::window::{
    Notification, Satellite, SatelliteKind, WindowCommand, WindowEvent,
};

#[derive(Debug)]
pub enum ShellEvent {
    Command(WindowCommand),
    Signal(SurfaceId, SurfaceSignal),
    Navigate { surface: SurfaceId, url: String },
    NewWindow { surface: SurfaceId, url: String },
}

const TITLE_BAR_HTML: &str = r#"<!DOCTYPE html><html><head><meta charset="UTF-8"><style>
*{margin:0;padding:0;box-sizing:border-box}
body{height:32px;display:flex;align-items:center;font:12px -apple-system,"Segoe UI",sans-serif;background:var(--tint,#1a1a1a);color:#e6e6e6;-webkit-app-region:drag;user-select:none}
#progress{position:absolute;left:0;bottom:0;height:2px;background:#c9a227;transition:width .2s}
.title{flex:1;padding-left:10px}
button{-webkit-app-region:no-drag;border:0;background:transparent;color:inherit;width:40px;height:32px}
button:hover{background:rgba(255,255,255,.1)}
</style></head><body>
<div class="title">Anubis</div>
<button data-cmd="reload">&#x21bb;</button><button data-cmd="open-settings">&#x2699;</button>
<button data-cmd="minimize">&#x2013;</button><button data-cmd="maximize">&#x25a1;</button><button data-cmd="close">&#x2715;</button>
<div id="progress" style="width:0"></div>
<script>
document.querySelectorAll('button[data-cmd]').forEach(function(b){
  b.addEventListener('click',function(){window.ipc.postMessage(JSON.stringify({cmd:b.dataset.cmd}))});
});
window.__anubis={notify:function(n){
  if(n.event==='update-colors')document.body.style.setProperty('--tint',n.color);
  if(n.event==='loading-progress'){var p=document.getElementById('progress');p.style.width=(n.progress>=1?0:n.progress*100)+'%'}
}};
</script></body></html>"#;

const HEAP_REPORT_JS: &str = "window.ipc.postMessage(JSON.stringify({heap:(performance.memory&&performance.memory.usedJSHeapSize)||0}))";

fn settings_html(config: &Value) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="UTF-8"><style>
body{{font:13px -apple-system,"Segoe UI",sans-serif;padding:16px;margin:0}}
label{{display:block;margin:10px 0 4px}}select,input{{width:100%}}
</style></head><body>
<label>Theme</label><select id="theme"><option>system</option><option>light</option><option>dark</option></select>
<label>Title bar color</label><input id="titleBarColor" type="color">
<label>Game URL</label><input id="gameUrl" type="url">
<label>Performance</label><select id="performanceMode"><option>low</option><option>balanced</option><option>maximum</option></select>
<label><input id="startFullscreen" type="checkbox" style="width:auto"> Start maximized</label>
<p><button id="save">Save</button> <button id="cancel">Cancel</button></p>
<script>
var c={config};
function send(m){{window.ipc.postMessage(JSON.stringify(m))}}
['theme','titleBarColor','gameUrl','performanceMode'].forEach(function(k){{document.getElementById(k).value=c[k]}});
document.getElementById('startFullscreen').checked=c.startFullscreen;
function read(){{return {{theme:theme.value,titleBarColor:titleBarColor.value,gameUrl:gameUrl.value,performanceMode:performanceMode.value,startFullscreen:startFullscreen.checked}}}}
theme.onchange=titleBarColor.oninput=function(){{send({{cmd:'preview-settings',settings:read()}})}};
document.getElementById('save').onclick=function(){{send({{cmd:'update-settings',settings:read()}});send({{cmd:'close-settings'}})}};
document.getElementById('cancel').onclick=function(){{send({{cmd:'close-settings'}})}};
</script></body></html>"#
    )
}

fn prompt_html(url: &str) -> String {
    let quoted = serde_json::to_string(url).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="UTF-8"><style>
body{{font:13px -apple-system,"Segoe UI",sans-serif;padding:16px;margin:0}}#u{{word-break:break-all;opacity:.8}}
</style></head><body>
<p>This link leaves the game. Open it?</p><p id="u"></p>
<p><button id="open">Open</button> <button id="back">Go back</button></p>
<script>
var url={quoted};
document.getElementById('u').textContent=url;
function send(m){{window.ipc.postMessage(JSON.stringify(m))}}
document.getElementById('open').onclick=function(){{send({{cmd:'open-external-link',url:url}})}};
document.getElementById('back').onclick=function(){{send({{cmd:'dismiss-satellites'}})}};
</script></body></html>"#
    )
}

fn parse_hex_rgba(color: &str) -> Option<(u8, u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?, 255))
}

fn to_wry_rect(bounds: Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::LogicalPosition::new(bounds.x, bounds.y).into(),
        size: wry::dpi::LogicalSize::new(bounds.width, bounds.height).into(),
    }
}

struct SurfaceView {
    webview: WebView,
    observed: Arc<AtomicBool>,
}

struct SatelliteView {
    window: Window,
    _webview: WebView,
}

/// [`Host`] backed by real `tao` windows and `wry` webviews.
pub struct WryHost {
    window: Window,
    chrome: WebView,
    proxy: EventLoopProxy<ShellEvent>,
    surfaces: HashMap<SurfaceId, SurfaceView>,
    attached: Option<SurfaceId>,
    satellites: HashMap<SatelliteKind, SatelliteView>,
    pending_satellites: Vec<Satellite>,
    policy: Arc<Mutex<NavigationPolicy>>,
    // Profile directory of the primary surface; outlives every webview built on it.
    session_context: WebContext,
    satellite_background: Option<(u8, u8, u8, u8)>,
    close_requested: bool,
}

impl WryHost {
    fn new(
        window: Window,
        proxy: EventLoopProxy<ShellEvent>,
        game_url: &str,
    ) -> Result<Self, HostError> {
        let ipc_proxy = proxy.clone();
        let chrome = WebViewBuilder::new()
            .with_html(TITLE_BAR_HTML)
            .with_bounds(to_wry_rect(Rect::new(0, 0, DEFAULT_WINDOW_WIDTH, CHROME_HEIGHT)))
            .with_ipc_handler(move |req: wry::http::Request<String>| {
                forward_command(&ipc_proxy, req.body());
            })
            .build_as_child(&window)
            .map_err(|e| HostError::OperationFailed(format!("title bar: {}", e)))?;

        Ok(Self {
            window,
            chrome,
            proxy,
            surfaces: HashMap::new(),
            attached: None,
            satellites: HashMap::new(),
            pending_satellites: Vec::new(),
            policy: Arc::new(Mutex::new(NavigationPolicy::new(game_url))),
            session_context: WebContext::new(Some(platform::get_session_data_dir())),
            satellite_background: None,
            close_requested: false,
        })
    }

    fn window_id(&self) -> WindowId {
        self.window.id()
    }

    fn satellite_for(&self, id: WindowId) -> Option<SatelliteKind> {
        self.satellites
            .iter()
            .find(|(_, view)| view.window.id() == id)
            .map(|(kind, _)| *kind)
    }

    /// Current root window bounds in logical pixels.
    fn current_bounds(&self) -> Rect {
        let scale = self.window.scale_factor();
        let size = self.window.inner_size().to_logical::<f64>(scale);
        let position = self
            .window
            .outer_position()
            .map(|p| p.to_logical::<f64>(scale))
            .unwrap_or(LogicalPosition::new(0.0, 0.0));
        Rect::new(
            position.x as i32,
            position.y as i32,
            size.width as u32,
            size.height as u32,
        )
    }

    fn layout_chrome(&self) {
        let width = self.current_bounds().width;
        if let Err(e) = self
            .chrome
            .set_bounds(to_wry_rect(Rect::new(0, 0, width, CHROME_HEIGHT)))
        {
            debug!(error = %e, "title bar resize failed");
        }
    }

    /// Builds satellites queued by `open_satellite`.
    fn realize_satellites(&mut self, target: &EventLoopWindowTarget<ShellEvent>) {
        for satellite in std::mem::take(&mut self.pending_satellites) {
            let kind = satellite.kind();
            let (bounds, html) = match &satellite {
                Satellite::Settings { config, bounds } => (
                    *bounds,
                    settings_html(&serde_json::to_value(config).unwrap_or(Value::Null)),
                ),
                Satellite::ExternalLinkPrompt { url, bounds } => (*bounds, prompt_html(url)),
            };
            let window = match WindowBuilder::new()
                .with_title("Anubis")
                .with_inner_size(LogicalSize::new(bounds.width, bounds.height))
                .with_position(LogicalPosition::new(bounds.x, bounds.y))
                .with_resizable(false)
                .build(target)
            {
                Ok(w) => w,
                Err(e) => {
                    error!(?kind, error = %e, "failed to create satellite window");
                    continue;
                }
            };
            window.set_background_color(self.satellite_background);
            let ipc_proxy = self.proxy.clone();
            let webview = WebViewBuilder::new()
                .with_html(html)
                .with_ipc_handler(move |req: wry::http::Request<String>| {
                    forward_command(&ipc_proxy, req.body());
                })
                .build(&window);
            match webview {
                Ok(webview) => {
                    self.satellites.insert(
                        kind,
                        SatelliteView {
                            window,
                            _webview: webview,
                        },
                    );
                }
                Err(e) => error!(?kind, error = %e, "failed to create satellite webview"),
            }
        }
    }

    fn with_surface(&self, id: SurfaceId, op: &str, f: impl FnOnce(&WebView) -> wry::Result<()>) {
        match self.surfaces.get(&id) {
            Some(view) => {
                if let Err(e) = f(&view.webview) {
                    warn!(surface = %id, op, error = %e, "webview call failed");
                }
            }
            None => debug!(surface = %id, op, "no webview for surface"),
        }
    }
}

fn forward_command(proxy: &EventLoopProxy<ShellEvent>, body: &str) {
    match serde_json::from_str::<WindowCommand>(body) {
        Ok(cmd) => {
            let _ = proxy.send_event(ShellEvent::Command(cmd));
        }
        Err(e) => debug!(error = %e, "ignoring malformed ipc message"),
    }
}

impl Host for WryHost {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn memory_info(&self) -> MemoryInfo {
        sample_system_memory()
    }

    fn prefers_dark(&self) -> bool {
        self.window.theme() == Theme::Dark
    }

    /// tao reports monitor bounds only; the taskbar is not subtracted.
    fn work_area(&self, _window: Rect) -> Rect {
        match self.window.current_monitor() {
            Some(monitor) => {
                let scale = monitor.scale_factor();
                let position = monitor.position().to_logical::<f64>(scale);
                let size = monitor.size().to_logical::<f64>(scale);
                Rect::new(
                    position.x as i32,
                    position.y as i32,
                    size.width as u32,
                    size.height as u32,
                )
            }
            None => Rect::new(0, 0, DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
        }
    }

    fn set_window_bounds(&mut self, bounds: Rect) {
        self.window
            .set_outer_position(LogicalPosition::new(bounds.x, bounds.y));
        self.window
            .set_inner_size(LogicalSize::new(bounds.width, bounds.height));
        self.layout_chrome();
    }

    fn set_window_background(&mut self, color: &str) {
        if let Some(rgba) = parse_hex_rgba(color) {
            self.window.set_background_color(Some(rgba));
        }
    }

    fn set_theme_source(&mut self, theme: ThemeMode) {
        self.window.set_theme(match theme {
            ThemeMode::System => None,
            ThemeMode::Light => Some(Theme::Light),
            ThemeMode::Dark => Some(Theme::Dark),
        });
    }

    fn minimize(&mut self) {
        self.window.set_minimized(true);
    }

    fn maximize(&mut self) {
        self.window.set_maximized(true);
    }

    fn unmaximize(&mut self) {
        self.window.set_maximized(false);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.window
            .set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
    }

    fn show(&mut self) {
        self.window.set_visible(true);
    }

    fn focus_window(&mut self) {
        self.window.set_focus();
    }

    fn close_window(&mut self) {
        self.close_requested = true;
        self.window.set_visible(false);
    }

    fn open_devtools(&mut self) {
        #[cfg(debug_assertions)]
        {
            if let Some(view) = self.attached.and_then(|id| self.surfaces.get(&id)) {
                view.webview.open_devtools();
            }
        }
    }

    fn create_surface(&mut self, id: SurfaceId, options: &SurfaceOptions) -> Result<(), HostError> {
        if self.surfaces.contains_key(&id) {
            return Err(HostError::OperationFailed(format!("{} already exists", id)));
        }
        let observed = Arc::new(AtomicBool::new(true));

        let (load_proxy, load_observed) = (self.proxy.clone(), observed.clone());
        let (title_proxy, title_observed) = (self.proxy.clone(), observed.clone());
        let (nav_proxy, nav_observed) = (self.proxy.clone(), observed.clone());
        let (popup_proxy, popup_observed) = (self.proxy.clone(), observed.clone());
        let (ipc_proxy, ipc_observed) = (self.proxy.clone(), observed.clone());
        let policy = self.policy.clone();

        let base = if options.persistent_session {
            WebViewBuilder::with_web_context(&mut self.session_context)
        } else {
            WebViewBuilder::new().with_incognito(true)
        };
        let builder = base
            .with_url(&options.url)
            .with_visible(false)
            .with_bounds(to_wry_rect(Rect::default()))
            .with_devtools(cfg!(debug_assertions))
            .with_on_page_load_handler(move |event, _url| {
                if !load_observed.load(Ordering::Acquire) {
                    return;
                }
                let signal = match event {
                    PageLoadEvent::Started => SurfaceSignal::LoadStarted,
                    PageLoadEvent::Finished => SurfaceSignal::LoadFinished,
                };
                let _ = load_proxy.send_event(ShellEvent::Signal(id, signal));
            })
            .with_document_title_changed_handler(move |title| {
                if title_observed.load(Ordering::Acquire) {
                    let _ = title_proxy
                        .send_event(ShellEvent::Signal(id, SurfaceSignal::TitleUpdated { title }));
                }
            })
            .with_navigation_handler(move |url| {
                if !id.is_primary() {
                    return true;
                }
                let allowed = policy
                    .lock()
                    .map(|p| p.route_navigation(&url) == NavigationRoute::Allow)
                    .unwrap_or(false);
                if !allowed && nav_observed.load(Ordering::Acquire) {
                    let _ = nav_proxy.send_event(ShellEvent::Navigate { surface: id, url });
                }
                allowed
            })
            .with_new_window_req_handler(move |url, _features| {
                if popup_observed.load(Ordering::Acquire) {
                    let _ = popup_proxy.send_event(ShellEvent::NewWindow { surface: id, url });
                }
                NewWindowResponse::Deny
            })
            .with_ipc_handler(move |req: wry::http::Request<String>| {
                if !ipc_observed.load(Ordering::Acquire) {
                    return;
                }
                let used = serde_json::from_str::<Value>(req.body())
                    .ok()
                    .and_then(|v| v.get("heap").and_then(Value::as_u64));
                if let Some(used_bytes) = used {
                    let _ = ipc_proxy
                        .send_event(ShellEvent::Signal(id, SurfaceSignal::HeapReport { used_bytes }));
                }
            });

        // Child webviews only composite under X11 on Linux.
        let webview = builder
            .build_as_child(&self.window)
            .map_err(|e| HostError::OperationFailed(format!("{}: {}", id, e)))?;
        if let Err(e) = webview.zoom(options.zoom) {
            debug!(surface = %id, error = %e, "initial zoom failed");
        }
        self.surfaces.insert(id, SurfaceView { webview, observed });
        Ok(())
    }

    fn attach_surface(&mut self, id: SurfaceId) {
        self.attached = Some(id);
        for (other, view) in &self.surfaces {
            if let Err(e) = view.webview.set_visible(*other == id) {
                debug!(surface = %other, error = %e, "visibility change failed");
            }
        }
    }

    fn detach_surface(&mut self, id: SurfaceId) {
        self.with_surface(id, "detach", |w| w.set_visible(false));
    }

    fn set_surface_bounds(&mut self, id: SurfaceId, bounds: Rect) {
        self.layout_chrome();
        self.with_surface(id, "set_bounds", |w| w.set_bounds(to_wry_rect(bounds)));
    }

    fn detach_observers(&mut self, id: SurfaceId) {
        if let Some(view) = self.surfaces.get(&id) {
            view.observed.store(false, Ordering::Release);
        }
    }

    fn destroy_surface(&mut self, id: SurfaceId) -> Result<(), HostError> {
        self.surfaces
            .remove(&id)
            .map(drop)
            .ok_or(HostError::SurfaceUnavailable(id))
    }

    fn load_url(&mut self, id: SurfaceId, url: &str) -> Result<(), HostError> {
        let view = self
            .surfaces
            .get(&id)
            .ok_or(HostError::SurfaceUnavailable(id))?;
        if id.is_primary() {
            if let Ok(mut policy) = self.policy.lock() {
                policy.set_game_url(url);
            }
        }
        view.webview
            .load_url(url)
            .map_err(|e| HostError::OperationFailed(e.to_string()))
    }

    fn reload(&mut self, id: SurfaceId) -> Result<(), HostError> {
        let view = self
            .surfaces
            .get(&id)
            .ok_or(HostError::SurfaceUnavailable(id))?;
        view.webview
            .reload()
            .map_err(|e| HostError::OperationFailed(e.to_string()))
    }

    fn set_zoom(&mut self, id: SurfaceId, factor: f64) {
        self.with_surface(id, "zoom", |w| w.zoom(factor));
    }

    fn set_frame_rate(&mut self, id: SurfaceId, fps: u32) {
        debug!(surface = %id, fps, "frame rate is fixed by the system webview");
    }

    fn set_audio_muted(&mut self, id: SurfaceId, muted: bool) {
        let js = format!(
            "document.querySelectorAll('audio,video').forEach(function(m){{m.muted={}}})",
            muted
        );
        self.with_surface(id, "mute", |w| w.evaluate_script(&js));
    }

    fn focus_surface(&mut self, id: SurfaceId) {
        self.with_surface(id, "focus", |w| w.focus());
    }

    /// The system webviews only clear everything at once; completion is
    /// reported immediately.
    fn clear_data(&mut self, id: SurfaceId, scope: ClearScope) {
        let ok = match scope {
            ClearScope::ServiceWorkers => {
                let js = "navigator.serviceWorker&&navigator.serviceWorker.getRegistrations().then(function(r){r.forEach(function(x){x.unregister()})})";
                self.surfaces
                    .get(&id)
                    .map(|v| v.webview.evaluate_script(js).is_ok())
                    .unwrap_or(false)
            }
            ClearScope::Cache | ClearScope::Cookies => self
                .surfaces
                .get(&id)
                .map(|v| v.webview.clear_all_browsing_data().is_ok())
                .unwrap_or(false),
        };
        let _ = self
            .proxy
            .send_event(ShellEvent::Signal(id, SurfaceSignal::DataCleared { scope, ok }));
    }

    fn request_heap_report(&mut self, id: SurfaceId) {
        self.with_surface(id, "heap_report", |w| w.evaluate_script(HEAP_REPORT_JS));
    }

    fn reclaim_memory(&mut self, id: SurfaceId) {
        self.with_surface(id, "reclaim", |w| {
            w.evaluate_script("window.gc&&window.gc()")
        });
    }

    fn collect_garbage(&mut self) {
        for view in self.surfaces.values() {
            let _ = view.webview.evaluate_script("window.gc&&window.gc()");
        }
    }

    fn open_satellite(&mut self, satellite: &Satellite) -> Result<(), HostError> {
        self.pending_satellites.push(satellite.clone());
        Ok(())
    }

    fn focus_satellite(&mut self, kind: SatelliteKind) {
        if let Some(view) = self.satellites.get(&kind) {
            view.window.set_focus();
        }
    }

    fn close_satellite(&mut self, kind: SatelliteKind) {
        self.pending_satellites.retain(|s| s.kind() != kind);
        self.satellites.remove(&kind);
    }

    fn set_satellite_background(&mut self, kind: SatelliteKind, color: &str) {
        let Some(rgba) = parse_hex_rgba(color) else {
            return;
        };
        self.satellite_background = Some(rgba);
        if let Some(view) = self.satellites.get(&kind) {
            view.window.set_background_color(Some(rgba));
        }
    }

    fn open_external(&mut self, url: &str) -> Result<(), HostError> {
        platform::open_in_browser(url).map_err(|e| HostError::ExternalOpenFailed(e.to_string()))
    }

    fn notify(&mut self, notification: Notification) {
        let payload = match serde_json::to_string(&notification) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "notification not serializable");
                return;
            }
        };
        let js = format!("window.__anubis&&window.__anubis.notify({})", payload);
        if let Err(e) = self.chrome.evaluate_script(&js) {
            debug!(error = %e, "title bar notification failed");
        }
    }

    fn relaunch(&mut self) {
        let exe = match std::env::current_exe() {
            Ok(exe) => exe,
            Err(e) => {
                error!(error = %e, "cannot locate executable for relaunch");
                return;
            }
        };
        match std::process::Command::new(exe)
            .args(std::env::args().skip(1))
            .spawn()
        {
            Ok(_) => info!("relaunched"),
            Err(e) => error!(error = %e, "relaunch failed"),
        }
        self.close_requested = true;
    }
}

/// Tracks maximize/fullscreen/minimize, which tao only exposes as state.
#[derive(Default)]
struct ModeTracker {
    maximized: bool,
    fullscreen: bool,
    minimized: bool,
}

impl ModeTracker {
    fn changes(&mut self, window: &Window) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        let maximized = window.is_maximized();
        if maximized != self.maximized {
            self.maximized = maximized;
            events.push(if maximized {
                WindowEvent::Maximized
            } else {
                WindowEvent::Unmaximized
            });
        }
        let fullscreen = window.fullscreen().is_some();
        if fullscreen != self.fullscreen {
            self.fullscreen = fullscreen;
            events.push(if fullscreen {
                WindowEvent::EnteredFullscreen
            } else {
                WindowEvent::LeftFullscreen
            });
        }
        let minimized = window.is_minimized();
        if minimized && !self.minimized {
            events.push(WindowEvent::Minimized);
        }
        self.minimized = minimized;
        events
    }
}

fn dispatch(controller: &mut Controller<WryHost>, event: ShellEvent) {
    match event {
        ShellEvent::Command(cmd) => {
            if let Err(e) = controller.handle_command(cmd) {
                warn!(error = %e, "command failed");
            }
        }
        ShellEvent::Signal(id, signal) => controller.handle_surface_signal(id, signal),
        ShellEvent::Navigate { surface, url } => {
            controller.will_navigate(surface, &url);
        }
        ShellEvent::NewWindow { surface, url } => controller.new_window_requested(surface, &url),
    }
}

// ─── Main entry point ───

pub fn run() {
    init_logging();
    let boot = Bootstrap::prepare(None);
    boot.export_launch_flags();

    let event_loop: EventLoop<ShellEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("Anubis")
        .with_decorations(false)
        .with_visible(false)
        .with_inner_size(LogicalSize::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT))
        .build(&event_loop)
        .expect("Failed to create window");

    let game_url = {
        use crate::services::settings_engine::SettingsEngineTrait;
        boot.settings.get_settings().game_url.clone()
    };
    let host = WryHost::new(window, proxy, &game_url).expect("Failed to create title bar");
    let mut controller = Controller::new(host, boot.settings);
    if let Err(e) = controller.start() {
        error!(error = %e, "failed to start");
        return;
    }
    controller.handle_window_event(WindowEvent::ReadyToShow);

    let mut modes = ModeTracker::default();

    event_loop.run(move |event, target, control_flow| {
        match event {
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => controller.tick(),

            Event::WindowEvent {
                window_id, event, ..
            } if window_id == controller.host().window_id() => match event {
                TaoWindowEvent::CloseRequested => {
                    controller.handle_window_event(WindowEvent::CloseRequested)
                }
                TaoWindowEvent::Resized(_) => {
                    let bounds = controller.host().current_bounds();
                    for change in modes.changes(&controller.host().window) {
                        controller.handle_window_event(change);
                    }
                    controller.handle_window_event(WindowEvent::Resized { bounds });
                }
                TaoWindowEvent::Moved(_) => {
                    let bounds = controller.host().current_bounds();
                    controller.handle_window_event(WindowEvent::Moved { bounds });
                }
                TaoWindowEvent::Focused(true) => {
                    controller.handle_window_event(WindowEvent::Focused)
                }
                TaoWindowEvent::ThemeChanged(_) => {
                    controller.handle_window_event(WindowEvent::ThemeUpdated)
                }
                _ => {}
            },

            Event::WindowEvent {
                window_id,
                event: TaoWindowEvent::CloseRequested,
                ..
            } => {
                if let Some(kind) = controller.host().satellite_for(window_id) {
                    controller.host_mut().close_satellite(kind);
                    controller.handle_window_event(WindowEvent::SatelliteClosed { kind });
                }
            }

            Event::UserEvent(shell_event) => dispatch(&mut controller, shell_event),

            _ => {}
        }

        controller.host_mut().realize_satellites(target);

        if controller.is_closed() || controller.host().close_requested {
            *control_flow = ControlFlow::Exit;
            return;
        }
        *control_flow = match controller.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    });
}
