//! Search modal controller.
//!
//! Owns the open/closed lifecycle of the search dialog and every listener it
//! needs. Listener registrations are guards held by the controller:
//!
//! - open control, close control and the page keydown shortcut live from
//!   [`SearchModal::attach`] until the controller is detached or dropped;
//! - the page click listener for outside-click dismissal exists only while
//!   the dialog is open and is registered at most once.

use std::{cell::RefCell, fmt, rc::Rc, time::Duration};

use folio_core::{Result, SiteEnv, config::SearchConfig};

use crate::host::{ClickInput, KeyInput, ModalSurface, SearchUiHost};

/// Id of the element the search UI is mounted into.
pub const SEARCH_MOUNT_ID: &str = "folio-search";

/// Open/closed state of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

/// Tunables for the modal and its deferred search UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalSettings {
    /// Key that opens the dialog from anywhere on the page.
    pub shortcut: String,

    /// Selector of the search UI mount point.
    pub mount: String,

    /// Delay used when the page offers no idle signal.
    pub idle_fallback: Duration,

    pub show_images: bool,

    pub show_sub_results: bool,
}

impl ModalSettings {
    /// Element id of the mount point, without the leading `#`.
    pub fn mount_id(&self) -> &str {
        self.mount.trim_start_matches('#')
    }
}

impl Default for ModalSettings {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for ModalSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            shortcut: config.shortcut.clone(),
            mount: format!("#{SEARCH_MOUNT_ID}"),
            idle_fallback: Duration::from_millis(u64::from(config.idle_fallback_ms)),
            show_images: config.show_images,
            show_sub_results: config.show_sub_results,
        }
    }
}

struct Inner<S: ModalSurface> {
    surface: S,
    shortcut: String,
    outside_click: RefCell<Option<S::Listener>>,
}

impl<S: ModalSurface> Inner<S> {
    fn open(self: &Rc<Self>, origin: Option<&S::Click>) -> Result<()> {
        if !self.surface.is_open() {
            self.surface.show_modal()?;
        }
        self.surface.focus_search_input();

        // The opening click is still bubbling; keep it away from the page
        // click listener registered below.
        if let Some(event) = origin {
            event.stop_propagation();
        }

        if self.outside_click.borrow().is_none() {
            let weak = Rc::downgrade(self);
            let listener = self.surface.listen_page_clicks(Box::new(move |event: &S::Click| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_page_click(event);
                }
            }))?;
            *self.outside_click.borrow_mut() = Some(listener);
        }

        Ok(())
    }

    fn close(&self) {
        if self.surface.is_open() {
            self.surface.close_dialog();
        }
        // Also covers a dialog the browser closed natively (Escape).
        let listener = self.outside_click.borrow_mut().take();
        drop(listener);
    }

    fn on_page_click(&self, event: &S::Click) {
        if event.target().dismisses() {
            self.close();
        }
    }

    fn on_key(self: &Rc<Self>, event: &S::Key) {
        if event.key() != self.shortcut || self.surface.is_open() {
            return;
        }
        event.prevent_default();
        if let Err(err) = self.open(None) {
            log::error!("Failed to open search dialog: {err}");
        }
    }

    fn state(&self) -> ModalState {
        if self.surface.is_open() {
            ModalState::Open
        } else {
            ModalState::Closed
        }
    }
}

/// An attached search modal.
///
/// Dropping the controller (or calling [`SearchModal::detach`]) removes every
/// listener it registered, including the outside-click listener when the
/// dialog is open at that moment, and cancels a search UI load that has not
/// started yet.
pub struct SearchModal<S: ModalSurface, H: SearchUiHost> {
    inner: Rc<Inner<S>>,
    _open_trigger: S::Listener,
    _close_trigger: S::Listener,
    _shortcut: S::Listener,
    search_ui: Option<H::Idle>,
}

impl<S: ModalSurface, H: SearchUiHost> SearchModal<S, H> {
    /// Wire up the dialog found in `surface`.
    ///
    /// The open control is enabled only once its listener is in place. In
    /// production builds the search UI load is scheduled for the next idle
    /// period.
    pub fn attach(surface: S, host: &H, env: &SiteEnv, settings: &ModalSettings) -> Result<Self> {
        let inner = Rc::new(Inner {
            surface,
            shortcut: settings.shortcut.clone(),
            outside_click: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let open_trigger = inner
            .surface
            .listen_open_trigger(Box::new(move |event: &S::Click| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if let Err(err) = inner.open(Some(event)) {
                    log::error!("Failed to open search dialog: {err}");
                }
            }))?;

        let weak = Rc::downgrade(&inner);
        let close_trigger = inner
            .surface
            .listen_close_trigger(Box::new(move |_: &S::Click| {
                if let Some(inner) = weak.upgrade() {
                    inner.close();
                }
            }))?;

        inner.surface.enable_open_trigger();

        let weak = Rc::downgrade(&inner);
        let shortcut = inner.surface.listen_page_keys(Box::new(move |event: &S::Key| {
            if let Some(inner) = weak.upgrade() {
                inner.on_key(event);
            }
        }))?;

        let search_ui = schedule_search_ui(host, env, settings)?;
        log::debug!(
            "Search modal attached (mode: {}, shortcut: {:?})",
            env.mode,
            settings.shortcut
        );

        Ok(Self {
            inner,
            _open_trigger: open_trigger,
            _close_trigger: close_trigger,
            _shortcut: shortcut,
            search_ui,
        })
    }

    /// Show the dialog and start watching for outside clicks.
    ///
    /// `origin` is the click that asked for the dialog, if any; its
    /// propagation is stopped so it cannot count as an outside click.
    pub fn open(&self, origin: Option<&S::Click>) -> Result<()> {
        self.inner.open(origin)
    }

    /// Close the dialog and stop watching for outside clicks. No-op when
    /// already closed.
    pub fn close(&self) {
        self.inner.close();
    }

    pub fn is_open(&self) -> bool {
        self.inner.surface.is_open()
    }

    pub fn state(&self) -> ModalState {
        self.inner.state()
    }

    /// Whether a search UI load was scheduled at attach time.
    pub fn search_ui_scheduled(&self) -> bool {
        self.search_ui.is_some()
    }

    /// Remove all listeners and release the dialog.
    pub fn detach(self) {
        log::debug!("Search modal detached");
        self.inner.outside_click.borrow_mut().take();
    }
}

impl<S: ModalSurface, H: SearchUiHost> fmt::Debug for SearchModal<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchModal")
            .field("state", &self.state())
            .field("shortcut", &self.inner.shortcut)
            .field("search_ui_scheduled", &self.search_ui_scheduled())
            .finish()
    }
}

/// Queue the one-shot search UI load for production builds.
fn schedule_search_ui<H: SearchUiHost>(
    host: &H,
    env: &SiteEnv,
    settings: &ModalSettings,
) -> Result<Option<H::Idle>> {
    if !env.mode.is_production() {
        log::debug!("Search UI is not loaded in {} builds", env.mode);
        return Ok(None);
    }

    let options = env
        .search_ui_options(settings.mount.clone())
        .with_show_images(settings.show_images)
        .with_show_sub_results(settings.show_sub_results);
    let loader = host.clone();

    let idle = host.request_idle(
        Box::new(move || {
            log::debug!("Loading search UI from {}", options.bundle_path);
            let load = loader.load_search_ui(options);
            loader.spawn_local(Box::pin(async move {
                match load.await {
                    Ok(()) => log::info!("Search UI ready"),
                    Err(err) => log::error!("Search unavailable: {err}"),
                }
            }));
        }),
        settings.idle_fallback,
    )?;

    Ok(Some(idle))
}
