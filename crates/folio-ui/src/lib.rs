//! Folio UI Components
//!
//! The header search control of the Folio site: a toggle button and a modal
//! dialog that, in production builds, hosts the pre-built search UI.
//!
//! # Modules
//!
//! - [`host`] - Traits the controller runs against (dialog surface, idle
//!   scheduling, search UI loading)
//! - [`modal`] - [`SearchModal`] controller: open/close lifecycle, dismiss
//!   triggers, `/` shortcut, deferred search UI load
//! - [`web`] - Browser implementation on `web-sys`
//! - [`search`] - [`SiteSearch`] Leptos component
//!
//! # Example
//!
//! ```ignore
//! use folio_core::{BuildMode, Config};
//! use folio_ui::{ModalSettings, SiteSearch};
//! use leptos::prelude::*;
//!
//! #[component]
//! fn Header(config: Config) -> impl IntoView {
//!     let env = config.site_env(BuildMode::from_build_env());
//!     let settings = ModalSettings::from(&config.search);
//!     view! {
//!         <header>
//!             <SiteSearch env=env settings=settings />
//!         </header>
//!     }
//! }
//! ```

pub mod host;
pub mod modal;
pub mod search;
pub mod web;

pub use host::{ClickInput, ClickTarget, KeyInput, ModalSurface, SearchUiHost};
pub use modal::{ModalSettings, ModalState, SEARCH_MOUNT_ID, SearchModal};
pub use search::{DEV_NOTICE, SiteSearch};
pub use web::{WebHost, WebSearchModal, WebSurface, attach_to};
