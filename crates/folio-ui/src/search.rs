//! Site search control for the Folio frontend.
//!
//! Renders the open button and the search dialog, then hands the markup to
//! a [`SearchModal`](crate::modal::SearchModal) once it is mounted.

use folio_core::SiteEnv;
use leptos::prelude::*;

use crate::{
    modal::ModalSettings,
    web::{self, WebSearchModal},
};

/// Shown in place of the search box in development builds.
pub const DEV_NOTICE: &str = "Search is only available in production builds. Try building and \
                              previewing the site to test it out locally.";

/// Header search control with a modal dialog.
///
/// The open button starts disabled and is enabled once the controller has
/// wired its listeners. In production builds the dialog holds the mount
/// point the search UI is loaded into; in development builds it holds
/// [`DEV_NOTICE`].
#[component]
pub fn SiteSearch(
    /// Build mode and base path of the site.
    env: SiteEnv,
    /// Shortcut, mount point and search UI flags.
    #[prop(optional)]
    settings: Option<ModalSettings>,
) -> impl IntoView {
    let settings = settings.unwrap_or_default();
    let production = env.mode.is_production();
    let shortcut_label = settings.shortcut.clone();
    let shortcut_hint = settings.shortcut.clone();
    let mount_id = settings.mount_id().to_string();

    let root_ref = NodeRef::<leptos::html::Div>::new();
    let controller = StoredValue::new_local(None::<WebSearchModal>);

    Effect::new(move |_| {
        let Some(root) = root_ref.get() else {
            return;
        };
        if controller.with_value(Option::is_some) {
            return;
        }
        match web::attach_to(&root, &env, &settings) {
            Ok(modal) => controller.set_value(Some(modal)),
            Err(err) => log::error!("Search modal not attached: {err}"),
        }
    });

    on_cleanup(move || {
        let _ = controller.try_update_value(|slot| {
            if let Some(modal) = slot.take() {
                modal.detach();
            }
        });
    });

    view! {
      <div class="folio-site-search" node_ref=root_ref>
        <button
          data-open-modal=""
          disabled=true
          class="folio-search-open"
          aria-label="Search"
          aria-keyshortcuts=shortcut_label
        >
          <span class="folio-search-label">"Search"</span>
          <kbd class="folio-search-kbd">{shortcut_hint}</kbd>
        </button>
        <dialog class="folio-search-dialog" aria-label="Search">
          <div class="dialog-frame">
            <button data-close-modal="" class="folio-search-close">
              "Cancel"
            </button>
            <Show when=move || production fallback=|| view! { <DevSearchNotice /> }>
              <div class="search-container">
                <div id=mount_id.clone()></div>
              </div>
            </Show>
          </div>
        </dialog>
      </div>
    }
}

/// Placeholder for the search box when no index exists.
#[component]
fn DevSearchNotice() -> impl IntoView {
    view! {
      <div class="folio-search-dev-notice">
        <p>{DEV_NOTICE}</p>
      </div>
    }
}
