use folio_core::{BuildMode, Config, SiteEnv};
use folio_ui::{ModalSettings, SiteSearch};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

#[component]
pub fn App(
    /// Site configuration the page was built with.
    config: Config,
    /// Development or production build.
    mode: BuildMode,
) -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let env = config.site_env(mode);
    let settings = ModalSettings::from(&config.search);
    let title = config.site.title.clone();
    let shortcut = config.search.shortcut.clone();

    view! {
      <Title text=title.clone() />

      <Router>
        <SiteHeader title=title.clone() env=env settings=settings />
        <main>
          <Routes fallback=|| "Page not found.".into_view()>
            <Route
              path=StaticSegment("")
              view=move || view! { <HomePage title=title.clone() shortcut=shortcut.clone() /> }
            />
          </Routes>
        </main>
      </Router>
    }
}

/// Site header with the home link and the search control.
#[component]
fn SiteHeader(title: String, env: SiteEnv, settings: ModalSettings) -> impl IntoView {
    let home = env.base_path.clone();

    view! {
      <header class="folio-header">
        <a href=home class="folio-home">
          {title}
        </a>
        <SiteSearch env=env settings=settings />
      </header>
    }
}

/// Renders the home page.
#[component]
fn HomePage(title: String, shortcut: String) -> impl IntoView {
    view! {
      <h1>{title}</h1>
      <p>"Press " <kbd>{shortcut}</kbd> " to search the site."</p>
    }
}
