//! Folio preview server
//!
//! Serves a built site root under the configured base path so that the
//! production search bundle (`<base>/pagefind/`) can be exercised locally.

use std::{net::SocketAddr, path::Path};

use axum::{Router, response::Redirect, routing::get};
use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Create the preview router for `site_root` mounted at `base_path`.
///
/// Unknown paths below the base get the site's `index.html` with a 404
/// status. With a non-root base path, `/` redirects to the base.
pub fn create_router(site_root: &Path, base_path: &str) -> Router {
    let index = ServeFile::new(site_root.join("index.html"));
    let files = ServeDir::new(site_root).not_found_service(index);
    let base = base_path.trim_end_matches('/');

    let router = if base.is_empty() {
        Router::new().fallback_service(files)
    } else {
        let target = base.to_string();
        Router::new()
            .route(
                "/",
                get(move || {
                    let target = target.clone();
                    async move { Redirect::temporary(&target) }
                }),
            )
            .nest_service(base, files)
    };

    router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Serve the site described by `config` until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let site_root = Path::new(&config.server.site_root);
    if !site_root.join("index.html").exists() {
        tracing::warn!(?site_root, "Site root has no index.html; build the site first");
    }
    let bundle = site_root.join("pagefind");
    if !bundle.is_dir() {
        tracing::warn!(
            ?bundle,
            "No search bundle found; search will fail to load in production builds"
        );
    }

    let app = create_router(site_root, &config.site.base_path);
    let addr = SocketAddr::from(([127, 0, 0, 1], config.server.port));
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, base_path = %config.site.base_path, "Serving site");
    println!();
    println!(
        "  Preview: http://{addr}{}",
        config.url_for("").trim_end_matches('/')
    );
    println!();

    axum::serve(listener, app).await.wrap_err("Server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("index.html"), "<html>home</html>").expect("write");
        std::fs::create_dir(dir.path().join("pagefind")).expect("mkdir");
        std::fs::write(
            dir.path().join("pagefind").join("pagefind-ui.js"),
            "window.PagefindUI = function () {};",
        )
        .expect("write");
        dir
    }

    async fn get_path(router: Router, path: &str) -> (StatusCode, String, Option<String>) {
        let response = router
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&body).into_owned(), location)
    }

    #[tokio::test]
    async fn test_serves_bundle_under_base_path() {
        let dir = site();
        let router = create_router(dir.path(), "/docs/");

        let (status, body, _) = get_path(router, "/docs/pagefind/pagefind-ui.js").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("PagefindUI"));
    }

    #[tokio::test]
    async fn test_serves_index_at_base() {
        let dir = site();
        let router = create_router(dir.path(), "/docs");

        let (status, body, _) = get_path(router, "/docs").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("home"));
    }

    #[tokio::test]
    async fn test_root_redirects_to_base() {
        let dir = site();
        let router = create_router(dir.path(), "/docs/");

        let (status, _, location) = get_path(router, "/").await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/docs"));
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_index() {
        let dir = site();
        let router = create_router(dir.path(), "/");

        let (status, body, _) = get_path(router, "/posts/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("home"));
    }

    #[tokio::test]
    async fn test_root_base_serves_bundle() {
        let dir = site();
        let router = create_router(dir.path(), "/");

        let (status, _, _) = get_path(router, "/pagefind/pagefind-ui.js").await;

        assert_eq!(status, StatusCode::OK);
    }
}
