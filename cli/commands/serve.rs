use crate::cli_args::ServeArgs;
use crate::load_config_for_command;
use anyhow::{Context, Result};
use axum::Router;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;
use std::net::SocketAddr;
use std::path::Path;

/// The browser client bundle, compiled into the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
struct ClientAssets;

pub fn handle_serve_command(args: &ServeArgs, quiet: bool) -> Result<()> {
    let config = load_config_for_command(Path::new("."), &args.config_opts)
        .context("Failed to load configuration")?;
    let port = config.effective_port(args.port);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(run_server(port, quiet))
}

async fn run_server(port: u16, quiet: bool) -> Result<()> {
    // The client bundle is the entire surface: no API endpoints.
    let app = Router::new().fallback(serve_asset);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    log::info!("Static asset server listening on {addr}");
    if !quiet {
        println!("Server running at http://localhost:{port}");
    }
    axum::serve(listener, app)
        .await
        .context("Static asset server terminated unexpectedly")
}

async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match ClientAssets::get(path) {
        Some(asset) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            log::debug!("Serving asset '{path}' as {mime}");
            (
                [(header::CONTENT_TYPE, mime.to_string())],
                asset.data.into_owned(),
            )
                .into_response()
        }
        None => {
            log::debug!("Asset not found: '{path}'");
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_bundle_is_embedded() {
        assert!(ClientAssets::get("index.html").is_some());
        assert!(ClientAssets::get("app.js").is_some());
        assert!(ClientAssets::get("missing.js").is_none());
    }
}
