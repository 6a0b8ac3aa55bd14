use std::io::ErrorKind;
use std::path::{Component, Path as FsPath, PathBuf};

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tracing::warn;

use crate::infra::AppState;
use crate::pages;

/// Serves files from the configured public directory under `/public`.
pub(crate) async fn serve_asset(
    State(state): State<AppState>,
    Path(requested): Path<String>,
) -> Response {
    let Some(relative) = sanitize(&requested) else {
        return not_found();
    };
    let full_path = state.public_dir.join(relative);

    match tokio::fs::metadata(&full_path).await {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return not_found(),
        Err(err) if err.kind() == ErrorKind::NotFound => return not_found(),
        Err(err) => return read_failure(&full_path, err),
    }

    match tokio::fs::read(&full_path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&full_path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                bytes,
            )
                .into_response()
        }
        Err(err) => read_failure(&full_path, err),
    }
}

fn read_failure(path: &FsPath, err: std::io::Error) -> Response {
    warn!(error = %err, path = %path.display(), "unable to read static asset");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::server_error())).into_response()
}

/// Accepts only plain relative segments so requests cannot escape the public directory.
fn sanitize(requested: &str) -> Option<PathBuf> {
    let path = FsPath::new(requested);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(segment) => clean.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found("Not Found", "404 - Not Found")),
    )
        .into_response()
}
