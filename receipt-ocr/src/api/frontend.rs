use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

const LANDING_PAGE: &str = "index.html";

/// Files under `static/`, compiled into the binary.
#[derive(RustEmbed)]
#[folder = "static"]
struct Assets;

/// `GET /` answers with the upload form.
pub async fn serve_root() -> Response {
    embedded(LANDING_PAGE)
}

/// Unrouted paths resolve to an embedded file or 404.
pub async fn serve_fallback(uri: Uri) -> Response {
    match uri.path().trim_start_matches('/') {
        "" => embedded(LANDING_PAGE),
        name if name.split('/').any(|segment| segment == "..") => {
            StatusCode::BAD_REQUEST.into_response()
        }
        name => embedded(name),
    }
}

fn embedded(name: &str) -> Response {
    let Some(asset) = Assets::get(name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mime = mime_guess::from_path(name).first_or_octet_stream().to_string();

    ([(header::CONTENT_TYPE, mime)], asset.data.into_owned()).into_response()
}
