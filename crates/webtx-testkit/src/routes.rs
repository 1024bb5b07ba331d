//! Canned routers for common probe shapes.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{extract::Path, Form, Router};

/// `/` and `/health` answer 200 with body `healthy`.
pub fn healthy_origin() -> Router {
    Router::new()
        .route("/", get(|| async { "healthy" }))
        .route("/health", get(|| async { "healthy" }))
}

/// Every path answers the given status with the given body.
///
/// Panics on a status code outside the valid range; test setup only.
pub fn fixed_status(status: u16, body: &'static str) -> Router {
    let status = StatusCode::from_u16(status).expect("invalid status code");
    Router::new().fallback(move || async move { (status, body) })
}

/// `/hop/{n}` redirects down to `/hop/0`, which answers 200 `arrived`.
///
/// A GET of `/hop/k` therefore takes `k` redirect hops to resolve.
pub fn redirect_chain() -> Router {
    Router::new().route(
        "/hop/{n}",
        get(|Path(n): Path<u32>| async move {
            if n == 0 {
                (StatusCode::OK, "arrived").into_response()
            } else {
                Redirect::temporary(&format!("/hop/{}", n - 1)).into_response()
            }
        }),
    )
}

/// `/loop` redirects to itself forever.
pub fn redirect_loop() -> Router {
    Router::new().route("/loop", get(|| async { Redirect::temporary("/loop") }))
}

/// `/absolute` issues an absolute-URL redirect back to `/done` on the same
/// origin, for exercising Location values that carry scheme and host.
pub fn absolute_redirect() -> Router {
    Router::new()
        .route(
            "/absolute",
            get(|headers: HeaderMap| async move {
                let host = headers
                    .get(header::HOST)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("127.0.0.1");
                Redirect::temporary(&format!("http://{host}/done"))
            }),
        )
        .route("/done", get(|| async { "arrived" }))
}

/// `/submit` echoes posted form fields back as `key=value` lines.
pub fn form_echo() -> Router {
    Router::new().route(
        "/submit",
        post(|Form(fields): Form<Vec<(String, String)>>| async move {
            let lines: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            lines.join("\n")
        }),
    )
}
