//! Mock origin server.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::Router;
use tokio::net::TcpListener;

/// A mock HTTP origin bound to an ephemeral local port.
///
/// Every request is counted before routing, including redirect hops, so
/// tests can assert on exact request totals. The server task runs until the
/// test's runtime shuts down.
pub struct MockOrigin {
    addr: SocketAddr,
    requests: Arc<AtomicUsize>,
}

impl MockOrigin {
    /// Serve `router` on `127.0.0.1:0`, counting every request.
    pub async fn serve(router: Router) -> Self {
        let requests = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&requests);
        let router = router.layer(middleware::from_fn(move |request: Request, next: Next| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                next.run(request).await
            }
        }));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock origin");
        let addr = listener.local_addr().expect("mock origin has no address");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                eprintln!("mock origin stopped: {e}");
            }
        });

        Self { addr, requests }
    }

    /// Address the origin is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL of the origin, e.g. `http://127.0.0.1:49152/`.
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Full URL for `path` (must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Total requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}
