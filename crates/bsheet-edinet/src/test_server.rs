//! Stub HTTP server for client tests.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;

type Handler = dyn Fn(&str) -> (u16, Vec<u8>) + Send + Sync;

#[derive(Clone)]
struct Stub {
    handler: Arc<Handler>,
    hits: Arc<AtomicUsize>,
}

async fn respond(State(stub): State<Stub>, uri: Uri) -> (StatusCode, Vec<u8>) {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    let (status, body) = (stub.handler)(&target);
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body,
    )
}

/// Serves every request with `handler(path_and_query)` and counts requests.
///
/// Returns the base URL and the request counter.
pub(crate) async fn serve<F>(handler: F) -> (String, Arc<AtomicUsize>)
where
    F: Fn(&str) -> (u16, Vec<u8>) + Send + Sync + 'static,
{
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new().fallback(respond).with_state(Stub {
        handler: Arc::new(handler),
        hits: Arc::clone(&hits),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), hits)
}
