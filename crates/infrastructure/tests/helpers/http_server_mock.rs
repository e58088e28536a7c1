#![allow(dead_code)]
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Local HTTP server with a fixed set of routes:
///
/// - `/ok`: 200 with a text body
/// - `/fail`: 500
/// - `/found`: 302 to `/ok`
/// - `/see-other`: 303 to `/ok`
/// - `/loop`: 302 to itself
/// - `/echo` (POST): 200 echoing the body
/// - `/preserve` (POST): 307 to `/echo`
pub async fn spawn_http_server() -> SocketAddr {
    let app = Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/found",
            get(|| async { (StatusCode::FOUND, [(LOCATION, "/ok")]) }),
        )
        .route("/see-other", post(|| async { Redirect::to("/ok") }))
        .route(
            "/loop",
            get(|| async { (StatusCode::FOUND, [(LOCATION, "/loop")]) }),
        )
        .route("/echo", post(|body: String| async move { body }))
        .route("/preserve", post(|| async { Redirect::temporary("/echo") }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// A local port with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
