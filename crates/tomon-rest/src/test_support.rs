//! In-process mock REST servers for unit tests

use axum::Router;
use tokio::net::TcpListener;
use tomon_common::ApiConfig;

/// Serve `router` on an ephemeral port and return an `ApiConfig` pointing at it
pub async fn spawn_router(router: Router) -> ApiConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    ApiConfig {
        base_url: format!("http://{addr}/api/v1"),
        timeout: Some(std::time::Duration::from_secs(5)),
    }
}
