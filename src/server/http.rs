//! HTTP server implementation
//!
//! hyper http1 with TokioIo, one task per connection. Routing is a plain
//! match on (method, path) with `strip_prefix` for the id path parameter.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::Args;
use crate::db::InterruptionStore;
use crate::routes;
use crate::types::TrailError;

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub store: Arc<dyn InterruptionStore>,
}

impl AppState {
    pub fn new(args: Args, store: Arc<dyn InterruptionStore>) -> Self {
        Self { args, store }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), TrailError> {
    let listener = TcpListener::bind(("localhost", state.args.port)).await?;

    info!("Trail listening on localhost:{}", state.args.port);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    debug!("{} {}", method, path);

    let response = match (method, path.as_str()) {
        // Liveness probe
        (Method::GET, "/health") => routes::health_check(),

        // Add a new interruption (id and timestamp are server-assigned)
        (Method::POST, "/int") => routes::create_interruption(state, req).await,

        // List all current interruptions
        (Method::GET, "/int") => routes::list_interruptions(state).await,

        // Search interruptions by id
        (Method::GET, p) if p.starts_with("/int/") => {
            let id = p.strip_prefix("/int/").unwrap_or("");
            routes::search_interruptions(state, id).await
        }

        // Update an existing interruption by id (full replacement)
        (Method::PUT, p) if p.starts_with("/int/") => {
            let id = p.strip_prefix("/int/").unwrap_or("").to_string();
            routes::update_interruption(state, req, &id).await
        }

        // Delete an interruption by id
        (Method::DELETE, p) if p.starts_with("/int/") => {
            let id = p.strip_prefix("/int/").unwrap_or("");
            routes::delete_interruption(state, id).await
        }

        _ => not_found_response(&path),
    };

    Ok(response)
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "message": format!("No route for {}", path) });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json; charset=utf-8")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_shape() {
        let response = not_found_response("/nope");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()["Content-Type"],
            "application/json; charset=utf-8"
        );
    }
}
