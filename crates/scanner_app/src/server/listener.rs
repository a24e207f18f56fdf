use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http_body_util::{BodyExt, Limited};
use hyper::{body::Incoming, service::Service, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use scanner_logging::{scanner_debug, scanner_info, scanner_warn};
use tokio::net::TcpListener;

use super::routes::{route, text, AppState, BoxError, ResponseBody};

/// Upper bound for request bodies; only `/scan` reads one.
const MAX_REQUEST_BODY: usize = 64 * 1024;

/// Accepts connections until Ctrl-C, one task per connection.
pub(crate) async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = tokio::signal::ctrl_c() => {
                scanner_info!("Shutting down");
                return Ok(());
            }
        };
        scanner_debug!("Connection from {}", peer);

        let io = TokioIo::new(stream);
        let service = ScannerService {
            state: state.clone(),
        };
        tokio::spawn(async move {
            if let Err(err) = hyper::server::conn::http1::Builder::new()
                .serve_connection(io, service)
                .await
            {
                scanner_warn!("Error serving connection from {}: {}", peer, err);
            }
        });
    }
}

#[derive(Clone)]
struct ScannerService {
    state: Arc<AppState>,
}

impl Service<Request<Incoming>> for ScannerService {
    type Response = Response<ResponseBody>;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let state = self.state.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            scanner_info!("{} {}", parts.method, parts.uri.path());

            let body = match Limited::new(body, MAX_REQUEST_BODY).collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(err) => {
                    return Ok(text(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read body: {err}"),
                    ));
                }
            };

            Ok(route(&state, &parts.method, parts.uri.path(), parts.uri.query(), body).await)
        })
    }
}
