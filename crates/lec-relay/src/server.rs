use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use lec_config::RelayConfig;
use tiny_http::{Header, Method, Request, Response};
use tracing::{debug, info, warn};

use crate::error::RelayError;
use crate::forward::{Rejection, build_upstream_body, request_path};

/// How often the accept loop wakes up to check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Stops a running [`RelayServer`] from another thread.
#[derive(Debug, Clone)]
pub struct ShutdownHandle(Arc<AtomicBool>);

impl ShutdownHandle {
    /// The accept loop exits within one poll interval.
    pub fn shutdown(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Blocking HTTP relay. Accepts `{messages, response_format}` on one path and
/// forwards it upstream with the server-side credential.
///
/// `run` blocks the calling thread; async callers should drive it from
/// `tokio::task::spawn_blocking`. Each accepted request is handled on its own
/// worker thread, so a slow upstream never holds up the next caller.
pub struct RelayServer {
    server: tiny_http::Server,
    forwarder: Arc<Forwarder>,
    shutdown: ShutdownHandle,
}

/// Per-request state shared by the worker threads.
struct Forwarder {
    config: RelayConfig,
    upstream: reqwest::blocking::Client,
}

impl RelayServer {
    /// Bind the listening socket and build the upstream client.
    ///
    /// A missing API key is not an error here: the relay still starts and
    /// answers every forward with 503.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Bind`] if the address cannot be bound, or
    /// [`RelayError::Client`] if the HTTP client cannot be built.
    pub fn bind(config: RelayConfig) -> Result<Self, RelayError> {
        let server = tiny_http::Server::http(config.bind_addr.as_str()).map_err(|e| RelayError::Bind {
            addr: config.bind_addr.clone(),
            message: e.to_string(),
        })?;
        let upstream = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        if !config.is_configured() {
            warn!("relay started without an upstream API key; requests will be answered with 503");
        }
        Ok(Self {
            server,
            forwarder: Arc::new(Forwarder { config, upstream }),
            shutdown: ShutdownHandle(Arc::new(AtomicBool::new(false))),
        })
    }

    /// Actual bound address (useful when binding to port 0).
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Serve requests until shut down. Requests already handed to a worker
    /// finish on their own after the loop exits.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Recv`] if accepting a connection fails.
    pub fn run(&self) -> Result<(), RelayError> {
        let config = &self.forwarder.config;
        info!(
            addr = ?self.local_addr(),
            path = %config.path,
            upstream = %config.upstream_url,
            model = %config.model,
            "relay listening"
        );
        while !self.shutdown.is_shutdown() {
            if let Some(request) = self.server.recv_timeout(POLL_INTERVAL)? {
                let forwarder = Arc::clone(&self.forwarder);
                let spawned = thread::Builder::new()
                    .name("relay-worker".into())
                    .spawn(move || forwarder.handle(request));
                if let Err(error) = spawned {
                    // The request went down with the closure; tiny_http closes it.
                    warn!(%error, "failed to spawn relay worker");
                }
            }
        }
        info!("relay stopped");
        Ok(())
    }
}

impl Forwarder {
    fn handle(&self, mut request: Request) {
        let path = request_path(request.url());
        if path != self.config.path {
            debug!(path, "no route");
            return respond_rejection(request, &Rejection::not_found());
        }
        if request.method() != &Method::Post {
            debug!(method = %request.method(), "method not allowed");
            return respond_rejection(request, &Rejection::method_not_allowed());
        }

        let mut raw = Vec::new();
        if let Err(error) = request.as_reader().read_to_end(&mut raw) {
            warn!(%error, "failed to read request body");
            return respond_rejection(request, &Rejection::unreadable_body(&error.to_string()));
        }
        let body = match build_upstream_body(&raw, &self.config.model) {
            Ok(body) => body,
            Err(rejection) => {
                debug!(status = rejection.status, reason = %rejection.message, "rejected request");
                return respond_rejection(request, &rejection);
            }
        };
        if !self.config.is_configured() {
            return respond_rejection(request, &Rejection::not_configured());
        }

        match self.forward(&body) {
            Ok((status, content_type, bytes)) => {
                debug!(status, bytes = bytes.len(), "relayed upstream response");
                let mut response = Response::from_data(bytes).with_status_code(status);
                if let Ok(header) = Header::from_bytes("Content-Type", content_type) {
                    response.add_header(header);
                }
                respond(request, response);
            }
            Err(error) => {
                warn!(%error, "upstream request failed");
                respond_rejection(request, &Rejection::bad_gateway(&error.to_string()));
            }
        }
    }

    /// Returns the upstream status, content type, and body, unmodified.
    fn forward(&self, body: &serde_json::Value) -> Result<(u16, String, Vec<u8>), reqwest::Error> {
        let resp = self
            .upstream
            .post(&self.config.upstream_url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        let bytes = resp.bytes()?.to_vec();
        Ok((status, content_type, bytes))
    }
}

fn respond_rejection(request: Request, rejection: &Rejection) {
    let mut response = Response::from_string(rejection.body()).with_status_code(rejection.status);
    if let Ok(header) = Header::from_bytes("Content-Type", "application/json") {
        response.add_header(header);
    }
    if rejection.status == 405 {
        if let Ok(header) = Header::from_bytes("Allow", "POST") {
            response.add_header(header);
        }
    }
    respond(request, response);
}

fn respond<R: Read>(request: Request, response: Response<R>) {
    if let Err(error) = request.respond(response) {
        debug!(%error, "client disconnected before the response was written");
    }
}
