//! Proxy adapter: load balancer event in, engine handler in the middle,
//! load balancer response out.

use std::net::{IpAddr, SocketAddr};

use http::header;
use tracing::{debug, info};

use crate::api::request::{self, GenericRequest, RequestAccessor};
use crate::api::response_writer::ProxyResponseWriter;
use crate::core::config::BridgeConfig;
use crate::core::context::InvocationContext;
use crate::core::models::{AlbTargetGroupRequest, AlbTargetGroupResponse, HeaderMode};
use crate::engine::{Handler, RequestCtx, RequestPool};
use crate::errors::{ConversionError, ProxyError};

/// Drives an engine [`Handler`] with load balancer target-group events.
///
/// Each call is independent; the only state shared between calls is the
/// pool of reset engine requests.
pub struct AlbAdapter<H> {
    accessor: RequestAccessor,
    handler: H,
    pool: RequestPool,
}

impl<H: Handler> AlbAdapter<H> {
    pub fn new(handler: H) -> Self {
        Self {
            accessor: RequestAccessor::new(),
            handler,
            pool: RequestPool::default(),
        }
    }

    pub fn with_config(handler: H, config: &BridgeConfig) -> Self {
        let mut adapter = Self {
            accessor: RequestAccessor::new(),
            handler,
            pool: RequestPool::new(config.pool_size),
        };
        if let Some(base_path) = &config.strip_base_path {
            adapter.strip_base_path(base_path);
        }
        adapter
    }

    /// See [`RequestAccessor::strip_base_path`].
    pub fn strip_base_path(&mut self, base_path: &str) -> String {
        self.accessor.strip_base_path(base_path)
    }

    pub fn pool(&self) -> &RequestPool {
        &self.pool
    }

    /// Converts the event, runs it through the handler and returns the
    /// captured response.
    ///
    /// # Errors
    ///
    /// Returns a logged [`ProxyError`] when the event cannot be converted, the
    /// client address cannot be resolved, or the captured response is invalid.
    /// [`ProxyError::fallback_response`] gives the payload to send instead.
    #[tracing::instrument(level = "info", skip_all, fields(method = %event.http_method, path = %event.path))]
    pub fn proxy(&self, event: AlbTargetGroupRequest) -> Result<AlbTargetGroupResponse, ProxyError> {
        let mode = event.header_mode();
        let request = self.accessor.proxy_event_to_http_request(event);
        self.proxy_internal(request, mode)
    }

    /// Same as [`AlbAdapter::proxy`], but conversion fails once `ctx` is
    /// cancelled or past its deadline. The handler call itself is not
    /// interrupted.
    ///
    /// # Errors
    ///
    /// See [`AlbAdapter::proxy`].
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(request_id = %ctx.request_id(), method = %event.http_method, path = %event.path)
    )]
    pub fn proxy_with_context(
        &self,
        ctx: &InvocationContext,
        event: AlbTargetGroupRequest,
    ) -> Result<AlbTargetGroupResponse, ProxyError> {
        let mode = event.header_mode();
        let request = self.accessor.event_to_request_with_context(ctx, event);
        self.proxy_internal(request, mode)
    }

    fn proxy_internal(
        &self,
        request: Result<GenericRequest, ConversionError>,
        mode: HeaderMode,
    ) -> Result<AlbTargetGroupResponse, ProxyError> {
        let request = request.map_err(|e| ProxyError::from(e).logged())?;

        let mut writer = ProxyResponseWriter::new(mode);
        self.adapt(&mut writer, &request).map_err(ProxyError::logged)?;

        let response = writer
            .get_proxy_response()
            .map_err(|e| ProxyError::from(e).logged())?;

        info!(
            status = response.status_code,
            base64 = response.is_base64_encoded,
            "proxied request"
        );
        Ok(response)
    }

    // Copies the generic request into a pooled engine request, runs the
    // handler, and writes the engine response into `writer`.
    fn adapt(&self, writer: &mut ProxyResponseWriter, request: &GenericRequest) -> Result<(), ProxyError> {
        let mut engine_request = self.pool.acquire();

        let body = request.body();
        engine_request.set_content_length(body.len());
        engine_request.body_writer().extend_from_slice(body);

        engine_request.set_method(request.method().clone());
        engine_request.set_request_uri(
            request
                .uri()
                .path_and_query()
                .map_or("/", |path_and_query| path_and_query.as_str()),
        );
        for (name, value) in request.headers() {
            engine_request.headers_mut().merge(name.clone(), value.clone());
        }
        // Host follows the merged header so both report the last value.
        let host = engine_request
            .headers()
            .get(&header::HOST)
            .and_then(|value| value.to_str().ok())
            .map_or_else(|| request::host(request).to_string(), str::to_string);
        engine_request.set_host(host);

        let remote_addr = resolve_remote_addr(request::remote_addr(request))?;
        let alb_context = request::alb_context(request).ok();

        debug!(
            remote_addr = %remote_addr,
            headers = engine_request.headers().len(),
            "invoking engine handler"
        );

        let mut ctx = RequestCtx::init(&engine_request, remote_addr).with_alb_context(alb_context);
        self.handler.handle(&mut ctx);
        let response = ctx.into_response();

        response.headers().visit_all(|name, value| {
            writer.headers_mut().append(name.clone(), value.clone());
        });
        writer.write_header(response.status_code());
        writer.write(response.body());

        Ok(())
    }
}

/// Resolves `ip:port` or a bare IP (port 0) into a socket address.
///
/// # Errors
///
/// Returns [`ProxyError::RemoteAddress`] for anything else, including the
/// empty string.
pub fn resolve_remote_addr(addr: &str) -> Result<SocketAddr, ProxyError> {
    let trimmed = addr.trim();
    trimmed
        .parse::<SocketAddr>()
        .or_else(|_| trimmed.parse::<IpAddr>().map(|ip| SocketAddr::new(ip, 0)))
        .map_err(|e| ProxyError::RemoteAddress {
            addr: addr.to_string(),
            reason: e.to_string(),
        })
}
