use std::net::{IpAddr, SocketAddr};

use http::header::{self, HeaderValue};

use super::headers::EngineHeaders;
use super::request::EngineRequest;
use crate::core::models::AlbRequestContext;

/// Low-level response the engine's handler fills in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineResponse {
    status: u16,
    headers: EngineHeaders,
    body: Vec<u8>,
}

impl Default for EngineResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: EngineHeaders::default(),
            body: Vec::new(),
        }
    }
}

impl EngineResponse {
    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn set_status_code(&mut self, status: u16) {
        self.status = status;
    }

    pub fn headers(&self) -> &EngineHeaders {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut EngineHeaders {
        &mut self.headers
    }

    pub fn set_content_type(&mut self, content_type: &'static str) {
        self.headers
            .set(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    pub fn append_body(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }
}

/// Request/response pair passed through the engine's handler.
#[derive(Debug)]
pub struct RequestCtx<'a> {
    request: &'a EngineRequest,
    response: EngineResponse,
    remote_addr: SocketAddr,
    alb_context: Option<AlbRequestContext>,
}

impl<'a> RequestCtx<'a> {
    pub fn init(request: &'a EngineRequest, remote_addr: SocketAddr) -> Self {
        Self {
            request,
            response: EngineResponse::default(),
            remote_addr,
            alb_context: None,
        }
    }

    #[must_use]
    pub fn with_alb_context(mut self, context: Option<AlbRequestContext>) -> Self {
        self.alb_context = context;
        self
    }

    pub fn request(&self) -> &EngineRequest {
        self.request
    }

    pub fn response(&self) -> &EngineResponse {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut EngineResponse {
        &mut self.response
    }

    pub fn into_response(self) -> EngineResponse {
        self.response
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    pub fn remote_ip(&self) -> IpAddr {
        self.remote_addr.ip()
    }

    /// Target group context of the originating event, when one was attached.
    pub fn alb_context(&self) -> Option<&AlbRequestContext> {
        self.alb_context.as_ref()
    }
}

/// Top-level request handler of the embedded engine.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut RequestCtx<'_>);
}

impl<F> Handler for F
where
    F: Fn(&mut RequestCtx<'_>) + Send + Sync,
{
    fn handle(&self, ctx: &mut RequestCtx<'_>) {
        self(ctx);
    }
}
