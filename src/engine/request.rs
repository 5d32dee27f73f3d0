use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use http::header::{self, HeaderValue};
use http::Method;
use tracing::debug;

use super::headers::EngineHeaders;

/// Low-level request handed to the engine's handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRequest {
    method: Method,
    request_uri: String,
    host: String,
    headers: EngineHeaders,
    body: Vec<u8>,
}

impl Default for EngineRequest {
    fn default() -> Self {
        Self {
            method: Method::GET,
            request_uri: "/".to_string(),
            host: String::new(),
            headers: EngineHeaders::default(),
            body: Vec::new(),
        }
    }
}

impl EngineRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Path plus optional query, e.g. `/items?page=2`.
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    pub fn set_request_uri(&mut self, uri: impl Into<String>) {
        self.request_uri = uri.into();
    }

    pub fn path(&self) -> &str {
        self.request_uri
            .split_once('?')
            .map_or(self.request_uri.as_str(), |(path, _)| path)
    }

    pub fn query(&self) -> Option<&str> {
        self.request_uri.split_once('?').map(|(_, query)| query)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn headers(&self) -> &EngineHeaders {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut EngineHeaders {
        &mut self.headers
    }

    pub fn set_content_length(&mut self, len: usize) {
        self.headers.set(header::CONTENT_LENGTH, HeaderValue::from(len));
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Appendable body buffer.
    pub fn body_writer(&mut self) -> &mut Vec<u8> {
        &mut self.body
    }

    /// Clears every field but keeps the body allocation for reuse.
    pub fn reset(&mut self) {
        self.method = Method::GET;
        self.request_uri.clear();
        self.request_uri.push('/');
        self.host.clear();
        self.headers.reset();
        self.body.clear();
    }
}

/// Pool of reusable engine requests.
#[derive(Debug)]
pub struct RequestPool {
    idle: Mutex<Vec<EngineRequest>>,
    max_idle: usize,
}

impl Default for RequestPool {
    fn default() -> Self {
        Self::new(crate::core::config::DEFAULT_POOL_SIZE)
    }
}

impl RequestPool {
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
        }
    }

    /// Takes a request from the pool, or allocates one when the pool is empty.
    ///
    /// The request goes back to the pool, reset, when the guard drops.
    pub fn acquire(&self) -> PooledRequest<'_> {
        let request = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default();
        PooledRequest {
            pool: self,
            request: Some(request),
        }
    }

    pub fn idle_count(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn release(&self, mut request: EngineRequest) {
        request.reset();
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < self.max_idle {
            idle.push(request);
        } else {
            debug!(max_idle = self.max_idle, "request pool full, dropping request");
        }
    }
}

/// Scoped handle on a pooled request.
#[derive(Debug)]
pub struct PooledRequest<'a> {
    pool: &'a RequestPool,
    request: Option<EngineRequest>,
}

impl Deref for PooledRequest<'_> {
    type Target = EngineRequest;

    fn deref(&self) -> &EngineRequest {
        // Only emptied in `drop`.
        self.request.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl DerefMut for PooledRequest<'_> {
    fn deref_mut(&mut self) -> &mut EngineRequest {
        self.request.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl Drop for PooledRequest<'_> {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            self.pool.release(request);
        }
    }
}
