//! Load balancer event to generic HTTP request conversion.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, Request, Uri};
use tracing::debug;
use url::form_urlencoded;

use crate::core::context::InvocationContext;
use crate::core::models::{AlbRequestContext, AlbTargetGroupRequest};
use crate::errors::ConversionError;

/// Normalised in-memory request built from an event.
pub type GenericRequest = Request<Vec<u8>>;

/// Header carrying the JSON-encoded target group context on plain proxy calls.
pub const ALB_CONTEXT_HEADER: &str = "x-alb-target-group-context";

/// Client address recorded when the event has no `X-Forwarded-For`.
pub const UNSPECIFIED_REMOTE_ADDR: &str = "0.0.0.0:0";

/// Textual client address of a generic request, resolved later by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAddr(pub String);

#[derive(Debug, Clone, Default)]
pub struct RequestAccessor {
    strip_base_path: String,
}

impl RequestAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix removed from every incoming path and returns the stored
    /// form: leading slash, no trailing slash. A blank prefix clears it.
    pub fn strip_base_path(&mut self, base_path: &str) -> String {
        let trimmed = base_path.trim();
        if trimmed.is_empty() {
            self.strip_base_path.clear();
            return String::new();
        }

        let mut normalised = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        if normalised.len() > 1 && normalised.ends_with('/') {
            normalised.pop();
        }

        self.strip_base_path.clone_from(&normalised);
        normalised
    }

    pub fn base_path(&self) -> &str {
        &self.strip_base_path
    }

    /// Converts an event and attaches its target group context as a header.
    pub fn proxy_event_to_http_request(
        &self,
        event: AlbTargetGroupRequest,
    ) -> Result<GenericRequest, ConversionError> {
        let context = serde_json::to_string(&event.request_context)?;
        let mut request = self.event_to_request(event)?;
        let value = HeaderValue::from_bytes(context.as_bytes())
            .map_err(|_| ConversionError::HeaderValue(ALB_CONTEXT_HEADER.to_string()))?;
        request
            .headers_mut()
            .insert(HeaderName::from_static(ALB_CONTEXT_HEADER), value);
        Ok(request)
    }

    /// Converts an event while honouring the invocation's cancellation and
    /// deadline; both contexts travel as request extensions.
    pub fn event_to_request_with_context(
        &self,
        ctx: &InvocationContext,
        event: AlbTargetGroupRequest,
    ) -> Result<GenericRequest, ConversionError> {
        ctx.check()?;
        let alb_context = event.request_context.clone();
        let mut request = self.event_to_request(event)?;
        ctx.check()?;

        request.extensions_mut().insert(alb_context);
        request.extensions_mut().insert(ctx.clone());
        Ok(request)
    }

    pub fn event_to_request(
        &self,
        event: AlbTargetGroupRequest,
    ) -> Result<GenericRequest, ConversionError> {
        let host = event.header("host").map(str::to_string);
        let remote_addr = event
            .header("x-forwarded-for")
            .map_or_else(
                || UNSPECIFIED_REMOTE_ADDR.to_string(),
                |forwarded| forwarded.split(',').next().unwrap_or_default().trim().to_string(),
            );

        let AlbTargetGroupRequest {
            http_method,
            path,
            query_string_parameters,
            multi_value_query_string_parameters,
            headers,
            multi_value_headers,
            is_base64_encoded,
            body,
            ..
        } = event;

        let body = if is_base64_encoded {
            STANDARD.decode(body.as_bytes())?
        } else {
            body.into_bytes()
        };

        let method = Method::from_bytes(http_method.to_ascii_uppercase().as_bytes())
            .map_err(|_| ConversionError::Method(http_method.clone()))?;

        let mut target = self.resolve_path(&path);
        let mut query = form_urlencoded::Serializer::new(String::new());
        if multi_value_query_string_parameters.is_empty() {
            for (key, value) in &query_string_parameters {
                query.append_pair(key, value);
            }
        } else {
            for (key, values) in &multi_value_query_string_parameters {
                for value in values {
                    query.append_pair(key, value);
                }
            }
        }
        let query = query.finish();
        if !query.is_empty() {
            target.push('?');
            target.push_str(&query);
        }

        let uri = match host.as_deref() {
            Some(host) if !host.is_empty() => format!("https://{host}{target}"),
            _ => target,
        };
        let uri: Uri = uri.parse().map_err(|_| ConversionError::Uri(uri.clone()))?;

        let mut request = Request::new(body);
        *request.method_mut() = method;
        *request.uri_mut() = uri;

        let header_map = request.headers_mut();
        if multi_value_headers.is_empty() {
            for (name, value) in &headers {
                append_header(header_map, name, value)?;
            }
        } else {
            for (name, values) in &multi_value_headers {
                for value in values {
                    append_header(header_map, name, value)?;
                }
            }
        }

        request.extensions_mut().insert(RemoteAddr(remote_addr));

        debug!(
            method = %request.method(),
            uri = %request.uri(),
            body_len = request.body().len(),
            "converted event to request"
        );
        Ok(request)
    }

    // Strips the base path on a segment boundary and ensures a leading slash.
    fn resolve_path(&self, raw: &str) -> String {
        let mut path = raw;
        if self.strip_base_path.len() > 1 {
            if let Some(rest) = path.strip_prefix(self.strip_base_path.as_str()) {
                if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') {
                    path = rest;
                }
            }
        }

        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        }
    }
}

fn append_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), ConversionError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ConversionError::HeaderName(name.to_string()))?;
    let header_value =
        HeaderValue::from_str(value).map_err(|_| ConversionError::HeaderValue(name.to_string()))?;
    headers.append(header_name, header_value);
    Ok(())
}

/// Target group context of a converted request, from its extensions or, for
/// plain proxy calls, from the context header.
pub fn alb_context(request: &GenericRequest) -> Result<AlbRequestContext, ConversionError> {
    if let Some(context) = request.extensions().get::<AlbRequestContext>() {
        return Ok(context.clone());
    }
    let raw = request
        .headers()
        .get(ALB_CONTEXT_HEADER)
        .ok_or(ConversionError::MissingContext)?;
    Ok(serde_json::from_slice(raw.as_bytes())?)
}

pub fn invocation_context(request: &GenericRequest) -> Option<&InvocationContext> {
    request.extensions().get::<InvocationContext>()
}

/// Textual client address; empty when the request was not built from an event.
pub fn remote_addr(request: &GenericRequest) -> &str {
    request
        .extensions()
        .get::<RemoteAddr>()
        .map_or("", |addr| addr.0.as_str())
}

/// Host the request was addressed to: `Host` header first, then the URI authority.
pub fn host(request: &GenericRequest) -> &str {
    request
        .headers()
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().authority().map(|authority| authority.as_str()))
        .unwrap_or_default()
}
