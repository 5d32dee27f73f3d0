use thiserror::Error;
use tracing::error;

use crate::core::context::ContextError;
use crate::core::models::{AlbTargetGroupResponse, gateway_timeout, internal_server_error};

/// Failure turning a load balancer event into a generic HTTP request.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("invalid base64 body: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid HTTP method '{0}'")]
    Method(String),

    #[error("invalid request URI '{0}'")]
    Uri(String),

    #[error("invalid header name '{0}'")]
    HeaderName(String),

    #[error("invalid value for header '{0}'")]
    HeaderValue(String),

    #[error("invalid target group context: {0}")]
    ContextEncoding(#[from] serde_json::Error),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("no target group context attached to request")]
    MissingContext,
}

/// Failure turning captured response data into a load balancer response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Status code not set on response")]
    StatusNotSet,

    #[error("Invalid status code {0} on response")]
    InvalidStatus(u16),
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Could not convert proxy event to request: {0}")]
    RequestConversion(#[source] ConversionError),

    #[error("Could not resolve remote address '{addr}': {reason}")]
    RemoteAddress { addr: String, reason: String },

    #[error("Error while generating proxy response: {0}")]
    ResponseCapture(#[source] CaptureError),
}

impl ProxyError {
    /// Logs the error where it is raised and hands it back for returning.
    #[must_use]
    pub fn logged(self) -> Self {
        error!(error = %self, status = self.status_code(), "proxy invocation failed");
        self
    }

    /// Structured response the load balancer receives for this failure.
    #[must_use]
    pub fn fallback_response(&self) -> AlbTargetGroupResponse {
        match self {
            ProxyError::RemoteAddress { .. } => internal_server_error(),
            ProxyError::RequestConversion(_) | ProxyError::ResponseCapture(_) => gateway_timeout(),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::RemoteAddress { .. } => 500,
            ProxyError::RequestConversion(_) | ProxyError::ResponseCapture(_) => 504,
        }
    }
}

impl From<ConversionError> for ProxyError {
    fn from(error: ConversionError) -> Self {
        ProxyError::RequestConversion(error)
    }
}

impl From<CaptureError> for ProxyError {
    fn from(error: CaptureError) -> Self {
        ProxyError::ResponseCapture(error)
    }
}
