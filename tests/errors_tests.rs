use std::error::Error;

use alb_bridge::core::context::ContextError;
use alb_bridge::errors::{CaptureError, ConversionError, ProxyError};

#[test]
fn test_proxy_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = ProxyError::from(CaptureError::StatusNotSet);
    assert_error(&error);
}

#[test]
fn test_proxy_error_display() {
    let error = ProxyError::from(ConversionError::Method("GE T".to_string()));
    assert_eq!(
        format!("{error}"),
        "Could not convert proxy event to request: invalid HTTP method 'GE T'"
    );

    let error = ProxyError::from(CaptureError::StatusNotSet);
    assert_eq!(
        format!("{error}"),
        "Error while generating proxy response: Status code not set on response"
    );

    let error = ProxyError::RemoteAddress {
        addr: String::new(),
        reason: "invalid IP address syntax".to_string(),
    };
    assert_eq!(
        format!("{error}"),
        "Could not resolve remote address '': invalid IP address syntax"
    );
}

#[test]
fn test_context_error_is_transparent() {
    let error = ConversionError::from(ContextError::DeadlineExceeded);
    assert_eq!(format!("{error}"), "invocation deadline exceeded");
}

#[test]
fn test_source_chain() {
    let error = ProxyError::from(CaptureError::InvalidStatus(42));
    let source = error.source().expect("capture error should be the source");
    assert_eq!(source.to_string(), "Invalid status code 42 on response");
}

#[test]
fn test_fallback_responses() {
    let conversion = ProxyError::from(ConversionError::MissingContext);
    assert_eq!(conversion.fallback_response().status_code, 504);
    assert_eq!(conversion.status_code(), 504);

    let capture = ProxyError::from(CaptureError::StatusNotSet);
    assert_eq!(capture.fallback_response().status_code, 504);

    let remote = ProxyError::RemoteAddress {
        addr: "x".to_string(),
        reason: "bad".to_string(),
    };
    assert_eq!(remote.fallback_response().status_code, 500);
    assert_eq!(remote.status_code(), 500);
}

#[test]
fn test_logged_returns_same_error() {
    let error = ProxyError::from(CaptureError::StatusNotSet).logged();
    assert!(matches!(
        error,
        ProxyError::ResponseCapture(CaptureError::StatusNotSet)
    ));
}
