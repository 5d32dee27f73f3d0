/// ALB Bridge - runs an embedded HTTP engine behind an AWS Application Load
/// Balancer Lambda target.
///
/// Every invocation follows one linear path:
/// 1. The target-group event is converted into a generic `http::Request`
/// 2. That request is copied into a pooled low-level engine request
/// 3. The engine's [`engine::Handler`] runs synchronously
/// 4. The engine response is captured and encoded as a target-group response
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda (`lambda_runtime`) as the invocation source
/// - `http` types for the generic request
/// - a small engine layer (`engine`) standing in for the web framework's own
///   request/response structures
/// - `tracing` with JSON output for `CloudWatch`
///
/// # Example
///
/// ```
/// use alb_bridge::adapter::AlbAdapter;
/// use alb_bridge::core::models::AlbTargetGroupRequest;
/// use alb_bridge::engine::RequestCtx;
///
/// let adapter = AlbAdapter::new(|ctx: &mut RequestCtx<'_>| {
///     let body = ctx.request().body().to_vec();
///     ctx.response_mut().set_body(body);
/// });
///
/// let event = AlbTargetGroupRequest {
///     http_method: "POST".to_string(),
///     path: "/echo".to_string(),
///     body: "hello".to_string(),
///     ..AlbTargetGroupRequest::default()
/// };
///
/// let response = adapter.proxy(event).unwrap();
/// assert_eq!(response.status_code, 200);
/// assert_eq!(response.body, "hello");
/// ```
// Module declarations
pub mod adapter;
pub mod api;
pub mod core;
pub mod engine;
pub mod errors;
pub mod utils;

pub use adapter::AlbAdapter;
pub use errors::{CaptureError, ConversionError, ProxyError};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration, filtered by `RUST_LOG` (default `info`). It
/// should be called once at the start of the Lambda `main`.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// alb_bridge::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
