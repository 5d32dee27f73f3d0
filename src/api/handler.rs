//! Lambda handler - feeds target-group events through an [`AlbAdapter`].

use lambda_runtime::{Error, LambdaEvent};
use tracing::{error, info};

use crate::adapter::AlbAdapter;
use crate::core::context::InvocationContext;
use crate::core::models::{AlbTargetGroupRequest, AlbTargetGroupResponse};
use crate::engine::Handler;

pub use self::function_handler as handler;

/// Lambda handler for the load balancer target.
///
/// Proxy failures are already logged by the adapter; the load balancer still
/// gets the structured fallback response (504, or 500 for an unresolvable
/// client address) rather than an invocation error.
///
/// # Errors
///
/// Never fails today; the `Result` matches what `lambda_runtime` expects.
pub async fn function_handler<H: Handler>(
    adapter: &AlbAdapter<H>,
    event: LambdaEvent<AlbTargetGroupRequest>,
) -> Result<AlbTargetGroupResponse, Error> {
    let (payload, context) = event.into_parts();
    let ctx = InvocationContext::from(&context);
    info!(request_id = %ctx.request_id(), "ALB Lambda received request");

    match adapter.proxy_with_context(&ctx, payload) {
        Ok(response) => Ok(response),
        Err(e) => {
            error!(request_id = %ctx.request_id(), status = e.status_code(), "Returning fallback response");
            Ok(e.fallback_response())
        }
    }
}
