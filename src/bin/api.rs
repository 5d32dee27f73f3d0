use alb_bridge::AlbAdapter;
use alb_bridge::api::handler;
use alb_bridge::core::config::BridgeConfig;
use alb_bridge::engine::RequestCtx;
use http::Method;
use lambda_runtime::{Error, LambdaEvent, service_fn};

// Demonstration routes served behind the load balancer.
fn router(ctx: &mut RequestCtx<'_>) {
    let method = ctx.request().method().clone();
    let path = ctx.request().path().to_string();

    match (method, path.as_str()) {
        (Method::GET, "/health") => {
            ctx.response_mut().set_content_type("text/plain; charset=utf-8");
            ctx.response_mut().set_body("ok");
        }
        (method, _) => {
            let body = ctx.request().body().to_vec();
            let response = ctx.response_mut();
            response.set_content_type("application/json");
            response.set_body(
                serde_json::json!({
                    "method": method.as_str(),
                    "path": path,
                    "body": String::from_utf8_lossy(&body),
                })
                .to_string(),
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    alb_bridge::setup_logging();

    let config = BridgeConfig::from_env().map_err(Error::from)?;
    let adapter = AlbAdapter::with_config(router, &config);
    let adapter = &adapter;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<_>| async move {
        handler(adapter, event).await
    }))
    .await
}
