//! Embedded HTTP engine: pooled low-level requests, response capture and the
//! handler seam the proxy adapter drives.

pub mod ctx;
pub mod headers;
pub mod request;

pub use ctx::{EngineResponse, Handler, RequestCtx};
pub use headers::{EngineHeaders, MergeStrategy, merge_strategy};
pub use request::{EngineRequest, PooledRequest, RequestPool};
