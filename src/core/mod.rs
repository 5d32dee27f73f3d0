//! Wire types, configuration and invocation context

pub mod config;
pub mod context;
pub mod models;

pub use context::{ContextError, InvocationContext};
pub use models::{AlbRequestContext, AlbTargetGroupRequest, AlbTargetGroupResponse, HeaderMode};
