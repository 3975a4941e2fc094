//! Structured logging for decorated calls.
//!
//! The logging decorator never changes a call's outcome: it derives a
//! per-call [`CallContext`] naming the package, service and method, and hands
//! failed calls to a [`LogSink`] together with the redacted input fields.

use crate::context::{CallContext, Fields};
use crate::CallResult;
use std::error::Error;
use std::future::Future;
use std::sync::Arc;

pub const PACKAGE_FIELD: &str = "rpc_package";
pub const SERVICE_FIELD: &str = "rpc_service";
pub const METHOD_FIELD: &str = "rpc_method";

/// Backend receiving records of failed calls.
pub trait LogSink: Send + Sync {
    fn record(&self, ctx: &CallContext, error: &(dyn Error + Send + Sync + 'static), payload: &Fields);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn record(&self, ctx: &CallContext, error: &(dyn Error + Send + Sync + 'static), payload: &Fields) {
        (**self).record(ctx, error, payload)
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn record(&self, ctx: &CallContext, error: &(dyn Error + Send + Sync + 'static), payload: &Fields) {
        (**self).record(ctx, error, payload)
    }
}

/// Emits failed calls as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn record(&self, ctx: &CallContext, error: &(dyn Error + Send + Sync + 'static), payload: &Fields) {
        tracing::error!(
            error = %error,
            context = ?ctx.fields(),
            payload = ?payload,
            "rpc call failed"
        );
    }
}

/// Runs one decorated call and records it if it fails.
pub async fn observe<L, T, F>(sink: &L, ctx: &CallContext, payload: Fields, call: F) -> CallResult<T>
where
    L: LogSink + ?Sized,
    F: Future<Output = CallResult<T>>,
{
    let result = call.await;
    if let Err(error) = &result {
        sink.record(ctx, &**error, &payload);
    }
    result
}
